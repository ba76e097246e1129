//! Runtime wiring helpers assembling a ready-to-serve assistant.

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::Arc;
use std::time::Duration;

use cchat::{ChatPolicy, ConciergeService, TurnHooks};
use cdesk::{FrontDesk, HttpInventoryClient, InventoryApi, PaymentGateway, SimulatedPaymentGateway};
use cledger::{LedgerBackend, LedgerError, create_default_ledger_backend};
use cprovider::{
    ModelProvider, OpenAiHttpTransport, OpenAiProvider, ProviderError, SecureCredentialManager,
};
use ctooling::CapabilityRuntimeHooks;
use reqwest::Client;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildErrorKind {
    Provider,
    Ledger,
    Http,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildError {
    pub kind: BuildErrorKind,
    pub message: String,
}

impl BuildError {
    fn new(kind: BuildErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl Display for BuildError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}: {}", self.kind, self.message)
    }
}

impl Error for BuildError {}

impl From<ProviderError> for BuildError {
    fn from(value: ProviderError) -> Self {
        Self::new(BuildErrorKind::Provider, value.to_string())
    }
}

impl From<LedgerError> for BuildError {
    fn from(value: LedgerError) -> Self {
        Self::new(BuildErrorKind::Ledger, value.to_string())
    }
}

#[derive(Debug, Clone)]
pub struct ProviderBuildConfig {
    pub api_key: String,
    pub base_url: Option<String>,
    pub timeout: Duration,
}

impl ProviderBuildConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: None,
            timeout: Duration::from_secs(90),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

pub fn build_provider_from_api_key(
    api_key: impl Into<String>,
) -> Result<Arc<dyn ModelProvider>, ProviderError> {
    build_provider_with_config(ProviderBuildConfig::new(api_key))
}

/// Reads `OPENAI_API_KEY` (and optionally `OPENAI_BASE_URL`) from the
/// environment.
pub fn build_provider_from_env() -> Result<Arc<dyn ModelProvider>, ProviderError> {
    let api_key = std::env::var("OPENAI_API_KEY")
        .map_err(|_| ProviderError::authentication("OPENAI_API_KEY is not set"))?;

    let mut config = ProviderBuildConfig::new(api_key);
    if let Ok(base_url) = std::env::var("OPENAI_BASE_URL") {
        config = config.with_base_url(base_url);
    }

    build_provider_with_config(config)
}

pub fn build_provider_with_config(
    config: ProviderBuildConfig,
) -> Result<Arc<dyn ModelProvider>, ProviderError> {
    let api_key = config.api_key.trim().to_string();
    if api_key.is_empty() {
        return Err(ProviderError::authentication(
            "provider API key must not be empty",
        ));
    }

    let credentials = Arc::new(SecureCredentialManager::new());
    credentials.set_openai_api_key(api_key)?;

    let http = Client::builder()
        .timeout(config.timeout)
        .build()
        .map_err(|err| ProviderError::transport(err.to_string()))?;

    let mut transport = OpenAiHttpTransport::new(http);
    if let Some(base_url) = config.base_url {
        transport = transport.with_base_url(base_url);
    }

    Ok(Arc::new(OpenAiProvider::new(
        credentials,
        Arc::new(transport),
    )))
}

/// The assembled runtime: the turn service plus the ledger it persists to.
#[derive(Clone)]
pub struct ConciergeBundle {
    pub ledger: Arc<dyn LedgerBackend>,
    pub service: ConciergeService,
}

pub struct ConciergeBuilder {
    provider: Arc<dyn ModelProvider>,
    ledger: Option<Arc<dyn LedgerBackend>>,
    inventory: Option<Arc<dyn InventoryApi>>,
    gateway: Option<Arc<dyn PaymentGateway>>,
    policy: ChatPolicy,
    turn_hooks: Option<Arc<dyn TurnHooks>>,
    capability_hooks: Option<Arc<dyn CapabilityRuntimeHooks>>,
}

impl ConciergeBuilder {
    pub fn new(provider: Arc<dyn ModelProvider>) -> Self {
        Self {
            provider,
            ledger: None,
            inventory: None,
            gateway: None,
            policy: ChatPolicy::default(),
            turn_hooks: None,
            capability_hooks: None,
        }
    }

    pub fn ledger(mut self, ledger: Arc<dyn LedgerBackend>) -> Self {
        self.ledger = Some(ledger);
        self
    }

    pub fn inventory(mut self, inventory: Arc<dyn InventoryApi>) -> Self {
        self.inventory = Some(inventory);
        self
    }

    pub fn gateway(mut self, gateway: Arc<dyn PaymentGateway>) -> Self {
        self.gateway = Some(gateway);
        self
    }

    pub fn policy(mut self, policy: ChatPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn turn_hooks(mut self, hooks: Arc<dyn TurnHooks>) -> Self {
        self.turn_hooks = Some(hooks);
        self
    }

    pub fn capability_hooks(mut self, hooks: Arc<dyn CapabilityRuntimeHooks>) -> Self {
        self.capability_hooks = Some(hooks);
        self
    }

    pub fn build(self) -> Result<ConciergeBundle, BuildError> {
        let ledger = match self.ledger {
            Some(ledger) => ledger,
            None => create_default_ledger_backend()?,
        };

        let inventory: Arc<dyn InventoryApi> = match self.inventory {
            Some(inventory) => inventory,
            None => Arc::new(default_inventory_client()?),
        };

        let gateway = self
            .gateway
            .unwrap_or_else(|| Arc::new(SimulatedPaymentGateway::new()));

        let mut desk = FrontDesk::new(inventory, gateway, Arc::clone(&ledger));
        if let Some(hooks) = self.capability_hooks {
            desk = desk.with_hooks(hooks);
        }

        let mut service_builder =
            ConciergeService::builder(self.provider, Arc::clone(&ledger), Arc::new(desk))
                .policy(self.policy);
        if let Some(hooks) = self.turn_hooks {
            service_builder = service_builder.hooks(hooks);
        }

        Ok(ConciergeBundle {
            ledger,
            service: service_builder.build(),
        })
    }
}

fn default_inventory_client() -> Result<HttpInventoryClient, BuildError> {
    let http = Client::builder()
        .build()
        .map_err(|err| BuildError::new(BuildErrorKind::Http, err.to_string()))?;

    let mut client = HttpInventoryClient::new(http);
    if let Ok(base_url) = std::env::var("CONCIERGE_ROOMS_URL") {
        client = client.with_base_url(base_url);
    }

    Ok(client)
}
