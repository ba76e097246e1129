//! Common imports for most concierge applications.

pub use crate::{
    BuildError, BuildErrorKind, ConciergeBuilder, ConciergeBundle, ProviderBuildConfig,
    build_provider_from_api_key, build_provider_from_env, build_provider_with_config,
};
pub use crate::{
    BookingId, BookingRecord, BoxFuture, CapabilityCall, CapabilityContext, CapabilityOutcome,
    CapabilityRuntime, ChatError, ChatErrorKind, ChatPolicy, ConciergeService,
    ConciergeServiceBuilder, FrontDesk, HistoryRetention, HttpInventoryClient,
    InMemoryLedgerBackend, InventoryApi, LedgerBackend, LedgerBackendConfig, LedgerError, Message,
    MetricsObservabilityHooks, ModelProvider, ModelRequest, PaymentGateway, PaymentMethod,
    PaymentOutcome, ProviderError, Role, Room, SimulatedPaymentGateway, SqliteLedgerBackend,
    ToolCatalog, ToolError, TracingObservabilityHooks, TurnHooks, TurnRequest, TurnResult,
    UserId, UserProfile,
};
