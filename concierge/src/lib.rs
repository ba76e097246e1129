//! Unified facade over the concierge workspace crates.
//!
//! This crate is designed to be the single dependency for most
//! applications. It re-exports the workspace crates and provides the
//! wiring that assembles a completion provider, a ledger, and the
//! front-desk adapters into a ready `ConciergeService`.
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use concierge::prelude::*;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let provider = build_provider_from_api_key("sk-example")?;
//! let bundle = ConciergeBuilder::new(provider)
//!     .ledger(Arc::new(InMemoryLedgerBackend::new()))
//!     .build()?;
//! # let _ = bundle;
//! # Ok(())
//! # }
//! ```

pub mod prelude;
pub mod runtime;

pub use cchat;
pub use ccommon;
pub use cdesk;
pub use cledger;
pub use cobserve;
pub use cprovider;
pub use ctooling;

pub use cchat::{
    ChatError, ChatErrorKind, ChatPolicy, ConciergeService, ConciergeServiceBuilder,
    HistoryRetention, MAX_CAPABILITY_ROUNDS, NoopTurnHooks, TurnHooks, TurnRequest, TurnResult,
    build_system_instruction,
};
pub use ccommon::{BookingId, BoxFuture, GenerationOptions, MetadataMap, TraceId, UserId};
pub use cdesk::{
    BookingConfirmation, CreateBookingRequest, FrontDesk, HttpInventoryClient, InventoryApi,
    InventoryError, InventoryErrorKind, PaymentGateway, PaymentOutcome, Room,
    SimulatedPaymentGateway,
};
pub use cledger::{
    BookingRecord, InMemoryLedgerBackend, LedgerBackend, LedgerBackendConfig, LedgerError,
    LedgerErrorKind, SqliteLedgerBackend, UserProfile, create_default_ledger_backend,
    create_ledger_backend,
};
pub use cobserve::{MetricsObservabilityHooks, TracingObservabilityHooks};
pub use cprovider::{
    Message, ModelProvider, ModelRequest, ModelRequestBuilder, ModelResponse, OpenAiHttpTransport,
    OpenAiProvider, OpenAiTransport, OutputItem, ProviderError, ProviderErrorKind, ProviderFuture,
    ProviderId, Role, SecretString, SecureCredentialManager, StopReason, TokenUsage, ToolCall,
    ToolDefinition,
};
pub use ctooling::{
    BookRoomArgs, CapabilityCall, CapabilityContext, CapabilityOutcome, CapabilityRuntime,
    CapabilityRuntimeHooks, NoopCapabilityRuntimeHooks, PaymentMethod, ProcessPaymentArgs,
    ToolCatalog, ToolError, ToolErrorKind,
};

pub use runtime::{
    BuildError, BuildErrorKind, ConciergeBuilder, ConciergeBundle, ProviderBuildConfig,
    build_provider_from_api_key, build_provider_from_env, build_provider_with_config,
};
