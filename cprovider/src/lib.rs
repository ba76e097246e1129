//! Completion-client layer: provider-agnostic request/response model and
//! the OpenAI-compatible adapter.

mod credentials;
mod error;
mod model;
mod provider;

pub mod adapters;

pub mod prelude {
    pub use crate::{
        Message, ModelProvider, ModelRequest, ModelRequestBuilder, ModelResponse, OutputItem,
        ProviderError, ProviderErrorKind, ProviderFuture, ProviderId, Role, StopReason,
        TokenUsage, ToolCall, ToolDefinition,
    };
}

pub use adapters::openai::{OpenAiHttpTransport, OpenAiProvider, OpenAiTransport};
pub use credentials::{SecretString, SecureCredentialManager};
pub use error::{ProviderError, ProviderErrorKind};
pub use model::{
    Message, ModelRequest, ModelRequestBuilder, ModelResponse, OutputItem, ProviderId, Role,
    StopReason, TokenUsage, ToolCall, ToolDefinition,
};
pub use provider::{ModelProvider, ProviderFuture};
