//! Chat-layer errors and classification.

use std::error::Error;
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatErrorKind {
    InvalidRequest,
    Provider,
    Ledger,
    Capability,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatError {
    pub kind: ChatErrorKind,
    pub message: String,
}

impl ChatError {
    pub fn new(kind: ChatErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::new(ChatErrorKind::InvalidRequest, message)
    }

    pub fn provider(message: impl Into<String>) -> Self {
        Self::new(ChatErrorKind::Provider, message)
    }

    pub fn ledger(message: impl Into<String>) -> Self {
        Self::new(ChatErrorKind::Ledger, message)
    }

    pub fn capability(message: impl Into<String>) -> Self {
        Self::new(ChatErrorKind::Capability, message)
    }
}

impl Display for ChatError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}: {}", self.kind, self.message)
    }
}

impl Error for ChatError {}

impl From<cprovider::ProviderError> for ChatError {
    fn from(value: cprovider::ProviderError) -> Self {
        ChatError::provider(value.to_string())
    }
}

impl From<cledger::LedgerError> for ChatError {
    fn from(value: cledger::LedgerError) -> Self {
        ChatError::ledger(value.to_string())
    }
}

impl From<ctooling::ToolError> for ChatError {
    fn from(value: ctooling::ToolError) -> Self {
        ChatError::capability(value.to_string())
    }
}
