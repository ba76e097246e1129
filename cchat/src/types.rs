//! Turn request/result types and the chat policy.

use ccommon::UserId;
use cprovider::TokenUsage;

/// One inbound guest message. `message` may be empty; `user_id` may not.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnRequest {
    pub user_id: UserId,
    pub message: String,
}

impl TurnRequest {
    pub fn new(user_id: impl Into<UserId>, message: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnResult {
    pub user_id: UserId,
    pub reply: String,
    pub capability: Option<String>,
    pub usage: TokenUsage,
}

/// How much persisted history is replayed to the model each turn. The
/// ledger always keeps the complete transcript; this only bounds the
/// prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryRetention {
    Unbounded,
    Window(usize),
}

impl HistoryRetention {
    pub fn apply<T: Clone>(&self, history: &[T]) -> Vec<T> {
        match self {
            Self::Unbounded => history.to_vec(),
            Self::Window(limit) => {
                let start = history.len().saturating_sub(*limit);
                history[start..].to_vec()
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChatPolicy {
    pub model: String,
    pub temperature: Option<f32>,
    pub max_tokens: Option<u32>,
    pub retention: HistoryRetention,
}

impl Default for ChatPolicy {
    fn default() -> Self {
        Self {
            model: "gpt-3.5-turbo".to_string(),
            temperature: None,
            max_tokens: None,
            retention: HistoryRetention::Window(50),
        }
    }
}

impl ChatPolicy {
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    pub fn with_retention(mut self, retention: HistoryRetention) -> Self {
        self.retention = retention;
        self
    }
}
