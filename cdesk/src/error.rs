//! Inventory transport errors.

use std::error::Error;
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InventoryErrorKind {
    Transport,
    Status,
    Decode,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InventoryError {
    pub kind: InventoryErrorKind,
    pub message: String,
}

impl InventoryError {
    pub fn new(kind: InventoryErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn transport(message: impl Into<String>) -> Self {
        Self::new(InventoryErrorKind::Transport, message)
    }

    pub fn status(message: impl Into<String>) -> Self {
        Self::new(InventoryErrorKind::Status, message)
    }

    pub fn decode(message: impl Into<String>) -> Self {
        Self::new(InventoryErrorKind::Decode, message)
    }
}

impl Display for InventoryError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}: {}", self.kind, self.message)
    }
}

impl Error for InventoryError {}
