//! Persistence layer for guests, conversation transcripts, and bookings.

mod backend;
mod backends;
mod error;
mod types;

pub mod prelude {
    pub use crate::{
        BookingRecord, InMemoryLedgerBackend, LedgerBackend, LedgerBackendConfig, LedgerError,
        LedgerErrorKind, SqliteLedgerBackend, UserProfile, create_default_ledger_backend,
        create_ledger_backend,
    };
}

pub use backend::{
    InMemoryLedgerBackend, LedgerBackend, LedgerBackendConfig, SqliteLedgerBackend,
    create_default_ledger_backend, create_ledger_backend,
};
pub use error::{LedgerError, LedgerErrorKind};
pub use types::{BookingRecord, UserProfile};
