//! Capability adapters: the hotel inventory client, the simulated payment
//! gateway, and the front-desk router that executes capability calls.

mod desk;
mod error;
mod inventory;
mod payment;
mod types;

pub mod prelude {
    pub use crate::{
        BookingConfirmation, CreateBookingRequest, FrontDesk, HttpInventoryClient, InventoryApi,
        InventoryError, InventoryErrorKind, PaymentGateway, PaymentOutcome, Room,
        SimulatedPaymentGateway,
    };
}

pub use desk::FrontDesk;
pub use error::{InventoryError, InventoryErrorKind};
pub use inventory::{HttpInventoryClient, InventoryApi};
pub use payment::{PaymentGateway, PaymentOutcome, SimulatedPaymentGateway};
pub use types::{BookingConfirmation, CreateBookingRequest, Room};
