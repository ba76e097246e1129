//! Capability layer: the static catalog, typed call validation, and the
//! execution contract for the three booking capabilities.

mod args;
mod call;
mod catalog;
mod error;
mod hooks;
mod runtime;
mod types;

pub mod prelude {
    pub use crate::{
        BookRoomArgs, CapabilityCall, CapabilityContext, CapabilityOutcome, CapabilityRuntime,
        CapabilityRuntimeHooks, NoopCapabilityRuntimeHooks, PaymentMethod, ProcessPaymentArgs,
        ToolCatalog, ToolError, ToolErrorKind, ToolFuture,
    };
}

pub use args::{parse_json_object, parse_json_value, required_f64, required_i64, required_string};
pub use call::{BookRoomArgs, CapabilityCall, PaymentMethod, ProcessPaymentArgs};
pub use catalog::{BOOK_ROOM, GET_ROOMS, PAYMENT_METHODS, PROCESS_PAYMENT, ToolCatalog};
pub use error::{ToolError, ToolErrorKind};
pub use hooks::{CapabilityRuntimeHooks, NoopCapabilityRuntimeHooks};
pub use runtime::{CapabilityRuntime, ToolFuture};
pub use types::{CapabilityContext, CapabilityOutcome};
