//! Capability runtime trait executed by the dialogue loop.

use ccommon::BoxFuture;

use crate::{CapabilityCall, CapabilityContext, CapabilityOutcome, ToolError};

pub type ToolFuture<'a, T> = BoxFuture<'a, T>;

/// Executes a validated capability call. Implementations own the calls to
/// the inventory backend and the payment gateway, plus any booking side
/// effects; the dialogue loop only sees the serialized outcome.
pub trait CapabilityRuntime: Send + Sync {
    fn execute<'a>(
        &'a self,
        call: CapabilityCall,
        context: CapabilityContext,
    ) -> ToolFuture<'a, Result<CapabilityOutcome, ToolError>>;
}
