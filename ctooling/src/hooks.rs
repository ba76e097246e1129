//! Runtime hooks for capability execution lifecycle events.
//!
//! ```rust
//! use ctooling::{CapabilityRuntimeHooks, NoopCapabilityRuntimeHooks};
//!
//! fn assert_hooks_trait(_hooks: &dyn CapabilityRuntimeHooks) {}
//!
//! let hooks = NoopCapabilityRuntimeHooks;
//! assert_hooks_trait(&hooks);
//! ```

use std::time::Duration;

use crate::{CapabilityCall, CapabilityContext, CapabilityOutcome, ToolError};

pub trait CapabilityRuntimeHooks: Send + Sync {
    fn on_execution_start(&self, _call: &CapabilityCall, _context: &CapabilityContext) {}

    fn on_execution_success(
        &self,
        _call: &CapabilityCall,
        _context: &CapabilityContext,
        _outcome: &CapabilityOutcome,
        _elapsed: Duration,
    ) {
    }

    fn on_execution_failure(
        &self,
        _call: &CapabilityCall,
        _context: &CapabilityContext,
        _error: &ToolError,
        _elapsed: Duration,
    ) {
    }

    fn on_soft_degrade(&self, _call: &CapabilityCall, _context: &CapabilityContext, _detail: &str) {
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NoopCapabilityRuntimeHooks;

impl CapabilityRuntimeHooks for NoopCapabilityRuntimeHooks {}
