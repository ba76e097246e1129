//! Tracing-based observability hooks for turn and capability phases.
//!
//! ```rust
//! use cobserve::TracingObservabilityHooks;
//! use cchat::TurnHooks;
//!
//! fn accepts_turn_hooks(_hooks: &dyn TurnHooks) {}
//!
//! let hooks = TracingObservabilityHooks;
//! accepts_turn_hooks(&hooks);
//! ```

use std::time::Duration;

use ccommon::UserId;
use cchat::{ChatError, TurnHooks, TurnResult};
use ctooling::{
    CapabilityCall, CapabilityContext, CapabilityOutcome, CapabilityRuntimeHooks, ToolError,
};

#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObservabilityHooks;

impl TurnHooks for TracingObservabilityHooks {
    fn on_turn_start(&self, user_id: &UserId) {
        tracing::info!(phase = "turn", event = "start", user_id = %user_id);
    }

    fn on_capability_requested(&self, user_id: &UserId, capability: &str) {
        tracing::info!(
            phase = "turn",
            event = "capability_requested",
            user_id = %user_id,
            capability
        );
    }

    fn on_turn_success(&self, user_id: &UserId, result: &TurnResult, elapsed: Duration) {
        tracing::info!(
            phase = "turn",
            event = "success",
            user_id = %user_id,
            capability = result.capability.as_deref(),
            total_tokens = result.usage.total_tokens,
            elapsed_ms = elapsed.as_millis() as u64
        );
    }

    fn on_turn_failure(&self, user_id: &UserId, error: &ChatError, elapsed: Duration) {
        tracing::error!(
            phase = "turn",
            event = "failure",
            user_id = %user_id,
            error_kind = ?error.kind,
            elapsed_ms = elapsed.as_millis() as u64,
            error = %error
        );
    }
}

impl CapabilityRuntimeHooks for TracingObservabilityHooks {
    fn on_execution_start(&self, call: &CapabilityCall, context: &CapabilityContext) {
        tracing::info!(
            phase = "capability",
            event = "execution_start",
            capability = call.name(),
            user_id = %context.user_id,
            trace_id = context.trace_id.as_ref().map(|id| id.as_str())
        );
    }

    fn on_execution_success(
        &self,
        call: &CapabilityCall,
        context: &CapabilityContext,
        outcome: &CapabilityOutcome,
        elapsed: Duration,
    ) {
        tracing::info!(
            phase = "capability",
            event = "execution_success",
            capability = call.name(),
            user_id = %context.user_id,
            created_booking = outcome.created_booking.as_ref().map(|id| id.as_str()),
            elapsed_ms = elapsed.as_millis() as u64
        );
    }

    fn on_execution_failure(
        &self,
        call: &CapabilityCall,
        context: &CapabilityContext,
        error: &ToolError,
        elapsed: Duration,
    ) {
        tracing::error!(
            phase = "capability",
            event = "execution_failure",
            capability = call.name(),
            user_id = %context.user_id,
            error_kind = ?error.kind,
            elapsed_ms = elapsed.as_millis() as u64,
            error = %error
        );
    }

    fn on_soft_degrade(&self, call: &CapabilityCall, context: &CapabilityContext, detail: &str) {
        tracing::warn!(
            phase = "capability",
            event = "soft_degrade",
            capability = call.name(),
            user_id = %context.user_id,
            detail
        );
    }
}
