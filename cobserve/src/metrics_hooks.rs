//! Metrics-based observability hooks for turn and capability phases.
//!
//! ```rust
//! use cobserve::MetricsObservabilityHooks;
//! use ctooling::CapabilityRuntimeHooks;
//!
//! fn accepts_capability_hooks(_hooks: &dyn CapabilityRuntimeHooks) {}
//!
//! let hooks = MetricsObservabilityHooks;
//! accepts_capability_hooks(&hooks);
//! ```

use std::time::Duration;

use ccommon::UserId;
use cchat::{ChatError, TurnHooks, TurnResult};
use ctooling::{
    CapabilityCall, CapabilityContext, CapabilityOutcome, CapabilityRuntimeHooks, ToolError,
};

#[derive(Debug, Clone, Copy, Default)]
pub struct MetricsObservabilityHooks;

impl TurnHooks for MetricsObservabilityHooks {
    fn on_turn_start(&self, _user_id: &UserId) {
        metrics::counter!("concierge_turn_start_total").increment(1);
    }

    fn on_capability_requested(&self, _user_id: &UserId, capability: &str) {
        metrics::counter!(
            "concierge_turn_capability_requested_total",
            "capability" => capability.to_string()
        )
        .increment(1);
    }

    fn on_turn_success(&self, _user_id: &UserId, result: &TurnResult, elapsed: Duration) {
        metrics::counter!("concierge_turn_success_total").increment(1);
        metrics::histogram!("concierge_turn_duration_seconds", "status" => "success")
            .record(elapsed.as_secs_f64());
        metrics::histogram!("concierge_turn_total_tokens")
            .record(f64::from(result.usage.total_tokens));
    }

    fn on_turn_failure(&self, _user_id: &UserId, error: &ChatError, elapsed: Duration) {
        metrics::counter!(
            "concierge_turn_failure_total",
            "error_kind" => format!("{:?}", error.kind)
        )
        .increment(1);
        metrics::histogram!("concierge_turn_duration_seconds", "status" => "failure")
            .record(elapsed.as_secs_f64());
    }
}

impl CapabilityRuntimeHooks for MetricsObservabilityHooks {
    fn on_execution_start(&self, call: &CapabilityCall, _context: &CapabilityContext) {
        metrics::counter!(
            "concierge_capability_execution_start_total",
            "capability" => call.name()
        )
        .increment(1);
    }

    fn on_execution_success(
        &self,
        call: &CapabilityCall,
        _context: &CapabilityContext,
        _outcome: &CapabilityOutcome,
        elapsed: Duration,
    ) {
        metrics::counter!(
            "concierge_capability_execution_success_total",
            "capability" => call.name()
        )
        .increment(1);
        metrics::histogram!(
            "concierge_capability_execution_duration_seconds",
            "capability" => call.name(),
            "status" => "success"
        )
        .record(elapsed.as_secs_f64());
    }

    fn on_execution_failure(
        &self,
        call: &CapabilityCall,
        _context: &CapabilityContext,
        error: &ToolError,
        elapsed: Duration,
    ) {
        metrics::counter!(
            "concierge_capability_execution_failure_total",
            "capability" => call.name(),
            "error_kind" => format!("{:?}", error.kind)
        )
        .increment(1);
        metrics::histogram!(
            "concierge_capability_execution_duration_seconds",
            "capability" => call.name(),
            "status" => "failure"
        )
        .record(elapsed.as_secs_f64());
    }

    fn on_soft_degrade(&self, call: &CapabilityCall, _context: &CapabilityContext, _detail: &str) {
        metrics::counter!(
            "concierge_capability_soft_degrade_total",
            "capability" => call.name()
        )
        .increment(1);
    }
}
