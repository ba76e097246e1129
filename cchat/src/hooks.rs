//! Runtime hooks for turn lifecycle events.
//!
//! ```rust
//! use cchat::{NoopTurnHooks, TurnHooks};
//!
//! fn assert_hooks_trait(_hooks: &dyn TurnHooks) {}
//!
//! let hooks = NoopTurnHooks;
//! assert_hooks_trait(&hooks);
//! ```

use std::time::Duration;

use ccommon::UserId;

use crate::{ChatError, TurnResult};

pub trait TurnHooks: Send + Sync {
    fn on_turn_start(&self, _user_id: &UserId) {}

    fn on_capability_requested(&self, _user_id: &UserId, _capability: &str) {}

    fn on_turn_success(&self, _user_id: &UserId, _result: &TurnResult, _elapsed: Duration) {}

    fn on_turn_failure(&self, _user_id: &UserId, _error: &ChatError, _elapsed: Duration) {}
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NoopTurnHooks;

impl TurnHooks for NoopTurnHooks {}
