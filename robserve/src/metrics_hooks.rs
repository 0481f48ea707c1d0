//! Metrics-based hooks for dialogue routing, sessions, and backend calls.
//!
//! ```rust
//! use rdialogue::DialogueHooks;
//! use robserve::MetricsDialogueHooks;
//!
//! fn accepts_dialogue_hooks(_hooks: &dyn DialogueHooks) {}
//!
//! let hooks = MetricsDialogueHooks;
//! accepts_dialogue_hooks(&hooks);
//! ```

use rcommon::ChatId;
use rdialogue::DialogueHooks;
use rsession::DialogueKind;

#[derive(Debug, Clone, Copy, Default)]
pub struct MetricsDialogueHooks;

impl DialogueHooks for MetricsDialogueHooks {
    fn on_event_routed(&self, _chat: ChatId, route: &'static str) {
        metrics::counter!("ringmaster_events_routed_total", "route" => route).increment(1);
    }

    fn on_session_created(&self, _chat: ChatId, kind: DialogueKind) {
        metrics::counter!(
            "ringmaster_sessions_created_total",
            "kind" => format!("{kind:?}")
        )
        .increment(1);
        metrics::gauge!("ringmaster_sessions_active").increment(1.0);
    }

    fn on_session_cleared(&self, _chat: ChatId) {
        metrics::gauge!("ringmaster_sessions_active").decrement(1.0);
    }

    fn on_backend_outcome(&self, operation: &'static str, outcome: &'static str) {
        metrics::counter!(
            "ringmaster_backend_outcomes_total",
            "operation" => operation,
            "outcome" => outcome
        )
        .increment(1);
    }

    fn on_user_error(&self, _chat: ChatId, reason: &'static str) {
        metrics::counter!("ringmaster_user_errors_total", "reason" => reason).increment(1);
    }
}
