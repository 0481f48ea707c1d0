//! Tracing-based hooks for dialogue routing, sessions, and backend calls.
//!
//! ```rust
//! use rdialogue::DialogueHooks;
//! use robserve::TracingDialogueHooks;
//!
//! fn accepts_dialogue_hooks(_hooks: &dyn DialogueHooks) {}
//!
//! let hooks = TracingDialogueHooks;
//! accepts_dialogue_hooks(&hooks);
//! ```

use rcommon::ChatId;
use rdialogue::DialogueHooks;
use rsession::DialogueKind;

#[derive(Debug, Clone, Copy, Default)]
pub struct TracingDialogueHooks;

impl DialogueHooks for TracingDialogueHooks {
    fn on_event_routed(&self, chat: ChatId, route: &'static str) {
        tracing::info!(
            phase = "dialogue",
            event = "event_routed",
            chat = chat.value(),
            route
        );
    }

    fn on_session_created(&self, chat: ChatId, kind: DialogueKind) {
        tracing::info!(
            phase = "dialogue",
            event = "session_created",
            chat = chat.value(),
            kind = ?kind
        );
    }

    fn on_session_cleared(&self, chat: ChatId) {
        tracing::info!(
            phase = "dialogue",
            event = "session_cleared",
            chat = chat.value()
        );
    }

    fn on_backend_outcome(&self, operation: &'static str, outcome: &'static str) {
        if outcome == "success" {
            tracing::info!(phase = "backend", event = "outcome", operation, outcome);
        } else {
            tracing::warn!(phase = "backend", event = "outcome", operation, outcome);
        }
    }

    fn on_user_error(&self, chat: ChatId, reason: &'static str) {
        tracing::warn!(
            phase = "dialogue",
            event = "user_error",
            chat = chat.value(),
            reason
        );
    }
}
