//! Observability seams for the dialogue engine.
//!
//! The engine reports what happened; implementations decide where it goes.
//! All methods default to no-ops so implementors override only what they
//! record.

use rcommon::ChatId;
use rsession::DialogueKind;

pub trait DialogueHooks: Send + Sync {
    fn on_event_routed(&self, _chat: ChatId, _route: &'static str) {}

    fn on_session_created(&self, _chat: ChatId, _kind: DialogueKind) {}

    fn on_session_cleared(&self, _chat: ChatId) {}

    /// One backend round-trip resolved; `outcome` is `success`, `rejected`,
    /// or `unavailable`.
    fn on_backend_outcome(&self, _operation: &'static str, _outcome: &'static str) {}

    /// The user was told about a recoverable problem (`invalid_input`,
    /// `invalid_model_id`, `file_too_large`, `unparsable_file`,
    /// `fetch_failed`).
    fn on_user_error(&self, _chat: ChatId, _reason: &'static str) {}
}

/// Discards everything; the engine default.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopDialogueHooks;

impl DialogueHooks for NoopDialogueHooks {}
