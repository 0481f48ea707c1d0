use std::panic::{AssertUnwindSafe, catch_unwind};

use rcommon::ChatId;
use rdialogue::DialogueHooks;
use rsession::DialogueKind;

/// Isolates the engine from a panicking hook implementation.
pub struct SafeDialogueHooks<H> {
    inner: H,
}

impl<H> SafeDialogueHooks<H> {
    pub fn new(inner: H) -> Self {
        Self { inner }
    }
}

impl<H> DialogueHooks for SafeDialogueHooks<H>
where
    H: DialogueHooks,
{
    fn on_event_routed(&self, chat: ChatId, route: &'static str) {
        let _ = catch_unwind(AssertUnwindSafe(|| self.inner.on_event_routed(chat, route)));
    }

    fn on_session_created(&self, chat: ChatId, kind: DialogueKind) {
        let _ = catch_unwind(AssertUnwindSafe(|| {
            self.inner.on_session_created(chat, kind)
        }));
    }

    fn on_session_cleared(&self, chat: ChatId) {
        let _ = catch_unwind(AssertUnwindSafe(|| self.inner.on_session_cleared(chat)));
    }

    fn on_backend_outcome(&self, operation: &'static str, outcome: &'static str) {
        let _ = catch_unwind(AssertUnwindSafe(|| {
            self.inner.on_backend_outcome(operation, outcome)
        }));
    }

    fn on_user_error(&self, chat: ChatId, reason: &'static str) {
        let _ = catch_unwind(AssertUnwindSafe(|| self.inner.on_user_error(chat, reason)));
    }
}
