use std::sync::{Arc, Mutex};

use rcommon::ChatId;
use rdialogue::DialogueHooks;
use rsession::DialogueKind;

use crate::{MetricsDialogueHooks, SafeDialogueHooks, TracingDialogueHooks};

fn exercise_all_callbacks(hooks: &dyn DialogueHooks) {
    let chat = ChatId::new(1);
    hooks.on_event_routed(chat, "command");
    hooks.on_session_created(chat, DialogueKind::Training);
    hooks.on_backend_outcome("create_model", "success");
    hooks.on_backend_outcome("predict", "unavailable");
    hooks.on_user_error(chat, "invalid_input");
    hooks.on_session_cleared(chat);
}

#[test]
fn tracing_hooks_smoke_test_all_callbacks() {
    exercise_all_callbacks(&TracingDialogueHooks);
}

#[test]
fn metrics_hooks_smoke_test_all_callbacks() {
    exercise_all_callbacks(&MetricsDialogueHooks);
}

#[derive(Default, Clone)]
struct RecordingHooks {
    events: Arc<Mutex<Vec<&'static str>>>,
}

impl DialogueHooks for RecordingHooks {
    fn on_event_routed(&self, _chat: ChatId, _route: &'static str) {
        self.events.lock().expect("events lock").push("routed");
    }

    fn on_session_created(&self, _chat: ChatId, _kind: DialogueKind) {
        self.events.lock().expect("events lock").push("created");
    }

    fn on_session_cleared(&self, _chat: ChatId) {
        self.events.lock().expect("events lock").push("cleared");
    }

    fn on_backend_outcome(&self, _operation: &'static str, _outcome: &'static str) {
        self.events.lock().expect("events lock").push("outcome");
    }

    fn on_user_error(&self, _chat: ChatId, _reason: &'static str) {
        self.events.lock().expect("events lock").push("user_error");
    }
}

struct PanicHooks;

impl DialogueHooks for PanicHooks {
    fn on_event_routed(&self, _chat: ChatId, _route: &'static str) {
        panic!("routed panic");
    }

    fn on_session_created(&self, _chat: ChatId, _kind: DialogueKind) {
        panic!("created panic");
    }

    fn on_session_cleared(&self, _chat: ChatId) {
        panic!("cleared panic");
    }

    fn on_backend_outcome(&self, _operation: &'static str, _outcome: &'static str) {
        panic!("outcome panic");
    }

    fn on_user_error(&self, _chat: ChatId, _reason: &'static str) {
        panic!("user_error panic");
    }
}

#[test]
fn safe_hooks_delegate_when_inner_succeeds() {
    let inner = RecordingHooks::default();
    let events = Arc::clone(&inner.events);
    let hooks = SafeDialogueHooks::new(inner);

    exercise_all_callbacks(&hooks);

    assert_eq!(events.lock().expect("events lock").len(), 6);
}

#[test]
fn safe_hooks_swallow_panics() {
    let hooks = SafeDialogueHooks::new(PanicHooks);
    exercise_all_callbacks(&hooks);
}
