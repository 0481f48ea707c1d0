//! Ordered event classification against the chat's session state.

use rsession::{DialogueKind, Session, Stage};

use crate::replies::DONE_SENTINEL;
use crate::{Command, DocumentRef, EventBody, IncomingEvent};

/// The handler an event dispatches to. Exactly one per event; first matching
/// predicate wins and none is re-evaluated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// No active session and the text is a recognized top-level command.
    Command(Command),
    /// Training at `ModelChoice`, text is one of the offered classes.
    ModelChoice(String),
    /// Training at `ParamChoice`, text is the sentinel — parameters done.
    ParamsDone,
    /// Training at `ParamChoice`, text is one of the offered parameters.
    ParamChoice(String),
    /// Training at `ParamValue`; any text is the value.
    ParamValue(String),
    /// An upload stage received a document attachment.
    Upload(DocumentRef),
    /// `/exit` with an active session.
    Cancel,
    /// Nothing matched; the session, if any, stays untouched.
    Invalid,
}

impl Route {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Command(_) => "command",
            Self::ModelChoice(_) => "model_choice",
            Self::ParamsDone => "params_done",
            Self::ParamChoice(_) => "param_choice",
            Self::ParamValue(_) => "param_value",
            Self::Upload(_) => "upload",
            Self::Cancel => "cancel",
            Self::Invalid => "invalid",
        }
    }
}

/// Classifies one event. The predicate order is load-bearing: a text that
/// happens to equal a valid choice while the session expects a file must fall
/// through to [`Route::Invalid`], not reach the choice steps.
pub fn route(session: Option<&Session>, event: &IncomingEvent) -> Route {
    let Some(session) = session else {
        if let EventBody::Text(text) = &event.body {
            if let Some(command) = Command::parse(text) {
                return Route::Command(command);
            }
        }

        return Route::Invalid;
    };

    if session.kind == DialogueKind::Training {
        if let EventBody::Text(text) = &event.body {
            match session.stage {
                Stage::ModelChoice if session.choices.iter().any(|choice| choice == text) => {
                    return Route::ModelChoice(text.clone());
                }
                // The sentinel outranks choice membership while parameters
                // are being picked.
                Stage::ParamChoice if text == DONE_SENTINEL => return Route::ParamsDone,
                Stage::ParamChoice if session.choices.iter().any(|choice| choice == text) => {
                    return Route::ParamChoice(text.clone());
                }
                Stage::ParamValue => return Route::ParamValue(text.clone()),
                _ => {}
            }
        }
    }

    if session.stage.expects_upload() {
        if let EventBody::Document(document) = &event.body {
            return Route::Upload(document.clone());
        }
    }

    if let EventBody::Text(text) = &event.body {
        if text.trim() == "/exit" {
            return Route::Cancel;
        }
    }

    Route::Invalid
}
