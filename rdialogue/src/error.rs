//! Engine-level errors.
//!
//! Everything a user can cause — bad input, oversized or unparsable files,
//! backend rejections, backend unavailability — is answered with a chat
//! message and is not an error here. `DialogueError` covers only the engine's
//! own failures: the outbound transport, the session store, or artifact IO.

use std::error::Error;
use std::fmt::{Display, Formatter};

use rsession::SessionError;

use crate::TransportError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogueErrorKind {
    /// Sending or fetching through the chat transport failed.
    Transport,
    /// The session store refused an operation or is poisoned.
    Store,
    /// Materializing or removing a delivery artifact failed, or a draft was
    /// structurally incomplete at its terminal stage.
    Internal,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DialogueError {
    pub kind: DialogueErrorKind,
    pub message: String,
}

impl DialogueError {
    pub fn new(kind: DialogueErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn transport(message: impl Into<String>) -> Self {
        Self::new(DialogueErrorKind::Transport, message)
    }

    pub fn store(message: impl Into<String>) -> Self {
        Self::new(DialogueErrorKind::Store, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(DialogueErrorKind::Internal, message)
    }
}

impl Display for DialogueError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}: {}", self.kind, self.message)
    }
}

impl Error for DialogueError {}

impl From<TransportError> for DialogueError {
    fn from(value: TransportError) -> Self {
        DialogueError::transport(value.to_string())
    }
}

impl From<SessionError> for DialogueError {
    fn from(value: SessionError) -> Self {
        DialogueError::store(value.to_string())
    }
}
