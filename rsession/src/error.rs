//! Session-layer errors and classification.

use std::error::Error;
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionErrorKind {
    /// `create` for a chat that already has an active session.
    AlreadyActive,
    /// A mutation addressed a chat with no active session.
    NotFound,
    /// A draft mutator addressed a payload variant of another dialogue kind.
    WrongKind,
    /// The store itself failed (lock poisoned).
    Store,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionError {
    pub kind: SessionErrorKind,
    pub message: String,
}

impl SessionError {
    pub fn new(kind: SessionErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn already_active(message: impl Into<String>) -> Self {
        Self::new(SessionErrorKind::AlreadyActive, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(SessionErrorKind::NotFound, message)
    }

    pub fn wrong_kind(message: impl Into<String>) -> Self {
        Self::new(SessionErrorKind::WrongKind, message)
    }

    pub fn store(message: impl Into<String>) -> Self {
        Self::new(SessionErrorKind::Store, message)
    }
}

impl Display for SessionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}: {}", self.kind, self.message)
    }
}

impl Error for SessionError {}
