//! Per-chat dialogue sessions and their in-memory store.
//!
//! A session exists only while a multi-step dialogue is active for a chat.
//! It tracks the dialogue kind, the current stage, the inputs currently
//! acceptable, and the request draft accumulated across turns. Session and
//! draft are one value with one lifetime: created together on dialogue entry,
//! destroyed together on completion or cancellation.
//!
//! ```rust
//! use rcommon::ChatId;
//! use rsession::{DialogueKind, Session, SessionStore, Stage};
//!
//! let store = SessionStore::new();
//! let chat = ChatId::new(1);
//! let session = Session::new(
//!     DialogueKind::Training,
//!     Stage::ModelChoice,
//!     vec!["LogisticRegression".to_string()],
//! );
//!
//! store.create(chat, session).unwrap();
//! assert!(store.get(chat).unwrap().is_some());
//! store.clear(chat).unwrap();
//! store.clear(chat).unwrap(); // idempotent
//! ```

mod error;
mod store;
mod types;

pub use error::{SessionError, SessionErrorKind};
pub use store::SessionStore;
pub use types::{DialogueKind, DraftPayload, Session, Stage};
