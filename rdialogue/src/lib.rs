//! Dialogue routing and stage-transition orchestration.
//!
//! An incoming chat event is classified against the chat's current session by
//! an ordered predicate table ([`route`]), then dispatched by the
//! [`DialogueEngine`], which drives the per-kind stage machines: collecting a
//! request draft turn by turn, ingesting uploads, and submitting the finished
//! payload to the backend.

mod engine;
mod error;
mod hooks;
mod router;
mod types;

pub mod replies;

pub use engine::{DialogueEngine, DialogueEngineBuilder};
pub use error::{DialogueError, DialogueErrorKind};
pub use hooks::{DialogueHooks, NoopDialogueHooks};
pub use router::{route, Route};
pub use types::{
    ChatTransport, Command, DocumentRef, EventBody, IncomingEvent, TransportError,
};
