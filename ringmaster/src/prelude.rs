//! Common imports for most ringmaster applications.

pub use crate::{build_engine, build_engine_with, http_backend, run_events, BotConfig};
pub use crate::{
    ApiOutcome, BackendResult, BoxFuture, ChatId, ChatTransport, Command, DialogueEngine,
    DialogueEngineBuilder, DialogueError, DialogueErrorKind, DialogueHooks, DialogueKind,
    DocumentRef, EventBody, GatewayError, GatewayErrorKind, HttpModelBackend, IncomingEvent,
    MetricsDialogueHooks, ModelBackend, ModelCatalog, ModelId, NoopDialogueHooks,
    SafeDialogueHooks, Series, Session, SessionStore, Stage, Table, TracingDialogueHooks,
    TransportError,
};
