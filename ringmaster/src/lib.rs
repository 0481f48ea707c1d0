//! Unified facade over the ringmaster workspace crates.
//!
//! This crate is designed to be the single dependency for most applications:
//! it re-exports the member crates, provides the [`BotConfig`] builder, and
//! wires a [`DialogueEngine`] against the HTTP backend with the per-event
//! dispatch loop.
//!
//! ```rust
//! use ringmaster::BotConfig;
//!
//! let config = BotConfig::new().with_api_base_url("http://localhost:8000/");
//! assert!(ringmaster::http_backend(&config).is_ok());
//! ```

mod config;

pub mod prelude;
pub mod runtime;

pub use rcommon;
pub use rdialogue;
pub use rgateway;
pub use robserve;
pub use rrender;
pub use rsession;
pub use rtable;

pub use rcommon::{BoxFuture, ChatId, ModelId};
pub use rdialogue::{
    replies, route, ChatTransport, Command, DialogueEngine, DialogueEngineBuilder, DialogueError,
    DialogueErrorKind, DialogueHooks, DocumentRef, EventBody, IncomingEvent, NoopDialogueHooks,
    Route, TransportError,
};
pub use rgateway::{
    ApiOutcome, BackendResult, ErrorMeta, FieldErrorDetail, FieldErrors, GatewayError,
    GatewayErrorKind, HttpModelBackend, ModelBackend, ModelCatalog, PredictRequest,
    RetrainRequest, TrainRequest,
};
pub use robserve::{MetricsDialogueHooks, SafeDialogueHooks, TracingDialogueHooks};
pub use rrender::{render_field_errors, render_grouped_lists, render_list, render_meta, render_pretty};
pub use rsession::{
    DialogueKind, DraftPayload, Session, SessionError, SessionErrorKind, SessionStore, Stage,
};
pub use rtable::{
    check_size, parse_features, parse_target, series_to_csv, IngestError, IngestErrorKind,
    Series, Table, MAX_UPLOAD_BYTES,
};

pub use config::BotConfig;
pub use runtime::{build_engine, build_engine_with, http_backend, run_events};
