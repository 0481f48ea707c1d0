//! Typed client for the ML model-lifecycle backend.
//!
//! Every backend capability is one request/response round-trip with a
//! three-way outcome: structural success, a structured rejection carrying the
//! backend's `meta` field errors, or a transport-level failure returned as a
//! value. No call retries automatically.

mod backend;
mod error;
mod types;

pub use backend::{BackendResult, GatewayFuture, HttpModelBackend, ModelBackend};
pub use error::{GatewayError, GatewayErrorKind};
pub use types::{
    ApiOutcome, ErrorMeta, FieldErrorDetail, FieldErrors, ModelCatalog, PredictRequest,
    RetrainRequest, TrainRequest,
};
