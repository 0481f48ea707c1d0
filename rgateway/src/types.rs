//! Wire payloads, outcome types, and the backend's validation `meta` shape.

use std::collections::BTreeMap;

use rtable::{Series, Table};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Model id -> descriptor, exactly as the backend lists trained models.
pub type ModelCatalog = BTreeMap<String, Value>;

/// Three-way call outcome. The transport-failure leg is the `Err` side of
/// [`crate::BackendResult`]; this enum carries the two cases where the
/// backend actually answered.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiOutcome<T> {
    /// 2xx answer with a parsed body.
    Success(T),
    /// Non-2xx answer carrying the `meta` validation details.
    Rejected(ErrorMeta),
}

/// The backend's `meta` field: either a plain message (deletes, missing ids)
/// or a field-keyed validation map.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ErrorMeta {
    Message(String),
    Fields(FieldErrors),
}

/// Top-level field -> detail. A detail is either a direct message or one
/// further level of subfield -> message list; the backend never nests deeper.
pub type FieldErrors = BTreeMap<String, FieldErrorDetail>;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum FieldErrorDetail {
    Message(String),
    Nested(BTreeMap<String, Vec<String>>),
}

#[derive(Debug, Deserialize)]
pub(crate) struct ErrorEnvelope {
    pub meta: ErrorMeta,
}

/// `POST ml_models` body. Field names are the backend's wire contract.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrainRequest {
    #[serde(rename = "class")]
    pub model_class: String,
    #[serde(rename = "params")]
    pub parameters: BTreeMap<String, String>,
    #[serde(rename = "X")]
    pub features: Table,
    #[serde(rename = "y")]
    pub target: Series,
}

/// `PUT ml_models/{id}` body.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RetrainRequest {
    #[serde(rename = "X")]
    pub features: Table,
    #[serde(rename = "y")]
    pub target: Series,
}

/// `GET ml_models/{id}/prediction` body.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PredictRequest {
    #[serde(rename = "X")]
    pub features: Table,
}
