//! Backend trait and reqwest-based HTTP implementation.

use std::collections::BTreeMap;
use std::future::Future;
use std::pin::Pin;

use rcommon::ModelId;
use reqwest::{Client, Method, StatusCode};
use rtable::Series;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::types::ErrorEnvelope;
use crate::{
    ApiOutcome, ErrorMeta, GatewayError, ModelCatalog, PredictRequest, RetrainRequest,
    TrainRequest,
};

pub type GatewayFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

pub type BackendResult<T> = Result<ApiOutcome<T>, GatewayError>;

/// One method per backend capability. Single round-trip each, no retries;
/// the caller decides what a transport failure means for its dialogue.
pub trait ModelBackend: Send + Sync {
    fn list_models<'a>(&'a self) -> GatewayFuture<'a, BackendResult<ModelCatalog>>;

    fn list_classes<'a>(&'a self) -> GatewayFuture<'a, BackendResult<Vec<String>>>;

    fn list_parameters<'a>(
        &'a self,
    ) -> GatewayFuture<'a, BackendResult<BTreeMap<String, Vec<String>>>>;

    fn create_model<'a>(&'a self, request: TrainRequest) -> GatewayFuture<'a, BackendResult<Value>>;

    fn retrain_model<'a>(
        &'a self,
        id: ModelId,
        request: RetrainRequest,
    ) -> GatewayFuture<'a, BackendResult<Value>>;

    fn delete_model<'a>(&'a self, id: ModelId) -> GatewayFuture<'a, BackendResult<Value>>;

    fn predict<'a>(
        &'a self,
        id: ModelId,
        request: PredictRequest,
    ) -> GatewayFuture<'a, BackendResult<Series>>;
}

/// HTTP client for the backend REST surface. Timeouts are configured on the
/// injected [`Client`]; a timeout surfaces as a retryable transport failure.
#[derive(Debug, Clone)]
pub struct HttpModelBackend {
    client: Client,
    base_url: String,
}

impl HttpModelBackend {
    pub fn new(client: Client) -> Self {
        Self {
            client,
            base_url: "http://localhost:8000/".to_string(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), path)
    }

    /// Every request carries a JSON body (an empty object for bodiless
    /// calls) — the backend expects one on GETs too.
    async fn call<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Value,
    ) -> BackendResult<T> {
        let url = self.endpoint(path);
        let response = self
            .client
            .request(method, url)
            .json(&body)
            .send()
            .await
            .map_err(|err| {
                if err.is_timeout() {
                    GatewayError::timeout(err.to_string())
                } else {
                    GatewayError::transport(err.to_string())
                }
            })?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|err| GatewayError::transport(err.to_string()))?;

        outcome_from_parts(status, &text)
    }

    fn body_of<B: serde::Serialize>(request: &B) -> Result<Value, GatewayError> {
        serde_json::to_value(request).map_err(|err| GatewayError::decode(err.to_string()))
    }
}

impl ModelBackend for HttpModelBackend {
    fn list_models<'a>(&'a self) -> GatewayFuture<'a, BackendResult<ModelCatalog>> {
        Box::pin(async move { self.call(Method::GET, "ml_models", Value::Object(Default::default())).await })
    }

    fn list_classes<'a>(&'a self) -> GatewayFuture<'a, BackendResult<Vec<String>>> {
        Box::pin(async move { self.call(Method::GET, "classes", Value::Object(Default::default())).await })
    }

    fn list_parameters<'a>(
        &'a self,
    ) -> GatewayFuture<'a, BackendResult<BTreeMap<String, Vec<String>>>> {
        Box::pin(async move { self.call(Method::GET, "parameters", Value::Object(Default::default())).await })
    }

    fn create_model<'a>(&'a self, request: TrainRequest) -> GatewayFuture<'a, BackendResult<Value>> {
        Box::pin(async move {
            let body = Self::body_of(&request)?;
            self.call(Method::POST, "ml_models", body).await
        })
    }

    fn retrain_model<'a>(
        &'a self,
        id: ModelId,
        request: RetrainRequest,
    ) -> GatewayFuture<'a, BackendResult<Value>> {
        Box::pin(async move {
            let body = Self::body_of(&request)?;
            let path = format!("ml_models/{}", id.as_str());
            self.call(Method::PUT, &path, body).await
        })
    }

    fn delete_model<'a>(&'a self, id: ModelId) -> GatewayFuture<'a, BackendResult<Value>> {
        Box::pin(async move {
            let path = format!("ml_models/{}", id.as_str());
            self.call(Method::DELETE, &path, Value::Object(Default::default()))
                .await
        })
    }

    fn predict<'a>(
        &'a self,
        id: ModelId,
        request: PredictRequest,
    ) -> GatewayFuture<'a, BackendResult<Series>> {
        Box::pin(async move {
            let body = Self::body_of(&request)?;
            let path = format!("ml_models/{}/prediction", id.as_str());
            self.call(Method::GET, &path, body).await
        })
    }
}

/// Classifies an answered request: 2xx bodies parse into the capability's
/// type, anything else is a rejection carrying the `meta` details. An error
/// body without a readable `meta` degrades to a plain status message.
fn outcome_from_parts<T: DeserializeOwned>(status: StatusCode, body: &str) -> BackendResult<T> {
    if status.is_success() {
        let text = if body.trim().is_empty() { "null" } else { body };
        let parsed = serde_json::from_str::<T>(text)
            .map_err(|err| GatewayError::decode(format!("bad success body: {err}")))?;
        return Ok(ApiOutcome::Success(parsed));
    }

    let meta = match serde_json::from_str::<ErrorEnvelope>(body) {
        Ok(envelope) => envelope.meta,
        Err(_) => ErrorMeta::Message(format!("backend returned status {status}")),
    };

    Ok(ApiOutcome::Rejected(meta))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_bodies_parse_into_the_capability_type() {
        let outcome: BackendResult<Vec<String>> =
            outcome_from_parts(StatusCode::OK, "[\"a\",\"b\"]");

        assert_eq!(
            outcome.expect("answered"),
            ApiOutcome::Success(vec!["a".to_string(), "b".to_string()])
        );
    }

    #[test]
    fn empty_success_bodies_are_null_values() {
        let outcome: BackendResult<Value> = outcome_from_parts(StatusCode::OK, "  ");
        assert_eq!(outcome.expect("answered"), ApiOutcome::Success(Value::Null));
    }

    #[test]
    fn undecodable_success_bodies_are_decode_errors() {
        let outcome: BackendResult<Vec<String>> =
            outcome_from_parts(StatusCode::OK, "not json at all");

        let err = outcome.expect_err("must fail");
        assert_eq!(err.kind, crate::GatewayErrorKind::Decode);
        assert!(!err.retryable);
    }

    #[test]
    fn error_bodies_surface_their_meta_field() {
        let outcome: BackendResult<Value> = outcome_from_parts(
            StatusCode::UNPROCESSABLE_ENTITY,
            "{\"meta\":{\"class\":\"unknown class\"}}",
        );

        let ApiOutcome::Rejected(ErrorMeta::Fields(fields)) = outcome.expect("answered") else {
            panic!("expected rejection with fields");
        };
        assert!(fields.contains_key("class"));
    }

    #[test]
    fn metaless_error_bodies_degrade_to_a_status_message() {
        let outcome: BackendResult<Value> =
            outcome_from_parts(StatusCode::INTERNAL_SERVER_ERROR, "<html>oops</html>");

        let ApiOutcome::Rejected(ErrorMeta::Message(message)) = outcome.expect("answered") else {
            panic!("expected plain message rejection");
        };
        assert!(message.contains("500"));
    }

    #[test]
    fn endpoints_join_without_duplicate_slashes() {
        let backend =
            HttpModelBackend::new(Client::new()).with_base_url("http://backend:9000/api/");

        assert_eq!(
            backend.endpoint("ml_models/3/prediction"),
            "http://backend:9000/api/ml_models/3/prediction"
        );
    }
}
