//! Request Model Binding
//!
//! Binds request models with axum's own extractors and validates them with
//! `validator`. A non-empty body is read as JSON, otherwise the query string
//! is used.

use async_trait::async_trait;
use axum::body::Body;
use axum::extract::Query;
use axum::http::Request;
use axum::Json;
use serde::de::DeserializeOwned;
use validator::Validate;

use crate::domain::gateways::ModelBinder;
use crate::domain::models::binding::BindOutcome;
use crate::infrastructure::driven_adapters::config::{BindingConfig, DEFAULT_BODY_LIMIT};

/// Binds JSON bodies and query strings into validated models
#[derive(Debug, Clone)]
pub struct RequestBinder {
    body_limit: usize,
}

impl RequestBinder {
    /// Create a binder that reads at most `body_limit` bytes of body
    #[must_use]
    pub fn new(body_limit: usize) -> Self {
        Self { body_limit }
    }
}

impl Default for RequestBinder {
    fn default() -> Self {
        Self::new(DEFAULT_BODY_LIMIT)
    }
}

impl From<&BindingConfig> for RequestBinder {
    fn from(config: &BindingConfig) -> Self {
        Self::new(config.body_limit)
    }
}

#[async_trait]
impl ModelBinder<Request<Body>> for RequestBinder {
    async fn bind_and_validate<T>(&self, request: Request<Body>) -> BindOutcome<T>
    where
        T: DeserializeOwned + Validate + Send + 'static,
    {
        let (parts, body) = request.into_parts();

        let bytes = match axum::body::to_bytes(body, self.body_limit).await {
            Ok(bytes) => bytes,
            Err(err) => return BindOutcome::BindingFailed(format!("Failed to read request body: {err}")),
        };

        let bound = if bytes.is_empty() {
            Query::<T>::try_from_uri(&parts.uri)
                .map(|Query(model)| model)
                .map_err(|rejection| rejection.body_text())
        } else {
            Json::<T>::from_bytes(&bytes)
                .map(|Json(model)| model)
                .map_err(|rejection| rejection.body_text())
        };

        match bound {
            Ok(model) => BindOutcome::validated(model),
            Err(reason) => BindOutcome::BindingFailed(reason),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize, Validate)]
    struct CreateItem {
        #[validate(required(message = "name is required"))]
        name: Option<String>,
        #[validate(range(min = 1, message = "quantity must be at least 1"))]
        #[serde(default = "default_quantity")]
        quantity: u32,
    }

    fn default_quantity() -> u32 {
        1
    }

    fn json_request(body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/items")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn binds_json_body() {
        let outcome: BindOutcome<CreateItem> = RequestBinder::default()
            .bind_and_validate(json_request(r#"{"name": "widget", "quantity": 3}"#))
            .await;

        match outcome {
            BindOutcome::Bound(item) => {
                assert_eq!(item.name.as_deref(), Some("widget"));
                assert_eq!(item.quantity, 3);
            }
            other => panic!("expected bound model, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn binds_query_string_when_body_is_empty() {
        let request = Request::builder()
            .uri("/items?name=widget&quantity=2")
            .body(Body::empty())
            .unwrap();

        let outcome: BindOutcome<CreateItem> = RequestBinder::default().bind_and_validate(request).await;

        match outcome {
            BindOutcome::Bound(item) => {
                assert_eq!(item.name.as_deref(), Some("widget"));
                assert_eq!(item.quantity, 2);
            }
            other => panic!("expected bound model, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn malformed_json_fails_binding() {
        let outcome: BindOutcome<CreateItem> = RequestBinder::default()
            .bind_and_validate(json_request(r#"{"name": "widget""#))
            .await;

        assert!(matches!(outcome, BindOutcome::BindingFailed(_)));
    }

    #[tokio::test]
    async fn wrong_field_type_fails_binding() {
        let outcome: BindOutcome<CreateItem> = RequestBinder::default()
            .bind_and_validate(json_request(r#"{"name": "widget", "quantity": "many"}"#))
            .await;

        assert!(matches!(outcome, BindOutcome::BindingFailed(_)));
    }

    #[tokio::test]
    async fn missing_required_field_fails_validation() {
        let outcome: BindOutcome<CreateItem> = RequestBinder::default()
            .bind_and_validate(json_request(r#"{"quantity": 2}"#))
            .await;

        match outcome {
            BindOutcome::ValidationFailed(errors) => {
                let fields = errors.field_errors();
                assert!(fields.contains_key("name"));
                assert!(!fields.contains_key("quantity"));
            }
            other => panic!("expected validation failure, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn oversized_body_fails_binding() {
        let outcome: BindOutcome<CreateItem> = RequestBinder::new(8)
            .bind_and_validate(json_request(r#"{"name": "a much longer widget name"}"#))
            .await;

        assert!(matches!(outcome, BindOutcome::BindingFailed(_)));
    }
}
