//! Error Types
//!
//! Request-level failures with HTTP status code mapping. Startup errors
//! raised while registering routes live with the route model and are
//! re-exported here.

use std::any::Any;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;
use validator::{ValidationErrors, ValidationErrorsKind};

pub use crate::domain::models::route::RouteError;

/// Message returned when a request cannot be bound to the handler's model
pub const MODEL_BINDING_ERROR_MESSAGE: &str = "The model is not binding to the request";

/// Per-request failure produced by the handler adapter
///
/// Binding and validation failures share the validation-failure shape but
/// stay distinct: a malformed payload only ever gets the fixed message,
/// field-level detail is reserved for payloads that bound but broke a rule.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{}", MODEL_BINDING_ERROR_MESSAGE)]
    ModelBinding,

    #[error("Validation failed")]
    Validation(ValidationErrors),

    #[error("{0}")]
    Handler(anyhow::Error),
}

impl ApiError {
    /// Turn a caught panic payload into a handler failure
    #[must_use]
    pub fn from_panic(panic: &(dyn Any + Send)) -> Self {
        let details = panic
            .downcast_ref::<String>()
            .cloned()
            .or_else(|| panic.downcast_ref::<&str>().map(ToString::to_string))
            .unwrap_or_else(|| "unknown panic".to_string());

        Self::Handler(anyhow::anyhow!("Handler panicked: {details}"))
    }

    /// Get the HTTP status code for this error
    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::ModelBinding | Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::Handler(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error code for this error
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::ModelBinding | Self::Validation(_) => "VALIDATION_ERROR",
            Self::Handler(_) => "INTERNAL_ERROR",
        }
    }

    /// Whether this is one of the two validation-failure shapes
    #[must_use]
    pub fn is_validation_failure(&self) -> bool {
        matches!(self, Self::ModelBinding | Self::Validation(_))
    }

    /// Build the error envelope, tagging it with the originating request
    #[must_use]
    pub fn to_error_response(&self, request_id: Option<String>) -> ErrorResponse {
        let details = match self {
            Self::Validation(errors) => Some(field_errors(errors)),
            Self::ModelBinding | Self::Handler(_) => None,
        };

        ErrorResponse {
            error: ErrorDetail {
                code: self.error_code().to_string(),
                message: self.to_string(),
                details,
            },
            request_id,
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }

    /// Render this error as an HTTP response carrying the request id
    #[must_use]
    pub fn into_response_with_request_id(self, request_id: Option<String>) -> Response {
        let body = self.to_error_response(request_id);
        (self.status_code(), Json(body)).into_response()
    }
}

/// Error response body structure
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
    pub timestamp: String,
}

/// Error detail structure
#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<FieldError>>,
}

/// Field-level error for validation errors
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        self.into_response_with_request_id(None)
    }
}

impl From<ValidationErrors> for ApiError {
    fn from(err: ValidationErrors) -> Self {
        ApiError::Validation(err)
    }
}

/// Flatten validator output into field errors, sorted by field path
///
/// Nested models report dotted paths (`address.city`) and list items an
/// index (`lines[0].sku`).
fn field_errors(errors: &ValidationErrors) -> Vec<FieldError> {
    let mut details = Vec::new();
    collect_field_errors(None, errors, &mut details);
    details.sort_by(|a, b| a.field.cmp(&b.field));
    details
}

fn collect_field_errors(prefix: Option<&str>, errors: &ValidationErrors, details: &mut Vec<FieldError>) {
    for (field, kind) in errors.errors() {
        let path = prefix.map_or_else(|| (*field).to_string(), |prefix| format!("{prefix}.{field}"));
        match kind {
            ValidationErrorsKind::Field(errors) => {
                details.extend(errors.iter().map(|e| FieldError {
                    field: path.clone(),
                    message: e
                        .message
                        .as_ref()
                        .map_or_else(|| format!("{path} failed the '{}' rule", e.code), ToString::to_string),
                }));
            }
            ValidationErrorsKind::Struct(nested) => collect_field_errors(Some(&path), nested, details),
            ValidationErrorsKind::List(items) => {
                for (index, nested) in items {
                    collect_field_errors(Some(&format!("{path}[{index}]")), nested, details);
                }
            }
        }
    }
}
