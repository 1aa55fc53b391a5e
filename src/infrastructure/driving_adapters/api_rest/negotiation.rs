//! Response Negotiation
//!
//! Turns a handler outcome into the HTTP response for the request it came from.

use axum::body::Body;
use axum::http::Request;
use axum::response::{IntoResponse, Response};

use crate::infrastructure::driving_adapters::api_rest::middleware::request_id::RequestId;
use crate::shared::errors::ApiError;

/// Response context captured from a request before its body is consumed
#[derive(Debug, Clone, Default)]
pub struct Negotiate {
    request_id: Option<RequestId>,
}

impl Negotiate {
    /// Capture the response context of `request`
    #[must_use]
    pub fn from_request(request: &Request<Body>) -> Self {
        Self {
            request_id: request.extensions().get::<RequestId>().cloned(),
        }
    }

    /// Success payloads pass through unchanged, failures get the error envelope
    pub fn respond<T: IntoResponse>(&self, outcome: Result<T, ApiError>) -> Response {
        match outcome {
            Ok(payload) => payload.into_response(),
            Err(error) => self.respond_with_failure(error),
        }
    }

    /// Render a failure, tagged with the request id when one was assigned
    #[must_use]
    pub fn respond_with_failure(&self, error: ApiError) -> Response {
        let request_id = self.request_id.as_ref().map(ToString::to_string);
        error.into_response_with_request_id(request_id)
    }
}
