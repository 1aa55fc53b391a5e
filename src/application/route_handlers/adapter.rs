//! Handler Adapter
//!
//! Runs a handler through binding, validation and execution, turning every
//! failure into an `ApiError` so nothing escapes the route boundary.

use std::future::Future;

use crate::application::route_handlers::handler::Handler;
use crate::domain::models::binding::BindOutcome;
use crate::shared::errors::ApiError;

/// Run `handler` for one request
///
/// `bind` is only called for handlers that take a model, and at most once.
/// A single pass through binding, validation and execution, with no retries.
///
/// # Errors
///
/// Returns `ApiError::ModelBinding` when the model could not be bound,
/// `ApiError::Validation` when it broke a validation rule and
/// `ApiError::Handler` when the handler itself failed.
pub async fn run_handler<TIn, TOut, B, Fut>(handler: &Handler<TIn, TOut>, bind: B) -> Result<TOut, ApiError>
where
    B: FnOnce() -> Fut,
    Fut: Future<Output = BindOutcome<TIn>>,
{
    let result = match handler {
        Handler::Sync(handler) => handler(),
        Handler::Async(handler) => handler().await,
        Handler::SyncWithModel(handler) => {
            let model = bind_model(bind).await?;
            handler(model)
        }
        Handler::AsyncWithModel(handler) => {
            let model = bind_model(bind).await?;
            handler(model).await
        }
    };

    result.map_err(|error| {
        tracing::warn!(error = %error, "Handler failed");
        ApiError::Handler(error)
    })
}

async fn bind_model<TIn, B, Fut>(bind: B) -> Result<TIn, ApiError>
where
    B: FnOnce() -> Fut,
    Fut: Future<Output = BindOutcome<TIn>>,
{
    match bind().await {
        BindOutcome::Bound(model) => Ok(model),
        BindOutcome::BindingFailed(reason) => {
            tracing::debug!(reason = %reason, "Model binding failed");
            Err(ApiError::ModelBinding)
        }
        BindOutcome::ValidationFailed(errors) => {
            tracing::debug!(errors = %errors, "Model validation failed");
            Err(ApiError::Validation(errors))
        }
    }
}
