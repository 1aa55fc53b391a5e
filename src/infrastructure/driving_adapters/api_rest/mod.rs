//! REST API Module
//!
//! Route modules, model binding, response negotiation and middleware for
//! the REST API, plus the function assembling them into one router.

pub mod binding;
pub mod middleware;
pub mod module;
pub mod modules;
pub mod negotiation;
pub mod openapi;

use std::any::Any;

use axum::response::{IntoResponse, Response};
use axum::Router;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::trace::TraceLayer;

use crate::domain::gateways::RouteRegistrar;
use crate::infrastructure::driven_adapters::config::AppConfig;
use crate::shared::errors::{ApiError, RouteError};

pub use binding::RequestBinder;
pub use module::{RouteCallback, RouteModule};
pub use negotiation::Negotiate;

/// Assemble `modules` and the documentation endpoint into one router
///
/// The documentation describes every route of `modules`. Requests pass
/// through the request-id middleware, HTTP tracing and panic recovery.
///
/// # Errors
///
/// Returns `RouteError::Duplicate` if two modules register the same verb and
/// path, or `RouteError::Conflict` if two paths only differ in capture names.
pub fn create_router(config: &AppConfig, modules: Vec<RouteModule>) -> Result<Router, RouteError> {
    let mut root = RouteModule::new("/");
    for module in modules {
        root.mount(module)?;
    }

    let docs = modules::docs::module(&root.routes(), &config.metadata)?;
    root.mount(docs)?;

    Ok(root
        .into_router()
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(TraceLayer::new_for_http())
        .layer(axum::middleware::from_fn(middleware::request_id_middleware)))
}

/// Turn a panic outside a route callback into the generic failure response
///
/// Handler panics are already answered by the route callback, with the
/// request id. This covers the layers around it.
fn panic_response(panic: Box<dyn Any + Send + 'static>) -> Response {
    let error = ApiError::from_panic(&*panic);
    tracing::error!(error = %error, "Request panicked");
    error.into_response()
}
