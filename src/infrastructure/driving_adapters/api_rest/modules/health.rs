//! Health Module
//!
//! Liveness probe for the service.

use crate::application::route_handlers::Handler;
use crate::infrastructure::driving_adapters::api_rest::module::RouteModule;
use crate::shared::errors::RouteError;

/// GET /health - answers `ok` while the process is serving requests
///
/// # Errors
///
/// Returns `RouteError` if the route cannot be registered.
pub fn module() -> Result<RouteModule, RouteError> {
    let mut health = RouteModule::new("/");
    health.get_named("health", "/health", Handler::sync(|| Ok("ok")))?;
    Ok(health)
}
