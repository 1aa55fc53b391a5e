//! Route Registrar Gateway
//!
//! Abstract trait defining the contract for registering routes with a router.

use crate::domain::models::route::RouteRegistration;
use crate::domain::models::route::RouteError;

/// Registration surface handed to route modules
///
/// The registrar owns the routes it receives. The adapter layer only
/// produces the callbacks.
pub trait RouteRegistrar {
    /// Callback type invoked when the route matches
    type Callback;

    /// Register a callback for the given route
    ///
    /// # Errors
    ///
    /// Returns `RouteError::Duplicate` if the verb and path are already taken.
    fn register(&mut self, route: RouteRegistration, callback: Self::Callback) -> Result<(), RouteError>;

    /// Routes registered so far, in registration order
    fn routes(&self) -> Vec<RouteRegistration>;
}
