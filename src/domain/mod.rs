//! Domain Layer
//!
//! Route and binding models, and the gateway traits (ports) the adapter layer
//! is written against. This layer has no dependency on the HTTP framework.

pub mod gateways;
pub mod models;

pub use gateways::{ModelBinder, RouteRegistrar};
pub use models::{BindOutcome, NoInput, RouteError, RouteRegistration, Verb};
