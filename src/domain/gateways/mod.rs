//! Gateway Traits (Ports)
//!
//! Abstract interfaces defining contracts for external dependencies.
//! These are implemented by driving adapters in the infrastructure layer.

pub mod model_binder;
pub mod route_registrar;

pub use model_binder::ModelBinder;
pub use route_registrar::RouteRegistrar;
