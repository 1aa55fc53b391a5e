//! Domain Models
//!
//! Value objects describing routes and the outcome of binding a request.

pub mod binding;
pub mod route;

pub use binding::{BindOutcome, NoInput};
pub use route::{join_path, RouteError, RouteRegistration, Verb};
