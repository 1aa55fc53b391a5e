//! Infrastructure Layer
//!
//! Contains all external concerns: driving adapters (HTTP route modules) and
//! driven adapters (configuration).

pub mod driven_adapters;
pub mod driving_adapters;
