//! Route Handlers
//!
//! Handler shapes and the adapter that runs them for a request.

pub mod adapter;
pub mod handler;

pub use adapter::run_handler;
pub use handler::{Handler, HandlerKind};
