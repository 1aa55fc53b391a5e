//! Application Layer
//!
//! The handler adapter: binding, validation, execution and error interception.
//! Depends on domain gateways (abstractions), not concrete implementations.

pub mod route_handlers;
