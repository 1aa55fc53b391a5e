//! Web Service Template
//!
//! Route registration helpers for axum that wrap handlers with model binding,
//! validation and uniform error responses, plus an API documentation
//! endpoint. Laid out following Clean/Hexagonal Architecture principles.

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod shared;
