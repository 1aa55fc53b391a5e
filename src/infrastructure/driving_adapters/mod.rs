//! Driving Adapters
//!
//! Entry points that drive the application:
//! - HTTP route modules and the handler callbacks they register
//! - Model binding and response negotiation for those callbacks

pub mod api_rest;
