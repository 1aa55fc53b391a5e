//! Route Modules
//!
//! Built-in modules mounted by every service.

pub mod docs;
pub mod health;
