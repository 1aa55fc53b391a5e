//! Driven Adapters
//!
//! Sources the application reads from:
//! - Configuration (files and environment)

pub mod config;

pub use config::AppConfig;
