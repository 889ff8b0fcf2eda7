//! Common utilities shared by applications built on the entity layer.
//!
//! This crate provides:
//! - Error translation from domain failures to form errors
//! - Configuration loaded from the environment
//! - Tracing setup

pub mod config;
pub mod error;
pub mod telemetry;

pub use config::*;
pub use error::{AppError, AppResult};
pub use telemetry::init_tracing;
