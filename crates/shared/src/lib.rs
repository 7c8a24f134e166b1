//! Shared types, errors, and configuration for the variance analysis workspace.
//!
//! This crate provides common types used across all other crates:
//! - Typed identifiers for articles, customers, resources and currencies
//! - Decimal helpers (banker's rounding, relative tolerance)
//! - Application-wide error types
//! - Configuration management

pub mod config;
pub mod error;
pub mod types;

pub use config::AppConfig;
pub use error::{AppError, AppResult};
