//! Shared types, errors, and configuration for Salesboard.
//!
//! This crate provides common types used across all other crates:
//! - Inclusive calendar date ranges used as report filters
//! - Application-wide error types
//! - Configuration management

pub mod config;
pub mod error;
pub mod types;

pub use config::AppConfig;
pub use error::{AppError, AppResult};
pub use types::DateRange;
