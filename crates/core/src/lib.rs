//! Core business logic for Salesboard.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! All domain types, normalization rules, and calculations live here.
//!
//! # Modules
//!
//! - `sales` - Sales profitability metrics, daily series and product ranking

pub mod sales;
