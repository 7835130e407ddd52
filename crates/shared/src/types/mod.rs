//! Common types used across the application.

pub mod date_range;

pub use date_range::DateRange;
