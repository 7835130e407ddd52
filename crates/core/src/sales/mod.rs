//! Sales profitability metrics.
//!
//! This module provides pure business logic for the sales dashboard:
//! - Normalization of raw store rows into typed line items
//! - Per-line cost, profit and margin derivation
//! - Aggregate KPIs, daily series and product ranking
//! - A short-lived cache for the model filter options

pub mod cache;
pub mod error;
pub mod metrics;
pub mod normalize;
pub mod types;


pub use cache::ModelCatalogCache;
pub use error::RowRejection;
pub use metrics::MetricsEngine;
pub use normalize::{NormalizedRows, normalize_row, normalize_rows};
pub use types::*;
