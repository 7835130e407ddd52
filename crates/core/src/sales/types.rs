//! Sales data types.

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use salesboard_shared::DateRange;
use serde::{Deserialize, Serialize};

/// Document model selection for a report.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ModelFilter {
    /// Every model.
    All,
    /// A single concrete model tag.
    Model(String),
}

impl ModelFilter {
    /// Default label of the "every model" option.
    pub const ALL_LABEL: &'static str = "All";

    /// Interprets a filter selection coming from the UI.
    ///
    /// A missing or blank selection, or one equal to `all_label`, means
    /// every model.
    #[must_use]
    pub fn from_selection(selection: Option<&str>, all_label: &str) -> Self {
        match selection.map(str::trim) {
            None | Some("") => Self::All,
            Some(label) if label == all_label => Self::All,
            Some(model) => Self::Model(model.to_string()),
        }
    }

    /// Returns the model tag to filter on, `None` for every model.
    #[must_use]
    pub fn as_model(&self) -> Option<&str> {
        match self {
            Self::All => None,
            Self::Model(model) => Some(model),
        }
    }
}

/// Sales row exactly as returned by the store, every value as optional text.
///
/// Values are kept untyped so that a single malformed row can be dropped
/// without failing the whole query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawSaleRow {
    /// Document model.
    pub model: Option<String>,
    /// Issuance date/time.
    pub issued_at: Option<String>,
    /// Product code.
    pub product_code: Option<String>,
    /// Product description.
    pub product_description: Option<String>,
    /// Quantity sold.
    pub quantity: Option<String>,
    /// Sale price of the line.
    pub line_total: Option<String>,
    /// Sale document identifier.
    pub document_id: Option<String>,
    /// Last purchase price of the product, absent when no cost record matched.
    pub unit_cost: Option<String>,
}

/// One product line within a sale document, after normalization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaleLineItem {
    /// Document model.
    pub model: String,
    /// Issuance date/time.
    pub issued_at: NaiveDateTime,
    /// Product code.
    pub product_code: String,
    /// Product description.
    pub product_description: String,
    /// Quantity sold.
    pub quantity: Decimal,
    /// Sale price of the line.
    pub line_total: Decimal,
    /// Sale document identifier.
    pub document_id: String,
    /// Last purchase price of the product.
    pub unit_cost: Option<Decimal>,
}

/// Sale line with its cost, profit and margins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DerivedLine {
    /// Source line.
    pub item: SaleLineItem,
    /// Unit cost, zero when the product has no cost record.
    pub unit_cost: Decimal,
    /// Unit cost times quantity.
    pub total_cost: Decimal,
    /// Line total minus total cost.
    pub profit: Decimal,
    /// Profit as a percentage of the line total.
    pub margin_on_sale: Decimal,
    /// Profit as a percentage of the total cost.
    pub margin_on_cost: Decimal,
}

impl DerivedLine {
    /// Issuance day of the line.
    #[must_use]
    pub fn issued_on(&self) -> NaiveDate {
        self.item.issued_at.date()
    }
}

/// Headline figures for the filtered sales.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalesKpis {
    /// Sum of line totals.
    pub total_sales: Decimal,
    /// Sum of line costs.
    pub total_cost: Decimal,
    /// Sum of line profits.
    pub total_profit: Decimal,
    /// Total profit over total sales, in percent.
    pub margin_on_sales: Decimal,
    /// Total profit over total cost, in percent.
    pub margin_on_cost: Decimal,
    /// Sum of quantities.
    pub total_quantity: Decimal,
    /// Number of distinct sale documents.
    pub unique_sales_count: usize,
    /// Average value of one sale document.
    pub avg_ticket: Decimal,
    /// Average quantity per sale document.
    pub items_per_sale: Decimal,
}

/// Sales total for one calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailySales {
    /// Day.
    pub date: NaiveDate,
    /// Sum of line totals issued that day.
    pub total: Decimal,
}

/// Aggregated figures for one product.
///
/// Amounts are sums; margins are the unweighted mean of the product's
/// line-level margins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductRanking {
    /// Product code.
    pub product_code: String,
    /// Product description.
    pub product_description: String,
    /// Total quantity sold.
    pub quantity: Decimal,
    /// Total sales value.
    pub total_sales: Decimal,
    /// Total cost.
    pub total_cost: Decimal,
    /// Total profit.
    pub profit: Decimal,
    /// Mean of line margins on sale.
    pub margin_on_sale: Decimal,
    /// Mean of line margins on cost.
    pub margin_on_cost: Decimal,
    /// Number of lines aggregated.
    pub line_count: usize,
}

/// Everything the dashboard renders for one filter selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SalesDashboard {
    /// Date range filter.
    pub range: DateRange,
    /// Model filter.
    pub model: ModelFilter,
    /// Headline figures.
    pub kpis: SalesKpis,
    /// One entry per day of the range.
    pub daily_sales: Vec<DailySales>,
    /// Products sorted by quantity sold, descending.
    pub ranking: Vec<ProductRanking>,
    /// Number of lines the figures were computed from.
    pub line_count: usize,
}

impl SalesDashboard {
    /// Returns true if no sale line matched the filters.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.line_count == 0
    }
}
