//! Sales dashboard routes.
//!
//! Serves the model filter options and the assembled sales dashboard:
//! KPI cards, the zero-filled daily series and the product ranking.

use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{debug, error};

use crate::AppState;
use crate::presentation::{
    MarginTone, format_day_label, format_money, format_percent, format_quantity,
};
use salesboard_core::sales::{
    DailySales, MetricsEngine, ModelFilter, ProductRanking, SalesDashboard, SalesKpis,
};
use salesboard_db::{SalesFetch, SalesRepository};
use salesboard_shared::{AppError, DateRange, config::DisplayConfig};

/// Message shown when the store could not be queried.
const LOAD_FAILED_MESSAGE: &str = "Sales data could not be loaded; showing no data.";

/// Message shown when the model list could not be queried.
const MODELS_FAILED_MESSAGE: &str =
    "Model list could not be loaded; only the all-models option is available.";

/// Creates the sales routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/sales/models", get(list_models))
        .route("/sales/dashboard", get(get_dashboard))
}

// ============================================================================
// Query Parameters
// ============================================================================

/// Query parameters for the model list.
#[derive(Debug, Deserialize)]
pub struct ModelsQuery {
    /// First day of the range (defaults to today).
    pub start: Option<NaiveDate>,
    /// Last day of the range, inclusive (defaults to today).
    pub end: Option<NaiveDate>,
}

/// Query parameters for the sales dashboard.
#[derive(Debug, Deserialize)]
pub struct DashboardQuery {
    /// First day of the range (defaults to today).
    pub start: Option<NaiveDate>,
    /// Last day of the range, inclusive (defaults to today).
    pub end: Option<NaiveDate>,
    /// Model tag, or the all-models label.
    pub model: Option<String>,
}

// ============================================================================
// Response Types
// ============================================================================

/// Response for the model list.
#[derive(Debug, Serialize)]
pub struct ModelsResponse {
    /// Filter options, the all-models label first.
    pub options: Vec<String>,
    /// Present when the lookup failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diagnostic: Option<String>,
}

/// Whether the dashboard has figures to show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DashboardStatus {
    /// At least one sale line matched.
    Ok,
    /// Nothing matched, or the store could not be queried.
    NoData,
}

/// Filters the dashboard was computed for.
#[derive(Debug, Serialize)]
pub struct FiltersResponse {
    /// First day of the range.
    pub start: NaiveDate,
    /// Last day of the range, inclusive.
    pub end: NaiveDate,
    /// Selected model, or the all-models label.
    pub model: String,
}

/// A raw value with its display string.
#[derive(Debug, Serialize)]
pub struct MetricValue {
    /// Full-precision value.
    pub value: Decimal,
    /// Formatted value.
    pub display: String,
}

/// A margin with its display string and tone.
#[derive(Debug, Serialize)]
pub struct MarginValue {
    /// Full-precision percentage.
    pub value: Decimal,
    /// Formatted percentage.
    pub display: String,
    /// Tone derived from the sign.
    pub tone: MarginTone,
    /// CSS treatment for the tone.
    pub style: &'static str,
}

impl MarginValue {
    fn new(value: Decimal) -> Self {
        let tone = MarginTone::from_value(value);
        Self {
            value,
            display: format_percent(value),
            tone,
            style: tone.style(),
        }
    }
}

/// KPI card.
#[derive(Debug, Serialize)]
pub struct KpiCard {
    /// Stable identifier.
    pub key: &'static str,
    /// Card title.
    pub label: &'static str,
    /// Full-precision value.
    pub value: Decimal,
    /// Formatted value.
    pub display: String,
    /// Tone, for margin cards only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tone: Option<MarginTone>,
}

/// One day of the sales chart.
#[derive(Debug, Serialize)]
pub struct DailyPoint {
    /// Calendar day.
    pub date: NaiveDate,
    /// Axis label (`dd/mm`).
    pub label: String,
    /// Sales total of the day.
    pub total: Decimal,
    /// Formatted total.
    pub display: String,
}

/// One product of the ranking table.
#[derive(Debug, Serialize)]
pub struct RankingRow {
    /// Product code.
    pub code: String,
    /// Product description.
    pub description: String,
    /// Quantity sold.
    pub quantity: MetricValue,
    /// Sales total.
    pub total_sales: MetricValue,
    /// Cost total.
    pub total_cost: MetricValue,
    /// Profit.
    pub profit: MetricValue,
    /// Mean margin on sale.
    pub margin_on_sale: MarginValue,
    /// Mean margin on cost.
    pub margin_on_cost: MarginValue,
}

/// Response for the sales dashboard.
#[derive(Debug, Serialize)]
pub struct DashboardResponse {
    /// Applied filters.
    pub filters: FiltersResponse,
    /// Whether there are figures to show.
    pub status: DashboardStatus,
    /// Present when the store could not be queried.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diagnostic: Option<String>,
    /// Headline cards.
    pub kpis: Vec<KpiCard>,
    /// One point per day of the range.
    pub daily_sales: Vec<DailyPoint>,
    /// Products by quantity sold.
    pub ranking: Vec<RankingRow>,
    /// Store rows discarded because they could not be read.
    pub dropped_rows: usize,
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Resolves the requested range, defaulting both ends to today.
fn resolve_range(
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
) -> Result<DateRange, Response> {
    let today = chrono::Local::now().date_naive();
    DateRange::validated(start.unwrap_or(today), end.unwrap_or(today))
        .map_err(|e| error_response(&e))
}

/// Renders an application error as a JSON error body.
fn error_response(err: &AppError) -> Response {
    let status =
        StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (
        status,
        Json(json!({
            "error": err.error_code(),
            "message": err.to_string()
        })),
    )
        .into_response()
}

fn model_options(all_label: &str, models: &[String]) -> Vec<String> {
    std::iter::once(all_label.to_string())
        .chain(models.iter().cloned())
        .collect()
}

fn metric(value: Decimal, display: String) -> MetricValue {
    MetricValue { value, display }
}

fn kpi_cards(kpis: &SalesKpis, symbol: &str) -> Vec<KpiCard> {
    let money = |key: &'static str, label: &'static str, value: Decimal| KpiCard {
        key,
        label,
        value,
        display: format_money(value, symbol),
        tone: None,
    };
    let margin = |key: &'static str, label: &'static str, value: Decimal| KpiCard {
        key,
        label,
        value,
        display: format_percent(value),
        tone: Some(MarginTone::from_value(value)),
    };

    vec![
        money("total_sales", "Total Sales", kpis.total_sales),
        money("total_cost", "Total Cost", kpis.total_cost),
        money("total_profit", "Total Profit", kpis.total_profit),
        margin("margin_on_sales", "Margin on Sales", kpis.margin_on_sales),
        margin("margin_on_cost", "Margin on Cost", kpis.margin_on_cost),
        money("avg_ticket", "Average Ticket", kpis.avg_ticket),
        KpiCard {
            key: "items_per_sale",
            label: "Items per Sale",
            value: kpis.items_per_sale,
            display: format_quantity(kpis.items_per_sale),
            tone: None,
        },
    ]
}

fn daily_points(series: &[DailySales], symbol: &str) -> Vec<DailyPoint> {
    series
        .iter()
        .map(|day| DailyPoint {
            date: day.date,
            label: format_day_label(day.date),
            total: day.total,
            display: format_money(day.total, symbol),
        })
        .collect()
}

fn ranking_rows(ranking: &[ProductRanking], symbol: &str) -> Vec<RankingRow> {
    ranking
        .iter()
        .map(|row| RankingRow {
            code: row.product_code.clone(),
            description: row.product_description.clone(),
            quantity: metric(row.quantity, format_quantity(row.quantity)),
            total_sales: metric(row.total_sales, format_money(row.total_sales, symbol)),
            total_cost: metric(row.total_cost, format_money(row.total_cost, symbol)),
            profit: metric(row.profit, format_money(row.profit, symbol)),
            margin_on_sale: MarginValue::new(row.margin_on_sale),
            margin_on_cost: MarginValue::new(row.margin_on_cost),
        })
        .collect()
}

impl DashboardResponse {
    /// Formats an assembled dashboard for display.
    #[must_use]
    pub fn render(
        dashboard: &SalesDashboard,
        dropped_rows: usize,
        diagnostic: Option<String>,
        display: &DisplayConfig,
    ) -> Self {
        let symbol = display.currency_symbol.as_str();
        let status = if dashboard.is_empty() {
            DashboardStatus::NoData
        } else {
            DashboardStatus::Ok
        };

        Self {
            filters: FiltersResponse {
                start: dashboard.range.start,
                end: dashboard.range.end,
                model: dashboard
                    .model
                    .as_model()
                    .unwrap_or(display.all_models_label.as_str())
                    .to_string(),
            },
            status,
            diagnostic,
            kpis: kpi_cards(&dashboard.kpis, symbol),
            daily_sales: daily_points(&dashboard.daily_sales, symbol),
            ranking: ranking_rows(&dashboard.ranking, symbol),
            dropped_rows,
        }
    }
}

// ============================================================================
// Route Handlers
// ============================================================================

/// GET /sales/models
///
/// Returns the all-models option followed by the models seen in the range.
/// A failed lookup still answers with the all-models option.
#[axum::debug_handler]
async fn list_models(
    State(state): State<AppState>,
    Query(query): Query<ModelsQuery>,
) -> impl IntoResponse {
    let range = match resolve_range(query.start, query.end) {
        Ok(range) => range,
        Err(response) => return response,
    };
    let all_label = state.display.all_models_label.as_str();

    if let Some(models) = state.models_cache.get(&range) {
        debug!(%range, "Model list served from cache");
        return Json(ModelsResponse {
            options: model_options(all_label, &models),
            diagnostic: None,
        })
        .into_response();
    }

    let repo = SalesRepository::new((*state.db).clone());
    match repo.list_models(range).await {
        Ok(models) => {
            let models = state.models_cache.insert(range, models);
            Json(ModelsResponse {
                options: model_options(all_label, &models),
                diagnostic: None,
            })
            .into_response()
        }
        Err(e) => {
            error!(error = %e, %range, "Failed to list models");
            Json(ModelsResponse {
                options: model_options(all_label, &[]),
                diagnostic: Some(MODELS_FAILED_MESSAGE.to_string()),
            })
            .into_response()
        }
    }
}

/// GET /sales/dashboard
///
/// A failed query renders the same empty dashboard as a range without
/// sales, plus a diagnostic.
#[axum::debug_handler]
async fn get_dashboard(
    State(state): State<AppState>,
    Query(query): Query<DashboardQuery>,
) -> impl IntoResponse {
    let range = match resolve_range(query.start, query.end) {
        Ok(range) => range,
        Err(response) => return response,
    };
    let model = ModelFilter::from_selection(
        query.model.as_deref(),
        &state.display.all_models_label,
    );

    let repo = SalesRepository::new((*state.db).clone());
    let (fetch, diagnostic) = match repo.fetch_sales(range, &model).await {
        Ok(fetch) => (fetch, None),
        Err(e) => {
            error!(error = %e, %range, model = ?model.as_model(), "Failed to fetch sales");
            (SalesFetch::default(), Some(LOAD_FAILED_MESSAGE.to_string()))
        }
    };

    let dashboard = MetricsEngine::build(fetch.items, range, model);
    debug!(%range, lines = dashboard.line_count, dropped = fetch.dropped, "Sales dashboard built");

    let response = DashboardResponse::render(&dashboard, fetch.dropped, diagnostic, &state.display);
    (StatusCode::OK, Json(response)).into_response()
}

#[cfg(test)]
#[path = "sales_tests.rs"]
mod tests;
