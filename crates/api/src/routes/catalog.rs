//! Dashboard catalogue.
//!
//! Lists the dashboards the front end can navigate to.

use axum::{Json, Router, routing::get};
use serde::Serialize;

use crate::AppState;

/// Availability of a dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DashboardAvailability {
    /// The dashboard can be opened.
    Available,
    /// Announced but not built yet.
    ComingSoon,
}

/// One entry of the catalogue.
#[derive(Debug, Serialize)]
pub struct DashboardEntry {
    /// Stable identifier.
    pub id: &'static str,
    /// Display title.
    pub title: &'static str,
    /// Short description of what the dashboard shows.
    pub description: &'static str,
    /// Availability.
    pub availability: DashboardAvailability,
    /// API path serving the dashboard, if available.
    pub path: Option<&'static str>,
}

/// Catalogue response.
#[derive(Debug, Serialize)]
pub struct CatalogResponse {
    /// Page title.
    pub title: &'static str,
    /// Known dashboards.
    pub dashboards: Vec<DashboardEntry>,
}

/// GET /dashboards
async fn list_dashboards() -> Json<CatalogResponse> {
    Json(CatalogResponse {
        title: "Integrated Management Dashboard",
        dashboards: vec![
            DashboardEntry {
                id: "sales",
                title: "Sales",
                description: "Revenue, costs, margins and best-selling products.",
                availability: DashboardAvailability::Available,
                path: Some("/api/v1/sales/dashboard"),
            },
            DashboardEntry {
                id: "financial",
                title: "Financial",
                description: "Cash flow, accounts payable and accounts receivable.",
                availability: DashboardAvailability::ComingSoon,
                path: None,
            },
        ],
    })
}

/// Creates catalogue routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/dashboards", get(list_dashboards))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_catalog_lists_sales_and_financial() {
        let Json(catalog) = list_dashboards().await;

        assert_eq!(catalog.dashboards.len(), 2);
        assert_eq!(catalog.dashboards[0].id, "sales");
        assert_eq!(
            catalog.dashboards[0].availability,
            DashboardAvailability::Available
        );
        assert_eq!(catalog.dashboards[1].id, "financial");
        assert_eq!(
            catalog.dashboards[1].availability,
            DashboardAvailability::ComingSoon
        );
        assert!(catalog.dashboards[1].path.is_none());
    }

    #[test]
    fn test_availability_serializes_snake_case() {
        let json = serde_json::to_string(&DashboardAvailability::ComingSoon).unwrap();
        assert_eq!(json, "\"coming_soon\"");
    }
}
