//! Sales repository for dashboard queries.
//!
//! Reads sale lines joined with product costs from the sales store. Every
//! value is selected as text and coerced by `salesboard_core`, so a single
//! malformed row is dropped instead of failing the whole query.

use chrono::NaiveDate;
use salesboard_core::sales::{ModelFilter, RawSaleRow, SaleLineItem, normalize_rows};
use salesboard_shared::DateRange;
use sea_orm::{DatabaseConnection, DbBackend, DbErr, FromQueryResult, Statement, Value};
use tracing::{debug, warn};

/// Error types for sales operations.
#[derive(Debug, thiserror::Error)]
pub enum SalesError {
    /// The range ends on the last representable day.
    #[error("Date out of range: {0}")]
    DateOutOfRange(NaiveDate),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Normalized sale lines for one filter selection.
#[derive(Debug, Clone, Default)]
pub struct SalesFetch {
    /// Lines that passed normalization, in store order.
    pub items: Vec<SaleLineItem>,
    /// Rows discarded because an essential field was missing or malformed.
    pub dropped: usize,
}

/// Distinct models observed in a date range.
const MODELS_SQL: &str = r"
SELECT DISTINCT v.modelo::text AS model
FROM vendas_itens_view v
WHERE v.emissao >= $1
  AND v.emissao < $2
  AND v.modelo IS NOT NULL
";

/// Sale lines left-joined with the last purchase price of their product.
const SALES_SQL: &str = r"
SELECT v.modelo::text AS model,
       v.emissao::text AS issued_at,
       v.produto::text AS product_code,
       v.descricao::text AS product_description,
       v.quantidade::text AS quantity,
       v.total::text AS line_total,
       v.documento::text AS document_id,
       p.precoultimacompra::text AS unit_cost
FROM vendas_itens_view v
LEFT JOIN produto p ON p.codigo = v.produto
WHERE v.emissao >= $1
  AND v.emissao < $2
";

/// Compared as text so a tag from `list_models` matches any column type.
const SALES_MODEL_FILTER_SQL: &str = "  AND v.modelo::text = $3\n";

const SALES_ORDER_SQL: &str = "ORDER BY v.emissao, v.documento, v.produto";

#[derive(Debug, FromQueryResult)]
struct ModelRow {
    model: String,
}

#[derive(Debug, FromQueryResult)]
struct SaleRow {
    model: Option<String>,
    issued_at: Option<String>,
    product_code: Option<String>,
    product_description: Option<String>,
    quantity: Option<String>,
    line_total: Option<String>,
    document_id: Option<String>,
    unit_cost: Option<String>,
}

impl From<SaleRow> for RawSaleRow {
    fn from(row: SaleRow) -> Self {
        Self {
            model: row.model,
            issued_at: row.issued_at,
            product_code: row.product_code,
            product_description: row.product_description,
            quantity: row.quantity,
            line_total: row.line_total,
            document_id: row.document_id,
            unit_cost: row.unit_cost,
        }
    }
}

/// Sales repository for dashboard queries.
#[derive(Debug, Clone)]
pub struct SalesRepository {
    db: DatabaseConnection,
}

impl SalesRepository {
    /// Creates a new sales repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Lists the distinct models issued within `range`, sorted ascending.
    ///
    /// The "every model" option is not included; callers add it.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_models(&self, range: DateRange) -> Result<Vec<String>, SalesError> {
        debug!(%range, "Querying distinct models");

        let statement = models_statement(range)?;
        let mut models: Vec<String> = ModelRow::find_by_statement(statement)
            .all(&self.db)
            .await?
            .into_iter()
            .map(|row| row.model)
            .collect();

        models.sort();
        models.dedup();

        debug!(%range, count = models.len(), "Distinct models loaded");
        Ok(models)
    }

    /// Fetches the normalized sale lines for `range` and `model`.
    ///
    /// Rows that cannot be normalized are counted in
    /// [`SalesFetch::dropped`] rather than reported as errors.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn fetch_sales(
        &self,
        range: DateRange,
        model: &ModelFilter,
    ) -> Result<SalesFetch, SalesError> {
        debug!(%range, model = ?model.as_model(), "Querying sales lines");

        let statement = sales_statement(range, model)?;
        let rows = SaleRow::find_by_statement(statement).all(&self.db).await?;
        let fetched = rows.len();

        let normalized = normalize_rows(rows.into_iter().map(RawSaleRow::from));
        for rejection in &normalized.rejected {
            debug!(reason = %rejection, "Dropped sales row");
        }

        let dropped = normalized.dropped();
        if dropped > 0 {
            warn!(%range, fetched, dropped, "Dropped sales rows that could not be normalized");
        }
        debug!(%range, fetched, kept = normalized.items.len(), "Sales lines loaded");

        Ok(SalesFetch {
            items: normalized.items,
            dropped,
        })
    }
}

/// Bounds for `issued_at >= start AND issued_at < end + 1 day`.
fn range_values(range: DateRange) -> Result<Vec<Value>, SalesError> {
    let end_exclusive = range
        .end_exclusive()
        .ok_or(SalesError::DateOutOfRange(range.end))?;
    Ok(vec![range.start.into(), end_exclusive.into()])
}

/// Builds the distinct-model query for `range`.
pub(crate) fn models_statement(range: DateRange) -> Result<Statement, SalesError> {
    Ok(Statement::from_sql_and_values(
        DbBackend::Postgres,
        MODELS_SQL,
        range_values(range)?,
    ))
}

/// Builds the sale line query for `range`, narrowed to one model unless
/// `model` is [`ModelFilter::All`].
pub(crate) fn sales_statement(
    range: DateRange,
    model: &ModelFilter,
) -> Result<Statement, SalesError> {
    let mut sql = String::from(SALES_SQL);
    let mut values = range_values(range)?;

    if let Some(model) = model.as_model() {
        sql.push_str(SALES_MODEL_FILTER_SQL);
        values.push(model.into());
    }
    sql.push_str(SALES_ORDER_SQL);

    Ok(Statement::from_sql_and_values(DbBackend::Postgres, sql, values))
}

#[cfg(test)]
#[path = "sales_tests.rs"]
mod tests;
