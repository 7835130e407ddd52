//! Coercion of raw store rows into typed sale lines.
//!
//! Rows missing an issuance date, a line total or a document identifier
//! cannot be placed in any report and are rejected. Every other field is
//! lenient: a missing or malformed quantity or cost counts as zero.
//!
//! Amounts above [`MAX_AMOUNT`] in magnitude reject the row, which keeps
//! per-line products and sums far from the `Decimal` limits.

use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};
use rust_decimal::Decimal;

use super::error::RowRejection;
use super::types::{RawSaleRow, SaleLineItem};

/// Largest accepted magnitude for quantities, line totals and unit costs.
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(0xD4A5_1000, 0xE8, 0, false, 0);

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
];

const OFFSET_DATETIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S%.f%#z", "%Y-%m-%dT%H:%M:%S%.f%#z"];

/// Result of normalizing a batch of rows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NormalizedRows {
    /// Rows that passed.
    pub items: Vec<SaleLineItem>,
    /// Rejected rows with their reason, in input order.
    pub rejected: Vec<RowRejection>,
}

impl NormalizedRows {
    /// Number of rows dropped.
    #[must_use]
    pub fn dropped(&self) -> usize {
        self.rejected.len()
    }
}

/// Normalizes every row, keeping the accepted ones in input order.
pub fn normalize_rows<I>(rows: I) -> NormalizedRows
where
    I: IntoIterator<Item = RawSaleRow>,
{
    let mut result = NormalizedRows::default();
    for row in rows {
        match normalize_row(row) {
            Ok(item) => result.items.push(item),
            Err(rejection) => result.rejected.push(rejection),
        }
    }
    result
}

/// Normalizes a single row.
///
/// # Errors
///
/// Returns the first essential field that is missing or malformed, or
/// the first amount out of range.
pub fn normalize_row(row: RawSaleRow) -> Result<SaleLineItem, RowRejection> {
    let issued_at = match non_blank(row.issued_at.as_deref()) {
        None => return Err(RowRejection::MissingIssuedAt),
        Some(raw) => parse_timestamp(raw)
            .ok_or_else(|| RowRejection::InvalidIssuedAt(raw.to_string()))?,
    };

    let line_total = match non_blank(row.line_total.as_deref()) {
        None => return Err(RowRejection::MissingLineTotal),
        Some(raw) => {
            let value = parse_decimal(raw)
                .ok_or_else(|| RowRejection::InvalidLineTotal(raw.to_string()))?;
            bounded("line total", raw, value)?
        }
    };

    let document_id = non_blank(row.document_id.as_deref())
        .ok_or(RowRejection::MissingDocumentId)?
        .to_string();

    let quantity = match non_blank(row.quantity.as_deref()) {
        Some(raw) => bounded("quantity", raw, parse_decimal(raw).unwrap_or(Decimal::ZERO))?,
        None => Decimal::ZERO,
    };

    let unit_cost = match non_blank(row.unit_cost.as_deref()) {
        Some(raw) => Some(bounded(
            "unit cost",
            raw,
            parse_decimal(raw).unwrap_or(Decimal::ZERO),
        )?),
        None => None,
    };

    Ok(SaleLineItem {
        model: row.model.unwrap_or_default(),
        issued_at,
        product_code: row.product_code.unwrap_or_default(),
        product_description: row.product_description.unwrap_or_default(),
        quantity,
        line_total,
        document_id,
        unit_cost,
    })
}

fn bounded(field: &'static str, raw: &str, value: Decimal) -> Result<Decimal, RowRejection> {
    if value.abs() > MAX_AMOUNT {
        return Err(RowRejection::AmountOutOfRange {
            field,
            value: raw.to_string(),
        });
    }
    Ok(value)
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Parses a decimal in plain or scientific notation.
///
/// `NaN` and infinities are rejected.
pub fn parse_decimal(raw: &str) -> Option<Decimal> {
    let raw = raw.trim();
    Decimal::from_str(raw)
        .ok()
        .or_else(|| Decimal::from_scientific(raw).ok())
}

/// Parses a date or date/time as written by PostgreSQL or ISO 8601.
///
/// Offsets are dropped after conversion to the writer's local time, so the
/// calendar day stays the one the document was issued on.
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();

    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.naive_local());
    }

    for format in OFFSET_DATETIME_FORMATS {
        if let Ok(parsed) = DateTime::parse_from_str(raw, format) {
            return Some(parsed.naive_local());
        }
    }

    for format in DATETIME_FORMATS {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(parsed);
        }
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .map(|day| day.and_time(NaiveTime::MIN))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    fn raw_row() -> RawSaleRow {
        RawSaleRow {
            model: Some("65".to_string()),
            issued_at: Some("2024-01-02 10:30:00".to_string()),
            product_code: Some("P-1".to_string()),
            product_description: Some("Coffee 500g".to_string()),
            quantity: Some("2.000".to_string()),
            line_total: Some("100.00".to_string()),
            document_id: Some("NF-1".to_string()),
            unit_cost: Some("30.0000".to_string()),
        }
    }

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, s)
            .unwrap()
    }

    #[test]
    fn test_complete_row_is_accepted() {
        let item = normalize_row(raw_row()).unwrap();
        assert_eq!(item.model, "65");
        assert_eq!(item.issued_at, at(2024, 1, 2, 10, 30, 0));
        assert_eq!(item.product_code, "P-1");
        assert_eq!(item.product_description, "Coffee 500g");
        assert_eq!(item.quantity, dec!(2));
        assert_eq!(item.line_total, dec!(100));
        assert_eq!(item.document_id, "NF-1");
        assert_eq!(item.unit_cost, Some(dec!(30)));
    }

    #[test]
    fn test_missing_issued_at_is_rejected() {
        let row = RawSaleRow {
            issued_at: None,
            ..raw_row()
        };
        assert_eq!(normalize_row(row), Err(RowRejection::MissingIssuedAt));
    }

    #[test]
    fn test_invalid_issued_at_is_rejected() {
        let row = RawSaleRow {
            issued_at: Some("yesterday".to_string()),
            ..raw_row()
        };
        assert_eq!(
            normalize_row(row),
            Err(RowRejection::InvalidIssuedAt("yesterday".to_string()))
        );
    }

    #[test]
    fn test_missing_line_total_is_rejected() {
        let row = RawSaleRow {
            line_total: Some("   ".to_string()),
            ..raw_row()
        };
        assert_eq!(normalize_row(row), Err(RowRejection::MissingLineTotal));
    }

    #[test]
    fn test_invalid_line_total_is_rejected() {
        let row = RawSaleRow {
            line_total: Some("NaN".to_string()),
            ..raw_row()
        };
        assert_eq!(
            normalize_row(row),
            Err(RowRejection::InvalidLineTotal("NaN".to_string()))
        );
    }

    #[test]
    fn test_missing_document_is_rejected() {
        let row = RawSaleRow {
            document_id: None,
            ..raw_row()
        };
        assert_eq!(normalize_row(row), Err(RowRejection::MissingDocumentId));
    }

    #[rstest]
    #[case::quantity(
        RawSaleRow { quantity: Some("10000000000000".to_string()), ..raw_row() },
        "quantity"
    )]
    #[case::unit_cost(
        RawSaleRow { unit_cost: Some("100000000000000000000".to_string()), ..raw_row() },
        "unit cost"
    )]
    #[case::line_total(
        RawSaleRow { line_total: Some("-5e28".to_string()), ..raw_row() },
        "line total"
    )]
    fn test_oversized_amount_is_rejected(#[case] row: RawSaleRow, #[case] field: &str) {
        match normalize_row(row) {
            Err(RowRejection::AmountOutOfRange { field: rejected, .. }) => {
                assert_eq!(rejected, field);
            }
            other => panic!("expected out of range rejection, got {other:?}"),
        }
    }

    #[test]
    fn test_largest_accepted_amount_is_kept() {
        let row = RawSaleRow {
            quantity: Some("1000000000000".to_string()),
            unit_cost: Some("1000000000000".to_string()),
            line_total: Some("-1000000000000".to_string()),
            ..raw_row()
        };
        let item = normalize_row(row).unwrap();
        assert_eq!(item.quantity, MAX_AMOUNT);
        assert_eq!(item.unit_cost, Some(MAX_AMOUNT));
        assert_eq!(item.line_total, -MAX_AMOUNT);
    }

    #[test]
    fn test_missing_cost_stays_absent() {
        let row = RawSaleRow {
            unit_cost: None,
            ..raw_row()
        };
        assert_eq!(normalize_row(row).unwrap().unit_cost, None);
    }

    #[test]
    fn test_lenient_fields_default() {
        let row = RawSaleRow {
            model: None,
            product_code: None,
            product_description: None,
            quantity: Some("abc".to_string()),
            unit_cost: Some("n/a".to_string()),
            ..raw_row()
        };
        let item = normalize_row(row).unwrap();
        assert_eq!(item.model, "");
        assert_eq!(item.product_code, "");
        assert_eq!(item.product_description, "");
        assert_eq!(item.quantity, Decimal::ZERO);
        assert_eq!(item.unit_cost, Some(Decimal::ZERO));
    }

    #[rstest]
    #[case("2024-01-02", at(2024, 1, 2, 0, 0, 0))]
    #[case("2024-01-02 10:30:00", at(2024, 1, 2, 10, 30, 0))]
    #[case(
        "2024-01-02 10:30:00.123456",
        at(2024, 1, 2, 10, 30, 0) + chrono::Duration::microseconds(123_456)
    )]
    #[case("2024-01-02T10:30:00", at(2024, 1, 2, 10, 30, 0))]
    #[case("2024-01-02 10:30", at(2024, 1, 2, 10, 30, 0))]
    #[case("2024-01-02 23:30:00-03", at(2024, 1, 2, 23, 30, 0))]
    #[case("2024-01-02 23:30:00+05:30", at(2024, 1, 2, 23, 30, 0))]
    #[case("2024-01-02T23:30:00Z", at(2024, 1, 2, 23, 30, 0))]
    fn test_parse_timestamp_formats(#[case] raw: &str, #[case] expected: NaiveDateTime) {
        assert_eq!(parse_timestamp(raw), Some(expected));
    }

    #[rstest]
    #[case("100", Some(dec!(100)))]
    #[case(" 12.50 ", Some(dec!(12.50)))]
    #[case("-3.5", Some(dec!(-3.5)))]
    #[case("1e3", Some(dec!(1000)))]
    #[case("Infinity", None)]
    #[case("R$ 10", None)]
    fn test_parse_decimal(#[case] raw: &str, #[case] expected: Option<Decimal>) {
        assert_eq!(parse_decimal(raw), expected);
    }

    #[test]
    fn test_normalize_rows_counts_drops_and_keeps_order() {
        let rows = vec![
            RawSaleRow {
                document_id: Some("A".to_string()),
                ..raw_row()
            },
            RawSaleRow {
                line_total: None,
                ..raw_row()
            },
            RawSaleRow {
                document_id: Some("B".to_string()),
                ..raw_row()
            },
            RawSaleRow {
                issued_at: Some("2024-13-45".to_string()),
                ..raw_row()
            },
        ];

        let normalized = normalize_rows(rows);
        let documents: Vec<_> = normalized
            .items
            .iter()
            .map(|i| i.document_id.as_str())
            .collect();
        assert_eq!(documents, vec!["A", "B"]);
        assert_eq!(normalized.dropped(), 2);
        assert_eq!(normalized.rejected[0], RowRejection::MissingLineTotal);
    }
}
