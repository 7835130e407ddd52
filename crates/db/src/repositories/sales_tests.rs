//! Tests for sales query construction.
//!
//! Query execution is covered by the integration tests in `tests/`.

use chrono::NaiveDate;
use proptest::prelude::*;
use salesboard_core::sales::ModelFilter;
use salesboard_shared::DateRange;
use sea_orm::Value;

use super::{SalesError, models_statement, sales_statement};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn values_of(statement: &sea_orm::Statement) -> Vec<Value> {
    statement.values.clone().map(|v| v.0).unwrap_or_default()
}

#[test]
fn test_models_statement_binds_inclusive_range() {
    let range = DateRange::new(date(2024, 1, 1), date(2024, 1, 31));
    let statement = models_statement(range).unwrap();

    assert!(statement.sql.contains("v.emissao >= $1"));
    assert!(statement.sql.contains("v.emissao < $2"));
    assert_eq!(
        values_of(&statement),
        vec![Value::from(date(2024, 1, 1)), Value::from(date(2024, 2, 1))]
    );
}

#[test]
fn test_sales_statement_without_model_filter() {
    let range = DateRange::single_day(date(2024, 1, 2));
    let statement = sales_statement(range, &ModelFilter::All).unwrap();

    assert!(statement.sql.contains("LEFT JOIN produto p ON p.codigo = v.produto"));
    assert!(!statement.sql.contains("$3"));
    assert!(statement.sql.trim_end().ends_with("ORDER BY v.emissao, v.documento, v.produto"));
    assert_eq!(values_of(&statement).len(), 2);
}

#[test]
fn test_sales_statement_binds_model() {
    let range = DateRange::single_day(date(2024, 1, 2));
    let model = ModelFilter::Model("65".to_string());
    let statement = sales_statement(range, &model).unwrap();

    assert!(statement.sql.contains("AND v.modelo::text = $3"));
    assert!(!statement.sql.contains("v.modelo = $3"));
    assert_eq!(
        values_of(&statement),
        vec![
            Value::from(date(2024, 1, 2)),
            Value::from(date(2024, 1, 3)),
            Value::from("65"),
        ]
    );
}

#[test]
fn test_range_ending_on_last_day_is_rejected() {
    let range = DateRange::single_day(NaiveDate::MAX);
    assert!(matches!(
        models_statement(range),
        Err(SalesError::DateOutOfRange(_))
    ));
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// **Property: model values are bound, never interpolated**
    ///
    /// *For any* model tag, the SQL text is identical and the tag only
    /// appears among the bound values.
    #[test]
    fn prop_model_is_never_interpolated(model in "[a-zA-Z0-9';\\- ]{1,24}") {
        prop_assume!(!model.trim().is_empty());
        let range = DateRange::single_day(date(2024, 1, 2));
        let reference = sales_statement(range, &ModelFilter::Model("55".to_string())).unwrap();
        let statement = sales_statement(range, &ModelFilter::Model(model.clone())).unwrap();

        prop_assert_eq!(&statement.sql, &reference.sql);
        prop_assert_eq!(values_of(&statement).last().cloned(), Some(Value::from(model)));
    }
}
