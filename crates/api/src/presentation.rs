//! Display formatting for dashboard values.
//!
//! Formatting is applied last, on full-precision values from the metrics
//! engine, and is never read back for logic.

use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;

/// Formats a monetary amount as `"R$ 1,234.57"`.
#[must_use]
pub fn format_money(amount: Decimal, symbol: &str) -> String {
    format!("{symbol} {}", format_grouped(amount))
}

/// Formats a percentage as `"12.35%"`.
#[must_use]
pub fn format_percent(value: Decimal) -> String {
    let rounded = round_2(value);
    format!("{rounded:.2}%")
}

/// Formats a quantity with two decimals and thousands separators.
#[must_use]
pub fn format_quantity(quantity: Decimal) -> String {
    format_grouped(quantity)
}

/// Formats a date as a `dd/mm` chart axis label.
#[must_use]
pub fn format_day_label(date: NaiveDate) -> String {
    date.format("%d/%m").to_string()
}

/// Rounds to cents, half away from zero, without a negative zero.
fn round_2(value: Decimal) -> Decimal {
    let rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    if rounded.is_zero() { Decimal::ZERO } else { rounded }
}

/// Two decimals with `,` grouping the integer digits.
fn format_grouped(value: Decimal) -> String {
    let rounded = round_2(value);
    let plain = format!("{:.2}", rounded.abs());
    let (int_part, frac_part) = plain.split_once('.').unwrap_or((plain.as_str(), "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, digit) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if rounded.is_sign_negative() { "-" } else { "" };
    format!("{sign}{grouped}.{frac_part}")
}

/// Visual treatment of a margin, from its sign.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MarginTone {
    /// Margin above zero.
    Positive,
    /// Margin below zero.
    Negative,
    /// Margin of exactly zero.
    Neutral,
}

impl MarginTone {
    /// Picks the tone for a numeric margin.
    #[must_use]
    pub fn from_value(margin: Decimal) -> Self {
        if margin.is_zero() {
            Self::Neutral
        } else if margin.is_sign_negative() {
            Self::Negative
        } else {
            Self::Positive
        }
    }

    /// CSS declarations used to render the tone.
    #[must_use]
    pub const fn style(self) -> &'static str {
        match self {
            Self::Positive => "color: green; font-weight: bold",
            Self::Negative => "color: red; font-weight: bold",
            Self::Neutral => "color: gray",
        }
    }
}
