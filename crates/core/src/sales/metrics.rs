//! Sales metrics engine.
//!
//! Turns normalized sale lines into the figures the dashboard shows. Every
//! function here is pure and deterministic. Ratios whose denominator is zero
//! are defined as zero, and sums and products saturate at the `Decimal`
//! bounds instead of panicking.

use std::collections::{BTreeMap, HashMap, HashSet};

use chrono::NaiveDate;
use rust_decimal::Decimal;
use salesboard_shared::DateRange;

use super::types::{
    DailySales, DerivedLine, ModelFilter, ProductRanking, SaleLineItem, SalesDashboard, SalesKpis,
};

/// Engine for computing sales profitability metrics.
pub struct MetricsEngine;

impl MetricsEngine {
    /// Derives cost, profit and margins for one line.
    ///
    /// A line without a cost record has a unit cost of zero.
    #[must_use]
    pub fn derive(item: SaleLineItem) -> DerivedLine {
        let unit_cost = item.unit_cost.unwrap_or(Decimal::ZERO);
        let total_cost = unit_cost.saturating_mul(item.quantity);
        let profit = item.line_total.saturating_sub(total_cost);
        let margin_on_sale = percent_of(profit, item.line_total);
        let margin_on_cost = percent_of(profit, total_cost);

        DerivedLine {
            item,
            unit_cost,
            total_cost,
            profit,
            margin_on_sale,
            margin_on_cost,
        }
    }

    /// Derives every line, preserving order.
    #[must_use]
    pub fn derive_all(items: Vec<SaleLineItem>) -> Vec<DerivedLine> {
        items.into_iter().map(Self::derive).collect()
    }

    /// Computes the headline figures.
    ///
    /// Blended margins divide the aggregate profit by the aggregate sales or
    /// cost, so large lines weigh more than small ones.
    #[must_use]
    pub fn kpis(lines: &[DerivedLine]) -> SalesKpis {
        let total_sales = sum_of(lines.iter().map(|l| l.item.line_total));
        let total_cost = sum_of(lines.iter().map(|l| l.total_cost));
        let total_profit = sum_of(lines.iter().map(|l| l.profit));
        let total_quantity = sum_of(lines.iter().map(|l| l.item.quantity));

        let unique_sales_count = lines
            .iter()
            .map(|l| l.item.document_id.as_str())
            .collect::<HashSet<_>>()
            .len();
        let sales_count = Decimal::from(unique_sales_count);

        SalesKpis {
            total_sales,
            total_cost,
            total_profit,
            margin_on_sales: percent_of(total_profit, total_sales),
            margin_on_cost: percent_of(total_profit, total_cost),
            total_quantity,
            unique_sales_count,
            avg_ticket: ratio(total_sales, sales_count),
            items_per_sale: ratio(total_quantity, sales_count),
        }
    }

    /// Sums line totals per issuance day.
    ///
    /// Returns exactly one entry per day of `range`, in ascending order, with
    /// zero for days without sales. Lines outside the range are ignored.
    #[must_use]
    pub fn daily_series(lines: &[DerivedLine], range: DateRange) -> Vec<DailySales> {
        let mut totals: BTreeMap<NaiveDate, Decimal> = BTreeMap::new();
        for line in lines {
            let day = line.issued_on();
            if range.contains(day) {
                let total = totals.entry(day).or_insert(Decimal::ZERO);
                *total = total.saturating_add(line.item.line_total);
            }
        }

        range
            .days()
            .map(|date| DailySales {
                date,
                total: totals.get(&date).copied().unwrap_or(Decimal::ZERO),
            })
            .collect()
    }

    /// Ranks products by quantity sold, descending.
    ///
    /// Products are keyed by code and description. Products with the same
    /// quantity keep the order in which they first appear. Margins are the
    /// plain mean of the product's line margins, not sum-then-divide like
    /// [`MetricsEngine::kpis`].
    #[must_use]
    pub fn rank_products(lines: &[DerivedLine]) -> Vec<ProductRanking> {
        let mut index: HashMap<(&str, &str), usize> = HashMap::new();
        let mut groups: Vec<ProductAccumulator> = Vec::new();

        for line in lines {
            let key = (
                line.item.product_code.as_str(),
                line.item.product_description.as_str(),
            );
            let slot = *index.entry(key).or_insert_with(|| {
                groups.push(ProductAccumulator::new(key.0, key.1));
                groups.len() - 1
            });
            groups[slot].add(line);
        }

        let mut ranking: Vec<ProductRanking> =
            groups.into_iter().map(ProductAccumulator::finish).collect();
        ranking.sort_by(|a, b| b.quantity.cmp(&a.quantity));
        ranking
    }

    /// Builds the full dashboard for one filter selection.
    #[must_use]
    pub fn build(items: Vec<SaleLineItem>, range: DateRange, model: ModelFilter) -> SalesDashboard {
        let lines = Self::derive_all(items);

        SalesDashboard {
            range,
            model,
            kpis: Self::kpis(&lines),
            daily_sales: Self::daily_series(&lines, range),
            ranking: Self::rank_products(&lines),
            line_count: lines.len(),
        }
    }
}

/// Running sums for one product.
struct ProductAccumulator {
    product_code: String,
    product_description: String,
    quantity: Decimal,
    total_sales: Decimal,
    total_cost: Decimal,
    profit: Decimal,
    margin_on_sale_sum: Decimal,
    margin_on_cost_sum: Decimal,
    line_count: usize,
}

impl ProductAccumulator {
    fn new(product_code: &str, product_description: &str) -> Self {
        Self {
            product_code: product_code.to_string(),
            product_description: product_description.to_string(),
            quantity: Decimal::ZERO,
            total_sales: Decimal::ZERO,
            total_cost: Decimal::ZERO,
            profit: Decimal::ZERO,
            margin_on_sale_sum: Decimal::ZERO,
            margin_on_cost_sum: Decimal::ZERO,
            line_count: 0,
        }
    }

    fn add(&mut self, line: &DerivedLine) {
        self.quantity = self.quantity.saturating_add(line.item.quantity);
        self.total_sales = self.total_sales.saturating_add(line.item.line_total);
        self.total_cost = self.total_cost.saturating_add(line.total_cost);
        self.profit = self.profit.saturating_add(line.profit);
        self.margin_on_sale_sum = self.margin_on_sale_sum.saturating_add(line.margin_on_sale);
        self.margin_on_cost_sum = self.margin_on_cost_sum.saturating_add(line.margin_on_cost);
        self.line_count += 1;
    }

    fn finish(self) -> ProductRanking {
        let lines = Decimal::from(self.line_count);
        ProductRanking {
            product_code: self.product_code,
            product_description: self.product_description,
            quantity: self.quantity,
            total_sales: self.total_sales,
            total_cost: self.total_cost,
            profit: self.profit,
            margin_on_sale: ratio(self.margin_on_sale_sum, lines),
            margin_on_cost: ratio(self.margin_on_cost_sum, lines),
            line_count: self.line_count,
        }
    }
}

/// Sum that saturates at the `Decimal` bounds.
fn sum_of(values: impl Iterator<Item = Decimal>) -> Decimal {
    values.fold(Decimal::ZERO, Decimal::saturating_add)
}

/// `numerator / denominator`, zero when the denominator is zero or the
/// quotient does not fit.
fn ratio(numerator: Decimal, denominator: Decimal) -> Decimal {
    if denominator.is_zero() {
        return Decimal::ZERO;
    }
    numerator.checked_div(denominator).unwrap_or(Decimal::ZERO)
}

/// `numerator / denominator * 100`, zero when the denominator is zero.
fn percent_of(numerator: Decimal, denominator: Decimal) -> Decimal {
    ratio(numerator, denominator)
        .checked_mul(Decimal::ONE_HUNDRED)
        .unwrap_or(Decimal::ZERO)
}
