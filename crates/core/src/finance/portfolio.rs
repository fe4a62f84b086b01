//! Portfolio summary construction.

use std::collections::BTreeMap;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

use super::types::{
    MonthlyTrend, PortfolioSummary, PropertyBreakdown, PropertyRef, TransactionRecord,
};

/// Rounds `part / whole` to an integer percentage.
///
/// Returns exactly 0 when `whole` is zero, guarding the division instead of
/// producing an undefined ratio.
#[must_use]
pub fn round_percent(part: Decimal, whole: Decimal) -> i32 {
    if whole.is_zero() {
        return 0;
    }
    (part / whole * Decimal::ONE_HUNDRED)
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i32()
        .unwrap_or(0)
}

/// Month key of a transaction: the first seven characters of its ISO date.
fn month_key(record: &TransactionRecord) -> String {
    record.date.format("%Y-%m").to_string()
}

/// Builds the portfolio-wide financial summary from in-range rows.
///
/// Callers are expected to have already filtered `expenses` and `revenues`
/// to the requested date range. Properties arrive unfiltered so that every
/// property appears in the breakdown, including those with no transactions.
/// Rows whose `property_id` is null or does not match a known property count
/// toward the totals but are silently dropped from the breakdown.
#[must_use]
pub fn build_portfolio_summary(
    properties: &[PropertyRef],
    expenses: &[TransactionRecord],
    revenues: &[TransactionRecord],
) -> PortfolioSummary {
    let total_income: Decimal = revenues.iter().map(|r| r.amount).sum();
    let total_expenses: Decimal = expenses.iter().map(|e| e.amount).sum();
    let net_profit = total_income - total_expenses;
    let profit_margin = round_percent(net_profit, total_income);

    // Per-property breakdown, seeded with every property at zero.
    let mut buckets: BTreeMap<uuid::Uuid, (Decimal, Decimal)> = properties
        .iter()
        .map(|p| (p.id, (Decimal::ZERO, Decimal::ZERO)))
        .collect();
    for revenue in revenues {
        if let Some(id) = revenue.property_id
            && let Some(bucket) = buckets.get_mut(&id)
        {
            bucket.0 += revenue.amount;
        }
    }
    for expense in expenses {
        if let Some(id) = expense.property_id
            && let Some(bucket) = buckets.get_mut(&id)
        {
            bucket.1 += expense.amount;
        }
    }
    let property_breakdown = properties
        .iter()
        .map(|p| {
            let (income, expenses) = buckets[&p.id];
            PropertyBreakdown {
                id: p.id,
                name: p.name.clone(),
                income,
                expenses,
                net_profit: income - expenses,
            }
        })
        .collect();

    let mut exp_by_category: BTreeMap<String, Decimal> = BTreeMap::new();
    for expense in expenses {
        *exp_by_category
            .entry(expense.category.clone())
            .or_insert(Decimal::ZERO) += expense.amount;
    }
    let mut rev_by_category: BTreeMap<String, Decimal> = BTreeMap::new();
    for revenue in revenues {
        *rev_by_category
            .entry(revenue.category.clone())
            .or_insert(Decimal::ZERO) += revenue.amount;
    }

    // BTreeMap keys are YYYY-MM strings, so iteration order is chronological.
    let mut monthly_map: BTreeMap<String, (Decimal, Decimal)> = BTreeMap::new();
    for revenue in revenues {
        monthly_map
            .entry(month_key(revenue))
            .or_insert((Decimal::ZERO, Decimal::ZERO))
            .0 += revenue.amount;
    }
    for expense in expenses {
        monthly_map
            .entry(month_key(expense))
            .or_insert((Decimal::ZERO, Decimal::ZERO))
            .1 += expense.amount;
    }
    let monthly = monthly_map
        .into_iter()
        .map(|(month, (income, expenses))| MonthlyTrend {
            month,
            income,
            expenses,
        })
        .collect();

    PortfolioSummary {
        total_income,
        total_expenses,
        net_profit,
        profit_margin,
        property_breakdown,
        exp_by_category,
        rev_by_category,
        monthly,
    }
}
