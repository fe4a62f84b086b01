//! Financial aggregation data types.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use coveted_shared::types::decimal_map;

/// Inclusive calendar-date range; either bound may be omitted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateRange {
    /// Inclusive lower bound.
    pub start: Option<NaiveDate>,
    /// Inclusive upper bound.
    pub end: Option<NaiveDate>,
}

impl DateRange {
    /// Creates a range from optional bounds.
    #[must_use]
    pub const fn new(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        Self { start, end }
    }

    /// Returns true when the date falls within the range, bounds inclusive.
    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start.is_none_or(|start| date >= start) && self.end.is_none_or(|end| date <= end)
    }

    /// Returns true when neither bound is set.
    #[must_use]
    pub const fn is_unbounded(&self) -> bool {
        self.start.is_none() && self.end.is_none()
    }
}

/// Property identity used to seed the per-property breakdown.
#[derive(Debug, Clone)]
pub struct PropertyRef {
    /// Property ID.
    pub id: Uuid,
    /// Property name.
    pub name: String,
}

/// One expense or revenue row feeding the aggregation.
#[derive(Debug, Clone)]
pub struct TransactionRecord {
    /// Transaction amount (non-negative).
    pub amount: Decimal,
    /// Category label.
    pub category: String,
    /// Calendar date of the transaction.
    pub date: NaiveDate,
    /// Loose property reference; may be null or orphaned.
    pub property_id: Option<Uuid>,
}

/// Portfolio-wide financial summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioSummary {
    /// Sum of revenue amounts in range.
    #[serde(with = "rust_decimal::serde::float")]
    pub total_income: Decimal,
    /// Sum of expense amounts in range.
    #[serde(with = "rust_decimal::serde::float")]
    pub total_expenses: Decimal,
    /// Income minus expenses.
    #[serde(with = "rust_decimal::serde::float")]
    pub net_profit: Decimal,
    /// Integer percentage; exactly 0 when income is 0.
    pub profit_margin: i32,
    /// One entry per property, zero-filled when it had no transactions.
    pub property_breakdown: Vec<PropertyBreakdown>,
    /// Expense totals per category; absent categories are not zero-filled.
    #[serde(with = "decimal_map")]
    pub exp_by_category: BTreeMap<String, Decimal>,
    /// Revenue totals per category.
    #[serde(with = "decimal_map")]
    pub rev_by_category: BTreeMap<String, Decimal>,
    /// Per-month totals, ascending by month key.
    pub monthly: Vec<MonthlyTrend>,
}

/// Per-property income/expense rollup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyBreakdown {
    /// Property ID.
    pub id: Uuid,
    /// Property name.
    pub name: String,
    /// Revenue attributed to this property.
    #[serde(with = "rust_decimal::serde::float")]
    pub income: Decimal,
    /// Expenses attributed to this property.
    #[serde(with = "rust_decimal::serde::float")]
    pub expenses: Decimal,
    /// Income minus expenses.
    #[serde(with = "rust_decimal::serde::float")]
    pub net_profit: Decimal,
}

/// Income/expense totals for one `YYYY-MM` month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyTrend {
    /// Month key, `YYYY-MM`.
    pub month: String,
    /// Revenue total for the month.
    #[serde(with = "rust_decimal::serde::float")]
    pub income: Decimal,
    /// Expense total for the month.
    #[serde(with = "rust_decimal::serde::float")]
    pub expenses: Decimal,
}

/// Flat totals for the simple `/financials/summary` endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancialSummary {
    /// Sum of all expense amounts.
    #[serde(with = "rust_decimal::serde::float")]
    pub total_expenses: Decimal,
    /// Sum of all revenue amounts.
    #[serde(with = "rust_decimal::serde::float")]
    pub total_revenue: Decimal,
    /// Revenue minus expenses.
    #[serde(with = "rust_decimal::serde::float")]
    pub net_income: Decimal,
    /// Number of expense rows.
    pub expense_count: u64,
    /// Number of revenue rows.
    pub revenue_count: u64,
}
