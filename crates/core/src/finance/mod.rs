//! Portfolio financial aggregation.
//!
//! Rolls all expense/revenue rows in an optional date range up into
//! portfolio-wide totals, a per-property breakdown, category breakdowns,
//! and a monthly trend. Rows are already small in number; everything here
//! is a linear scan over fetched data.

mod portfolio;
mod types;

pub use portfolio::{build_portfolio_summary, round_percent};
pub use types::{
    DateRange, FinancialSummary, MonthlyTrend, PortfolioSummary, PropertyBreakdown, PropertyRef,
    TransactionRecord,
};

#[cfg(test)]
mod tests;
