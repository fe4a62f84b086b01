//! Tests for the portfolio aggregation module.

use chrono::NaiveDate;
use proptest::prelude::*;
use rstest::rstest;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use uuid::Uuid;

use super::portfolio::{build_portfolio_summary, round_percent};
use super::types::{DateRange, PropertyRef, TransactionRecord};

fn date(s: &str) -> NaiveDate {
    s.parse().unwrap()
}

fn tx(amount: Decimal, category: &str, day: &str, property_id: Option<Uuid>) -> TransactionRecord {
    TransactionRecord {
        amount,
        category: category.to_string(),
        date: date(day),
        property_id,
    }
}

fn prop(name: &str) -> PropertyRef {
    PropertyRef {
        id: Uuid::new_v4(),
        name: name.to_string(),
    }
}

// ============================================================================
// Zero-division guard
// ============================================================================

#[rstest]
#[case(dec!(0), dec!(0), 0)]
#[case(dec!(-500), dec!(0), 0)] // negative net, zero income: still 0
#[case(dec!(50), dec!(100), 50)]
#[case(dec!(1), dec!(3), 33)]
#[case(dec!(2), dec!(3), 67)]
#[case(dec!(-25), dec!(100), -25)]
fn test_round_percent(#[case] part: Decimal, #[case] whole: Decimal, #[case] expected: i32) {
    assert_eq!(round_percent(part, whole), expected);
}

#[test]
fn test_profit_margin_zero_when_no_income() {
    let summary = build_portfolio_summary(
        &[],
        &[tx(dec!(900), "maintenance", "2024-03-10", None)],
        &[],
    );
    assert_eq!(summary.profit_margin, 0);
    assert_eq!(summary.net_profit, dec!(-900));
}

// ============================================================================
// Per-property completeness
// ============================================================================

#[test]
fn test_breakdown_contains_every_property() {
    let properties = vec![prop("Aspen Loft"), prop("Birch House"), prop("Cedar Flat")];
    let revenues = vec![tx(
        dec!(1200),
        "booking",
        "2024-01-05",
        Some(properties[0].id),
    )];

    let summary = build_portfolio_summary(&properties, &[], &revenues);

    assert_eq!(summary.property_breakdown.len(), 3);
    assert_eq!(summary.property_breakdown[0].income, dec!(1200));
    assert_eq!(summary.property_breakdown[1].income, Decimal::ZERO);
    assert_eq!(summary.property_breakdown[2].expenses, Decimal::ZERO);
}

#[test]
fn test_orphaned_rows_count_in_totals_but_not_breakdown() {
    let properties = vec![prop("Aspen Loft")];
    let revenues = vec![
        tx(dec!(100), "rent", "2024-01-01", Some(properties[0].id)),
        tx(dec!(40), "rent", "2024-01-02", Some(Uuid::new_v4())), // orphan
        tx(dec!(60), "rent", "2024-01-03", None),
    ];

    let summary = build_portfolio_summary(&properties, &[], &revenues);

    assert_eq!(summary.total_income, dec!(200));
    let attributed: Decimal = summary.property_breakdown.iter().map(|p| p.income).sum();
    assert_eq!(attributed, dec!(100));
}

proptest! {
    /// With no orphaned rows, the breakdown has one entry per property and
    /// its income column sums to the portfolio total.
    #[test]
    fn test_breakdown_income_sums_to_total(
        num_properties in 1usize..8,
        amounts in proptest::collection::vec(1u32..100_000, 0..40),
    ) {
        let properties: Vec<PropertyRef> = (0..num_properties)
            .map(|i| prop(&format!("Property {i}")))
            .collect();
        let revenues: Vec<TransactionRecord> = amounts
            .iter()
            .enumerate()
            .map(|(i, cents)| tx(
                Decimal::from(*cents),
                "booking",
                "2024-06-15",
                Some(properties[i % num_properties].id),
            ))
            .collect();

        let summary = build_portfolio_summary(&properties, &[], &revenues);

        prop_assert_eq!(summary.property_breakdown.len(), num_properties);
        let attributed: Decimal = summary.property_breakdown.iter().map(|p| p.income).sum();
        prop_assert_eq!(attributed, summary.total_income);
    }

    /// Net profit always equals income minus expenses, portfolio-wide and
    /// per property.
    #[test]
    fn test_net_profit_identity(
        income in 0u32..1_000_000,
        spend in 0u32..1_000_000,
    ) {
        let properties = vec![prop("Solo")];
        let revenues = vec![tx(Decimal::from(income), "rent", "2024-02-01", Some(properties[0].id))];
        let expenses = vec![tx(Decimal::from(spend), "supplies", "2024-02-02", Some(properties[0].id))];

        let summary = build_portfolio_summary(&properties, &expenses, &revenues);

        prop_assert_eq!(summary.net_profit, summary.total_income - summary.total_expenses);
        let entry = &summary.property_breakdown[0];
        prop_assert_eq!(entry.net_profit, entry.income - entry.expenses);
    }
}

// ============================================================================
// Date-range inclusivity
// ============================================================================

#[test]
fn test_range_bounds_are_inclusive() {
    let range = DateRange::new(Some(date("2024-03-01")), Some(date("2024-03-31")));

    assert!(range.contains(date("2024-03-01")));
    assert!(range.contains(date("2024-03-31")));
    assert!(!range.contains(date("2024-02-29")));
    assert!(!range.contains(date("2024-04-01")));
}

#[test]
fn test_open_bounds() {
    let from_march = DateRange::new(Some(date("2024-03-01")), None);
    assert!(from_march.contains(date("2030-01-01")));
    assert!(!from_march.contains(date("2024-02-29")));

    let unbounded = DateRange::default();
    assert!(unbounded.is_unbounded());
    assert!(unbounded.contains(date("1999-01-01")));
}

#[test]
fn test_filtered_totals_respect_range() {
    let range = DateRange::new(Some(date("2024-03-01")), Some(date("2024-03-31")));
    let all_revenues = vec![
        tx(dec!(100), "booking", "2024-03-01", None),
        tx(dec!(500), "booking", "2024-04-01", None),
    ];
    let in_range: Vec<TransactionRecord> = all_revenues
        .into_iter()
        .filter(|r| range.contains(r.date))
        .collect();

    let summary = build_portfolio_summary(&[], &[], &in_range);
    assert_eq!(summary.total_income, dec!(100));
}

// ============================================================================
// Category and monthly grouping
// ============================================================================

#[test]
fn test_category_breakdown_skips_absent_categories() {
    let expenses = vec![
        tx(dec!(10), "maintenance", "2024-01-01", None),
        tx(dec!(15), "maintenance", "2024-01-02", None),
        tx(dec!(7), "utilities", "2024-01-03", None),
    ];

    let summary = build_portfolio_summary(&[], &expenses, &[]);

    assert_eq!(summary.exp_by_category.len(), 2);
    assert_eq!(summary.exp_by_category["maintenance"], dec!(25));
    assert_eq!(summary.exp_by_category["utilities"], dec!(7));
    assert!(!summary.exp_by_category.contains_key("payroll"));
}

#[test]
fn test_monthly_trend_sorted_ascending() {
    // Inserted out of order on purpose.
    let revenues = vec![
        tx(dec!(300), "booking", "2024-02-10", None),
        tx(dec!(100), "booking", "2024-01-20", None),
    ];
    let expenses = vec![tx(dec!(50), "supplies", "2024-02-05", None)];

    let summary = build_portfolio_summary(&[], &expenses, &revenues);

    let months: Vec<&str> = summary.monthly.iter().map(|m| m.month.as_str()).collect();
    assert_eq!(months, vec!["2024-01", "2024-02"]);
    assert_eq!(summary.monthly[0].income, dec!(100));
    assert_eq!(summary.monthly[1].income, dec!(300));
    assert_eq!(summary.monthly[1].expenses, dec!(50));
}

#[test]
fn test_monthly_trend_only_months_with_transactions() {
    let revenues = vec![
        tx(dec!(1), "rent", "2023-11-01", None),
        tx(dec!(2), "rent", "2024-03-01", None),
    ];
    let summary = build_portfolio_summary(&[], &[], &revenues);
    let months: Vec<&str> = summary.monthly.iter().map(|m| m.month.as_str()).collect();
    assert_eq!(months, vec!["2023-11", "2024-03"]);
}

// ============================================================================
// Determinism
// ============================================================================

#[test]
fn test_identical_inputs_identical_json() {
    let properties = vec![prop("Aspen Loft"), prop("Birch House")];
    let expenses = vec![
        tx(dec!(12.34), "supplies", "2024-05-01", Some(properties[1].id)),
        tx(dec!(56.78), "marketing", "2024-06-01", None),
    ];
    let revenues = vec![tx(dec!(90.12), "service", "2024-05-15", Some(properties[0].id))];

    let first = build_portfolio_summary(&properties, &expenses, &revenues);
    let second = build_portfolio_summary(&properties, &expenses, &revenues);

    assert_eq!(first, second);
    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
}

#[test]
fn test_summary_serializes_money_as_numbers() {
    let summary = build_portfolio_summary(
        &[],
        &[tx(dec!(25.50), "supplies", "2024-01-01", None)],
        &[tx(dec!(100), "rent", "2024-01-02", None)],
    );

    let json = serde_json::to_value(&summary).unwrap();
    assert!(json["totalIncome"].is_number());
    assert!(json["expByCategory"]["supplies"].is_number());
    assert_eq!(json["profitMargin"], serde_json::json!(75));
}
