#![allow(clippy::unwrap_used)]

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::*;
use crate::filter::{Filter, Selection};
use crate::models::fixtures::{date, sample_ledger, txn};
use crate::models::Ledger;

fn all_rows(ledger: &Ledger) -> Vec<&Transaction> {
    ledger.transactions().iter().collect()
}

fn group(label: &str, total: Decimal) -> GroupTotal {
    GroupTotal {
        label: Some(label.into()),
        total,
    }
}

fn point(month: &str, category_type: CategoryType, total: Decimal) -> MonthlyPoint {
    MonthlyPoint {
        month: month.into(),
        category_type,
        total,
    }
}

fn busy_ledger() -> Ledger {
    let mut rows = Vec::new();
    let vendors = [
        ("Home Depot", 5),
        ("City Water", 3),
        ("PG&E", 3),
        ("Lowe's", 2),
        ("Ace Hardware", 2),
        ("Plumber Joe", 1),
        ("Roofers Inc", 1),
        ("Landscaping Co", 1),
        ("Pest Control", 1),
        ("HOA", 1),
        ("Insurance Co", 1),
        ("County Tax", 1),
    ];
    for (i, (vendor, count)) in vendors.iter().enumerate() {
        for n in 0..*count {
            let day = format!("2024-{:02}-{:02}", (i % 12) + 1, n + 1);
            let property = if n % 2 == 0 { "Unit A" } else { "Unit B" };
            rows.push(txn(&day, dec!(-10), Some("Repairs"), Some(property), Some(vendor)));
        }
    }
    rows.push(txn("2024-06-01", dec!(2400), Some("Rental Income"), Some("Unit A"), Some("Tenant A")));
    Ledger::new(rows)
}

// ── Worked example ────────────────────────────────────────────

#[test]
fn test_example_totals() {
    let ledger = sample_ledger();
    let totals = Totals::compute(&all_rows(&ledger));
    assert_eq!(totals.income, dec!(1000));
    assert_eq!(totals.expense, dec!(500));
    assert_eq!(totals.net, dec!(500));
}

#[test]
fn test_example_profit_by_property() {
    let ledger = sample_ledger();
    assert_eq!(
        profit_by_property(&all_rows(&ledger)),
        vec![group("Unit B", dec!(-200)), group("Unit A", dec!(700))]
    );
}

#[test]
fn test_example_monthly_series() {
    let ledger = sample_ledger();
    assert_eq!(
        monthly_series(&all_rows(&ledger)),
        vec![
            point("2024-01", CategoryType::Income, dec!(1000)),
            point("2024-01", CategoryType::Expense, dec!(-300)),
            point("2024-02", CategoryType::Expense, dec!(-200)),
        ]
    );
}

#[test]
fn test_example_expense_by_category() {
    let ledger = sample_ledger();
    assert_eq!(
        expense_by_category(&all_rows(&ledger)),
        vec![group("Repairs", dec!(-500))]
    );
}

// ── Totals ────────────────────────────────────────────────────

#[test]
fn test_totals_empty() {
    let totals = Totals::compute(&[]);
    assert_eq!(totals, Totals::default());
    assert_eq!(totals.net, Decimal::ZERO);
}

#[test]
fn test_totals_consistency_on_every_subset() {
    let ledger = busy_ledger();
    let base = Filter::for_ledger(&ledger);
    let mut filters = vec![base.clone()];
    let mut only_b = base.clone();
    only_b.properties = Selection::of(["Unit B"]);
    filters.push(only_b);
    let mut no_expense = base.clone();
    no_expense.show_expense = false;
    filters.push(no_expense);
    let mut nothing = base.clone();
    nothing.show_income = false;
    nothing.show_expense = false;
    filters.push(nothing);

    for filter in &filters {
        let rows = filter.apply(ledger.transactions());
        let totals = Totals::compute(&rows);
        assert_eq!(totals.net, totals.income - totals.expense);
    }
}

#[test]
fn test_positive_expense_row_reduces_spend() {
    let ledger = Ledger::new(vec![
        txn("2024-01-01", dec!(-100), Some("Repairs"), Some("Unit A"), None),
        txn("2024-01-02", dec!(30), Some("Repairs"), Some("Unit A"), None),
    ]);
    let totals = Totals::compute(&all_rows(&ledger));
    assert_eq!(totals.expense, dec!(70));
    assert_eq!(totals.net, dec!(-70));
}

// ── Grouping ──────────────────────────────────────────────────

#[test]
fn test_group_totals_sum_to_net() {
    let ledger = busy_ledger();
    let rows = all_rows(&ledger);
    let net = Totals::compute(&rows).net;

    let by_property: Decimal = profit_by_property(&rows).iter().map(|g| g.total).sum();
    assert_eq!(by_property, net);

    let monthly: Decimal = monthly_series(&rows).iter().map(|p| p.total).sum();
    assert_eq!(monthly, net);
}

#[test]
fn test_missing_property_is_its_own_group() {
    let ledger = Ledger::new(vec![
        txn("2024-01-01", dec!(-5), Some("Repairs"), None, None),
        txn("2024-01-02", dec!(-7), Some("Repairs"), Some("Unit A"), None),
    ]);
    let groups = profit_by_property(&all_rows(&ledger));
    assert_eq!(groups.len(), 2);
    assert_eq!(groups[0].display_label(), "Unit A");
    assert_eq!(groups[1].display_label(), MISSING_LABEL);
    assert!(groups[1].label.is_none());
}

#[test]
fn test_monthly_series_one_point_per_key() {
    let ledger = busy_ledger();
    let series = monthly_series(&all_rows(&ledger));
    let mut keys: Vec<_> = series.iter().map(|p| (p.month.clone(), p.category_type)).collect();
    let before = keys.len();
    keys.dedup();
    assert_eq!(keys.len(), before);
}

#[test]
fn test_expense_by_category_ignores_income() {
    let ledger = Ledger::new(vec![
        txn("2024-01-01", dec!(900), Some("Rental Income"), Some("Unit A"), None),
        txn("2024-01-02", dec!(-50), Some("Utilities"), Some("Unit A"), None),
        txn("2024-01-03", dec!(-80), Some("Repairs"), Some("Unit A"), None),
        txn("2024-01-04", dec!(-20), None, Some("Unit A"), None),
    ]);
    assert_eq!(
        expense_by_category(&all_rows(&ledger)),
        vec![
            group("Repairs", dec!(-80)),
            group("Utilities", dec!(-50)),
            GroupTotal {
                label: None,
                total: dec!(-20)
            },
        ]
    );
}

#[test]
fn test_group_sorts_are_non_decreasing() {
    let ledger = busy_ledger();
    let rows = all_rows(&ledger);
    for groups in [profit_by_property(&rows), expense_by_category(&rows)] {
        assert!(groups.windows(2).all(|w| w[0].total <= w[1].total));
    }
}

#[test]
fn test_equal_group_totals_keep_label_order() {
    let ledger = Ledger::new(vec![
        txn("2024-01-01", dec!(-10), Some("Repairs"), Some("Unit C"), None),
        txn("2024-01-02", dec!(-10), Some("Repairs"), Some("Unit A"), None),
    ]);
    let labels: Vec<_> = profit_by_property(&all_rows(&ledger))
        .iter()
        .map(|g| g.display_label().to_string())
        .collect();
    assert_eq!(labels, vec!["Unit A", "Unit C"]);
}

// ── Top vendors ───────────────────────────────────────────────

#[test]
fn test_top_vendors_bound_and_order() {
    let ledger = busy_ledger();
    let rows = all_rows(&ledger);
    let top = top_vendors(&rows);
    assert_eq!(top.len(), TOP_VENDOR_LIMIT);
    assert_eq!(top[0], VendorCount { vendor: "Home Depot".into(), count: 5 });
    // Ties keep first-seen order.
    assert_eq!(top[1].vendor, "City Water");
    assert_eq!(top[2].vendor, "PG&E");
    assert_eq!(top[3].vendor, "Lowe's");
    assert_eq!(top[4].vendor, "Ace Hardware");
    assert_eq!(top[5].vendor, "Plumber Joe");

    let min_returned = top.iter().map(|v| v.count).min().unwrap();
    let returned: Vec<&str> = top.iter().map(|v| v.vendor.as_str()).collect();
    for t in &rows {
        let vendor = t.description.as_deref().unwrap();
        if !returned.contains(&vendor) {
            let count = rows
                .iter()
                .filter(|r| r.description.as_deref() == Some(vendor))
                .count();
            assert!(count <= min_returned);
        }
    }
}

#[test]
fn test_top_vendors_skips_missing_description() {
    let ledger = Ledger::new(vec![
        txn("2024-01-01", dec!(-1), Some("Repairs"), Some("Unit A"), None),
        txn("2024-01-02", dec!(-1), Some("Repairs"), Some("Unit A"), Some("Ace")),
    ]);
    let top = top_vendors(&all_rows(&ledger));
    assert_eq!(top, vec![VendorCount { vendor: "Ace".into(), count: 1 }]);
}

#[test]
fn test_top_vendors_empty() {
    assert!(top_vendors(&[]).is_empty());
}

// ── Table ─────────────────────────────────────────────────────

#[test]
fn test_table_newest_first_and_stable() {
    let ledger = Ledger::new(vec![
        txn("2024-01-01", dec!(-1), Some("Repairs"), Some("Unit A"), Some("first")),
        txn("2024-03-01", dec!(-2), Some("Repairs"), Some("Unit A"), Some("newest")),
        txn("2024-01-01", dec!(-3), Some("Repairs"), Some("Unit A"), Some("second")),
    ]);
    let sorted = table(&all_rows(&ledger));
    let names: Vec<_> = sorted.iter().map(|t| t.description.as_deref().unwrap()).collect();
    assert_eq!(names, vec!["newest", "first", "second"]);
    assert!(sorted.windows(2).all(|w| w[0].date >= w[1].date));
}

#[test]
fn test_sort_column_parse_and_cycle() {
    assert_eq!(SortColumn::parse("Amount"), Some(SortColumn::Amount));
    assert_eq!(SortColumn::parse("vendor"), Some(SortColumn::Description));
    assert_eq!(SortColumn::parse("entity"), None);
    assert_eq!(SortColumn::Description.next(), SortColumn::Date);
    assert_eq!(SortColumn::Date.next(), SortColumn::Amount);
}

#[test]
fn test_sort_key_natural_direction() {
    assert_eq!(SortKey::default().to_string(), "date desc");
    assert_eq!(SortColumn::Amount.natural_key().to_string(), "amount desc");
    assert_eq!(SortColumn::Category.natural_key().to_string(), "category asc");
    assert_eq!(SortKey::default().reversed().to_string(), "date asc");
}

#[test]
fn test_sort_key_keeps_ties_in_place() {
    let ledger = Ledger::new(vec![
        txn("2024-01-01", dec!(-5), Some("Repairs"), Some("Unit B"), Some("a")),
        txn("2024-01-02", dec!(-5), Some("Repairs"), Some("Unit A"), Some("b")),
        txn("2024-01-03", dec!(-9), Some("Repairs"), None, Some("c")),
    ]);
    let mut rows = all_rows(&ledger);
    let names = |rows: &[&Transaction]| -> Vec<String> {
        rows.iter().map(|t| t.description.clone().unwrap()).collect()
    };

    SortColumn::Amount.natural_key().apply(&mut rows);
    assert_eq!(names(&rows), vec!["a", "b", "c"]);

    SortColumn::Amount.natural_key().reversed().apply(&mut rows);
    assert_eq!(names(&rows), vec!["c", "a", "b"]);

    SortColumn::Property.natural_key().apply(&mut rows);
    assert_eq!(names(&rows), vec!["c", "b", "a"]);
}

// ── Report ────────────────────────────────────────────────────

#[test]
fn test_report_build_and_series() {
    let ledger = sample_ledger();
    let rows = all_rows(&ledger);
    let report = Report::build(&rows);
    assert_eq!(report.months(), vec!["2024-01", "2024-02"]);
    assert_eq!(report.series(CategoryType::Income), vec![(0, dec!(1000))]);
    assert_eq!(
        report.series(CategoryType::Expense),
        vec![(0, dec!(-300)), (1, dec!(-200))]
    );
    assert_eq!(report.table.len(), 3);
    assert_eq!(report.table[0].date, date("2024-02-01"));
}

#[test]
fn test_report_on_empty_view() {
    let report = Report::build(&[]);
    assert_eq!(report.totals, Totals::default());
    assert!(report.monthly.is_empty());
    assert!(report.by_property.is_empty());
    assert!(report.by_category.is_empty());
    assert!(report.vendors.is_empty());
    assert!(report.table.is_empty());
    assert!(report.months().is_empty());
}
