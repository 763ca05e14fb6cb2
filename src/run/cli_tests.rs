#![allow(clippy::unwrap_used, clippy::panic)]

use rust_decimal_macros::dec;

use super::*;
use crate::models::fixtures::{date, sample_ledger, txn};

fn args(s: &str) -> Vec<String> {
    s.split_whitespace().map(String::from).collect()
}

// ── Argument parsing ─────────────────────────────────────────

#[test]
fn test_no_args_launches_tui() {
    assert_eq!(
        Invocation::parse(&[]).unwrap(),
        Invocation::Tui(Options::default())
    );
}

#[test]
fn test_help_and_version() {
    assert_eq!(Invocation::parse(&args("--help")).unwrap(), Invocation::Help);
    assert_eq!(Invocation::parse(&args("-V")).unwrap(), Invocation::Version);
    assert!(Invocation::Help.options().is_none());
}

#[test]
fn test_tui_with_workbook() {
    let inv = Invocation::parse(&args("rentals.xlsx --no-income")).unwrap();
    let Invocation::Tui(options) = inv else {
        panic!("expected tui");
    };
    assert_eq!(options.workbook.as_deref(), Some("rentals.xlsx"));
    assert!(options.no_income);
    assert!(!options.no_expense);
}

#[test]
fn test_summary_with_filters() {
    let inv = Invocation::parse(&args(
        "summary book.xlsx --property A --property B --category Repairs --from 2024-01-01 --to 2024-03-31",
    ))
    .unwrap();
    let options = inv.options().unwrap();
    assert!(matches!(inv, Invocation::Summary(_)));
    assert_eq!(options.workbook.as_deref(), Some("book.xlsx"));
    assert_eq!(options.properties, vec!["A", "B"]);
    assert_eq!(options.categories, vec!["Repairs"]);
    assert_eq!(options.from, Some(date("2024-01-01")));
    assert_eq!(options.to, Some(date("2024-03-31")));
}

#[test]
fn test_export_needs_output_path() {
    assert!(Invocation::parse(&args("export")).is_err());

    let inv = Invocation::parse(&args("export out.csv book.xlsx")).unwrap();
    let Invocation::Export { out, options } = inv else {
        panic!("expected export");
    };
    assert_eq!(out, PathBuf::from("out.csv"));
    assert_eq!(options.workbook.as_deref(), Some("book.xlsx"));
}

#[test]
fn test_parse_errors() {
    assert!(Invocation::parse(&args("summary --from")).is_err());
    assert!(Invocation::parse(&args("summary --from 2024-13-45")).is_err());
    assert!(Invocation::parse(&args("summary --bogus")).is_err());
    assert!(Invocation::parse(&args("summary a.xlsx b.xlsx")).is_err());
}

// ── Options -> Filter ────────────────────────────────────────

#[test]
fn test_default_options_match_default_filter() {
    let ledger = sample_ledger();
    let filter = Options::default().filter(&ledger).unwrap();
    assert_eq!(filter, Filter::for_ledger(&ledger));
}

#[test]
fn test_property_flag_narrows_selection() {
    let ledger = sample_ledger();
    let options = Options {
        properties: vec!["unit b".into()],
        ..Options::default()
    };
    let filter = options.filter(&ledger).unwrap();
    let rows = filter.apply(ledger.transactions());
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].amount, dec!(-200));
}

#[test]
fn test_unknown_property_flag_fails() {
    let ledger = sample_ledger();
    let options = Options {
        properties: vec!["Unit Z".into()],
        ..Options::default()
    };
    let err = options.filter(&ledger).unwrap_err();
    assert!(err.to_string().contains("Unit A, Unit B"));
}

#[test]
fn test_missing_label_flag_selects_blank_category() {
    let ledger = Ledger::new(vec![
        txn("2024-03-01", dec!(-10), None, Some("Unit A"), None),
        txn("2024-03-02", dec!(-20), Some("Repairs"), Some("Unit A"), None),
    ]);
    let options = Options {
        categories: vec!["(none)".into()],
        ..Options::default()
    };
    let filter = options.filter(&ledger).unwrap();
    let rows = filter.apply(ledger.transactions());
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].amount, dec!(-10));
}

// ── Summary output ───────────────────────────────────────────

#[test]
fn test_summary_text() {
    let ledger = sample_ledger();
    let filter = Filter::for_ledger(&ledger);
    let mut out = Vec::new();
    write_summary(&mut out, &ledger, "test.xlsx", &filter).unwrap();
    let text = String::from_utf8(out).unwrap();

    assert!(text.starts_with("RentDash: test.xlsx\n"));
    assert!(text.contains("  Total Income:    $1,000.00\n"));
    assert!(text.contains("  Total Expenses:  $500.00\n"));
    assert!(text.contains("  Net Profit:      $500.00\n"));
    assert!(text.contains("  Transactions:    3 of 3\n"));
    assert!(text.contains("  2024-01  Income        $1,000.00\n"));

    let unit_b = text.find("  Unit B").unwrap();
    let unit_a = text.find("  Unit A").unwrap();
    assert!(unit_b < unit_a);
    assert!(text.contains("Home Depot"));
}

#[test]
fn test_summary_of_empty_selection() {
    let ledger = sample_ledger();
    let mut filter = Filter::for_ledger(&ledger);
    filter.show_income = false;
    filter.show_expense = false;
    let mut out = Vec::new();
    write_summary(&mut out, &ledger, "test.xlsx", &filter).unwrap();
    let text = String::from_utf8(out).unwrap();

    assert!(text.contains("  Net Profit:      $0.00\n"));
    assert!(!text.contains("Monthly:"));
    assert!(!text.contains("Top Vendors:"));
}

#[test]
fn test_cli_export_writes_table_order() {
    let ledger = sample_ledger();
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("out.csv");
    let invocation = Invocation::Export {
        out: out.clone(),
        options: Options::default(),
    };
    as_cli(&invocation, &ledger, "test.xlsx").unwrap();

    let content = std::fs::read_to_string(&out).unwrap();
    let dates: Vec<&str> = content
        .lines()
        .skip(1)
        .map(|l| l.split(',').next().unwrap())
        .collect();
    assert_eq!(dates, vec!["2024-02-01", "2024-01-10", "2024-01-05"]);
}
