#![allow(clippy::unwrap_used)]

use super::*;
use crate::models::fixtures::{sample_ledger, txn};
use crate::models::Ledger;
use crate::report;
use rust_decimal_macros::dec;

#[test]
fn test_write_csv_header_and_rows() {
    let ledger = sample_ledger();
    let rows = report::table(&ledger.transactions().iter().collect::<Vec<_>>());
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.csv");

    let count = write_csv(&path, &rows).unwrap();
    assert_eq!(count, 3);

    let content = std::fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(
        lines[0],
        "Date,Bank,Account,Description,Amount,Type,Category,Entity,Notes,Month,Category Type"
    );
    assert_eq!(
        lines[1],
        "2024-02-01,First Bank,Operating,Home Depot,-200,Debit,Repairs,Arcos LLC,Unit B,2024-02,Expense"
    );
    assert_eq!(lines.len(), 4);
}

#[test]
fn test_write_csv_missing_fields_are_blank() {
    let ledger = Ledger::new(vec![txn("2024-05-05", dec!(-12.50), None, None, None)]);
    let rows: Vec<_> = ledger.transactions().iter().collect();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.csv");

    write_csv(&path, &rows).unwrap();

    let mut rdr = csv::Reader::from_path(&path).unwrap();
    let record = rdr.records().next().unwrap().unwrap();
    assert_eq!(&record[3], "");
    assert_eq!(&record[4], "-12.50");
    assert_eq!(&record[6], "");
    assert_eq!(&record[8], "");
    assert_eq!(&record[10], "Expense");
}

#[test]
fn test_write_csv_empty_rows() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("empty.csv");
    assert_eq!(write_csv(&path, &[]).unwrap(), 0);
    let content = std::fs::read_to_string(&path).unwrap();
    assert_eq!(content.lines().count(), 1);
}

#[test]
fn test_write_csv_bad_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("no-such-dir").join("out.csv");
    assert!(write_csv(&path, &[]).is_err());
}
