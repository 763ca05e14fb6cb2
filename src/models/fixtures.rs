//! Builders shared by the unit tests of the filter, report and export modules.
#![allow(clippy::unwrap_used)]

use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::{Ledger, Transaction, TransactionFields};

pub(crate) fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

pub(crate) fn txn(
    day: &str,
    amount: Decimal,
    category: Option<&str>,
    property: Option<&str>,
    vendor: Option<&str>,
) -> Transaction {
    Transaction::new(
        date(day),
        amount,
        TransactionFields {
            bank: Some("First Bank".into()),
            account: Some("Operating".into()),
            description: vendor.map(String::from),
            kind: Some("Debit".into()),
            category: category.map(String::from),
            entity: Some("Arcos LLC".into()),
            notes: property.map(String::from),
        },
    )
}

/// The three-row ledger used throughout the aggregation examples.
pub(crate) fn sample_ledger() -> Ledger {
    use rust_decimal_macros::dec;
    Ledger::new(vec![
        txn("2024-01-05", dec!(1000), Some("Rental Income"), Some("Unit A"), Some("Tenant A")),
        txn("2024-01-10", dec!(-300), Some("Repairs"), Some("Unit A"), Some("Home Depot")),
        txn("2024-02-01", dec!(-200), Some("Repairs"), Some("Unit B"), Some("Home Depot")),
    ])
}
