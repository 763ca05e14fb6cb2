use chrono::{DateTime, NaiveDate, NaiveDateTime, Timelike};
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use std::str::FromStr;

use crate::models::{Ledger, Transaction, TransactionFields};

use super::workbook::{Cell, LoadError, Sheet};

/// Header names every ledger workbook must carry.
pub(crate) const COLUMNS: [&str; 9] = [
    "Date",
    "Bank",
    "Account",
    "Description",
    "Amount",
    "Type",
    "Category",
    "Entity",
    "Notes",
];

static EMPTY: Cell = Cell::Empty;

/// Column positions resolved from the header row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ColumnMap {
    pub(crate) date: usize,
    pub(crate) bank: usize,
    pub(crate) account: usize,
    pub(crate) description: usize,
    pub(crate) amount: usize,
    pub(crate) kind: usize,
    pub(crate) category: usize,
    pub(crate) entity: usize,
    pub(crate) notes: usize,
}

impl ColumnMap {
    pub(crate) fn resolve(header: &[Cell]) -> Result<Self, LoadError> {
        let names: Vec<String> = header
            .iter()
            .map(|c| cell_text(c).unwrap_or_default())
            .collect();

        for extra in names.iter().filter(|n| !n.is_empty() && !COLUMNS.contains(&n.as_str())) {
            log::debug!("Ignoring extra column '{extra}'");
        }

        let find = |column: &'static str| {
            names
                .iter()
                .position(|n| n == column)
                .ok_or(LoadError::MissingColumn(column))
        };

        Ok(Self {
            date: find("Date")?,
            bank: find("Bank")?,
            account: find("Account")?,
            description: find("Description")?,
            amount: find("Amount")?,
            kind: find("Type")?,
            category: find("Category")?,
            entity: find("Entity")?,
            notes: find("Notes")?,
        })
    }

    /// Build a transaction from one data row, or `None` when the date or
    /// amount cannot be parsed.
    pub(crate) fn transaction(&self, row: &[Cell]) -> Option<Transaction> {
        let cell = |i: usize| row.get(i).unwrap_or(&EMPTY);

        let date = parse_date(cell(self.date))?;
        let amount = parse_amount(cell(self.amount))?;

        Some(Transaction::new(
            date,
            amount,
            TransactionFields {
                bank: cell_text(cell(self.bank)),
                account: cell_text(cell(self.account)),
                description: cell_text(cell(self.description)),
                kind: cell_text(cell(self.kind)),
                category: cell_text(cell(self.category)),
                entity: cell_text(cell(self.entity)),
                notes: cell_text(cell(self.notes)),
            },
        ))
    }
}

/// Concatenate all sheets, take the first row as header and turn every
/// remaining row into a transaction. Unparseable rows are dropped.
pub(crate) fn normalize(sheets: &[Sheet]) -> Result<Ledger, LoadError> {
    let mut rows = sheets.iter().flat_map(|sheet| {
        sheet
            .rows
            .iter()
            .enumerate()
            .map(move |(i, row)| (sheet.name.as_str(), i, row))
    });

    let Some((_, _, header)) = rows.next() else {
        return Ok(Ledger::default());
    };
    let columns = ColumnMap::resolve(header)?;

    let mut transactions = Vec::new();
    let mut rows_read = 0;
    let mut rows_dropped = 0;
    for (sheet, i, row) in rows {
        rows_read += 1;
        match columns.transaction(row) {
            Some(txn) => transactions.push(txn),
            None => {
                rows_dropped += 1;
                log::debug!("Dropping row {} of sheet '{sheet}': unparseable date or amount", i + 1);
            }
        }
    }

    log::info!(
        "Loaded {} transaction(s), dropped {rows_dropped} of {rows_read} row(s)",
        transactions.len()
    );

    let mut ledger = Ledger::new(transactions);
    ledger.sheets = sheets.len();
    ledger.rows_read = rows_read;
    ledger.rows_dropped = rows_dropped;
    Ok(ledger)
}

/// Text content of a cell; blank cells are missing.
pub(crate) fn cell_text(cell: &Cell) -> Option<String> {
    match cell {
        Cell::Empty => None,
        Cell::Text(s) => {
            let trimmed = s.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        }
        Cell::Number(n) => Some(n.to_string()),
        Cell::Date(dt) => {
            if dt.num_seconds_from_midnight() == 0 && dt.nanosecond() == 0 {
                Some(dt.format("%Y-%m-%d").to_string())
            } else {
                Some(dt.format("%Y-%m-%d %H:%M:%S").to_string())
            }
        }
    }
}

pub(crate) fn parse_date(cell: &Cell) -> Option<NaiveDate> {
    match cell {
        Cell::Date(dt) => Some(dt.date()),
        Cell::Text(s) => parse_date_text(s),
        Cell::Number(_) | Cell::Empty => None,
    }
}

// Month-first formats are tried before year-first ones, and "%y" before
// "%Y": "%Y" accepts one to four digits, so "01/05/24" would otherwise read
// as the year 1.
const DATE_FORMATS: &[&str] = &[
    "%m/%d/%y",
    "%m/%d/%Y",
    "%m-%d-%y",
    "%m-%d-%Y",
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%d/%m/%Y",
    "%b %d, %Y",
    "%B %d, %Y",
    "%d %b %Y",
    "%d %B %Y",
];

const TIME_SUFFIXES: &[&str] = &[
    " %H:%M:%S",
    "T%H:%M:%S",
    " %H:%M:%S%.f",
    "T%H:%M:%S%.f",
    " %H:%M",
    "T%H:%M",
];

pub(crate) fn parse_date_text(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    if let Some(d) = DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
    {
        return Some(d);
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.date_naive());
    }

    DATE_FORMATS[..6].iter().find_map(|date_fmt| {
        TIME_SUFFIXES.iter().find_map(|time_fmt| {
            NaiveDateTime::parse_from_str(s, &format!("{date_fmt}{time_fmt}"))
                .ok()
                .map(|dt| dt.date())
        })
    })
}

pub(crate) fn parse_amount(cell: &Cell) -> Option<Decimal> {
    match cell {
        Cell::Number(n) => Decimal::from_f64(*n),
        Cell::Text(s) => parse_decimal(s),
        Cell::Date(_) | Cell::Empty => None,
    }
}

/// Parse a money string such as `"$1,234.56"`, `"-42"` or `"(500.00)"`.
pub(crate) fn parse_decimal(s: &str) -> Option<Decimal> {
    let cleaned: String = s
        .replace(['$', ',', '"'], "")
        .replace('(', "-")
        .replace(')', "")
        .split_whitespace()
        .collect();
    if cleaned.is_empty() {
        return None;
    }
    Decimal::from_str(&cleaned)
        .or_else(|_| Decimal::from_scientific(&cleaned))
        .ok()
}

#[cfg(test)]
#[path = "normalize_tests.rs"]
mod tests;
