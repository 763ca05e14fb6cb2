use chrono::NaiveDate;

use super::Transaction;

/// The full, immutable set of transactions loaded at startup.
#[derive(Debug, Clone, Default)]
pub(crate) struct Ledger {
    transactions: Vec<Transaction>,
    pub(crate) sheets: usize,
    pub(crate) rows_read: usize,
    pub(crate) rows_dropped: usize,
}

impl Ledger {
    pub(crate) fn new(transactions: Vec<Transaction>) -> Self {
        let rows_read = transactions.len();
        Self {
            transactions,
            sheets: 1,
            rows_read,
            rows_dropped: 0,
        }
    }

    pub(crate) fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub(crate) fn len(&self) -> usize {
        self.transactions.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    /// Distinct non-missing property names, in first-seen order.
    pub(crate) fn properties(&self) -> Vec<String> {
        distinct(self.transactions.iter().map(|t| t.notes.as_deref()))
    }

    /// Distinct non-missing categories, in first-seen order.
    pub(crate) fn categories(&self) -> Vec<String> {
        distinct(self.transactions.iter().map(|t| t.category.as_deref()))
    }

    pub(crate) fn has_missing_property(&self) -> bool {
        self.transactions.iter().any(|t| t.notes.is_none())
    }

    pub(crate) fn has_missing_category(&self) -> bool {
        self.transactions.iter().any(|t| t.category.is_none())
    }

    /// Earliest and latest transaction dates, or `None` for an empty ledger.
    pub(crate) fn date_span(&self) -> Option<(NaiveDate, NaiveDate)> {
        let min = self.transactions.iter().map(|t| t.date).min()?;
        let max = self.transactions.iter().map(|t| t.date).max()?;
        Some((min, max))
    }
}

fn distinct<'a>(values: impl Iterator<Item = Option<&'a str>>) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    let mut out = Vec::new();
    for value in values.flatten() {
        if seen.insert(value) {
            out.push(value.to_string());
        }
    }
    out
}
