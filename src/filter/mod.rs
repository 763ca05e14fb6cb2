use chrono::NaiveDate;
use std::collections::BTreeSet;

use crate::models::{CategoryType, Ledger, Transaction};

/// A set of allowed values for one text column.
///
/// Missing values only pass when `include_missing` is set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct Selection {
    values: BTreeSet<String>,
    pub(crate) include_missing: bool,
}

impl Selection {
    pub(crate) fn of<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            values: values.into_iter().map(Into::into).collect(),
            include_missing: false,
        }
    }

    pub(crate) fn with_missing(mut self) -> Self {
        self.include_missing = true;
        self
    }

    pub(crate) fn allows(&self, value: Option<&str>) -> bool {
        match value {
            Some(v) => self.values.contains(v),
            None => self.include_missing,
        }
    }

    /// Flip membership of one value (`None` flips `include_missing`).
    pub(crate) fn toggle(&mut self, value: Option<&str>) {
        match value {
            Some(v) => {
                if !self.values.remove(v) {
                    self.values.insert(v.to_string());
                }
            }
            None => self.include_missing = !self.include_missing,
        }
    }

    pub(crate) fn clear(&mut self) {
        self.values.clear();
        self.include_missing = false;
    }

    pub(crate) fn len(&self) -> usize {
        self.values.len() + usize::from(self.include_missing)
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub(crate) fn values(&self) -> impl Iterator<Item = &str> {
        self.values.iter().map(String::as_str)
    }
}

/// The five user-controlled predicates, combined with AND.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Filter {
    pub(crate) properties: Selection,
    pub(crate) categories: Selection,
    pub(crate) date_from: NaiveDate,
    pub(crate) date_to: NaiveDate,
    pub(crate) show_income: bool,
    pub(crate) show_expense: bool,
}

impl Filter {
    /// Default filter: every observed property and category, the full
    /// observed date span, income and expenses both shown.
    pub(crate) fn for_ledger(ledger: &Ledger) -> Self {
        let (date_from, date_to) = ledger
            .date_span()
            .unwrap_or((NaiveDate::MIN, NaiveDate::MAX));
        Self {
            properties: Selection::of(ledger.properties()),
            categories: Selection::of(ledger.categories()),
            date_from,
            date_to,
            show_income: true,
            show_expense: true,
        }
    }

    pub(crate) fn allows_property(&self, t: &Transaction) -> bool {
        self.properties.allows(t.property())
    }

    pub(crate) fn allows_category(&self, t: &Transaction) -> bool {
        self.categories.allows(t.category.as_deref())
    }

    pub(crate) fn in_range(&self, t: &Transaction) -> bool {
        self.date_from <= t.date && t.date <= self.date_to
    }

    pub(crate) fn allows_type(&self, t: &Transaction) -> bool {
        match t.category_type {
            CategoryType::Income => self.show_income,
            CategoryType::Expense => self.show_expense,
        }
    }

    pub(crate) fn matches(&self, t: &Transaction) -> bool {
        self.allows_property(t) && self.allows_category(t) && self.in_range(t) && self.allows_type(t)
    }

    /// Matching transactions in their original order.
    pub(crate) fn apply<'a>(&self, transactions: &'a [Transaction]) -> Vec<&'a Transaction> {
        transactions.iter().filter(|t| self.matches(t)).collect()
    }

    pub(crate) fn has_inverted_range(&self) -> bool {
        self.date_from > self.date_to
    }

    /// One-line description for status bars and CLI headers.
    pub(crate) fn describe(&self, ledger: &Ledger) -> String {
        let mut parts = vec![format!("{} to {}", self.date_from, self.date_to)];
        parts.extend(selection_note("properties", &self.properties, ledger.properties().len()));
        parts.extend(selection_note("categories", &self.categories, ledger.categories().len()));
        match (self.show_income, self.show_expense) {
            (true, true) => {}
            (true, false) => parts.push("income only".into()),
            (false, true) => parts.push("expenses only".into()),
            (false, false) => parts.push("income and expenses hidden".into()),
        }
        parts.join(", ")
    }
}

fn selection_note(label: &str, selection: &Selection, observed: usize) -> Option<String> {
    let chosen = selection.values().count();
    if chosen == observed && !selection.include_missing {
        return None;
    }
    let missing = if selection.include_missing { " +(none)" } else { "" };
    Some(format!("{chosen}/{observed} {label}{missing}"))
}
