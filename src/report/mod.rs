use rust_decimal::Decimal;
use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};

use crate::models::{CategoryType, Transaction};

/// Maximum number of groups returned by [`top_vendors`].
pub(crate) const TOP_VENDOR_LIMIT: usize = 10;

/// Label used wherever a missing grouping key has to be shown.
pub(crate) const MISSING_LABEL: &str = "(none)";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct Totals {
    pub(crate) income: Decimal,
    /// Expense total negated, so spending reads as a positive figure.
    pub(crate) expense: Decimal,
    pub(crate) net: Decimal,
}

impl Totals {
    pub(crate) fn compute(rows: &[&Transaction]) -> Self {
        let mut totals = Self::default();
        for t in rows {
            match t.category_type {
                CategoryType::Income => totals.income += t.amount,
                CategoryType::Expense => totals.expense -= t.amount,
            }
            totals.net += t.amount;
        }
        totals
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct MonthlyPoint {
    pub(crate) month: String,
    pub(crate) category_type: CategoryType,
    pub(crate) total: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct GroupTotal {
    pub(crate) label: Option<String>,
    pub(crate) total: Decimal,
}

impl GroupTotal {
    pub(crate) fn display_label(&self) -> &str {
        self.label.as_deref().unwrap_or(MISSING_LABEL)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct VendorCount {
    pub(crate) vendor: String,
    pub(crate) count: usize,
}

/// Sum of amounts per (month, category type), months ascending and
/// Income before Expense within a month.
pub(crate) fn monthly_series(rows: &[&Transaction]) -> Vec<MonthlyPoint> {
    let mut groups: BTreeMap<(&str, CategoryType), Decimal> = BTreeMap::new();
    for t in rows {
        *groups
            .entry((t.month.as_str(), t.category_type))
            .or_default() += t.amount;
    }
    groups
        .into_iter()
        .map(|((month, category_type), total)| MonthlyPoint {
            month: month.to_string(),
            category_type,
            total,
        })
        .collect()
}

/// Net amount per property, most negative first.
pub(crate) fn profit_by_property(rows: &[&Transaction]) -> Vec<GroupTotal> {
    group_totals(rows.iter().copied(), |t| t.property())
}

/// Expense amount per category, largest spend (most negative) first.
pub(crate) fn expense_by_category(rows: &[&Transaction]) -> Vec<GroupTotal> {
    group_totals(
        rows.iter().copied().filter(|t| t.is_expense()),
        |t| t.category.as_deref(),
    )
}

fn group_totals<'a, I, K>(rows: I, key: K) -> Vec<GroupTotal>
where
    I: Iterator<Item = &'a Transaction>,
    K: Fn(&'a Transaction) -> Option<&'a str>,
{
    let mut groups: BTreeMap<Option<&str>, Decimal> = BTreeMap::new();
    for t in rows {
        *groups.entry(key(t)).or_default() += t.amount;
    }
    let mut totals: Vec<GroupTotal> = groups
        .into_iter()
        .map(|(label, total)| GroupTotal {
            label: label.map(String::from),
            total,
        })
        .collect();
    // Stable: equal totals keep label order.
    totals.sort_by(|a, b| a.total.cmp(&b.total));
    totals
}

/// The most frequent descriptions, at most [`TOP_VENDOR_LIMIT`] of them.
/// Equal counts keep the order in which the vendor was first seen.
pub(crate) fn top_vendors(rows: &[&Transaction]) -> Vec<VendorCount> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut counts: Vec<VendorCount> = Vec::new();
    for vendor in rows.iter().filter_map(|t| t.description.as_deref()) {
        match index.get(vendor) {
            Some(&i) => counts[i].count += 1,
            None => {
                index.insert(vendor, counts.len());
                counts.push(VendorCount {
                    vendor: vendor.to_string(),
                    count: 1,
                });
            }
        }
    }
    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts.truncate(TOP_VENDOR_LIMIT);
    counts
}

/// Column the transaction table can be ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SortColumn {
    Date,
    Amount,
    Property,
    Category,
    Description,
}

impl SortColumn {
    pub(crate) fn all() -> &'static [SortColumn] {
        &[
            Self::Date,
            Self::Amount,
            Self::Property,
            Self::Category,
            Self::Description,
        ]
    }

    pub(crate) fn as_str(&self) -> &'static str {
        match self {
            Self::Date => "date",
            Self::Amount => "amount",
            Self::Property => "property",
            Self::Category => "category",
            Self::Description => "description",
        }
    }

    pub(crate) fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "vendor" => Some(Self::Description),
            name => Self::all().iter().copied().find(|c| c.as_str() == name),
        }
    }

    pub(crate) fn next(self) -> Self {
        let all = Self::all();
        let idx = all.iter().position(|c| *c == self).unwrap_or(0);
        all[(idx + 1) % all.len()]
    }

    /// Dates and amounts read best largest first, text columns A to Z.
    pub(crate) fn natural_key(self) -> SortKey {
        SortKey {
            column: self,
            descending: matches!(self, Self::Date | Self::Amount),
        }
    }
}

/// Table ordering. Missing text values sort before present ones when
/// ascending.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct SortKey {
    pub(crate) column: SortColumn,
    pub(crate) descending: bool,
}

impl Default for SortKey {
    fn default() -> Self {
        SortColumn::Date.natural_key()
    }
}

impl SortKey {
    pub(crate) fn reversed(self) -> Self {
        Self {
            descending: !self.descending,
            ..self
        }
    }

    fn compare(&self, a: &Transaction, b: &Transaction) -> Ordering {
        let ord = match self.column {
            SortColumn::Date => a.date.cmp(&b.date),
            SortColumn::Amount => a.amount.cmp(&b.amount),
            SortColumn::Property => a.property().cmp(&b.property()),
            SortColumn::Category => a.category.cmp(&b.category),
            SortColumn::Description => a.description.cmp(&b.description),
        };
        if self.descending {
            ord.reverse()
        } else {
            ord
        }
    }

    /// Stable sort: rows comparing equal keep their current order.
    pub(crate) fn apply(&self, rows: &mut [&Transaction]) {
        rows.sort_by(|a, b| self.compare(a, b));
    }
}

impl std::fmt::Display for SortKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let dir = if self.descending { "desc" } else { "asc" };
        write!(f, "{} {dir}", self.column.as_str())
    }
}

/// Rows ordered newest first; same-day rows keep their relative order.
pub(crate) fn table<'a>(rows: &[&'a Transaction]) -> Vec<&'a Transaction> {
    let mut sorted = rows.to_vec();
    SortKey::default().apply(&mut sorted);
    sorted
}

/// Everything the dashboard shows for one filtered view.
#[derive(Debug, Clone, Default)]
pub(crate) struct Report<'a> {
    pub(crate) totals: Totals,
    pub(crate) monthly: Vec<MonthlyPoint>,
    pub(crate) by_property: Vec<GroupTotal>,
    pub(crate) by_category: Vec<GroupTotal>,
    pub(crate) vendors: Vec<VendorCount>,
    pub(crate) table: Vec<&'a Transaction>,
}

impl<'a> Report<'a> {
    pub(crate) fn build(rows: &[&'a Transaction]) -> Self {
        Self {
            totals: Totals::compute(rows),
            monthly: monthly_series(rows),
            by_property: profit_by_property(rows),
            by_category: expense_by_category(rows),
            vendors: top_vendors(rows),
            table: table(rows),
        }
    }

    /// Distinct months of the monthly series, ascending.
    pub(crate) fn months(&self) -> Vec<&str> {
        let mut months: Vec<&str> = self.monthly.iter().map(|p| p.month.as_str()).collect();
        months.dedup();
        months
    }

    /// Monthly totals of one category type, aligned to [`Report::months`].
    /// Months without rows of that type are skipped.
    pub(crate) fn series(&self, category_type: CategoryType) -> Vec<(usize, Decimal)> {
        let months = self.months();
        self.monthly
            .iter()
            .filter(|p| p.category_type == category_type)
            .filter_map(|p| {
                months
                    .iter()
                    .position(|m| *m == p.month)
                    .map(|i| (i, p.total))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests;
