use chrono::NaiveDate;

use crate::filter::Filter;
use crate::models::{Ledger, Transaction};
use crate::report::{Report, SortKey, MISSING_LABEL};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Screen {
    Dashboard,
    Transactions,
    Filters,
}

impl Screen {
    pub(crate) fn all() -> &'static [Screen] {
        &[Self::Dashboard, Self::Transactions, Self::Filters]
    }
}

impl std::fmt::Display for Screen {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Dashboard => write!(f, "Dashboard"),
            Self::Transactions => write!(f, "Transactions"),
            Self::Filters => write!(f, "Filters"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum InputMode {
    Normal,
    Command,
}

impl std::fmt::Display for InputMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Normal => write!(f, "NORMAL"),
            Self::Command => write!(f, "COMMAND"),
        }
    }
}

/// One row of the Filters screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum FilterItem {
    ShowIncome,
    ShowExpense,
    DateFrom,
    DateTo,
    Property(Option<String>),
    Category(Option<String>),
}

impl FilterItem {
    pub(crate) fn label(&self) -> &str {
        match self {
            Self::ShowIncome => "Show Income",
            Self::ShowExpense => "Show Expenses",
            Self::DateFrom => "From",
            Self::DateTo => "To",
            Self::Property(v) | Self::Category(v) => v.as_deref().unwrap_or(MISSING_LABEL),
        }
    }
}

pub(crate) struct App<'a> {
    pub(crate) ledger: &'a Ledger,
    pub(crate) source: String,
    pub(crate) running: bool,
    pub(crate) screen: Screen,
    pub(crate) input_mode: InputMode,
    pub(crate) command_input: String,
    pub(crate) status_message: String,
    pub(crate) show_help: bool,

    pub(crate) filter: Filter,
    default_filter: Filter,
    pub(crate) report: Report<'a>,

    // Transactions
    pub(crate) sort: SortKey,
    pub(crate) transaction_index: usize,
    pub(crate) transaction_scroll: usize,

    // Filters
    pub(crate) filter_items: Vec<FilterItem>,
    pub(crate) filter_index: usize,
    pub(crate) filter_scroll: usize,

    // Layout (updated each render frame)
    pub(crate) visible_rows: usize,
}

impl<'a> App<'a> {
    pub(crate) fn new(ledger: &'a Ledger, source: String) -> Self {
        let mut app = Self {
            ledger,
            source,
            running: true,
            screen: Screen::Dashboard,
            input_mode: InputMode::Normal,
            command_input: String::new(),
            status_message: String::new(),
            show_help: false,

            filter: Filter::for_ledger(ledger),
            default_filter: Filter::for_ledger(ledger),
            report: Report::default(),

            sort: SortKey::default(),
            transaction_index: 0,
            transaction_scroll: 0,

            filter_items: filter_items(ledger),
            filter_index: 0,
            filter_scroll: 0,

            visible_rows: 20,
        };
        app.refresh();
        app
    }

    /// Recompute the filtered view and every aggregate from scratch.
    /// Called after each change to `filter`.
    pub(crate) fn refresh(&mut self) {
        let ledger = self.ledger;
        let rows = self.filter.apply(ledger.transactions());
        self.report = Report::build(&rows);
        self.sort.apply(&mut self.report.table);
        if self.transaction_index >= self.report.table.len() {
            self.transaction_index = self.report.table.len().saturating_sub(1);
        }
        if self.transaction_scroll > self.transaction_index {
            self.transaction_scroll = self.transaction_index;
        }
    }

    pub(crate) fn reset_filter(&mut self) {
        self.filter = self.default_filter.clone();
        self.refresh();
    }

    /// Whether the filter differs from the one the app started with.
    pub(crate) fn is_filtered(&self) -> bool {
        self.filter != self.default_filter
    }

    /// Reorder the table and put the cursor back on the first row. Ties
    /// stay newest first whatever the previous order was.
    pub(crate) fn set_sort(&mut self, sort: SortKey) {
        self.sort = sort;
        self.refresh();
        self.transaction_index = 0;
        self.transaction_scroll = 0;
    }

    /// Sort by the next column in its natural direction.
    pub(crate) fn cycle_sort(&mut self) {
        self.set_sort(self.sort.column.next().natural_key());
    }

    pub(crate) fn reverse_sort(&mut self) {
        self.set_sort(self.sort.reversed());
    }

    pub(crate) fn table(&self) -> &[&'a Transaction] {
        &self.report.table
    }

    pub(crate) fn selected_filter_item(&self) -> Option<&FilterItem> {
        self.filter_items.get(self.filter_index)
    }

    /// Whether a Filters-screen row is currently switched on.
    pub(crate) fn is_item_enabled(&self, item: &FilterItem) -> bool {
        match item {
            FilterItem::ShowIncome => self.filter.show_income,
            FilterItem::ShowExpense => self.filter.show_expense,
            FilterItem::DateFrom | FilterItem::DateTo => true,
            FilterItem::Property(v) => self.filter.properties.allows(v.as_deref()),
            FilterItem::Category(v) => self.filter.categories.allows(v.as_deref()),
        }
    }

    /// Toggle the selected Filters-screen row. Date rows are left alone.
    pub(crate) fn toggle_selected_item(&mut self) -> bool {
        let Some(item) = self.filter_items.get(self.filter_index) else {
            return false;
        };
        match item {
            FilterItem::ShowIncome => self.filter.show_income = !self.filter.show_income,
            FilterItem::ShowExpense => self.filter.show_expense = !self.filter.show_expense,
            FilterItem::Property(v) => self.filter.properties.toggle(v.as_deref()),
            FilterItem::Category(v) => self.filter.categories.toggle(v.as_deref()),
            FilterItem::DateFrom | FilterItem::DateTo => return false,
        }
        self.refresh();
        true
    }

    /// Shift the selected date bound by `days`. Returns false when the
    /// selected row is not a date.
    pub(crate) fn adjust_selected_date(&mut self, days: i64) -> bool {
        let is_from = match self.selected_filter_item() {
            Some(FilterItem::DateFrom) => true,
            Some(FilterItem::DateTo) => false,
            _ => return false,
        };
        let bound = if is_from {
            &mut self.filter.date_from
        } else {
            &mut self.filter.date_to
        };
        if let Some(shifted) = shift_date(*bound, days) {
            *bound = shifted;
        }
        self.refresh();
        true
    }

    pub(crate) fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = msg.into();
    }
}

fn shift_date(date: NaiveDate, days: i64) -> Option<NaiveDate> {
    date.checked_add_signed(chrono::TimeDelta::try_days(days)?)
}

/// Build the Filters screen rows: toggles, date bounds, then every property
/// and category (with a missing-value row when the ledger has one).
pub(crate) fn filter_items(ledger: &Ledger) -> Vec<FilterItem> {
    let mut items = vec![
        FilterItem::ShowIncome,
        FilterItem::ShowExpense,
        FilterItem::DateFrom,
        FilterItem::DateTo,
    ];
    items.extend(ledger.properties().into_iter().map(|p| FilterItem::Property(Some(p))));
    if ledger.has_missing_property() {
        items.push(FilterItem::Property(None));
    }
    items.extend(ledger.categories().into_iter().map(|c| FilterItem::Category(Some(c))));
    if ledger.has_missing_category() {
        items.push(FilterItem::Category(None));
    }
    items
}

#[cfg(test)]
#[path = "app_tests.rs"]
mod tests;
