use chrono::NaiveDate;
use rust_decimal::Decimal;

/// Income/Expense classification derived from a transaction's category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub(crate) enum CategoryType {
    Income,
    Expense,
}

impl CategoryType {
    pub(crate) fn as_str(&self) -> &'static str {
        match self {
            Self::Income => "Income",
            Self::Expense => "Expense",
        }
    }

    /// Income iff the category contains "income", case-insensitively.
    ///
    /// A missing category is treated as the text "nan", so it always lands
    /// in the Expense bucket.
    pub(crate) fn classify(category: Option<&str>) -> Self {
        let text = category.unwrap_or("nan");
        if text.to_lowercase().contains("income") {
            Self::Income
        } else {
            Self::Expense
        }
    }
}

impl std::fmt::Display for CategoryType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Transaction {
    pub(crate) date: NaiveDate,
    pub(crate) bank: Option<String>,
    pub(crate) account: Option<String>,
    pub(crate) description: Option<String>,
    pub(crate) amount: Decimal,
    /// Source `Type` column, carried through untouched.
    pub(crate) kind: Option<String>,
    pub(crate) category: Option<String>,
    pub(crate) entity: Option<String>,
    /// Rental property the row belongs to.
    pub(crate) notes: Option<String>,
    pub(crate) category_type: CategoryType,
    /// Format: "YYYY-MM"
    pub(crate) month: String,
}

/// Source columns of a ledger row, before the derived fields are filled in.
#[derive(Debug, Clone, Default)]
pub(crate) struct TransactionFields {
    pub(crate) bank: Option<String>,
    pub(crate) account: Option<String>,
    pub(crate) description: Option<String>,
    pub(crate) kind: Option<String>,
    pub(crate) category: Option<String>,
    pub(crate) entity: Option<String>,
    pub(crate) notes: Option<String>,
}

impl Transaction {
    pub(crate) fn new(date: NaiveDate, amount: Decimal, fields: TransactionFields) -> Self {
        let category_type = CategoryType::classify(fields.category.as_deref());
        Self {
            date,
            bank: fields.bank,
            account: fields.account,
            description: fields.description,
            amount,
            kind: fields.kind,
            category: fields.category,
            entity: fields.entity,
            notes: fields.notes,
            category_type,
            month: month_label(date),
        }
    }

    pub(crate) fn is_income(&self) -> bool {
        self.category_type == CategoryType::Income
    }

    pub(crate) fn is_expense(&self) -> bool {
        self.category_type == CategoryType::Expense
    }

    pub(crate) fn property(&self) -> Option<&str> {
        self.notes.as_deref()
    }
}

pub(crate) fn month_label(date: NaiveDate) -> String {
    date.format("%Y-%m").to_string()
}
