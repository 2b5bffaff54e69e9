//! Transaction types and the budget buckets they are sorted into

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::month::MonthKey;

/// A single loaded transaction. Immutable once loaded.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Transaction {
    /// Calendar date of the transaction
    pub date: NaiveDate,
    /// Free-form category from the source file (e.g. "Rent", "Travel")
    pub category: String,
    /// Income or expense, from the Type column
    pub kind: TxnKind,
    /// Amount as it appears in the file
    pub amount: f64,
}

/// Transaction direction from the Type column
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum TxnKind {
    Income,
    Expense,
}

impl TxnKind {
    /// Only the exact string "Income" is income; every other value is an expense.
    pub fn from_type_column(raw: &str) -> Self {
        if raw == "Income" {
            TxnKind::Income
        } else {
            TxnKind::Expense
        }
    }
}

/// Budget bucket derived per transaction
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SpendingType {
    Income,
    Needs,
    Wants,
    Other,
}

impl SpendingType {
    pub const ALL: [SpendingType; 4] = [
        SpendingType::Income,
        SpendingType::Needs,
        SpendingType::Wants,
        SpendingType::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SpendingType::Income => "Income",
            SpendingType::Needs => "Needs",
            SpendingType::Wants => "Wants",
            SpendingType::Other => "Other",
        }
    }
}

impl std::fmt::Display for SpendingType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Transaction {
    /// Create a new Transaction
    pub fn new(date: NaiveDate, category: impl Into<String>, kind: TxnKind, amount: f64) -> Self {
        Self {
            date,
            category: category.into(),
            kind,
            amount,
        }
    }

    /// Calendar month this transaction belongs to
    pub fn month(&self) -> MonthKey {
        MonthKey::from_date(self.date)
    }

    pub fn is_income(&self) -> bool {
        self.kind == TxnKind::Income
    }
}
