//! Deterministic rules mapping a transaction to its budget bucket.
//!
//! Exact, case-sensitive category matches. Unmatched categories fall into Other.

use budgetboard_core::{SpendingType, Transaction, TxnKind};

/// Essential spending
pub const NEEDS_CATEGORIES: &[&str] = &["Rent", "Utilities", "Health & Fitness", "Food & Drink"];

/// Discretionary spending
pub const WANTS_CATEGORIES: &[&str] = &["Entertainment", "Shopping", "Travel"];

/// Categorize a transaction.
/// Priority: income type > needs list > wants list > other.
pub fn categorize(txn: &Transaction) -> SpendingType {
    if txn.kind == TxnKind::Income {
        return SpendingType::Income;
    }

    let category = txn.category.as_str();
    if NEEDS_CATEGORIES.contains(&category) {
        SpendingType::Needs
    } else if WANTS_CATEGORIES.contains(&category) {
        SpendingType::Wants
    } else {
        SpendingType::Other
    }
}
