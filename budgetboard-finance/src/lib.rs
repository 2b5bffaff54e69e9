//! budgetboard-finance: transaction loader, budget category rules, monthly
//! aggregation, and the dashboard recompute

pub mod category_rules;
pub mod error;
pub mod loader;
pub mod monthly_summary;
pub mod snapshot;

pub use category_rules::{categorize, NEEDS_CATEGORIES, WANTS_CATEGORIES};
pub use error::{Error, Result};
pub use loader::{load_transactions, read_transactions};
pub use monthly_summary::{build_summary, MonthlySummary};
pub use snapshot::{initial_snapshot, recompute, RawBudgetInputs};
