//! budgetboard-core: data model shared by the loader, aggregator, and dashboard

pub mod budget;
pub mod finance;
pub mod month;

pub use budget::{
    BudgetInputs, BudgetPlan, Gauge, GaugeKind, GaugeStatus, Snapshot, TrendSeries,
    DEFAULT_INCOME, DEFAULT_NEEDS_PCT, DEFAULT_SAVINGS_PCT, DEFAULT_WANTS_PCT,
};
pub use finance::{SpendingType, Transaction, TxnKind};
pub use month::{MonthKey, MonthRow, ParseMonthKeyError};
