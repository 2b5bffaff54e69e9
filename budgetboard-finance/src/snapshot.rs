//! Recompute the dashboard figures for one month and one set of budget inputs.

use budgetboard_core::{
    BudgetInputs, BudgetPlan, Gauge, GaugeKind, GaugeStatus, Snapshot, DEFAULT_INCOME,
    DEFAULT_NEEDS_PCT, DEFAULT_SAVINGS_PCT, DEFAULT_WANTS_PCT,
};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::monthly_summary::MonthlySummary;

/// Budget inputs as typed by the user, before any parsing
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawBudgetInputs {
    pub income: Option<String>,
    pub needs_pct: Option<String>,
    pub wants_pct: Option<String>,
    pub savings_pct: Option<String>,
}

impl RawBudgetInputs {
    /// Parse each field, substituting its default when it is missing or not a number.
    /// Never fails.
    pub fn resolve(&self) -> BudgetInputs {
        BudgetInputs {
            income: number_or(self.income.as_deref(), DEFAULT_INCOME),
            needs_pct: number_or(self.needs_pct.as_deref(), DEFAULT_NEEDS_PCT),
            wants_pct: number_or(self.wants_pct.as_deref(), DEFAULT_WANTS_PCT),
            savings_pct: number_or(self.savings_pct.as_deref(), DEFAULT_SAVINGS_PCT),
        }
    }
}

impl From<&BudgetInputs> for RawBudgetInputs {
    fn from(inputs: &BudgetInputs) -> Self {
        Self {
            income: Some(inputs.income.to_string()),
            needs_pct: Some(inputs.needs_pct.to_string()),
            wants_pct: Some(inputs.wants_pct.to_string()),
            savings_pct: Some(inputs.savings_pct.to_string()),
        }
    }
}

fn number_or(raw: Option<&str>, default: f64) -> f64 {
    raw.and_then(|s| s.trim().parse::<f64>().ok())
        .filter(|v| v.is_finite())
        .unwrap_or(default)
}

/// Recompute gauges and trend for `month_index`.
///
/// The index must satisfy `0 <= month_index < summary.len()`.
pub fn recompute(
    summary: &MonthlySummary,
    month_index: usize,
    inputs: &BudgetInputs,
) -> Result<Snapshot> {
    let row = summary.get(month_index).ok_or(Error::MonthOutOfRange {
        index: month_index,
        len: summary.len(),
    })?;
    let plan = BudgetPlan::from_inputs(inputs);

    tracing::trace!(month = %row.month, ?plan, "recompute");

    Ok(Snapshot {
        month_index,
        month: row.month,
        title: format!("Budget Snapshot for {}", row.month),
        plan,
        needs: spending_gauge(GaugeKind::Needs, row.needs, plan.needs_limit, inputs.needs_pct),
        wants: spending_gauge(GaugeKind::Wants, row.wants, plan.wants_limit, inputs.wants_pct),
        savings: savings_gauge(row.savings, plan.savings_goal, inputs.savings_pct),
        trend: summary.trend(),
    })
}

/// The state rendered before any input changes: the most recent month
pub fn initial_snapshot(summary: &MonthlySummary, inputs: &BudgetInputs) -> Result<Snapshot> {
    recompute(summary, summary.last_index(), inputs)
}

// Spending is fine up to and including the limit.
fn spending_gauge(kind: GaugeKind, value: f64, limit: f64, pct: f64) -> Gauge {
    let status = if value <= limit {
        GaugeStatus::Good
    } else {
        GaugeStatus::Warning
    };
    Gauge {
        kind,
        title: format!("{} (Max {}%)", kind.name(), pct),
        value,
        display_value: value.max(0.0),
        limit,
        pct,
        status,
    }
}

// Savings is fine at or above the goal.
fn savings_gauge(value: f64, goal: f64, pct: f64) -> Gauge {
    let status = if value >= goal {
        GaugeStatus::Good
    } else {
        GaugeStatus::Warning
    };
    Gauge {
        kind: GaugeKind::Savings,
        title: format!("Savings (Goal {}%)", pct),
        value,
        display_value: value.max(0.0),
        limit: goal,
        pct,
        status,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use budgetboard_core::{Transaction, TxnKind};
    use chrono::NaiveDate;

    fn txn(m: u32, category: &str, kind: TxnKind, amount: f64) -> Transaction {
        Transaction::new(NaiveDate::from_ymd_opt(2023, m, 10).unwrap(), category, kind, amount)
    }

    /// Two months; the last one has Needs=2000, Wants=1000, Income=5000.
    fn summary() -> MonthlySummary {
        MonthlySummary::from_transactions(&[
            txn(1, "Salary", TxnKind::Income, 3000.0),
            txn(1, "Rent", TxnKind::Expense, 2500.0),
            txn(1, "Travel", TxnKind::Expense, 1200.0),
            txn(2, "Salary", TxnKind::Income, 5000.0),
            txn(2, "Rent", TxnKind::Expense, 1600.0),
            txn(2, "Utilities", TxnKind::Expense, 400.0),
            txn(2, "Shopping", TxnKind::Expense, 1000.0),
        ])
        .unwrap()
    }

    fn raw(income: &str, needs: &str, wants: &str, savings: &str) -> RawBudgetInputs {
        RawBudgetInputs {
            income: Some(income.to_string()),
            needs_pct: Some(needs.to_string()),
            wants_pct: Some(wants.to_string()),
            savings_pct: Some(savings.to_string()),
        }
    }

    #[test]
    fn test_default_inputs_on_healthy_month() {
        let snap = recompute(&summary(), 1, &BudgetInputs::default()).unwrap();
        assert_eq!(snap.title, "Budget Snapshot for 2023-02");

        assert_eq!(snap.needs.value, 2000.0);
        assert_eq!(snap.needs.limit, 2500.0);
        assert_eq!(snap.needs.status, GaugeStatus::Good);
        assert_eq!(snap.needs.title, "Needs (Max 50%)");

        assert_eq!(snap.wants.value, 1000.0);
        assert_eq!(snap.wants.limit, 1500.0);
        assert_eq!(snap.wants.status, GaugeStatus::Good);
        assert_eq!(snap.wants.title, "Wants (Max 30%)");

        assert_eq!(snap.savings.value, 2000.0);
        assert_eq!(snap.savings.limit, 1000.0);
        assert_eq!(snap.savings.status, GaugeStatus::Good);
        assert_eq!(snap.savings.title, "Savings (Goal 20%)");
    }

    #[test]
    fn test_overspend_month_warns_and_floors_savings() {
        // January: Needs 2500 (> 1500), Wants 1200 (> 900), Savings -700
        let inputs = BudgetInputs {
            income: 3000.0,
            ..BudgetInputs::default()
        };
        let snap = recompute(&summary(), 0, &inputs).unwrap();
        assert_eq!(snap.needs.limit, 1500.0);
        assert_eq!(snap.needs.status, GaugeStatus::Warning);
        assert_eq!(snap.wants.status, GaugeStatus::Warning);

        assert_eq!(snap.savings.value, -700.0);
        assert_eq!(snap.savings.display_value, 0.0);
        assert_eq!(snap.savings.status, GaugeStatus::Warning);
    }

    #[test]
    fn test_limits_are_inclusive() {
        let inputs = BudgetInputs {
            income: 4000.0,
            needs_pct: 50.0,
            wants_pct: 25.0,
            savings_pct: 25.0,
        };
        let snap = recompute(&summary(), 1, &inputs).unwrap();
        // Needs 2000 == 2000, Wants 1000 == 1000
        assert_eq!(snap.needs.status, GaugeStatus::Good);
        assert_eq!(snap.wants.status, GaugeStatus::Good);
        // Savings 2000 >= 1000
        assert_eq!(snap.savings.status, GaugeStatus::Good);
    }

    #[test]
    fn test_non_numeric_income_falls_back() {
        let fallback = raw("lots", "50", "30", "20").resolve();
        let explicit = raw("5000", "50", "30", "20").resolve();
        assert_eq!(fallback, explicit);

        let s = summary();
        assert_eq!(
            recompute(&s, 1, &fallback).unwrap(),
            recompute(&s, 1, &explicit).unwrap()
        );
    }

    #[test]
    fn test_missing_and_blank_fields_fall_back() {
        assert_eq!(RawBudgetInputs::default().resolve(), BudgetInputs::default());
        assert_eq!(raw("", " ", "-", "NaN").resolve(), BudgetInputs::default());
        assert_eq!(raw("inf", "50", "30", "20").resolve().income, 5000.0);
    }

    #[test]
    fn test_valid_fields_are_kept() {
        let inputs = raw(" 4200.5 ", "55", "-5", "120").resolve();
        assert_eq!(inputs.income, 4200.5);
        assert_eq!(inputs.needs_pct, 55.0);
        assert_eq!(inputs.wants_pct, -5.0);
        assert_eq!(inputs.savings_pct, 120.0);
    }

    #[test]
    fn test_fractional_percent_title() {
        let inputs = BudgetInputs {
            needs_pct: 47.5,
            ..BudgetInputs::default()
        };
        let snap = recompute(&summary(), 1, &inputs).unwrap();
        assert_eq!(snap.needs.title, "Needs (Max 47.5%)");
    }

    #[test]
    fn test_last_index_is_initial_state() {
        let s = summary();
        let inputs = BudgetInputs::default();
        assert_eq!(
            initial_snapshot(&s, &inputs).unwrap(),
            recompute(&s, s.last_index(), &inputs).unwrap()
        );
    }

    #[test]
    fn test_out_of_range_month() {
        let s = summary();
        assert!(matches!(
            recompute(&s, 2, &BudgetInputs::default()),
            Err(Error::MonthOutOfRange { index: 2, len: 2 })
        ));
    }

    #[test]
    fn test_trend_covers_every_month() {
        let snap = recompute(&summary(), 0, &BudgetInputs::default()).unwrap();
        assert_eq!(snap.trend.labels, vec!["2023-01", "2023-02"]);
        assert_eq!(snap.trend.savings, vec![-700.0, 2000.0]);
    }

    #[test]
    fn test_round_trip_through_raw_inputs() {
        let inputs = BudgetInputs {
            income: 6100.0,
            needs_pct: 45.0,
            wants_pct: 35.0,
            savings_pct: 20.0,
        };
        assert_eq!(RawBudgetInputs::from(&inputs).resolve(), inputs);
    }

    #[test]
    fn test_snapshot_json_shape() {
        let snap = initial_snapshot(&summary(), &BudgetInputs::default()).unwrap();
        let json = serde_json::to_value(&snap).unwrap();
        assert_eq!(json["month"], "2023-02");
        assert_eq!(json["needs"]["status"], "good");
        assert_eq!(json["savings"]["kind"], "savings");
        assert_eq!(json["trend"]["labels"][0], "2023-01");
    }
}
