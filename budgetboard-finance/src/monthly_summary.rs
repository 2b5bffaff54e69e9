//! Monthly summary: transactions grouped by (month, spending type) and
//! pivoted into one row per month.

use budgetboard_core::{MonthKey, MonthRow, SpendingType, Transaction, TrendSeries};
use std::collections::BTreeMap;
use std::path::Path;

use crate::category_rules::categorize;
use crate::error::{Error, Result};
use crate::loader::load_transactions;

/// Read-only per-month totals, sorted chronologically
#[derive(Debug, Clone, PartialEq)]
pub struct MonthlySummary {
    rows: Vec<MonthRow>,
}

impl MonthlySummary {
    /// Group, sum, and pivot. Fails on an empty transaction set.
    pub fn from_transactions(txns: &[Transaction]) -> Result<Self> {
        if txns.is_empty() {
            return Err(Error::EmptyDataset);
        }

        let mut sums: BTreeMap<(MonthKey, SpendingType), f64> = BTreeMap::new();
        for txn in txns {
            *sums.entry((txn.month(), categorize(txn))).or_insert(0.0) += txn.amount;
        }

        let mut months: BTreeMap<MonthKey, [f64; 4]> = BTreeMap::new();
        for ((month, kind), total) in sums {
            let slot = match kind {
                SpendingType::Income => 0,
                SpendingType::Needs => 1,
                SpendingType::Wants => 2,
                SpendingType::Other => 3,
            };
            months.entry(month).or_insert([0.0; 4])[slot] = total;
        }

        let rows: Vec<MonthRow> = months
            .into_iter()
            .map(|(month, [income, needs, wants, other])| {
                check_finite(MonthRow::from_totals(month, income, needs, wants, other))
            })
            .collect::<Result<_>>()?;

        tracing::debug!(months = rows.len(), transactions = txns.len(), "built monthly summary");
        Ok(Self { rows })
    }

    pub fn rows(&self) -> &[MonthRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&MonthRow> {
        self.rows.get(index)
    }

    /// Index of the most recent month (the dashboard's initial selection)
    pub fn last_index(&self) -> usize {
        self.rows.len().saturating_sub(1)
    }

    /// Position of a given month, if present
    pub fn find(&self, month: MonthKey) -> Option<usize> {
        self.rows.binary_search_by(|r| r.month.cmp(&month)).ok()
    }

    /// Needs / Wants / Savings per month for the trend chart
    pub fn trend(&self) -> TrendSeries {
        TrendSeries {
            labels: self.rows.iter().map(|r| r.month.to_string()).collect(),
            needs: self.rows.iter().map(|r| r.needs).collect(),
            wants: self.rows.iter().map(|r| r.wants).collect(),
            savings: self.rows.iter().map(|r| r.savings).collect(),
        }
    }

    /// Labelled slider positions: every `step`-th month starting at 0
    pub fn slider_marks(&self, step: usize) -> Vec<(usize, String)> {
        let step = step.max(1);
        self.rows
            .iter()
            .enumerate()
            .step_by(step)
            .map(|(i, r)| (i, r.month.to_string()))
            .collect()
    }
}

// Amounts are finite on load, but large ones can still overflow when summed.
fn check_finite(row: MonthRow) -> Result<MonthRow> {
    let columns = [
        ("Income", row.income),
        ("Needs", row.needs),
        ("Wants", row.wants),
        ("Other", row.other),
        ("Total Expenses", row.total_expenses),
        ("Savings", row.savings),
    ];
    match columns.iter().find(|(_, v)| !v.is_finite()) {
        Some(&(column, _)) => Err(Error::NonFiniteTotal {
            month: row.month.to_string(),
            column,
        }),
        None => Ok(row),
    }
}

/// Load -> categorize -> aggregate, in one call
pub fn build_summary(path: impl AsRef<Path>) -> Result<MonthlySummary> {
    let txns = load_transactions(path)?;
    MonthlySummary::from_transactions(&txns)
}
