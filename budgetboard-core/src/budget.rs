//! Budget inputs, the derived plan, and the figures handed to the dashboard

use serde::{Deserialize, Serialize};

use crate::month::MonthKey;

pub const DEFAULT_INCOME: f64 = 5000.0;
pub const DEFAULT_NEEDS_PCT: f64 = 50.0;
pub const DEFAULT_WANTS_PCT: f64 = 30.0;
pub const DEFAULT_SAVINGS_PCT: f64 = 20.0;

/// Numeric budget inputs after the fallback policy has been applied.
///
/// Percentages are not required to sum to 100.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BudgetInputs {
    pub income: f64,
    pub needs_pct: f64,
    pub wants_pct: f64,
    pub savings_pct: f64,
}

impl Default for BudgetInputs {
    fn default() -> Self {
        Self {
            income: DEFAULT_INCOME,
            needs_pct: DEFAULT_NEEDS_PCT,
            wants_pct: DEFAULT_WANTS_PCT,
            savings_pct: DEFAULT_SAVINGS_PCT,
        }
    }
}

/// Per-bucket limits derived from income. Rebuilt on every recompute.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BudgetPlan {
    pub income: f64,
    pub needs_limit: f64,
    pub wants_limit: f64,
    pub savings_goal: f64,
}

impl BudgetPlan {
    pub fn from_inputs(inputs: &BudgetInputs) -> Self {
        let share = |pct: f64| inputs.income * pct / 100.0;
        Self {
            income: inputs.income,
            needs_limit: share(inputs.needs_pct),
            wants_limit: share(inputs.wants_pct),
            savings_goal: share(inputs.savings_pct),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GaugeKind {
    Needs,
    Wants,
    Savings,
}

impl GaugeKind {
    pub fn name(&self) -> &'static str {
        match self {
            GaugeKind::Needs => "Needs",
            GaugeKind::Wants => "Wants",
            GaugeKind::Savings => "Savings",
        }
    }
}

/// Pass/fail reading of a gauge against its limit or goal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GaugeStatus {
    Good,
    Warning,
}

/// A single value measured against a limit (or goal, for savings)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Gauge {
    pub kind: GaugeKind,
    pub title: String,
    /// Raw value; decides `status`
    pub value: f64,
    /// Value floored at 0 for display
    pub display_value: f64,
    pub limit: f64,
    pub pct: f64,
    pub status: GaugeStatus,
}

impl Gauge {
    /// Fraction of the limit reached, clamped to [0, 1]; never NaN
    pub fn ratio(&self) -> f64 {
        let ratio = if self.limit > 0.0 {
            self.display_value / self.limit
        } else if self.display_value > 0.0 {
            1.0
        } else {
            0.0
        };
        if ratio.is_nan() {
            0.0
        } else {
            ratio.clamp(0.0, 1.0)
        }
    }
}

/// Per-month series for the trend chart, aligned by index
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrendSeries {
    pub labels: Vec<String>,
    pub needs: Vec<f64>,
    pub wants: Vec<f64>,
    pub savings: Vec<f64>,
}

impl TrendSeries {
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

/// Everything the dashboard draws for one month selection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub month_index: usize,
    pub month: MonthKey,
    pub title: String,
    pub plan: BudgetPlan,
    pub needs: Gauge,
    pub wants: Gauge,
    pub savings: Gauge,
    pub trend: TrendSeries,
}

impl Snapshot {
    pub fn gauges(&self) -> [&Gauge; 3] {
        [&self.needs, &self.wants, &self.savings]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gauge(display_value: f64, limit: f64) -> Gauge {
        Gauge {
            kind: GaugeKind::Needs,
            title: "Needs".to_string(),
            value: display_value,
            display_value,
            limit,
            pct: 50.0,
            status: GaugeStatus::Good,
        }
    }

    #[test]
    fn test_plan_from_default_inputs() {
        let plan = BudgetPlan::from_inputs(&BudgetInputs::default());
        assert_eq!(plan.income, 5000.0);
        assert_eq!(plan.needs_limit, 2500.0);
        assert_eq!(plan.wants_limit, 1500.0);
        assert_eq!(plan.savings_goal, 1000.0);
    }

    #[test]
    fn test_plan_does_not_normalize_percentages() {
        let plan = BudgetPlan::from_inputs(&BudgetInputs {
            income: 4000.0,
            needs_pct: 60.0,
            wants_pct: 40.0,
            savings_pct: 25.0,
        });
        assert_eq!(plan.needs_limit, 2400.0);
        assert_eq!(plan.wants_limit, 1600.0);
        assert_eq!(plan.savings_goal, 1000.0);
    }

    #[test]
    fn test_gauge_ratio_clamps() {
        assert_eq!(gauge(1250.0, 2500.0).ratio(), 0.5);
        assert_eq!(gauge(5000.0, 2500.0).ratio(), 1.0);
        assert_eq!(gauge(0.0, 0.0).ratio(), 0.0);
        assert_eq!(gauge(10.0, 0.0).ratio(), 1.0);
    }

    #[test]
    fn test_gauge_ratio_with_infinite_figures() {
        assert_eq!(gauge(f64::INFINITY, f64::INFINITY).ratio(), 0.0);
        assert_eq!(gauge(1e308, f64::INFINITY).ratio(), 0.0);
        assert_eq!(gauge(f64::INFINITY, 2500.0).ratio(), 1.0);
        assert_eq!(gauge(f64::NAN, 2500.0).ratio(), 0.0);
    }

    #[test]
    fn test_gauge_status_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&GaugeStatus::Warning).unwrap(), "\"warning\"");
        assert_eq!(serde_json::to_string(&GaugeKind::Savings).unwrap(), "\"savings\"");
    }
}
