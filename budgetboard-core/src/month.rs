//! Calendar-month keys and the per-month summary row

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A calendar month. Orders chronologically, displays as `YYYY-MM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct MonthKey {
    pub year: i32,
    pub month: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid month key {0:?} (expected YYYY-MM)")]
pub struct ParseMonthKeyError(String);

impl MonthKey {
    pub fn new(year: i32, month: u32) -> Self {
        Self { year, month }
    }

    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for MonthKey {
    type Err = ParseMonthKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseMonthKeyError(s.to_string());
        let (y, m) = s.trim().split_once('-').ok_or_else(err)?;
        let year: i32 = y.parse().map_err(|_| err())?;
        let month: u32 = m.parse().map_err(|_| err())?;
        if !(1..=12).contains(&month) {
            return Err(err());
        }
        Ok(Self { year, month })
    }
}

impl From<MonthKey> for String {
    fn from(key: MonthKey) -> Self {
        key.to_string()
    }
}

impl TryFrom<String> for MonthKey {
    type Error = ParseMonthKeyError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

/// One row of the monthly summary table.
///
/// `other` is tracked but is not part of `total_expenses` or `savings`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthRow {
    pub month: MonthKey,
    pub income: f64,
    pub needs: f64,
    pub wants: f64,
    pub other: f64,
    pub total_expenses: f64,
    pub savings: f64,
}

impl MonthRow {
    /// Build a row from bucket sums, deriving the expense and savings columns
    pub fn from_totals(month: MonthKey, income: f64, needs: f64, wants: f64, other: f64) -> Self {
        let total_expenses = needs + wants;
        Self {
            month,
            income,
            needs,
            wants,
            other,
            total_expenses,
            savings: income - total_expenses,
        }
    }

    /// Sum of every bucket, i.e. the month's raw transaction total
    pub fn raw_total(&self) -> f64 {
        self.income + self.needs + self.wants + self.other
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_month_key_display_and_parse() {
        let key = MonthKey::new(2021, 3);
        assert_eq!(key.to_string(), "2021-03");
        assert_eq!("2021-03".parse::<MonthKey>().unwrap(), key);
        assert!("2021-13".parse::<MonthKey>().is_err());
        assert!("March".parse::<MonthKey>().is_err());
    }

    #[test]
    fn test_month_key_orders_chronologically() {
        let mut keys = vec![
            MonthKey::new(2022, 1),
            MonthKey::new(2021, 12),
            MonthKey::new(2021, 2),
        ];
        keys.sort();
        assert_eq!(
            keys,
            vec![MonthKey::new(2021, 2), MonthKey::new(2021, 12), MonthKey::new(2022, 1)]
        );
    }

    #[test]
    fn test_month_key_serializes_as_string() {
        let json = serde_json::to_string(&MonthKey::new(2020, 9)).unwrap();
        assert_eq!(json, "\"2020-09\"");
        let back: MonthKey = serde_json::from_str(&json).unwrap();
        assert_eq!(back, MonthKey::new(2020, 9));
    }

    #[test]
    fn test_row_derives_expenses_and_savings() {
        let row = MonthRow::from_totals(MonthKey::new(2020, 1), 5000.0, 2000.0, 1000.0, 300.0);
        assert_eq!(row.total_expenses, 3000.0);
        assert_eq!(row.savings, 2000.0);
        assert_eq!(row.raw_total(), 8300.0);
    }

    #[test]
    fn test_row_savings_can_go_negative() {
        let row = MonthRow::from_totals(MonthKey::new(2020, 2), 1000.0, 900.0, 400.0, 0.0);
        assert_eq!(row.savings, -300.0);
    }
}
