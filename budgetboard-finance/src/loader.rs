//! Load the transaction table from CSV.
//!
//! Expected header (column order is free, extra columns are ignored):
//! Date,Category,Type,Amount

use budgetboard_core::{Transaction, TxnKind};
use chrono::{NaiveDate, NaiveDateTime};
use serde::Deserialize;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::error::{Error, Result};

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%m/%d/%Y", "%Y/%m/%d"];
const DATETIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M"];

/// A row as it appears in the file, before type coercion
#[derive(Debug, Deserialize)]
struct RawRow {
    #[serde(rename = "Date")]
    date: String,
    #[serde(rename = "Category")]
    category: String,
    #[serde(rename = "Type")]
    kind: String,
    #[serde(rename = "Amount")]
    amount: String,
}

/// Load every transaction from a CSV file.
/// Any bad row fails the whole load; partial data is never returned.
pub fn load_transactions(path: impl AsRef<Path>) -> Result<Vec<Transaction>> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let txns = read_transactions(file)?;
    tracing::info!(count = txns.len(), path = %path.display(), "loaded transactions");
    Ok(txns)
}

/// Parse transactions from any reader holding CSV text with a header row
pub fn read_transactions(reader: impl Read) -> Result<Vec<Transaction>> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let headers = rdr.headers()?.clone();

    let mut txns = Vec::new();
    let mut record = csv::StringRecord::new();
    while rdr.read_record(&mut record)? {
        // Skip fully blank trailing rows
        if record.iter().all(|f| f.is_empty()) {
            continue;
        }
        let line = record.position().map(|p| p.line()).unwrap_or(0);
        let row: RawRow = record.deserialize(Some(&headers))?;

        let date = parse_date(&row.date).ok_or_else(|| Error::InvalidDate {
            line,
            value: row.date.clone(),
        })?;
        let amount = parse_amount(&row.amount).ok_or_else(|| Error::InvalidAmount {
            line,
            value: row.amount.clone(),
        })?;

        txns.push(Transaction::new(
            date,
            row.category,
            TxnKind::from_type_column(&row.kind),
            amount,
        ));
    }

    tracing::debug!(count = txns.len(), "parsed transaction rows");
    Ok(txns)
}

/// Parse a calendar date, accepting a few common layouts (a time part is dropped)
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
                .map(|dt| dt.date())
        })
}

fn parse_amount(s: &str) -> Option<f64> {
    s.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}
