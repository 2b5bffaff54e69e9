//! Error types for budgetboard-finance

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("reading {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("line {line}: unparseable date {value:?}")]
    InvalidDate { line: u64, value: String },

    #[error("line {line}: unparseable amount {value:?}")]
    InvalidAmount { line: u64, value: String },

    #[error("{month}: {column} total overflows")]
    NonFiniteTotal { month: String, column: &'static str },

    #[error("no transactions to summarize")]
    EmptyDataset,

    #[error("month index {index} out of range (summary has {len} months)")]
    MonthOutOfRange { index: usize, len: usize },
}

pub type Result<T> = std::result::Result<T, Error>;
