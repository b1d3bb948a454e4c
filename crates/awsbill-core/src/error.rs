use std::path::PathBuf;
use thiserror::Error;

/// All errors produced while turning a billing report into metrics.
#[derive(Error, Debug)]
pub enum BillingError {
    /// A source or destination descriptor is missing or uses an unknown scheme.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The descriptor scheme is recognised but has no implementation yet.
    #[error("Unsupported scheme {scheme}: {descriptor} is not implemented yet")]
    UnsupportedScheme { scheme: String, descriptor: String },

    /// A CSV row could not be turned into a usable billing record.
    #[error("{}", malformed_row_message(.row, .reason))]
    MalformedRow { row: Option<u64>, reason: String },

    /// A local billing report could not be opened.
    #[error("Failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The CSV reader itself failed (bad quoting, invalid UTF-8, ...).
    #[error("Failed to parse CSV: {0}")]
    Csv(#[from] csv::Error),

    /// Pass-through for any raw I/O error that does not carry a path.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl BillingError {
    /// Build a [`BillingError::MalformedRow`] that is not yet tied to a row number.
    pub fn malformed(reason: impl Into<String>) -> Self {
        BillingError::MalformedRow {
            row: None,
            reason: reason.into(),
        }
    }

    /// Attach a data-row number to a `MalformedRow` error; other variants pass through.
    pub fn at_row(self, row: u64) -> Self {
        match self {
            BillingError::MalformedRow { row: None, reason } => BillingError::MalformedRow {
                row: Some(row),
                reason,
            },
            other => other,
        }
    }
}

fn malformed_row_message(row: &Option<u64>, reason: &str) -> String {
    match row {
        Some(n) => format!("Malformed row {}: {}", n, reason),
        None => format!("Malformed row: {}", reason),
    }
}

/// Convenience alias used throughout the awsbill crates.
pub type Result<T> = std::result::Result<T, BillingError>;
