// src/io/error.rs

use thiserror::Error;

/// Failures while loading or querying the record tables.
#[derive(Error, Debug)]
pub enum StoreError {
    // ===== files =====
    #[error("file not found: {0}")]
    FileNotFound(String),

    #[error("unsupported source '{0}' (expected .xlsx/.xls/.xlsm or a directory of CSV files)")]
    UnsupportedFormat(String),

    #[error("workbook has no sheet named '{0}'")]
    MissingSheet(String),

    #[error("table '{table}' has no column '{column}'")]
    MissingColumn { table: String, column: String },

    // ===== values =====
    #[error("table '{table}', row {row}, column '{column}': invalid value '{value}'")]
    InvalidValue {
        table: String,
        row: usize,
        column: String,
        value: String,
    },

    // ===== lookups =====
    #[error("SKU '{0}' not found in inventory control")]
    NotFound(String),

    // ===== parsers =====
    #[error("CSV parse failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("Excel parse failed: {0}")]
    Excel(#[from] calamine::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;
