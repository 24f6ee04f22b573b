use polars::error::PolarsError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AlignmentError {
    #[error("Expected {expected} tables to align, got {found}")]
    TableCount { expected: usize, found: usize },

    #[error("Table {table} is missing the '{column}' key column")]
    MissingKeyColumn { table: usize, column: &'static str },

    #[error("Failed joining tables: {0}")]
    Join(#[from] PolarsError),
}
