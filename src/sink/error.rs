use polars::error::PolarsError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SinkError {
    #[error("Failed to create output directory '{0}'")]
    DirCreation(PathBuf, #[source] std::io::Error),

    #[error("I/O error writing parquet file '{0}'")]
    ParquetWriteIo(PathBuf, #[source] std::io::Error),

    #[error("Encoding error writing parquet file '{0}'")]
    ParquetWritePolars(PathBuf, #[source] PolarsError),

    #[error("I/O error reading parquet file '{0}'")]
    ParquetReadIo(PathBuf, #[source] std::io::Error),

    #[error("Decoding error reading parquet file '{0}'")]
    ParquetReadPolars(PathBuf, #[source] PolarsError),

    #[error("Failed to create staging file for database '{0}'")]
    Staging(PathBuf, #[source] std::io::Error),

    #[error("DuckDB error for database '{0}'")]
    DuckDb(PathBuf, #[source] duckdb::Error),
}
