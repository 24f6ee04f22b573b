//! Destinations for the consolidated table.

pub mod duckdb_sink;
pub mod error;
pub mod log_sink;
pub mod parquet_sink;

use crate::sink::error::SinkError;
use crate::types::consolidated_frame::ConsolidatedFrame;

/// Receives the consolidated table at the end of a run.
pub trait TableSink {
    fn write(&self, table: &ConsolidatedFrame) -> Result<(), SinkError>;
}
