use crate::sink::error::SinkError;
use crate::sink::TableSink;
use crate::types::consolidated_frame::ConsolidatedFrame;
use log::info;

/// Logs the consolidated table at `info` level.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSink;

impl TableSink for LogSink {
    fn write(&self, table: &ConsolidatedFrame) -> Result<(), SinkError> {
        info!("Consolidated data:\n{}\n", table);
        Ok(())
    }
}
