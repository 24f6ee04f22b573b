use crate::sink::error::SinkError;
use crate::sink::TableSink;
use crate::types::consolidated_frame::ConsolidatedFrame;
use log::info;
use polars::prelude::*;
use std::fs::File;
use std::path::{Path, PathBuf};

pub const DEFAULT_TABLE_NAME: &str = "elexon";

/// Rows logged after a write to confirm the file reads back.
pub(crate) const PREVIEW_ROWS: usize = 15;

/// Stores the consolidated table as `<dir>/<table_name>.parquet`.
///
/// An existing file of the same name is replaced.
#[derive(Debug, Clone)]
pub struct ParquetSink {
    dir: PathBuf,
    table_name: String,
}

impl ParquetSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            table_name: DEFAULT_TABLE_NAME.to_string(),
        }
    }

    pub fn with_table_name(mut self, table_name: impl Into<String>) -> Self {
        self.table_name = table_name.into();
        self
    }

    pub fn path(&self) -> PathBuf {
        self.dir.join(format!("{}.parquet", self.table_name))
    }

    /// Loads the stored table back.
    pub fn read(&self) -> Result<ConsolidatedFrame, SinkError> {
        read_parquet(&self.path()).map(ConsolidatedFrame::new)
    }
}

impl TableSink for ParquetSink {
    fn write(&self, table: &ConsolidatedFrame) -> Result<(), SinkError> {
        std::fs::create_dir_all(&self.dir)
            .map_err(|e| SinkError::DirCreation(self.dir.clone(), e))?;

        let path = self.path();
        let file =
            File::create(&path).map_err(|e| SinkError::ParquetWriteIo(path.clone(), e))?;
        let mut frame = table.frame.clone();
        ParquetWriter::new(file)
            .with_compression(ParquetCompression::Snappy)
            .finish(&mut frame)
            .map_err(|e| SinkError::ParquetWritePolars(path.clone(), e))?;
        info!("Wrote {} rows to {:?}", frame.height(), path);

        let preview = read_parquet(&path)?.head(Some(PREVIEW_ROWS));
        info!("First rows of {:?}:\n{}", path, preview);
        Ok(())
    }
}

pub(crate) fn read_parquet(path: &Path) -> Result<DataFrame, SinkError> {
    let file = File::open(path).map_err(|e| SinkError::ParquetReadIo(path.to_path_buf(), e))?;
    ParquetReader::new(file)
        .finish()
        .map_err(|e| SinkError::ParquetReadPolars(path.to_path_buf(), e))
}
