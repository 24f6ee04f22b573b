use crate::sink::error::SinkError;
use crate::sink::parquet_sink::{read_parquet, DEFAULT_TABLE_NAME, PREVIEW_ROWS};
use crate::sink::TableSink;
use crate::types::columns::TIMESTAMP;
use crate::types::consolidated_frame::ConsolidatedFrame;
use duckdb::Connection;
use log::info;
use polars::prelude::*;
use std::path::{Path, PathBuf};

/// Stores the consolidated table in a DuckDB database file.
///
/// The table (named `elexon` unless overridden) is replaced on every write and
/// ordered by `timestamp`. After writing, the first rows are read back with a
/// `LIMIT` query and logged.
#[derive(Debug, Clone)]
pub struct DuckDbSink {
    path: PathBuf,
    table_name: String,
}

impl DuckDbSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            table_name: DEFAULT_TABLE_NAME.to_string(),
        }
    }

    pub fn with_table_name(mut self, table_name: impl Into<String>) -> Self {
        self.table_name = table_name.into();
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn table_name(&self) -> &str {
        &self.table_name
    }

    /// Number of rows currently stored in the table.
    pub fn row_count(&self) -> Result<usize, SinkError> {
        let conn = self.open()?;
        let sql = format!("SELECT count(*)::BIGINT FROM {}", self.quoted_table());
        let count: i64 = conn
            .query_row(&sql, [], |row| row.get(0))
            .map_err(|e| self.duckdb_error(e))?;
        Ok(count as usize)
    }

    /// Reads up to `limit` rows of the stored table back into a frame.
    pub fn preview(&self, limit: usize) -> Result<DataFrame, SinkError> {
        let conn = self.open()?;
        let staging_dir =
            tempfile::tempdir().map_err(|e| SinkError::Staging(self.path.clone(), e))?;
        let staged = staging_dir.path().join("preview.parquet");

        let sql = format!(
            "COPY (SELECT * FROM {} ORDER BY \"{}\" LIMIT {}) TO {} (FORMAT PARQUET)",
            self.quoted_table(),
            TIMESTAMP,
            limit,
            sql_string(&staged)
        );
        conn.execute_batch(&sql).map_err(|e| self.duckdb_error(e))?;
        read_parquet(&staged)
    }

    fn open(&self) -> Result<Connection, SinkError> {
        Connection::open(&self.path).map_err(|e| self.duckdb_error(e))
    }

    fn quoted_table(&self) -> String {
        format!("\"{}\"", self.table_name.replace('"', "\"\""))
    }

    fn duckdb_error(&self, e: duckdb::Error) -> SinkError {
        SinkError::DuckDb(self.path.clone(), e)
    }
}

impl TableSink for DuckDbSink {
    fn write(&self, table: &ConsolidatedFrame) -> Result<(), SinkError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .map_err(|e| SinkError::DirCreation(parent.to_path_buf(), e))?;
        }

        // DuckDB loads the frame from a parquet copy.
        let mut staged = tempfile::Builder::new()
            .prefix("elexon-")
            .suffix(".parquet")
            .tempfile()
            .map_err(|e| SinkError::Staging(self.path.clone(), e))?;
        let staged_path = staged.path().to_path_buf();
        let mut frame = table.frame.clone();
        ParquetWriter::new(staged.as_file_mut())
            .finish(&mut frame)
            .map_err(|e| SinkError::ParquetWritePolars(staged_path.clone(), e))?;

        let conn = self.open()?;
        let sql = format!(
            "CREATE OR REPLACE TABLE {} AS SELECT * FROM read_parquet({}) ORDER BY \"{}\"",
            self.quoted_table(),
            sql_string(&staged_path),
            TIMESTAMP
        );
        conn.execute_batch(&sql).map_err(|e| self.duckdb_error(e))?;
        drop(conn);
        info!(
            "Wrote {} rows to table {} in {:?}",
            frame.height(),
            self.table_name,
            self.path
        );

        let preview = self.preview(PREVIEW_ROWS)?;
        info!("First rows of table {}:\n{}", self.table_name, preview);
        Ok(())
    }
}

/// Quotes a path as a SQL string literal.
fn sql_string(path: &Path) -> String {
    format!("'{}'", path.display().to_string().replace('\'', "''"))
}
