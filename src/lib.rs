mod alignment;
mod config;
mod elexon;
mod error;
mod normalization;
mod sink;
mod source;
mod types;

pub use elexon::*;
pub use error::ElexonError;

pub use config::{ApiVariant, ElexonConfig, DEFAULT_BASE_URL, LEGACY_BASE_URL};

pub use source::error::FetchError;
pub use source::http_data_source::{HttpDataSource, RawPayload};

pub use normalization::demand::DemandStrategy;
pub use normalization::error::NormalizationError;
pub use normalization::generation::GenerationStrategy;
pub use normalization::temperature::TemperatureStrategy;
pub use normalization::NormalizationStrategy;

pub use alignment::data_aligner::DataAligner;
pub use alignment::error::AlignmentError;
pub use alignment::join_policy::{AlignmentStep, JoinPolicy, KeyGranularity};

pub use sink::duckdb_sink::DuckDbSink;
pub use sink::error::SinkError;
pub use sink::log_sink::LogSink;
pub use sink::parquet_sink::{ParquetSink, DEFAULT_TABLE_NAME};
pub use sink::TableSink;

pub use types::columns;
pub use types::consolidated_frame::ConsolidatedFrame;
pub use types::endpoint::Endpoint;
pub use types::records::*;
