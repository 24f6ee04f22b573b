use polars::error::PolarsError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum NormalizationError {
    // A required field is missing or has the wrong type somewhere in the payload.
    #[error("{strategy}: payload does not match the expected structure")]
    Structure {
        strategy: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("{strategy}: entry {index} has unparseable {field} '{value}'")]
    InvalidTimestamp {
        strategy: &'static str,
        index: usize,
        field: &'static str,
        value: String,
        #[source]
        source: chrono::ParseError,
    },

    #[error("Failed building DataFrame: {0}")]
    DataFrame(#[from] PolarsError),
}
