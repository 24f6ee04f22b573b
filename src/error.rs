use crate::alignment::error::AlignmentError;
use crate::normalization::error::NormalizationError;
use crate::sink::error::SinkError;
use crate::types::endpoint::Endpoint;
use chrono::NaiveDate;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ElexonError {
    #[error(transparent)]
    Normalization(#[from] NormalizationError),

    #[error(transparent)]
    Alignment(#[from] AlignmentError),

    #[error(transparent)]
    Sink(#[from] SinkError),

    // The fetch itself logged the underlying transport or decoding error.
    #[error("No data could be fetched from the '{0}' endpoint")]
    SourceUnavailable(Endpoint),

    #[error("Start date {start} is after end date {end}")]
    InvalidDateRange { start: NaiveDate, end: NaiveDate },

    #[error("Failed to build HTTP client")]
    ClientBuild(#[source] reqwest::Error),
}
