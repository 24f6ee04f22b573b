use thiserror::Error;

/// Why a single fetch produced no data.
///
/// [`crate::HttpDataSource::fetch`] logs these and returns `None`;
/// [`crate::HttpDataSource::try_fetch`] hands them to the caller.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Network request failed for {0}")]
    NetworkRequest(String, #[source] reqwest::Error),

    #[error("HTTP request failed for {url} with status {status}")]
    HttpStatus {
        url: String,
        status: reqwest::StatusCode,
        #[source]
        source: reqwest::Error,
    },

    #[error("Failed to decode JSON response from {0}")]
    JsonDecode(String, #[source] reqwest::Error),
}
