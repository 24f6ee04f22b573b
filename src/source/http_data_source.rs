use crate::config::ElexonConfig;
use crate::error::ElexonError;
use crate::source::error::FetchError;
use crate::types::endpoint::Endpoint;
use log::{error, info};
use reqwest::Client;
use std::time::Duration;

/// An undecoded JSON document as returned by the provider.
pub type RawPayload = serde_json::Value;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(5);
const BASIC_AUTH_USERNAME: &str = "apikey";
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Issues authenticated GET requests against the configured BMRS base URL.
///
/// Holds nothing but the immutable [`ElexonConfig`] and an HTTP client; every
/// call to [`HttpDataSource::fetch`] is a single request with no retries.
pub struct HttpDataSource {
    config: ElexonConfig,
    client: Client,
}

impl HttpDataSource {
    /// Creates a data source for the given configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ElexonError::InvalidDateRange`] if the start date is after the
    /// end date, or [`ElexonError::ClientBuild`] if the HTTP client cannot be
    /// initialised.
    pub fn new(config: ElexonConfig) -> Result<Self, ElexonError> {
        if config.start() > config.end() {
            return Err(ElexonError::InvalidDateRange {
                start: config.start(),
                end: config.end(),
            });
        }
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(ElexonError::ClientBuild)?;
        Ok(Self { config, client })
    }

    pub fn config(&self) -> &ElexonConfig {
        &self.config
    }

    pub fn url(&self, endpoint: Endpoint) -> String {
        format!("{}{}", self.config.base_url(), endpoint.path())
    }

    /// Query parameters for `endpoint`: the date range under the endpoint's
    /// own parameter names, plus the response format.
    pub(crate) fn query_params(&self, endpoint: Endpoint) -> Vec<(&'static str, String)> {
        let (from_name, to_name) = endpoint.date_param_names();
        vec![
            (from_name, self.config.start().format(DATE_FORMAT).to_string()),
            (to_name, self.config.end().format(DATE_FORMAT).to_string()),
            ("format", self.config.format().to_string()),
        ]
    }

    /// Fetches `endpoint` and returns the decoded JSON body.
    ///
    /// Transport errors, non-2xx statuses and undecodable bodies are logged
    /// and reported as `None`. Use [`HttpDataSource::try_fetch`] to get the
    /// cause instead.
    pub async fn fetch(&self, endpoint: Endpoint) -> Option<RawPayload> {
        match self.try_fetch(endpoint).await {
            Ok(payload) => Some(payload),
            Err(e) => {
                error!("Error fetching {} data: {:?}", endpoint, e);
                None
            }
        }
    }

    /// Like [`HttpDataSource::fetch`], but returns the [`FetchError`].
    pub async fn try_fetch(&self, endpoint: Endpoint) -> Result<RawPayload, FetchError> {
        let url = self.url(endpoint);
        info!("Requesting {}", url);

        let mut request = self
            .client
            .get(&url)
            .query(&self.query_params(endpoint));
        if let Some(key) = self.config.api_key() {
            request = request.basic_auth(BASIC_AUTH_USERNAME, Some(key));
        }

        let response = request
            .send()
            .await
            .map_err(|e| FetchError::NetworkRequest(url.clone(), e))?;

        let response = response.error_for_status().map_err(|e| match e.status() {
            Some(status) => FetchError::HttpStatus {
                url: url.clone(),
                status,
                source: e,
            },
            None => FetchError::NetworkRequest(url.clone(), e),
        })?;

        response
            .json::<RawPayload>()
            .await
            .map_err(|e| FetchError::JsonDecode(url, e))
    }
}
