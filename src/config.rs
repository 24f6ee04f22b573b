//! Immutable configuration for talking to the Elexon BMRS API.

use crate::types::endpoint::Endpoint;
use bon::Builder;
use chrono::NaiveDate;

/// Base URL of the current (Insights) BMRS API. Requires an API key.
pub const DEFAULT_BASE_URL: &str = "https://data.elexon.co.uk/bmrs/api/v1/";

/// Base URL of the legacy, unauthenticated BMRS API.
pub const LEGACY_BASE_URL: &str = "https://bmrs.elexon.co.uk/api/v1/";

/// Which flavour of the BMRS API is being queried.
///
/// The two differ in the endpoint used for demand data: the current API
/// serves demand outturn by settlement date, the legacy one a plain `demand`
/// endpoint with the generic date parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ApiVariant {
    #[default]
    Insights,
    Legacy,
}

impl ApiVariant {
    pub fn demand_endpoint(&self) -> Endpoint {
        match self {
            ApiVariant::Insights => Endpoint::DemandOutturn,
            ApiVariant::Legacy => Endpoint::Demand,
        }
    }
}

/// Connection and query settings shared by every request of a run.
///
/// Built once and moved into [`crate::HttpDataSource`]; nothing in it changes
/// afterwards.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use elexon::{ApiVariant, ElexonConfig};
///
/// let config = ElexonConfig::builder()
///     .start(NaiveDate::from_ymd_opt(2023, 1, 1).unwrap())
///     .end(NaiveDate::from_ymd_opt(2023, 1, 31).unwrap())
///     .api_key("my-key")
///     .build();
///
/// assert_eq!(config.base_url(), elexon::DEFAULT_BASE_URL);
/// assert_eq!(config.format(), "json");
/// assert_eq!(config.variant(), ApiVariant::Insights);
/// ```
#[derive(Debug, Clone, Builder)]
pub struct ElexonConfig {
    /// First date of the requested range (inclusive).
    start: NaiveDate,
    /// Last date of the requested range (inclusive).
    end: NaiveDate,
    /// Sent as the password half of HTTP Basic auth. No auth header is sent when `None`.
    #[builder(into)]
    api_key: Option<String>,
    #[builder(into, default = DEFAULT_BASE_URL.to_owned())]
    base_url: String,
    /// Response format requested from the API. Only `json` can be decoded.
    #[builder(into, default = "json".to_owned())]
    format: String,
    #[builder(default)]
    variant: ApiVariant,
}

impl ElexonConfig {
    /// Configuration for the legacy, unauthenticated API.
    pub fn legacy(start: NaiveDate, end: NaiveDate) -> Self {
        Self::builder()
            .start(start)
            .end(end)
            .base_url(LEGACY_BASE_URL)
            .variant(ApiVariant::Legacy)
            .build()
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref()
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn format(&self) -> &str {
        &self.format
    }

    pub fn variant(&self) -> ApiVariant {
        self.variant
    }
}
