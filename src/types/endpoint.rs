//! Defines the Elexon BMRS endpoints consumed by this crate and the
//! per-endpoint differences in how their date range is requested.

use std::fmt;

/// An Elexon BMRS endpoint, relative to the configured base URL.
///
/// Most endpoints take their date range as `from`/`to`. The demand outturn
/// endpoint is the exception and expects `settlementDateFrom`/`settlementDateTo`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    /// Daily temperature with its reference average.
    Temperature,
    /// Actual generation output, broken down per PSR (fuel/technology) type.
    GenerationPerType,
    /// Initial demand outturn, queried by settlement date.
    DemandOutturn,
    /// Demand on the legacy, unauthenticated API.
    Demand,
}

impl Endpoint {
    /// The path appended to the base URL.
    pub fn path(&self) -> &'static str {
        match self {
            Endpoint::Temperature => "temperature",
            Endpoint::GenerationPerType => "generation/actual/per-type",
            Endpoint::DemandOutturn => "demand/outturn",
            Endpoint::Demand => "demand",
        }
    }

    /// Names of the (start, end) query parameters for this endpoint.
    pub(crate) fn date_param_names(&self) -> (&'static str, &'static str) {
        match self {
            Endpoint::DemandOutturn => ("settlementDateFrom", "settlementDateTo"),
            _ => ("from", "to"),
        }
    }
}

/// Formats an `Endpoint` as its path.
///
/// # Examples
///
/// ```
/// use elexon::Endpoint;
///
/// assert_eq!(Endpoint::DemandOutturn.to_string(), "demand/outturn");
/// ```
impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path())
    }
}
