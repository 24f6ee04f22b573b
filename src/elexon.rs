//! This module provides the main entry point of the crate: the [`Elexon`] client,
//! which fetches the temperature, generation and demand sources one after the
//! other, normalizes each, and aligns them into one consolidated table.

use crate::alignment::data_aligner::DataAligner;
use crate::config::ElexonConfig;
use crate::error::ElexonError;
use crate::normalization::demand::DemandStrategy;
use crate::normalization::generation::GenerationStrategy;
use crate::normalization::temperature::TemperatureStrategy;
use crate::normalization::NormalizationStrategy;
use crate::sink::TableSink;
use crate::source::http_data_source::HttpDataSource;
use crate::types::consolidated_frame::ConsolidatedFrame;
use crate::types::endpoint::Endpoint;
use log::info;
use polars::prelude::DataFrame;

/// The main client struct for retrieving and consolidating Elexon data.
///
/// Requests are made strictly in sequence (temperature, generation, demand).
/// A source that cannot be fetched aborts the run; no source is ever replaced
/// by empty data.
///
/// # Examples
///
/// ```no_run
/// # use elexon::{Elexon, ElexonConfig, ElexonError, LogSink};
/// # use chrono::NaiveDate;
/// # #[tokio::main]
/// # async fn main() -> Result<(), ElexonError> {
/// let config = ElexonConfig::builder()
///     .start(NaiveDate::from_ymd_opt(2023, 1, 1).unwrap())
///     .end(NaiveDate::from_ymd_opt(2023, 1, 2).unwrap())
///     .api_key("my-key")
///     .build();
/// let client = Elexon::new(config)?;
///
/// let consolidated = client.run(&[&LogSink]).await?;
/// println!("{} rows", consolidated.height());
/// # Ok(())
/// # }
/// ```
pub struct Elexon {
    source: HttpDataSource,
    aligner: DataAligner,
}

impl Elexon {
    /// Creates a client using the [`DataAligner::default`] join policy.
    ///
    /// # Errors
    ///
    /// Returns [`ElexonError::InvalidDateRange`] or [`ElexonError::ClientBuild`]
    /// if the data source cannot be created.
    pub fn new(config: ElexonConfig) -> Result<Self, ElexonError> {
        Ok(Self {
            source: HttpDataSource::new(config)?,
            aligner: DataAligner::default(),
        })
    }

    /// Replaces the aligner used by [`Elexon::consolidated`].
    pub fn with_aligner(mut self, aligner: DataAligner) -> Self {
        self.aligner = aligner;
        self
    }

    pub fn source(&self) -> &HttpDataSource {
        &self.source
    }

    pub fn aligner(&self) -> &DataAligner {
        &self.aligner
    }

    /// Fetches `endpoint` and normalizes the payload with `strategy`.
    ///
    /// # Errors
    ///
    /// Returns [`ElexonError::SourceUnavailable`] if the fetch produced no data,
    /// or [`ElexonError::Normalization`] if the payload has an unexpected shape.
    pub async fn fetch_normalized(
        &self,
        endpoint: Endpoint,
        strategy: &impl NormalizationStrategy,
    ) -> Result<DataFrame, ElexonError> {
        info!(
            "Fetching {} data with {}",
            endpoint,
            strategy.get_strategy_info()
        );
        let payload = self
            .source
            .fetch(endpoint)
            .await
            .ok_or(ElexonError::SourceUnavailable(endpoint))?;
        Ok(strategy.process(&payload)?)
    }

    pub async fn temperature(&self) -> Result<DataFrame, ElexonError> {
        self.fetch_normalized(Endpoint::Temperature, &TemperatureStrategy)
            .await
    }

    pub async fn generation(&self) -> Result<DataFrame, ElexonError> {
        self.fetch_normalized(Endpoint::GenerationPerType, &GenerationStrategy)
            .await
    }

    /// Fetches demand from the endpoint matching the configured [`crate::ApiVariant`].
    pub async fn demand(&self) -> Result<DataFrame, ElexonError> {
        let endpoint = self.source.config().variant().demand_endpoint();
        self.fetch_normalized(endpoint, &DemandStrategy).await
    }

    /// Fetches all three sources in turn and aligns them as
    /// (generation, temperature, demand).
    pub async fn consolidated(&self) -> Result<ConsolidatedFrame, ElexonError> {
        let temperature = self.temperature().await?;
        let generation = self.generation().await?;
        let demand = self.demand().await?;

        let consolidated = self.aligner.merge(&[generation, temperature, demand])?;
        info!("Consolidated {} rows", consolidated.height());
        Ok(consolidated)
    }

    /// Builds the consolidated table and hands it to each sink in order.
    pub async fn run(&self, sinks: &[&dyn TableSink]) -> Result<ConsolidatedFrame, ElexonError> {
        let consolidated = self.consolidated().await?;
        for sink in sinks {
            sink.write(&consolidated)?;
        }
        Ok(consolidated)
    }
}
