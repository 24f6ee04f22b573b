use crate::normalization::error::NormalizationError;
use crate::normalization::timestamp::parse_datetime;
use crate::normalization::{datetime_column, read_envelope, NormalizationStrategy};
use crate::source::http_data_source::RawPayload;
use crate::types::columns::{INITIAL_DEMAND_OUTTURN, TIMESTAMP};
use crate::types::records::DemandRecord;
use log::debug;
use polars::prelude::*;

/// Normalizes the `demand/outturn` (and legacy `demand`) endpoint.
///
/// One row per entry. `initialDemandOutturn` is optional; a missing value
/// becomes a null, never a default.
#[derive(Debug, Clone, Copy, Default)]
pub struct DemandStrategy;

impl NormalizationStrategy for DemandStrategy {
    fn process(&self, payload: &RawPayload) -> Result<DataFrame, NormalizationError> {
        let strategy = self.get_strategy_info();
        let records: Vec<DemandRecord> = read_envelope(payload, strategy)?;

        let mut timestamps = Vec::with_capacity(records.len());
        let mut outturns = Vec::with_capacity(records.len());

        for (index, record) in records.into_iter().enumerate() {
            let start_time = parse_datetime(&record.start_time).map_err(|source| {
                NormalizationError::InvalidTimestamp {
                    strategy,
                    index,
                    field: "startTime",
                    value: record.start_time.clone(),
                    source,
                }
            })?;
            timestamps.push(start_time);
            outturns.push(record.initial_demand_outturn);
        }

        let frame = DataFrame::new(vec![
            datetime_column(TIMESTAMP, timestamps)?,
            Column::new(INITIAL_DEMAND_OUTTURN.into(), outturns),
        ])?;
        debug!("{} produced {} rows", strategy, frame.height());
        Ok(frame)
    }

    fn get_strategy_info(&self) -> &'static str {
        "DemandStrategy"
    }
}
