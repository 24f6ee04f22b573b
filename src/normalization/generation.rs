use crate::normalization::error::NormalizationError;
use crate::normalization::timestamp::parse_datetime;
use crate::normalization::{datetime_column, read_envelope, NormalizationStrategy};
use crate::source::http_data_source::RawPayload;
use crate::types::columns::{PSR_TYPE, QUANTITY, TIMESTAMP};
use crate::types::records::GenerationRecord;
use log::debug;
use polars::prelude::*;

/// Normalizes the `generation/actual/per-type` endpoint.
///
/// Each entry carries a `startTime` and a nested list of `{psrType, quantity}`
/// pairs. The output has one row per pair, all rows of an entry sharing that
/// entry's `startTime`.
#[derive(Debug, Clone, Copy, Default)]
pub struct GenerationStrategy;

impl NormalizationStrategy for GenerationStrategy {
    fn process(&self, payload: &RawPayload) -> Result<DataFrame, NormalizationError> {
        let strategy = self.get_strategy_info();
        let records: Vec<GenerationRecord> = read_envelope(payload, strategy)?;

        let rows: usize = records.iter().map(|record| record.data.len()).sum();
        let mut timestamps = Vec::with_capacity(rows);
        let mut psr_types = Vec::with_capacity(rows);
        let mut quantities = Vec::with_capacity(rows);

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
            for by_type in record.data {
                timestamps.push(start_time);
                psr_types.push(by_type.psr_type);
                quantities.push(by_type.quantity);
            }
        }

        let frame = DataFrame::new(vec![
            datetime_column(TIMESTAMP, timestamps)?,
            Column::new(PSR_TYPE.into(), psr_types),
            Column::new(QUANTITY.into(), quantities),
        ])?;
        debug!("{} produced {} rows", strategy, frame.height());
        Ok(frame)
    }

    fn get_strategy_info(&self) -> &'static str {
        "GenerationStrategy"
    }
}
