use crate::normalization::error::NormalizationError;
use crate::normalization::timestamp::parse_date;
use crate::normalization::{read_envelope, NormalizationStrategy};
use crate::source::http_data_source::RawPayload;
use crate::types::columns::{TEMPERATURE, TEMPERATURE_REFERENCE_AVERAGE, TIMESTAMP};
use crate::types::records::TemperatureRecord;
use log::debug;
use polars::prelude::*;

/// Normalizes the `temperature` endpoint.
///
/// One row per entry, with a date-only `timestamp` taken from
/// `measurementDate` and the two temperature fields copied as-is.
#[derive(Debug, Clone, Copy, Default)]
pub struct TemperatureStrategy;

impl NormalizationStrategy for TemperatureStrategy {
    fn process(&self, payload: &RawPayload) -> Result<DataFrame, NormalizationError> {
        let strategy = self.get_strategy_info();
        let records: Vec<TemperatureRecord> = read_envelope(payload, strategy)?;

        let mut timestamps = Vec::with_capacity(records.len());
        let mut temperatures = Vec::with_capacity(records.len());
        let mut reference_averages = Vec::with_capacity(records.len());

        for (index, record) in records.into_iter().enumerate() {
            let date = parse_date(&record.measurement_date).map_err(|source| {
                NormalizationError::InvalidTimestamp {
                    strategy,
                    index,
                    field: "measurementDate",
                    value: record.measurement_date.clone(),
                    source,
                }
            })?;
            timestamps.push(date);
            temperatures.push(record.temperature);
            reference_averages.push(record.temperature_reference_average);
        }

        let frame = DataFrame::new(vec![
            Column::new(TIMESTAMP.into(), timestamps),
            Column::new(TEMPERATURE.into(), temperatures),
            Column::new(TEMPERATURE_REFERENCE_AVERAGE.into(), reference_averages),
        ])?;
        debug!("{} produced {} rows", strategy, frame.height());
        Ok(frame)
    }

    fn get_strategy_info(&self) -> &'static str {
        "TemperatureStrategy"
    }
}
