use crate::alignment::error::AlignmentError;
use crate::alignment::join_policy::{AlignmentStep, JoinPolicy, KeyGranularity};
use crate::types::columns::TIMESTAMP;
use crate::types::consolidated_frame::ConsolidatedFrame;
use log::debug;
use polars::prelude::*;

const JOIN_KEY: &str = "__join_key";

/// Aligns normalized frames on `timestamp` through a left-to-right sequence
/// of pairwise joins.
///
/// The first table is the left side of the first step; the result of each step
/// is the left side of the next. The left `timestamp` is always kept as the key.
///
/// # Examples
///
/// ```
/// use elexon::{AlignmentStep, DataAligner, JoinPolicy, KeyGranularity};
///
/// // Generation x Temperature by calendar date, then x Demand by exact time,
/// // keeping only complete rows.
/// let aligner = DataAligner::default();
/// assert_eq!(
///     aligner.steps(),
///     &[
///         AlignmentStep::new(KeyGranularity::Date, JoinPolicy::LeftWithGaps),
///         AlignmentStep::new(KeyGranularity::Exact, JoinPolicy::Inner),
///     ]
/// );
/// assert!(aligner.drops_incomplete_rows());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataAligner {
    steps: Vec<AlignmentStep>,
    drop_incomplete_rows: bool,
}

impl Default for DataAligner {
    /// Generation x Temperature (left join by date), then x Demand (inner join
    /// by exact timestamp), then any row with a null is dropped. Only
    /// timestamps present in all three sources survive.
    fn default() -> Self {
        Self::new(
            vec![
                AlignmentStep::new(KeyGranularity::Date, JoinPolicy::LeftWithGaps),
                AlignmentStep::new(KeyGranularity::Exact, JoinPolicy::Inner),
            ],
            true,
        )
    }
}

impl DataAligner {
    pub fn new(steps: Vec<AlignmentStep>, drop_incomplete_rows: bool) -> Self {
        Self {
            steps,
            drop_incomplete_rows,
        }
    }

    /// Like the default aligner, but the demand join is a full outer join and
    /// rows with gaps are kept.
    pub fn preserving_gaps() -> Self {
        Self::new(
            vec![
                AlignmentStep::new(KeyGranularity::Date, JoinPolicy::LeftWithGaps),
                AlignmentStep::new(KeyGranularity::Exact, JoinPolicy::OuterWithGaps),
            ],
            false,
        )
    }

    pub fn steps(&self) -> &[AlignmentStep] {
        &self.steps
    }

    pub fn drops_incomplete_rows(&self) -> bool {
        self.drop_incomplete_rows
    }

    /// Joins `tables` in order and returns the consolidated frame, sorted by
    /// `timestamp` with `timestamp` as its first column.
    ///
    /// # Errors
    ///
    /// Returns [`AlignmentError::TableCount`] unless exactly one table more than
    /// there are steps is given, [`AlignmentError::MissingKeyColumn`] if a table
    /// has no `timestamp` column, and [`AlignmentError::Join`] if Polars fails.
    pub fn merge(&self, tables: &[DataFrame]) -> Result<ConsolidatedFrame, AlignmentError> {
        let expected = self.steps.len() + 1;
        if tables.len() != expected {
            return Err(AlignmentError::TableCount {
                expected,
                found: tables.len(),
            });
        }
        for (table, frame) in tables.iter().enumerate() {
            if frame.column(TIMESTAMP).is_err() {
                return Err(AlignmentError::MissingKeyColumn {
                    table,
                    column: TIMESTAMP,
                });
            }
        }

        let mut merged = tables[0].clone();
        for (step, right) in self.steps.iter().zip(&tables[1..]) {
            merged = join_pair(&merged, right, step)?;
            debug!("{:?} join produced {} rows", step, merged.height());
        }

        let mut lazy = merged.lazy();
        if self.drop_incomplete_rows {
            lazy = lazy.drop_nulls(None);
        }
        let sorted = lazy
            .sort(
                [TIMESTAMP],
                SortMultipleOptions::default().with_maintain_order(true),
            )
            .collect()?;

        Ok(ConsolidatedFrame::new(timestamp_first(sorted)?))
    }
}

fn join_pair(
    left: &DataFrame,
    right: &DataFrame,
    step: &AlignmentStep,
) -> PolarsResult<DataFrame> {
    let key_dtype = step.granularity.key_dtype();
    let timestamp_dtype = left.column(TIMESTAMP)?.dtype().clone();

    let left = left
        .clone()
        .lazy()
        .with_column(col(TIMESTAMP).cast(key_dtype.clone()).alias(JOIN_KEY));
    let right = right
        .clone()
        .lazy()
        .with_column(col(TIMESTAMP).cast(key_dtype).alias(JOIN_KEY))
        .drop([TIMESTAMP]);

    let args =
        JoinArgs::new(step.policy.join_type()).with_coalesce(JoinCoalesce::CoalesceColumns);

    left.join(right, [col(JOIN_KEY)], [col(JOIN_KEY)], args)
        // Right-only rows of an outer join only carry their time in the key.
        .with_column(
            coalesce(&[col(TIMESTAMP), col(JOIN_KEY).cast(timestamp_dtype)]).alias(TIMESTAMP),
        )
        .drop([JOIN_KEY])
        .collect()
}

fn timestamp_first(frame: DataFrame) -> PolarsResult<DataFrame> {
    let mut order = vec![PlSmallStr::from_static(TIMESTAMP)];
    order.extend(
        frame
            .get_column_names()
            .into_iter()
            .filter(|name| name.as_str() != TIMESTAMP)
            .cloned(),
    );
    frame.select(order)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalization::demand::DemandStrategy;
    use crate::normalization::generation::GenerationStrategy;
    use crate::normalization::temperature::TemperatureStrategy;
    use crate::normalization::NormalizationStrategy;
    use crate::types::columns::*;
    use chrono::{NaiveDate, NaiveDateTime};
    use serde_json::{json, Value};

    fn at(day: u32, hour: u32, minute: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2023, 1, day)
            .unwrap()
            .and_hms_opt(hour, minute, 0)
            .unwrap()
    }

    fn generation(payload: Value) -> DataFrame {
        GenerationStrategy.process(&payload).unwrap()
    }

    fn temperature(payload: Value) -> DataFrame {
        TemperatureStrategy.process(&payload).unwrap()
    }

    fn demand(payload: Value) -> DataFrame {
        DemandStrategy.process(&payload).unwrap()
    }

    fn f64_values(frame: &DataFrame, name: &str) -> Vec<Option<f64>> {
        frame.column(name).unwrap().f64().unwrap().into_iter().collect()
    }

    fn single_day_sources() -> (DataFrame, DataFrame) {
        let generation = generation(json!({
            "data": [ { "startTime": "2023-01-01T00:00:00", "data": [ { "psrType": "CCGT", "quantity": 100 } ] } ]
        }));
        let temperature = temperature(json!({
            "data": [ { "measurementDate": "2023-01-01", "temperature": 20, "temperatureReferenceAverage": 18 } ]
        }));
        (generation, temperature)
    }

    #[test]
    fn test_single_row_end_to_end() -> Result<(), Box<dyn std::error::Error>> {
        let (generation, temperature) = single_day_sources();
        let demand = demand(json!({
            "data": [ { "startTime": "2023-01-01T00:00:00", "initialDemandOutturn": 5000 } ]
        }));

        let consolidated = DataAligner::default().merge(&[generation, temperature, demand])?;
        let frame = &consolidated.frame;

        assert_eq!(consolidated.height(), 1);
        assert_eq!(consolidated.timestamps()?, vec![at(1, 0, 0)]);
        let names: Vec<&str> = frame
            .get_column_names()
            .into_iter()
            .map(|n| n.as_str())
            .collect();
        assert_eq!(
            names,
            [
                TIMESTAMP,
                PSR_TYPE,
                QUANTITY,
                TEMPERATURE,
                TEMPERATURE_REFERENCE_AVERAGE,
                INITIAL_DEMAND_OUTTURN
            ]
        );
        assert_eq!(frame.column(PSR_TYPE)?.str()?.get(0), Some("CCGT"));
        assert_eq!(f64_values(frame, QUANTITY), vec![Some(100.0)]);
        assert_eq!(f64_values(frame, TEMPERATURE), vec![Some(20.0)]);
        assert_eq!(f64_values(frame, TEMPERATURE_REFERENCE_AVERAGE), vec![Some(18.0)]);
        assert_eq!(f64_values(frame, INITIAL_DEMAND_OUTTURN), vec![Some(5000.0)]);
        Ok(())
    }

    #[test]
    fn test_empty_demand_yields_empty_table() -> Result<(), Box<dyn std::error::Error>> {
        let (generation, temperature) = single_day_sources();
        let demand = demand(json!({ "data": [] }));

        let consolidated = DataAligner::default().merge(&[generation, temperature, demand])?;
        assert!(consolidated.is_empty());
        assert!(consolidated.frame.column(INITIAL_DEMAND_OUTTURN).is_ok());
        Ok(())
    }

    #[test]
    fn test_half_hourly_rows_share_daily_temperature() -> Result<(), Box<dyn std::error::Error>> {
        let generation = generation(json!({
            "data": [
                { "startTime": "2023-01-01T00:00:00Z", "data": [ { "psrType": "CCGT", "quantity": 100 } ] },
                { "startTime": "2023-01-01T00:30:00Z", "data": [ { "psrType": "CCGT", "quantity": 110 } ] },
                { "startTime": "2023-01-02T00:00:00Z", "data": [ { "psrType": "CCGT", "quantity": 120 } ] }
            ]
        }));
        let temperature = temperature(json!({
            "data": [
                { "measurementDate": "2023-01-01", "temperature": 5, "temperatureReferenceAverage": 6 },
                { "measurementDate": "2023-01-02", "temperature": 7, "temperatureReferenceAverage": 6 }
            ]
        }));
        let demand = demand(json!({
            "data": [
                { "startTime": "2023-01-01T00:00:00Z", "initialDemandOutturn": 30000 },
                { "startTime": "2023-01-01T00:30:00Z", "initialDemandOutturn": 31000 },
                { "startTime": "2023-01-02T00:00:00Z", "initialDemandOutturn": 29000 }
            ]
        }));

        let consolidated = DataAligner::default().merge(&[generation, temperature, demand])?;
        assert_eq!(
            consolidated.timestamps()?,
            vec![at(1, 0, 0), at(1, 0, 30), at(2, 0, 0)]
        );
        assert_eq!(
            f64_values(&consolidated.frame, TEMPERATURE),
            vec![Some(5.0), Some(5.0), Some(7.0)]
        );
        assert_eq!(
            f64_values(&consolidated.frame, INITIAL_DEMAND_OUTTURN),
            vec![Some(30000.0), Some(31000.0), Some(29000.0)]
        );
        Ok(())
    }

    #[test]
    fn test_rows_with_gaps_are_dropped_by_default() -> Result<(), Box<dyn std::error::Error>> {
        // 2023-01-02 has no temperature, 00:30 has no demand value.
        let generation = generation(json!({
            "data": [
                { "startTime": "2023-01-01T00:00:00", "data": [ { "psrType": "CCGT", "quantity": 100 } ] },
                { "startTime": "2023-01-01T00:30:00", "data": [ { "psrType": "CCGT", "quantity": 110 } ] },
                { "startTime": "2023-01-02T00:00:00", "data": [ { "psrType": "CCGT", "quantity": 120 } ] }
            ]
        }));
        let temperature = temperature(json!({
            "data": [ { "measurementDate": "2023-01-01", "temperature": 5, "temperatureReferenceAverage": 6 } ]
        }));
        let demand = demand(json!({
            "data": [
                { "startTime": "2023-01-01T00:00:00", "initialDemandOutturn": 30000 },
                { "startTime": "2023-01-01T00:30:00" },
                { "startTime": "2023-01-02T00:00:00", "initialDemandOutturn": 29000 }
            ]
        }));
        let tables = [generation, temperature, demand];

        let complete = DataAligner::default().merge(&tables)?;
        assert_eq!(complete.timestamps()?, vec![at(1, 0, 0)]);

        let with_gaps = DataAligner::preserving_gaps().merge(&tables)?;
        assert_eq!(
            with_gaps.timestamps()?,
            vec![at(1, 0, 0), at(1, 0, 30), at(2, 0, 0)]
        );
        assert_eq!(
            f64_values(&with_gaps.frame, TEMPERATURE),
            vec![Some(5.0), Some(5.0), None]
        );
        assert_eq!(
            f64_values(&with_gaps.frame, INITIAL_DEMAND_OUTTURN),
            vec![Some(30000.0), None, Some(29000.0)]
        );
        Ok(())
    }

    #[test]
    fn test_null_values_are_dropped_by_default() -> Result<(), Box<dyn std::error::Error>> {
        let generation = generation(json!({
            "data": [
                { "startTime": "2023-01-01T00:00:00", "data": [ { "psrType": "CCGT", "quantity": null } ] },
                { "startTime": "2023-01-01T00:30:00", "data": [ { "psrType": "CCGT", "quantity": 110 } ] },
                { "startTime": "2023-01-02T00:00:00", "data": [ { "psrType": "CCGT", "quantity": 120 } ] }
            ]
        }));
        let temperature = temperature(json!({
            "data": [
                { "measurementDate": "2023-01-01", "temperature": 5, "temperatureReferenceAverage": 6 },
                { "measurementDate": "2023-01-02", "temperature": null, "temperatureReferenceAverage": 6 }
            ]
        }));
        let demand = demand(json!({
            "data": [
                { "startTime": "2023-01-01T00:00:00", "initialDemandOutturn": 30000 },
                { "startTime": "2023-01-01T00:30:00", "initialDemandOutturn": 31000 },
                { "startTime": "2023-01-02T00:00:00", "initialDemandOutturn": 29000 }
            ]
        }));
        let tables = [generation, temperature, demand];

        let complete = DataAligner::default().merge(&tables)?;
        assert_eq!(complete.timestamps()?, vec![at(1, 0, 30)]);
        assert_eq!(f64_values(&complete.frame, QUANTITY), vec![Some(110.0)]);

        let with_gaps = DataAligner::preserving_gaps().merge(&tables)?;
        assert_eq!(
            f64_values(&with_gaps.frame, QUANTITY),
            vec![None, Some(110.0), Some(120.0)]
        );
        assert_eq!(
            f64_values(&with_gaps.frame, TEMPERATURE),
            vec![Some(5.0), Some(5.0), None]
        );
        Ok(())
    }

    #[test]
    fn test_outer_join_keeps_right_only_timestamps() -> Result<(), Box<dyn std::error::Error>> {
        let (generation, temperature) = single_day_sources();
        let demand = demand(json!({
            "data": [
                { "startTime": "2023-01-01T00:00:00", "initialDemandOutturn": 5000 },
                { "startTime": "2023-01-01T00:30:00", "initialDemandOutturn": 5100 }
            ]
        }));

        let consolidated =
            DataAligner::preserving_gaps().merge(&[generation, temperature, demand])?;
        assert_eq!(consolidated.timestamps()?, vec![at(1, 0, 0), at(1, 0, 30)]);
        let psr_types: Vec<Option<&str>> =
            consolidated.frame.column(PSR_TYPE)?.str()?.into_iter().collect();
        assert_eq!(psr_types, vec![Some("CCGT"), None]);
        Ok(())
    }

    #[test]
    fn test_left_join_by_date_with_itself_is_identity() -> Result<(), Box<dyn std::error::Error>> {
        let temperature = temperature(json!({
            "data": [
                { "measurementDate": "2023-01-01", "temperature": 5, "temperatureReferenceAverage": 6 },
                { "measurementDate": "2023-01-02", "temperature": 7, "temperatureReferenceAverage": 6.5 }
            ]
        }));
        let aligner = DataAligner::new(
            vec![AlignmentStep::new(KeyGranularity::Date, JoinPolicy::LeftWithGaps)],
            false,
        );

        let consolidated = aligner.merge(&[temperature.clone(), temperature.clone()])?;
        let original = consolidated
            .frame
            .select([TIMESTAMP, TEMPERATURE, TEMPERATURE_REFERENCE_AVERAGE])?;
        assert!(original.equals(&temperature));
        assert_eq!(
            f64_values(&consolidated.frame, "temperature_right"),
            f64_values(&temperature, TEMPERATURE)
        );
        Ok(())
    }

    #[test]
    fn test_wrong_table_count_is_rejected() {
        let (generation, temperature) = single_day_sources();
        let result = DataAligner::default().merge(&[generation, temperature]);
        assert!(matches!(
            result,
            Err(AlignmentError::TableCount { expected: 3, found: 2 })
        ));
    }

    #[test]
    fn test_missing_key_column_is_fatal() {
        let (generation, temperature) = single_day_sources();
        let keyless = df!(INITIAL_DEMAND_OUTTURN => [5000.0]).unwrap();
        let result = DataAligner::default().merge(&[generation, temperature, keyless]);
        assert!(matches!(
            result,
            Err(AlignmentError::MissingKeyColumn { table: 2, .. })
        ));
    }
}
