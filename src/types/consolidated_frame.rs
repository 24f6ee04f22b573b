//! Contains the `ConsolidatedFrame`, the aligned result of the temperature,
//! generation and demand frames.

use crate::types::columns::TIMESTAMP;
use chrono::{DateTime, NaiveDateTime};
use polars::prelude::*;
use std::fmt;

/// A wrapper around the consolidated Polars `DataFrame`, indexed by `timestamp`.
///
/// The `timestamp` column is always the first column and the frame is sorted
/// by it. Every other column comes from one of the normalized source frames
/// (`psrType`, `quantity`, `temperature`, `temperatureReferenceAverage`,
/// `initialDemandOutturn` with the default aligner).
///
/// Instances are produced by [`crate::DataAligner::merge`] and returned from
/// [`crate::Elexon::consolidated`].
#[derive(Debug, Clone)]
pub struct ConsolidatedFrame {
    /// The underlying Polars DataFrame.
    pub frame: DataFrame,
}

impl ConsolidatedFrame {
    pub fn new(frame: DataFrame) -> Self {
        Self { frame }
    }

    /// Number of rows in the consolidated table.
    pub fn height(&self) -> usize {
        self.frame.height()
    }

    pub fn is_empty(&self) -> bool {
        self.frame.height() == 0
    }

    /// Returns the `timestamp` index as naive UTC date-times, in row order.
    ///
    /// Date-only indexes (e.g. a temperature frame aligned with itself) are
    /// returned at midnight.
    ///
    /// # Errors
    ///
    /// Returns a [`PolarsError`] if the `timestamp` column is missing, cannot
    /// be cast to a datetime, or contains nulls.
    pub fn timestamps(&self) -> PolarsResult<Vec<NaiveDateTime>> {
        read_timestamps(&self.frame)
    }

    /// Filters the consolidated rows with an arbitrary Polars predicate.
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use elexon::ConsolidatedFrame;
    /// use polars::prelude::{col, lit};
    ///
    /// # fn run(consolidated: ConsolidatedFrame) -> Result<(), Box<dyn std::error::Error>> {
    /// let wind = consolidated.filter(col("psrType").eq(lit("Wind Onshore")))?;
    /// println!("{}", wind);
    /// # Ok(())
    /// # }
    /// ```
    pub fn filter(&self, predicate: Expr) -> PolarsResult<ConsolidatedFrame> {
        let frame = self.frame.clone().lazy().filter(predicate).collect()?;
        Ok(ConsolidatedFrame::new(frame))
    }

    /// Looks up all rows at exactly `timestamp`.
    ///
    /// With generation data there is one row per PSR type, so this can return
    /// more than one row.
    pub fn get_at(&self, timestamp: NaiveDateTime) -> PolarsResult<ConsolidatedFrame> {
        self.filter(timestamp_col().eq(lit(timestamp)))
    }

    /// Returns the rows with `start <= timestamp <= end`.
    pub fn get_range(
        &self,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> PolarsResult<ConsolidatedFrame> {
        self.filter(
            timestamp_col()
                .gt_eq(lit(start))
                .and(timestamp_col().lt_eq(lit(end))),
        )
    }
}

/// Reads the `timestamp` column of any frame as naive date-times.
pub(crate) fn read_timestamps(frame: &DataFrame) -> PolarsResult<Vec<NaiveDateTime>> {
    let millis = frame
        .column(TIMESTAMP)?
        .cast(&DataType::Datetime(TimeUnit::Milliseconds, None))?
        .cast(&DataType::Int64)?;
    millis
        .i64()?
        .into_iter()
        .map(|value| {
            value
                .and_then(DateTime::from_timestamp_millis)
                .map(|dt| dt.naive_utc())
                .ok_or_else(|| PolarsError::ComputeError("null or out of range timestamp".into()))
        })
        .collect()
}

fn timestamp_col() -> Expr {
    col(TIMESTAMP).cast(DataType::Datetime(TimeUnit::Milliseconds, None))
}

impl fmt::Display for ConsolidatedFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.frame)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(day: u32, hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2023, 1, day)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap()
    }

    fn sample() -> ConsolidatedFrame {
        let frame = df!(
            TIMESTAMP => [at(1, 0), at(1, 0), at(1, 12), at(2, 0)],
            "psrType" => ["CCGT", "Nuclear", "CCGT", "CCGT"],
            "quantity" => [100.0, 50.0, 120.0, 90.0],
        )
        .unwrap();
        ConsolidatedFrame::new(frame)
    }

    #[test]
    fn test_timestamps_in_row_order() -> Result<(), PolarsError> {
        let consolidated = sample();
        assert_eq!(
            consolidated.timestamps()?,
            vec![at(1, 0), at(1, 0), at(1, 12), at(2, 0)]
        );
        Ok(())
    }

    #[test]
    fn test_get_at_returns_every_row_for_timestamp() -> Result<(), PolarsError> {
        let consolidated = sample();
        let rows = consolidated.get_at(at(1, 0))?;
        assert_eq!(rows.height(), 2);

        let missing = consolidated.get_at(at(3, 0))?;
        assert!(missing.is_empty());
        Ok(())
    }

    #[test]
    fn test_get_range_is_inclusive() -> Result<(), PolarsError> {
        let consolidated = sample();
        let rows = consolidated.get_range(at(1, 12), at(2, 0))?;
        assert_eq!(rows.timestamps()?, vec![at(1, 12), at(2, 0)]);
        Ok(())
    }

    #[test]
    fn test_date_index_reads_as_midnight() -> Result<(), PolarsError> {
        let day = NaiveDate::from_ymd_opt(2023, 1, 1).unwrap();
        let frame = df!(TIMESTAMP => [day], "temperature" => [20.0])?;
        let consolidated = ConsolidatedFrame::new(frame);
        assert_eq!(consolidated.timestamps()?, vec![at(1, 0)]);
        Ok(())
    }
}
