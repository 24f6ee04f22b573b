//! Describes how two normalized frames are joined on `timestamp`.

use polars::prelude::{DataType, JoinType, TimeUnit};

/// Which rows survive a pairwise join.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JoinPolicy {
    /// Only timestamps present on both sides.
    Inner,
    /// Every left row; right-hand columns are null where nothing matched.
    LeftWithGaps,
    /// The union of timestamps from both sides, nulls where a side is missing.
    OuterWithGaps,
}

impl JoinPolicy {
    pub(crate) fn join_type(&self) -> JoinType {
        match self {
            JoinPolicy::Inner => JoinType::Inner,
            JoinPolicy::LeftWithGaps => JoinType::Left,
            JoinPolicy::OuterWithGaps => JoinType::Full,
        }
    }
}

/// The resolution at which two timestamps are considered equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyGranularity {
    /// Calendar date. A half-hourly row matches the daily row of its date.
    Date,
    /// Exact date-time equality.
    Exact,
}

impl KeyGranularity {
    pub(crate) fn key_dtype(&self) -> DataType {
        match self {
            KeyGranularity::Date => DataType::Date,
            KeyGranularity::Exact => DataType::Datetime(TimeUnit::Milliseconds, None),
        }
    }
}

/// One pairwise join of the running result (left) with the next frame (right).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AlignmentStep {
    pub granularity: KeyGranularity,
    pub policy: JoinPolicy,
}

impl AlignmentStep {
    pub fn new(granularity: KeyGranularity, policy: JoinPolicy) -> Self {
        Self {
            granularity,
            policy,
        }
    }
}
