//! Column names shared by every normalized and consolidated frame.
//!
//! These mirror the field names used by the Elexon BMRS API so that a
//! consolidated table reads the same as the provider's own documentation.

/// The key column present in every frame.
pub const TIMESTAMP: &str = "timestamp";

pub const TEMPERATURE: &str = "temperature";
pub const TEMPERATURE_REFERENCE_AVERAGE: &str = "temperatureReferenceAverage";

pub const PSR_TYPE: &str = "psrType";
pub const QUANTITY: &str = "quantity";

pub const INITIAL_DEMAND_OUTTURN: &str = "initialDemandOutturn";
