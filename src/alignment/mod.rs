pub mod data_aligner;
pub mod error;
pub mod join_policy;
