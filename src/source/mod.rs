pub mod error;
pub mod http_data_source;
