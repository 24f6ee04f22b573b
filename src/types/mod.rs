pub mod columns;
pub mod consolidated_frame;
pub mod endpoint;
pub mod records;
