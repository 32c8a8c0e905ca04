//! Port traits the domain depends on.

pub mod data_port;
pub mod fundamentals_port;
pub mod config_port;
pub mod report_port;
