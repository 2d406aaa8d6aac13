//! Data, roster and configuration tests.

pub mod config_test;
pub mod data_source_test;
pub mod roster_test;
