//! Headless TUI tests, run against the built binary.

mod common;
mod headless_test;
mod records_test;
mod suggestion_test;
