//! bbviz - a terminal dashboard for exploring batted-ball events.
//!
//! This library exposes the core modules for use in integration tests.

pub mod cli;
pub mod config;
pub mod data;
pub mod error;
pub mod logging;
pub mod roster;
pub mod suggest;
pub mod tui;
