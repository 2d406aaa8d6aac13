//! TUI widgets for bbviz.
//!
//! Contains reusable UI components.

pub mod details;
pub mod form_field;
pub mod header;
pub mod heatmap;
pub mod records;
pub mod scatter;
pub mod spray;
pub mod suggestions;
pub mod toast;
