//! Presentation of ranked results.
//!
//! This module handles:
//! - Console tables for the terminal
//! - JSON reports written to disk

pub mod json;
pub mod table;

// Re-export main functions
pub use json::{read_report, validate_path, write_report, RankReport};
pub use table::render_table;
