//! Sample dump parsing and filtering.
//!
//! This module handles:
//! - Decoding raw sample dumps into call-edge records
//! - Dropping keys that are not caller/callee pairs
//! - Excluding records from ignored namespaces

pub mod filter;
pub mod sample;
pub mod schema;

// Re-export main types
pub use filter::EdgeFilter;
pub use sample::{decode_dump, parse_batch, parse_blob, parse_entries, split_call_edge};
pub use schema::{BatchBlob, MetricBundle, SampleRecord};
