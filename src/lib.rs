//! XHProf Rank
//!
//! Aggregates XHProf sample dumps from many profiling runs and ranks
//! functions by how consistently they lead on wall time, CPU time,
//! memory and peak memory, weighted by how often they are called.
//!
//! ## Getting Started
//!
//! Most users should install and use the CLI:
//!
//! ```bash
//! cargo install xhprof-rank
//! xhprof-rank report --dir ./profiles
//! ```
//!
//! The engine itself is a pure function of the dumps:
//!
//! ```ignore
//! use xhprof_rank::aggregator::rank_blobs;
//! use xhprof_rank::store::{DirectoryStore, SampleStore};
//! use xhprof_rank::utils::config::RankConfig;
//!
//! let blobs = DirectoryStore::new("profiles").batches()?;
//! let ranked = rank_blobs(&blobs, &RankConfig::framework_defaults())?;
//! ```

pub mod aggregator;
pub mod commands;
pub mod output;
pub mod parser;
pub mod store;
pub mod utils;
