//! Ranking and aggregation of sample batches.
//!
//! This module turns parsed batches into:
//! - Per-metric competition rankings (wall time, CPU, memory, peak memory)
//! - A combined, call-count weighted score per function and batch
//! - Averaged scores across batches, sorted ascending

pub mod combine;
pub mod cross_batch;
pub mod engine;
pub mod rank;

// Re-export main types and functions
pub use combine::{combine_rankings, reversed_rank_sum, BatchScores};
pub use cross_batch::{average_score, sort_entries, AggregatedEntry, CrossBatchAggregator};
pub use engine::{rank_blobs, score_blob, score_records};
pub use rank::{rank_by_metric, BatchRankings, Metric, RankTable};
