//! Engine entry points: raw batches in, ranked functions out.

use super::combine::{combine_rankings, BatchScores};
use super::cross_batch::{AggregatedEntry, CrossBatchAggregator};
use super::rank::BatchRankings;
use crate::parser::filter::EdgeFilter;
use crate::parser::sample::parse_blob;
use crate::parser::schema::{BatchBlob, SampleRecord};
use crate::utils::config::RankConfig;
use crate::utils::error::ParseError;
use log::{debug, info};

/// Rank and score one batch of already filtered records
pub fn score_records(records: &[SampleRecord]) -> BatchScores {
    let rankings = BatchRankings::compute(records);
    combine_rankings(records, &rankings)
}

/// Parse, filter and score one raw batch
///
/// # Errors
/// * `ParseError` - the dump is malformed; a missing dump scores as empty
pub fn score_blob(blob: &BatchBlob, filter: &EdgeFilter) -> Result<BatchScores, ParseError> {
    let records = parse_blob(blob)?;
    let parsed = records.len();
    let records = filter.apply(records);

    debug!(
        "Batch {}: {} records, {} after exclusions",
        blob.origin,
        parsed,
        records.len()
    );

    Ok(score_records(&records))
}

/// Rank functions across every batch
///
/// **Public** - main entry point of the engine
///
/// The result is ordered ascending by averaged score. The first malformed
/// batch aborts the run; callers that prefer to skip such batches can
/// drive `score_blob` and `CrossBatchAggregator` themselves.
pub fn rank_blobs(
    blobs: &[BatchBlob],
    config: &RankConfig,
) -> Result<Vec<AggregatedEntry>, ParseError> {
    let filter = EdgeFilter::from_config(config);
    let mut aggregator = CrossBatchAggregator::new();

    for blob in blobs {
        let scores = score_blob(blob, &filter)?;
        aggregator.add_batch(&scores);
    }

    info!(
        "Ranked {} functions across {} batches",
        aggregator.function_count(),
        aggregator.batch_count()
    );

    Ok(aggregator.finish())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn blob(value: serde_json::Value) -> BatchBlob {
        BatchBlob::new("test.json", value.to_string())
    }

    #[test]
    fn test_end_to_end_single_batch() {
        let blobs = vec![blob(json!({
            "a==>f": {"ct": 2, "wt": 100, "cpu": 50, "mu": 10, "pmu": 10},
            "a==>g": {"ct": 1, "wt": 50, "cpu": 100, "mu": 5, "pmu": 5}
        }))];

        let entries = rank_blobs(&blobs, &RankConfig::default()).unwrap();

        assert_eq!(entries.len(), 2);
        assert_eq!((entries[0].name.as_str(), entries[0].score), ("g", 5));
        assert_eq!((entries[1].name.as_str(), entries[1].score), ("f", 14));
        assert!(entries.iter().all(|e| e.occurrences == 1));
    }

    #[test]
    fn test_malformed_batch_aborts() {
        let blobs = vec![
            blob(json!({"a==>f": {"ct": 1}})),
            BatchBlob::new("broken.json", "{"),
        ];
        assert!(rank_blobs(&blobs, &RankConfig::default()).is_err());
    }

    #[test]
    fn test_missing_batch_counts_as_empty() {
        let blobs = vec![
            blob(json!({"a==>f": {"ct": 1, "wt": 1}})),
            BatchBlob::missing("gone.json"),
        ];
        let entries = rank_blobs(&blobs, &RankConfig::default()).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].occurrences, 1);
    }
}
