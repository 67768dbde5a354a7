//! Fuse the per-metric rankings of one batch into a single score.
//!
//! Each rank is reversed (`N + 1 - rank`) so the metric leader contributes
//! the most, the four reversed ranks are summed, and the sum is weighted
//! by call count.

use super::rank::BatchRankings;
use crate::parser::schema::SampleRecord;
use log::debug;
use std::collections::HashMap;

/// Combined scores of one batch, in insertion order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchScores {
    record_count: usize,
    scores: Vec<(String, u64)>,
    index: HashMap<String, usize>,
}

impl BatchScores {
    pub fn new(record_count: usize) -> Self {
        Self {
            record_count,
            ..Default::default()
        }
    }

    /// Set the score for `name`
    ///
    /// A repeated name takes the new score but keeps its original position.
    pub fn insert(&mut self, name: &str, score: u64) {
        match self.index.get(name) {
            Some(&position) => self.scores[position].1 = score,
            None => {
                self.index.insert(name.to_string(), self.scores.len());
                self.scores.push((name.to_string(), score));
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<u64> {
        self.index.get(name).map(|&position| self.scores[position].1)
    }

    /// Number of filtered records the batch was ranked over (`N`)
    pub fn record_count(&self) -> usize {
        self.record_count
    }

    /// Number of distinct names scored
    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.scores.iter().map(|(name, score)| (name.as_str(), *score))
    }

    /// Scores ordered ascending, equal scores in insertion order
    pub fn sorted_ascending(&self) -> Vec<(&str, u64)> {
        let mut sorted: Vec<(&str, u64)> = self.iter().collect();
        sorted.sort_by_key(|&(_, score)| score);
        sorted
    }
}

/// Sum of reversed ranks for a batch of `record_count` records
///
/// A rank of 0 (name not ranked) reverses to `N + 1`.
pub fn reversed_rank_sum(ranks: &[u64; 4], record_count: usize) -> u64 {
    let base = record_count as u64 + 1;
    ranks.iter().map(|rank| base.saturating_sub(*rank)).sum()
}

/// Combine the batch's rank tables and call counts into scores
///
/// **Public** - main entry point for rank fusion
///
/// `records` must be the same filtered records `rankings` was computed
/// from; their count is the batch size `N`.
pub fn combine_rankings(records: &[SampleRecord], rankings: &BatchRankings) -> BatchScores {
    let mut scores = BatchScores::new(records.len());

    for record in records {
        let reversed = reversed_rank_sum(&rankings.ranks_of(&record.callee), records.len());
        scores.insert(&record.callee, reversed.saturating_mul(record.call_count()));
    }

    debug!(
        "Combined scores for {} functions over {} records",
        scores.len(),
        scores.record_count()
    );

    scores
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::schema::MetricBundle;

    fn record(name: &str, ct: u64, wt: i64, cpu: i64, mu: i64, pmu: i64) -> SampleRecord {
        SampleRecord::new("main()", name, MetricBundle { ct, wt, cpu, mu, pmu })
    }

    #[test]
    fn test_reversed_rank_sum_bounds() {
        assert_eq!(reversed_rank_sum(&[1, 1, 1, 1], 5), 20);
        assert_eq!(reversed_rank_sum(&[5, 5, 5, 5], 5), 4);
        assert_eq!(reversed_rank_sum(&[0, 0, 0, 0], 5), 24);
    }

    #[test]
    fn test_combine_two_functions() {
        let records = vec![
            record("f", 2, 100, 50, 10, 10),
            record("g", 1, 50, 100, 5, 5),
        ];
        let rankings = BatchRankings::compute(&records);

        let scores = combine_rankings(&records, &rankings);

        assert_eq!(scores.record_count(), 2);
        assert_eq!(scores.get("f"), Some(14));
        assert_eq!(scores.get("g"), Some(5));
    }

    #[test]
    fn test_zero_call_count_scores_zero() {
        let records = vec![record("f", 0, 100, 100, 100, 100), record("g", 1, 1, 1, 1, 1)];
        let scores = combine_rankings(&records, &BatchRankings::compute(&records));
        assert_eq!(scores.get("f"), Some(0));
        assert_eq!(scores.get("g"), Some(4));
    }

    #[test]
    fn test_duplicate_name_last_record_wins_first_position() {
        let mut scores = BatchScores::new(3);
        scores.insert("f", 10);
        scores.insert("g", 3);
        scores.insert("f", 7);

        let collected: Vec<_> = scores.iter().collect();
        assert_eq!(collected, vec![("f", 7), ("g", 3)]);
    }

    #[test]
    fn test_sorted_ascending_is_stable() {
        let mut scores = BatchScores::new(3);
        scores.insert("b", 5);
        scores.insert("a", 1);
        scores.insert("c", 5);

        assert_eq!(scores.sorted_ascending(), vec![("a", 1), ("b", 5), ("c", 5)]);
    }

    #[test]
    fn test_empty_batch() {
        let scores = combine_rankings(&[], &BatchRankings::compute(&[]));
        assert!(scores.is_empty());
        assert_eq!(scores.record_count(), 0);
    }
}
