//! Merge per-batch scores into one averaged ranking across runs.

use super::combine::BatchScores;
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Final output unit: one function's averaged score across batches
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregatedEntry {
    /// Function name
    pub name: String,

    /// Mean combined score over the batches the function appeared in
    pub score: u64,

    /// Number of batches the function appeared in
    pub occurrences: u32,
}

#[derive(Debug, Clone)]
struct Tally {
    name: String,
    sum: u64,
    occurrences: u32,
}

/// Running sums and occurrence counts per function
///
/// **Public** - feed it one `BatchScores` per batch, then `finish`
#[derive(Debug, Clone, Default)]
pub struct CrossBatchAggregator {
    tallies: Vec<Tally>,
    index: HashMap<String, usize>,
    batch_count: usize,
}

impl CrossBatchAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one batch into the running totals
    ///
    /// Names are visited in ascending score order, which fixes the
    /// insertion order that equal final scores fall back to.
    pub fn add_batch(&mut self, batch: &BatchScores) {
        for (name, score) in batch.sorted_ascending() {
            match self.index.get(name) {
                Some(&position) => {
                    let tally = &mut self.tallies[position];
                    tally.sum = tally.sum.saturating_add(score);
                    tally.occurrences += 1;
                }
                None => {
                    self.index.insert(name.to_string(), self.tallies.len());
                    self.tallies.push(Tally {
                        name: name.to_string(),
                        sum: score,
                        occurrences: 1,
                    });
                }
            }
        }

        self.batch_count += 1;
        debug!(
            "Aggregated batch {} ({} functions, {} distinct so far)",
            self.batch_count,
            batch.len(),
            self.tallies.len()
        );
    }

    /// Number of batches folded in so far, empty ones included
    pub fn batch_count(&self) -> usize {
        self.batch_count
    }

    /// Number of distinct functions seen so far
    pub fn function_count(&self) -> usize {
        self.tallies.len()
    }

    /// Average the totals and sort ascending by score
    ///
    /// The sort is stable, so equal scores keep first-seen order.
    pub fn finish(self) -> Vec<AggregatedEntry> {
        let mut entries: Vec<AggregatedEntry> = self
            .tallies
            .into_iter()
            .map(|tally| AggregatedEntry {
                score: average_score(tally.sum, tally.occurrences),
                name: tally.name,
                occurrences: tally.occurrences,
            })
            .collect();

        sort_entries(&mut entries);
        entries
    }
}

/// Mean of `sum` over `occurrences`, rounded half away from zero
pub fn average_score(sum: u64, occurrences: u32) -> u64 {
    let occurrences = occurrences.max(1);
    (sum as f64 / f64::from(occurrences)).round() as u64
}

/// Stable ascending sort by score
pub fn sort_entries(entries: &mut [AggregatedEntry]) {
    entries.sort_by_key(|entry| entry.score);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn batch(scores: &[(&str, u64)]) -> BatchScores {
        let mut batch = BatchScores::new(scores.len());
        for (name, score) in scores {
            batch.insert(name, *score);
        }
        batch
    }

    #[test]
    fn test_average_rounds_half_away_from_zero() {
        assert_eq!(average_score(5, 2), 3);
        assert_eq!(average_score(7, 3), 2);
        assert_eq!(average_score(8, 3), 3);
        assert_eq!(average_score(0, 1), 0);
    }

    #[test]
    fn test_occurrences_count_batches() {
        let mut aggregator = CrossBatchAggregator::new();
        aggregator.add_batch(&batch(&[("f", 10), ("g", 4)]));
        aggregator.add_batch(&batch(&[("f", 20)]));
        aggregator.add_batch(&batch(&[]));

        let entries = aggregator.finish();

        assert_eq!(
            entries,
            vec![
                AggregatedEntry {
                    name: "g".to_string(),
                    score: 4,
                    occurrences: 1
                },
                AggregatedEntry {
                    name: "f".to_string(),
                    score: 15,
                    occurrences: 2
                },
            ]
        );
    }

    #[test]
    fn test_equal_scores_keep_first_seen_order() {
        let mut aggregator = CrossBatchAggregator::new();
        aggregator.add_batch(&batch(&[("b", 9), ("a", 3)]));
        aggregator.add_batch(&batch(&[("c", 3)]));

        let names: Vec<_> = aggregator.finish().into_iter().map(|e| e.name).collect();
        assert_eq!(names, vec!["a", "c", "b"]);
    }

    #[test]
    fn test_counts() {
        let mut aggregator = CrossBatchAggregator::new();
        aggregator.add_batch(&batch(&[("f", 1)]));
        aggregator.add_batch(&batch(&[("f", 1), ("g", 2)]));
        assert_eq!(aggregator.batch_count(), 2);
        assert_eq!(aggregator.function_count(), 2);
    }
}
