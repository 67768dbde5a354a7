//! Per-metric competition ranking over one batch.
//!
//! Records are sorted by the selected metric (descending) and ranked so
//! that ties share a rank and the next distinct value skips ahead by the
//! size of the tied run: values 9, 9, 7, 5 rank 1, 1, 3, 4.

use crate::parser::schema::{MetricBundle, SampleRecord};
use log::debug;
use std::collections::HashMap;
use std::fmt;

/// The metrics a batch is ranked on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Metric {
    WallTime,
    CpuTime,
    Memory,
    PeakMemory,
}

impl Metric {
    /// All ranked metrics, in the order they are combined
    pub const ALL: [Metric; 4] = [
        Metric::WallTime,
        Metric::CpuTime,
        Metric::Memory,
        Metric::PeakMemory,
    ];

    /// Read this metric out of a bundle
    pub fn value(self, metrics: &MetricBundle) -> i64 {
        match self {
            Metric::WallTime => metrics.wt,
            Metric::CpuTime => metrics.cpu,
            Metric::Memory => metrics.mu,
            Metric::PeakMemory => metrics.pmu,
        }
    }

    /// Short name as used in dump files
    pub fn label(self) -> &'static str {
        match self {
            Metric::WallTime => "wt",
            Metric::CpuTime => "cpu",
            Metric::Memory => "mu",
            Metric::PeakMemory => "pmu",
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Function name to rank for one metric in one batch (1 = highest value)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RankTable {
    ranks: HashMap<String, u64>,
}

impl RankTable {
    /// Rank of `name`, or 0 if the name was not ranked
    pub fn rank_of(&self, name: &str) -> u64 {
        self.ranks.get(name).copied().unwrap_or(0)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.ranks.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.ranks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranks.is_empty()
    }
}

/// Rank records by one metric
///
/// **Public** - main entry point for ranking
///
/// A callee that appears on several records keeps the rank of the one
/// sorted last, i.e. its largest rank.
pub fn rank_by_metric(records: &[SampleRecord], metric: Metric) -> RankTable {
    let mut sorted: Vec<&SampleRecord> = records.iter().collect();
    sorted.sort_by(|a, b| metric.value(&b.metrics).cmp(&metric.value(&a.metrics)));

    let mut ranks = HashMap::with_capacity(sorted.len());
    let mut current_rank: u64 = 1;
    let mut run_length: u64 = 0;
    let mut previous: Option<i64> = None;

    for record in sorted {
        let value = metric.value(&record.metrics);

        match previous {
            Some(prev) if prev != value => {
                current_rank += run_length;
                run_length = 1;
            }
            _ => run_length += 1,
        }

        previous = Some(value);
        ranks.insert(record.callee.clone(), current_rank);
    }

    debug!("Ranked {} functions by {}", ranks.len(), metric);

    RankTable { ranks }
}

/// The four rank tables of one batch
#[derive(Debug, Clone, Default)]
pub struct BatchRankings {
    tables: [RankTable; 4],
}

impl BatchRankings {
    /// Rank the batch on every metric
    pub fn compute(records: &[SampleRecord]) -> Self {
        Self {
            tables: Metric::ALL.map(|metric| rank_by_metric(records, metric)),
        }
    }

    pub fn table(&self, metric: Metric) -> &RankTable {
        let index = match metric {
            Metric::WallTime => 0,
            Metric::CpuTime => 1,
            Metric::Memory => 2,
            Metric::PeakMemory => 3,
        };
        &self.tables[index]
    }

    /// Ranks of `name` in metric order (0 where absent)
    pub fn ranks_of(&self, name: &str) -> [u64; 4] {
        Metric::ALL.map(|metric| self.table(metric).rank_of(name))
    }
}
