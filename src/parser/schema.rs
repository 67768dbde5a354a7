//! Sample record definitions.
//!
//! A dump maps `"caller==>callee"` keys to a bundle of metrics. These types
//! are the decoded form of one such entry.

use serde::{Deserialize, Serialize};

/// Metrics recorded for one call edge
///
/// Fields missing from the dump decode as zero; profilers run without
/// the CPU or memory flags simply leave them out. Memory figures are
/// deltas and can be negative.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MetricBundle {
    /// Call count
    pub ct: u64,

    /// Wall time in microseconds
    pub wt: i64,

    /// CPU time in microseconds
    pub cpu: i64,

    /// Memory used in bytes
    pub mu: i64,

    /// Peak memory used in bytes
    pub pmu: i64,
}

/// One profiled call edge within a single batch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SampleRecord {
    /// Function that was executing
    pub callee: String,

    /// Function that made the call (diagnostics only)
    pub caller: String,

    pub metrics: MetricBundle,
}

impl SampleRecord {
    pub fn new(caller: impl Into<String>, callee: impl Into<String>, metrics: MetricBundle) -> Self {
        Self {
            callee: callee.into(),
            caller: caller.into(),
            metrics,
        }
    }

    pub fn call_count(&self) -> u64 {
        self.metrics.ct
    }
}

/// One raw sample dump as handed over by a sample store
///
/// `contents` holds the raw bytes, undecoded. It is `None` when the dump
/// could not be read at all; such a batch is parsed as empty rather than
/// failing the report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchBlob {
    /// Where the dump came from (file path or label), for logs and errors
    pub origin: String,

    pub contents: Option<Vec<u8>>,
}

impl BatchBlob {
    pub fn new(origin: impl Into<String>, contents: impl Into<Vec<u8>>) -> Self {
        Self {
            origin: origin.into(),
            contents: Some(contents.into()),
        }
    }

    pub fn missing(origin: impl Into<String>) -> Self {
        Self {
            origin: origin.into(),
            contents: None,
        }
    }
}
