//! Exclusion of framework and tooling namespaces.

use super::schema::SampleRecord;
use crate::utils::config::RankConfig;

/// Prefix-based admission check for sample records
///
/// **Public** - built once per report from `RankConfig`
#[derive(Debug, Clone, Default)]
pub struct EdgeFilter {
    excluded_prefixes: Vec<String>,
}

impl EdgeFilter {
    pub fn new(excluded_prefixes: Vec<String>) -> Self {
        Self { excluded_prefixes }
    }

    pub fn from_config(config: &RankConfig) -> Self {
        Self::new(config.excluded_prefixes.clone())
    }

    /// True if the name starts with any excluded prefix (case-sensitive)
    pub fn is_excluded(&self, name: &str) -> bool {
        self.excluded_prefixes
            .iter()
            .any(|prefix| name.starts_with(prefix.as_str()))
    }

    pub fn admits(&self, record: &SampleRecord) -> bool {
        !self.is_excluded(&record.callee)
    }

    /// Keep only admitted records, preserving order
    pub fn apply(&self, records: Vec<SampleRecord>) -> Vec<SampleRecord> {
        records.into_iter().filter(|r| self.admits(r)).collect()
    }
}
