use crate::parser::{decode_dump, parse_entries, EdgeFilter};
use crate::utils::config::{RankConfig, REPORT_SCHEMA_VERSION};
use anyhow::{Context, Result};
use std::path::Path;

/// Counts gathered while validating one dump
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DumpStats {
    /// Top-level keys in the dump
    pub raw_entries: usize,

    /// Keys that are caller/callee pairs
    pub records: usize,

    /// Records left after exclusions
    pub admitted: usize,
}

/// Validate a sample dump file and print what it contains
pub fn validate_dump_file(file_path: &Path, config: &RankConfig) -> Result<DumpStats> {
    println!("Validating dump: {}", file_path.display());

    let raw = std::fs::read(file_path)
        .with_context(|| format!("Failed to read {}", file_path.display()))?;
    let entries = decode_dump(&raw)?;
    let records = parse_entries(&entries)?;
    let records_len = records.len();
    let admitted = EdgeFilter::from_config(config).apply(records).len();

    let stats = DumpStats {
        raw_entries: entries.len(),
        records: records_len,
        admitted,
    };

    println!("✓ Valid sample dump");
    println!("  Entries: {}", stats.raw_entries);
    println!("  Call edges: {}", stats.records);
    println!("  After exclusions: {}", stats.admitted);

    Ok(stats)
}

/// Display version information
pub fn display_version() {
    println!("XHProf Rank v{}", env!("CARGO_PKG_VERSION"));
    println!("Report Schema: v{}", REPORT_SCHEMA_VERSION);
    println!();
    println!("Ranks hot functions across XHProf sample dumps.");
}
