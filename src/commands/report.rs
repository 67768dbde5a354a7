//! Report command implementation.
//!
//! The report command:
//! 1. Builds the exclusion config
//! 2. Reads every dump from the profiles directory
//! 3. Ranks functions across all dumps
//! 4. Prints the table and writes the optional JSON report

use super::models::ReportArgs;
use crate::aggregator::{score_blob, AggregatedEntry, CrossBatchAggregator};
use crate::output::{render_table, write_report, RankReport};
use crate::parser::EdgeFilter;
use crate::store::{DirectoryStore, SampleStore};
use crate::utils::config::{load_config, RankConfig};
use anyhow::{Context, Result};
use log::{debug, info, warn};
use std::time::Instant;

/// Outcome of ranking a store
#[derive(Debug, Clone)]
pub struct RankOutcome {
    /// Functions, ascending by score
    pub entries: Vec<AggregatedEntry>,

    /// Batches folded into the ranking
    pub batch_count: usize,

    /// Malformed batches that were skipped
    pub skipped: Vec<String>,
}

/// Execute the report command
///
/// **Public** - main entry point called from main.rs
///
/// # Errors
/// * Config file cannot be read or parsed
/// * Profiles directory cannot be listed
/// * A dump is malformed and `skip_malformed` is off
/// * JSON report cannot be written
pub fn execute_report(args: ReportArgs) -> Result<RankOutcome> {
    let start_time = Instant::now();

    info!("Step 1/4: Building exclusion config...");
    let config = build_config(&args)?;
    debug!("Excluded prefixes: {:?}", config.excluded_prefixes);

    info!(
        "Step 2/4: Reading dumps from {}...",
        args.profiles_dir.display()
    );
    let store = DirectoryStore::new(&args.profiles_dir);

    info!("Step 3/4: Ranking functions...");
    let outcome = rank_store(&store, &config, args.skip_malformed)?;

    info!("Step 4/4: Writing output...");
    if args.print_table {
        print!("{}", render_table(&outcome.entries));
    }

    if let Some(path) = &args.output_json {
        let report = RankReport::new(outcome.entries.clone(), outcome.batch_count, &config);
        write_report(&report, path).context("Failed to write JSON report")?;
        info!("✓ Report written to: {}", path.display());
    }

    let elapsed = start_time.elapsed();
    info!("Report completed in {:.2}s", elapsed.as_secs_f64());

    Ok(outcome)
}

/// Rank every batch a store holds
///
/// **Public** - usable with any `SampleStore`
///
/// A malformed batch fails the run unless `skip_malformed` is set, in
/// which case it is logged and left out entirely.
pub fn rank_store(
    store: &dyn SampleStore,
    config: &RankConfig,
    skip_malformed: bool,
) -> Result<RankOutcome> {
    let blobs = store.batches().context("Failed to read sample store")?;
    let filter = EdgeFilter::from_config(config);
    let mut aggregator = CrossBatchAggregator::new();
    let mut skipped = Vec::new();

    for blob in &blobs {
        match score_blob(blob, &filter) {
            Ok(scores) => aggregator.add_batch(&scores),
            Err(e) if skip_malformed => {
                warn!("Skipping malformed dump {}: {}", blob.origin, e);
                skipped.push(blob.origin.clone());
            }
            Err(e) => {
                return Err(e).context(format!("Failed to parse sample dump {}", blob.origin));
            }
        }
    }

    let batch_count = aggregator.batch_count();
    info!(
        "Ranked {} functions across {} dumps",
        aggregator.function_count(),
        batch_count
    );

    Ok(RankOutcome {
        entries: aggregator.finish(),
        batch_count,
        skipped,
    })
}

/// Merge config file, framework defaults and extra prefixes
pub fn build_config(args: &ReportArgs) -> Result<RankConfig> {
    let mut config = match &args.config_path {
        Some(path) => load_config(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => RankConfig::default(),
    };

    if args.framework_defaults {
        config = config.with_prefixes(RankConfig::framework_defaults().excluded_prefixes);
    }

    Ok(config.with_prefixes(args.exclude.iter().cloned()))
}

/// Validate report arguments
///
/// **Public** - can be called before execute_report for early validation
pub fn validate_args(args: &ReportArgs) -> Result<()> {
    if args.profiles_dir.as_os_str().is_empty() {
        anyhow::bail!("Profiles directory cannot be empty");
    }

    if args.exclude.iter().any(|prefix| prefix.is_empty()) {
        anyhow::bail!("Excluded prefixes cannot be empty (an empty prefix excludes everything)");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::BatchBlob;
    use crate::store::MemoryStore;
    use std::path::PathBuf;

    #[test]
    fn test_validate_args_valid() {
        let args = ReportArgs {
            exclude: vec!["Zend_".to_string()],
            ..Default::default()
        };
        assert!(validate_args(&args).is_ok());
    }

    #[test]
    fn test_validate_args_empty_dir() {
        let args = ReportArgs {
            profiles_dir: PathBuf::new(),
            ..Default::default()
        };
        assert!(validate_args(&args).is_err());
    }

    #[test]
    fn test_validate_args_empty_prefix() {
        let args = ReportArgs {
            exclude: vec![String::new()],
            ..Default::default()
        };
        assert!(validate_args(&args).is_err());
    }

    #[test]
    fn test_build_config_merges_sources() {
        let args = ReportArgs {
            exclude: vec!["Monolog\\".to_string(), "Zend_".to_string()],
            framework_defaults: true,
            ..Default::default()
        };

        let config = build_config(&args).unwrap();
        assert_eq!(
            config.excluded_prefixes,
            vec!["Zend_", "Composer\\", "PHPStan\\", "Monolog\\"]
        );
    }

    #[test]
    fn test_rank_store_skip_malformed() {
        let store = MemoryStore::new(vec![
            BatchBlob::new("good.json", r#"{"main()==>f": {"ct": 1, "wt": 5}}"#),
            BatchBlob::new("bad.json", "not json"),
        ]);

        let outcome = rank_store(&store, &RankConfig::default(), true).unwrap();
        assert_eq!(outcome.entries.len(), 1);
        assert_eq!(outcome.batch_count, 1);
        assert_eq!(outcome.skipped, vec!["bad.json"]);

        let err = rank_store(&store, &RankConfig::default(), false).unwrap_err();
        assert!(err.to_string().contains("bad.json"));
    }
}
