//! CLI command implementations.
//!
//! Each command is implemented in its own module.
//! Commands orchestrate the various library components to perform user tasks.

pub mod ingest;
pub mod models;
pub mod report;
pub mod utils;

// Re-export main command functions
pub use ingest::execute_ingest;
pub use models::{IngestArgs, ReportArgs};
pub use report::{build_config, execute_report, rank_store, validate_args, RankOutcome};
pub use utils::{display_version, validate_dump_file, DumpStats};
