use crate::utils::config::DEFAULT_PROFILES_DIR;
use std::path::PathBuf;

/// Arguments for the report command
///
/// **Public** - used by main.rs to construct from CLI args
#[derive(Debug, Clone)]
pub struct ReportArgs {
    /// Directory holding sample dumps
    pub profiles_dir: PathBuf,

    /// Optional TOML config with excluded prefixes
    pub config_path: Option<PathBuf>,

    /// Extra prefixes to exclude
    pub exclude: Vec<String>,

    /// Also exclude the framework namespaces
    pub framework_defaults: bool,

    /// Output path for a JSON report (optional)
    pub output_json: Option<PathBuf>,

    /// Skip malformed dumps instead of failing
    pub skip_malformed: bool,

    /// Print the table to stdout
    pub print_table: bool,
}

impl Default for ReportArgs {
    fn default() -> Self {
        Self {
            profiles_dir: PathBuf::from(DEFAULT_PROFILES_DIR),
            config_path: None,
            exclude: Vec::new(),
            framework_defaults: false,
            output_json: None,
            skip_malformed: false,
            print_table: true,
        }
    }
}

/// Arguments for the ingest command
#[derive(Debug, Clone)]
pub struct IngestArgs {
    /// Dump file to copy into the store
    pub file: PathBuf,

    /// Directory holding sample dumps
    pub profiles_dir: PathBuf,
}
