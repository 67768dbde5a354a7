//! Configuration and constants for the ranking engine and CLI.

use crate::utils::error::ConfigError;
use log::debug;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Current JSON report schema version
pub const REPORT_SCHEMA_VERSION: &str = "1.0.0";

/// Separator between caller and callee in a dump key ("main()==>foo")
pub const DUMP_SEPARATOR: &str = "==>";

/// File name suffix used for stored sample dumps
pub const DUMP_FILE_SUFFIX: &str = ".application.json";

/// Directory profiles are read from when nothing else is configured
pub const DEFAULT_PROFILES_DIR: &str = "/var/www/html/profiles/";

/// Environment variable that overrides the profiles directory
pub const PROFILES_DIR_ENV: &str = "XHPROF_RANK_DIR";

// Framework and tooling namespaces that are usually noise in a PHP report
pub const FRAMEWORK_PREFIXES: &[&str] = &["Zend_", "Composer\\", "PHPStan\\"];

/// Engine configuration
///
/// **Public** - passed explicitly into the engine entry point
///
/// The default excludes nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RankConfig {
    /// Callee name prefixes dropped before ranking (case-sensitive)
    pub excluded_prefixes: Vec<String>,
}

impl RankConfig {
    /// Config with the framework namespaces excluded
    pub fn framework_defaults() -> Self {
        Self::default().with_prefixes(FRAMEWORK_PREFIXES.iter().copied())
    }

    /// Append prefixes, keeping order and skipping ones already present
    pub fn with_prefixes<I, S>(mut self, prefixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for prefix in prefixes {
            let prefix = prefix.into();
            if !self.excluded_prefixes.contains(&prefix) {
                self.excluded_prefixes.push(prefix);
            }
        }
        self
    }
}

/// Load engine configuration from a TOML file
///
/// # Example
/// ```toml
/// excluded_prefixes = ["Zend_", "Composer\\"]
/// ```
///
/// # Errors
/// * `ConfigError::Io` - file cannot be read
/// * `ConfigError::Toml` - file is not valid TOML for `RankConfig`
pub fn load_config(path: impl AsRef<Path>) -> Result<RankConfig, ConfigError> {
    let path = path.as_ref();
    debug!("Loading config from: {}", path.display());

    let contents = std::fs::read_to_string(path)?;
    let config: RankConfig = toml::from_str(&contents)?;

    debug!("Loaded {} excluded prefixes", config.excluded_prefixes.len());
    Ok(config)
}
