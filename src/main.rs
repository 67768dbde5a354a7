//! XHProf Rank CLI
//!
//! Ranks hot functions across XHProf sample dumps.

use anyhow::Result;
use clap::{Parser, Subcommand};
use env_logger::Env;
use std::path::PathBuf;

use xhprof_rank::commands::{
    build_config, display_version, execute_ingest, execute_report, validate_args,
    validate_dump_file, IngestArgs, ReportArgs,
};
use xhprof_rank::utils::config::{DEFAULT_PROFILES_DIR, PROFILES_DIR_ENV};

/// XHProf Rank - hot function ranking across profiling runs
#[derive(Parser, Debug)]
#[command(name = "xhprof-rank")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Rank functions across all dumps in a directory
    Report {
        /// Directory holding sample dumps
        #[arg(short, long, env = PROFILES_DIR_ENV, default_value = DEFAULT_PROFILES_DIR)]
        dir: PathBuf,

        /// TOML file with excluded_prefixes
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Exclude functions starting with this prefix (repeatable)
        #[arg(short, long)]
        exclude: Vec<String>,

        /// Also exclude Zend_, Composer\ and PHPStan\ namespaces
        #[arg(long)]
        framework_defaults: bool,

        /// Output path for a JSON report (optional)
        #[arg(short, long)]
        json: Option<PathBuf>,

        /// Skip malformed dumps instead of failing the report
        #[arg(long)]
        skip_malformed: bool,
    },

    /// Copy a dump into the profiles directory
    Ingest {
        /// Dump file to store
        #[arg(short, long)]
        file: PathBuf,

        /// Directory holding sample dumps
        #[arg(short, long, env = PROFILES_DIR_ENV, default_value = DEFAULT_PROFILES_DIR)]
        dir: PathBuf,
    },

    /// Validate a single dump file
    Validate {
        /// Path to dump JSON file
        #[arg(short, long)]
        file: PathBuf,

        /// TOML file with excluded_prefixes
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Exclude functions starting with this prefix (repeatable)
        #[arg(short, long)]
        exclude: Vec<String>,

        /// Also exclude Zend_, Composer\ and PHPStan\ namespaces
        #[arg(long)]
        framework_defaults: bool,
    },

    /// Display version information
    Version,
}

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    match cli.command {
        Commands::Report {
            dir,
            config,
            exclude,
            framework_defaults,
            json,
            skip_malformed,
        } => {
            let args = ReportArgs {
                profiles_dir: dir,
                config_path: config,
                exclude,
                framework_defaults,
                output_json: json,
                skip_malformed,
                print_table: true,
            };

            validate_args(&args)?;
            execute_report(args)?;
        }

        Commands::Ingest { file, dir } => {
            execute_ingest(IngestArgs {
                file,
                profiles_dir: dir,
            })?;
        }

        Commands::Validate {
            file,
            config,
            exclude,
            framework_defaults,
        } => {
            let args = ReportArgs {
                config_path: config,
                exclude,
                framework_defaults,
                ..Default::default()
            };

            validate_args(&args)?;
            validate_dump_file(&file, &build_config(&args)?)?;
        }

        Commands::Version => {
            display_version();
        }
    }

    Ok(())
}
