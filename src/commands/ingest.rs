//! Ingest command implementation.
//!
//! Copies a dump captured elsewhere into the profiles directory, after
//! checking that it decodes.

use super::models::IngestArgs;
use crate::parser::decode_dump;
use crate::store::DirectoryStore;
use anyhow::{Context, Result};
use log::info;
use std::path::PathBuf;

/// Execute the ingest command
///
/// # Returns
/// Path the dump was stored under
pub fn execute_ingest(args: IngestArgs) -> Result<PathBuf> {
    info!("Ingesting dump: {}", args.file.display());

    let raw = std::fs::read(&args.file)
        .with_context(|| format!("Failed to read {}", args.file.display()))?;

    let entries = decode_dump(&raw)
        .with_context(|| format!("{} is not a valid sample dump", args.file.display()))?;

    let store = DirectoryStore::new(&args.profiles_dir);
    let path = store
        .save_dump(&serde_json::Value::Object(entries))
        .context("Failed to store dump")?;

    info!("✓ Dump stored as: {}", path.display());

    Ok(path)
}
