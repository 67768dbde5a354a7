//! Sample dump parser.
//!
//! Decodes one raw dump into call-edge records. Keys that are not a
//! `caller==>callee` pair (the root `main()` frame, instrumentation
//! artifacts) are skipped without error.

use super::schema::{BatchBlob, MetricBundle, SampleRecord};
use crate::utils::config::DUMP_SEPARATOR;
use crate::utils::error::ParseError;
use log::{debug, warn};
use serde::Deserialize;
use serde_json::{Map, Value};

/// Parse one batch blob into sample records
///
/// **Public** - main entry point for parsing
///
/// A blob without contents (unreadable or absent dump) yields an empty
/// batch.
///
/// # Errors
/// * `ParseError::JsonError` - contents are not valid UTF-8 JSON
/// * `ParseError::InvalidFormat` - top level is not a JSON object
/// * `ParseError::InvalidBundle` - a metric bundle has the wrong shape
pub fn parse_blob(blob: &BatchBlob) -> Result<Vec<SampleRecord>, ParseError> {
    match &blob.contents {
        Some(contents) => parse_batch(contents),
        None => {
            warn!("Sample dump {} is unavailable, treating as empty", blob.origin);
            Ok(Vec::new())
        }
    }
}

/// Parse raw dump bytes into sample records
///
/// Records come back in the dump's key order.
pub fn parse_batch(raw: impl AsRef<[u8]>) -> Result<Vec<SampleRecord>, ParseError> {
    let entries = decode_dump(raw)?;
    parse_entries(&entries)
}

/// Decode dump bytes into its top-level key/value map
///
/// **Public** - also used by commands to validate dumps before storing
///
/// An empty array is what an empty profile serializes to, and decodes
/// as zero entries.
pub fn decode_dump(raw: impl AsRef<[u8]>) -> Result<Map<String, Value>, ParseError> {
    match serde_json::from_slice::<Value>(raw.as_ref())? {
        Value::Object(entries) => Ok(entries),
        Value::Array(items) if items.is_empty() => Ok(Map::new()),
        other => Err(ParseError::InvalidFormat(format!(
            "Sample dump must be a JSON object, found {}",
            json_type_name(&other)
        ))),
    }
}

/// Turn decoded dump entries into sample records
pub fn parse_entries(entries: &Map<String, Value>) -> Result<Vec<SampleRecord>, ParseError> {
    let mut records = Vec::with_capacity(entries.len());

    for (key, value) in entries {
        let Some((caller, callee)) = split_call_edge(key) else {
            debug!("Skipping non call-edge key: {}", key);
            continue;
        };

        let metrics = MetricBundle::deserialize(value).map_err(|source| {
            ParseError::InvalidBundle {
                key: key.clone(),
                source,
            }
        })?;

        records.push(SampleRecord::new(caller, callee, metrics));
    }

    debug!(
        "Parsed {} call-edge records from {} dump entries",
        records.len(),
        entries.len()
    );

    Ok(records)
}

/// Split a dump key into `(caller, callee)`
///
/// Returns `None` unless the key contains exactly one separator.
pub fn split_call_edge(key: &str) -> Option<(&str, &str)> {
    let mut parts = key.split(DUMP_SEPARATOR);
    let caller = parts.next()?;
    let callee = parts.next()?;

    if parts.next().is_some() {
        return None;
    }

    Some((caller, callee))
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
