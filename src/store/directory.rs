//! Directory-backed sample store.
//!
//! Dumps are `*.json` files directly inside one directory. New dumps are
//! named `<unix-seconds>.application.json`.

use super::SampleStore;
use crate::parser::schema::BatchBlob;
use crate::utils::config::DUMP_FILE_SUFFIX;
use crate::utils::error::StoreError;
use chrono::{DateTime, Utc};
use log::{debug, info, warn};
use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

/// Sample dumps stored as JSON files in a directory
#[derive(Debug, Clone)]
pub struct DirectoryStore {
    dir: PathBuf,
}

impl DirectoryStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Paths of all dumps in the directory, sorted by file name
    ///
    /// A directory that does not exist holds no dumps.
    ///
    /// # Errors
    /// * `StoreError::NotADirectory` - path exists but is a file
    /// * `StoreError::Io` - directory cannot be listed
    pub fn dump_paths(&self) -> Result<Vec<PathBuf>, StoreError> {
        if !self.dir.exists() {
            warn!("Profiles directory {} does not exist", self.dir.display());
            return Ok(Vec::new());
        }

        if !self.dir.is_dir() {
            return Err(StoreError::NotADirectory(self.dir.display().to_string()));
        }

        let mut paths = Vec::new();
        for entry in fs::read_dir(&self.dir)? {
            let path = entry?.path();
            if is_dump_file(&path) {
                paths.push(path);
            }
        }

        paths.sort();
        debug!("Found {} dumps in {}", paths.len(), self.dir.display());

        Ok(paths)
    }

    /// Write a dump into the store, named after the current time
    ///
    /// **Public** - used when ingesting dumps captured elsewhere
    ///
    /// # Returns
    /// Path of the written file
    pub fn save_dump(&self, dump: &serde_json::Value) -> Result<PathBuf, StoreError> {
        self.save_dump_at(dump, Utc::now())
    }

    /// Write a dump named after `timestamp`
    ///
    /// An existing file with the same name is never overwritten; a
    /// numeric suffix is added instead.
    pub fn save_dump_at(
        &self,
        dump: &serde_json::Value,
        timestamp: DateTime<Utc>,
    ) -> Result<PathBuf, StoreError> {
        let bytes = serde_json::to_vec(dump)?;
        fs::create_dir_all(&self.dir)?;

        let mut attempt = 0;
        loop {
            let path = self.dir.join(dump_file_name(timestamp, attempt));
            let mut file = match OpenOptions::new().write(true).create_new(true).open(&path) {
                Ok(file) => file,
                Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                    debug!("{} already exists, trying next name", path.display());
                    attempt += 1;
                    continue;
                }
                Err(e) => return Err(e.into()),
            };

            file.write_all(&bytes)?;
            info!("Saved dump to {}", path.display());

            return Ok(path);
        }
    }
}

impl SampleStore for DirectoryStore {
    fn batches(&self) -> Result<Vec<BatchBlob>, StoreError> {
        let blobs = self
            .dump_paths()?
            .into_iter()
            .map(|path| read_blob(&path))
            .collect();

        Ok(blobs)
    }
}

/// File name for a dump written at `timestamp`
///
/// `attempt` > 0 adds a `-<attempt>` suffix to avoid collisions.
pub fn dump_file_name(timestamp: DateTime<Utc>, attempt: u32) -> String {
    if attempt == 0 {
        format!("{}{}", timestamp.timestamp(), DUMP_FILE_SUFFIX)
    } else {
        format!("{}-{}{}", timestamp.timestamp(), attempt, DUMP_FILE_SUFFIX)
    }
}

fn is_dump_file(path: &Path) -> bool {
    path.is_file() && path.extension().is_some_and(|ext| ext == "json")
}

fn read_blob(path: &Path) -> BatchBlob {
    let origin = path.display().to_string();
    // Bytes are decoded later, so bad encoding surfaces as a parse error
    match fs::read(path) {
        Ok(contents) => BatchBlob::new(origin, contents),
        Err(e) => {
            warn!("Failed to read dump {}: {}", origin, e);
            BatchBlob::missing(origin)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_dump_file_name() {
        let ts = Utc.timestamp_opt(1_700_000_000, 0).unwrap();
        assert_eq!(dump_file_name(ts, 0), "1700000000.application.json");
        assert_eq!(dump_file_name(ts, 2), "1700000000-2.application.json");
    }

    #[test]
    fn test_missing_directory_is_empty() {
        let temp_dir = tempfile::tempdir().unwrap();
        let store = DirectoryStore::new(temp_dir.path().join("nope"));
        assert!(store.batches().unwrap().is_empty());
    }

    #[test]
    fn test_file_path_is_error() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let store = DirectoryStore::new(file.path());
        assert!(matches!(store.batches(), Err(StoreError::NotADirectory(_))));
    }

    #[test]
    fn test_only_json_files_listed() {
        let temp_dir = tempfile::tempdir().unwrap();
        fs::write(temp_dir.path().join("b.json"), "{}").unwrap();
        fs::write(temp_dir.path().join("a.json"), "{}").unwrap();
        fs::write(temp_dir.path().join("notes.txt"), "x").unwrap();
        fs::create_dir(temp_dir.path().join("dir.json")).unwrap();

        let store = DirectoryStore::new(temp_dir.path());
        let names: Vec<_> = store
            .dump_paths()
            .unwrap()
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();

        assert_eq!(names, vec!["a.json", "b.json"]);
    }

    #[test]
    fn test_save_dump_skips_taken_names() {
        let temp_dir = tempfile::tempdir().unwrap();
        let store = DirectoryStore::new(temp_dir.path());
        let ts = Utc.timestamp_opt(1_700_000_000, 0).unwrap();
        fs::write(temp_dir.path().join(dump_file_name(ts, 0)), "{}").unwrap();
        fs::write(temp_dir.path().join(dump_file_name(ts, 1)), "{}").unwrap();

        let path = store.save_dump_at(&serde_json::json!({}), ts).unwrap();

        assert!(path.ends_with("1700000000-2.application.json"));
        assert_eq!(fs::read_to_string(temp_dir.path().join(dump_file_name(ts, 0))).unwrap(), "{}");
    }

    #[test]
    fn test_save_dump_never_overwrites() {
        let temp_dir = tempfile::tempdir().unwrap();
        let store = DirectoryStore::new(temp_dir.path().join("profiles"));
        let ts = Utc.timestamp_opt(1_700_000_000, 0).unwrap();
        let dump = serde_json::json!({"main()": {"ct": 1}});

        let first = store.save_dump_at(&dump, ts).unwrap();
        let second = store.save_dump_at(&dump, ts).unwrap();

        assert_ne!(first, second);
        assert!(second.ends_with("1700000000-1.application.json"));
        assert_eq!(store.batches().unwrap().len(), 2);
    }
}
