//! Sources of raw sample dumps.
//!
//! The engine only sees `BatchBlob`s; a store decides where they come
//! from. Unreadable dumps are handed over as missing blobs, not errors.

pub mod directory;

use crate::parser::schema::BatchBlob;
use crate::utils::error::StoreError;

pub use directory::{dump_file_name, DirectoryStore};

/// Anything that can hand over a set of sample dumps
pub trait SampleStore {
    /// Every batch currently available, in a stable order
    fn batches(&self) -> Result<Vec<BatchBlob>, StoreError>;
}

/// Store backed by blobs already in memory
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    blobs: Vec<BatchBlob>,
}

impl MemoryStore {
    pub fn new(blobs: Vec<BatchBlob>) -> Self {
        Self { blobs }
    }

    pub fn push(&mut self, blob: BatchBlob) {
        self.blobs.push(blob);
    }
}

impl SampleStore for MemoryStore {
    fn batches(&self) -> Result<Vec<BatchBlob>, StoreError> {
        Ok(self.blobs.clone())
    }
}
