//! Tuning knobs for the indexing pipeline.

use serde::Deserialize;

const DEFAULT_MAX_BLOB_SIZE: u64 = 1024 * 1024;
const DEFAULT_NGRAM_SIZE: usize = 3;
const DEFAULT_WRITER_HEAP_BYTES: usize = 50_000_000;

/// Configuration for one `IndexManager`.
///
/// Hosts embed this in their own configuration; every field has a default
/// so a plain `IndexConfig::default()` is a working setup.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct IndexConfig {
    /// Blobs larger than this are indexed by hash/path/filename only; their
    /// content never enters the full-text field.
    pub max_blob_size: u64,
    /// Fixed n-gram size for the blob text field. Short substring queries
    /// match without word boundaries at the cost of a larger index.
    pub ngram_size: usize,
    /// Heap budget handed to the index writer.
    pub writer_heap_bytes: usize,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            max_blob_size: DEFAULT_MAX_BLOB_SIZE,
            ngram_size: DEFAULT_NGRAM_SIZE,
            writer_heap_bytes: DEFAULT_WRITER_HEAP_BYTES,
        }
    }
}
