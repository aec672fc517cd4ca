//! Gitdex - incremental code search indexing over git commit history
//!
//! Gitdex maintains one full-text/symbol search index per repository and
//! brings it up to a target revision with the minimum amount of work: only
//! tree entries that changed since the last indexed commit are inspected,
//! and only blobs whose stored version stamp is stale are re-indexed.

pub mod config;
pub mod error;
pub mod extractors;
pub mod git;
pub mod indexing;
pub mod repo;
pub mod search;

#[cfg(test)]
pub mod tests;

// Re-export the types a host needs to wire the indexer up
pub use config::IndexConfig;
pub use error::{IndexError, Result};
pub use extractors::{ExtractedSymbol, ExtractorRegistry, SymbolExtractor};
pub use indexing::{IndexListener, IndexManager, IndexResult};
pub use repo::{Repository, Storage};
