//! Pluggable symbol extraction.
//!
//! An extractor turns decoded blob text into named symbols for the symbol
//! token field. Extractors are resolved by file path and carry a version
//! that participates in the blob version stamp, so bumping an extractor
//! automatically invalidates every blob record it produced.

mod go;
mod rust;

pub use go::GoExtractor;
pub use rust::RustExtractor;

use thiserror::Error;

/// A named symbol pulled out of a source blob.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedSymbol {
    pub name: String,
}

/// A single blob's extraction failed. Always recovered locally: the blob is
/// still indexed with the fields built so far.
#[derive(Debug, Error)]
#[error("symbol extraction failed: {0}")]
pub struct ExtractError(pub String);

/// A versioned, path-keyed symbol extraction strategy.
pub trait SymbolExtractor: Send + Sync {
    /// Stable name, part of the registry's aggregate version.
    fn name(&self) -> &'static str;

    /// Bumped whenever the extractor's output changes, so stale blob
    /// records are detected and replaced instead of silently reused.
    fn version(&self) -> u32;

    fn applies_to(&self, path: &str) -> bool;

    fn extract(&self, text: &str) -> Result<Vec<ExtractedSymbol>, ExtractError>;
}

/// Registry resolving extractors by path.
pub struct ExtractorRegistry {
    extractors: Vec<Box<dyn SymbolExtractor>>,
}

impl ExtractorRegistry {
    /// An empty registry: every blob is indexed content-only.
    pub fn new() -> Self {
        Self {
            extractors: Vec::new(),
        }
    }

    /// The built-in language set.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(Box::new(GoExtractor));
        registry.register(Box::new(RustExtractor));
        registry
    }

    pub fn register(&mut self, extractor: Box<dyn SymbolExtractor>) {
        self.extractors.push(extractor);
    }

    /// The first registered extractor applying to `path`, if any.
    pub fn for_path(&self, path: &str) -> Option<&dyn SymbolExtractor> {
        self.extractors
            .iter()
            .find(|extractor| extractor.applies_to(path))
            .map(|extractor| &**extractor)
    }

    /// Aggregate version over every registered extractor, in registration
    /// order. Recorded with the last-indexed-commit record: if it changed
    /// since the last run, the incremental diff path cannot be trusted and
    /// a full tree walk happens instead.
    pub fn version(&self) -> String {
        self.extractors
            .iter()
            .map(|extractor| format!("{}:{}", extractor.name(), extractor.version()))
            .collect::<Vec<_>>()
            .join(";")
    }
}

impl Default for ExtractorRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}
