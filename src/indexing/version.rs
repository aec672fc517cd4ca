//! Version stamps for index records.
//!
//! Every record self-describes which scheme produced it; stamp inequality
//! is what drives re-indexing, never timestamps or content comparison.

use crate::extractors::{ExtractorRegistry, SymbolExtractor};

/// Bumped whenever the indexing algorithm, the schema, or the tokenizer
/// changes, so every existing record becomes stale at once.
pub const FORMAT_VERSION: u32 = 1;

/// Stamp recorded on commit records.
pub fn commit_version(registry: &ExtractorRegistry) -> String {
    format!("{};{}", FORMAT_VERSION, registry.version())
}

/// Stamp recorded on blob records. Without an applicable extractor the
/// stamp is the bare format version, marking a content-only record.
pub fn blob_version(extractor: Option<&dyn SymbolExtractor>) -> String {
    match extractor {
        Some(extractor) => format!("{};{}", FORMAT_VERSION, extractor.version()),
        None => FORMAT_VERSION.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractors::GoExtractor;

    #[test]
    fn blob_version_distinguishes_extracted_from_content_only() {
        let with_extractor = blob_version(Some(&GoExtractor));
        let content_only = blob_version(None);
        assert_eq!(with_extractor, format!("{FORMAT_VERSION};1"));
        assert_eq!(content_only, FORMAT_VERSION.to_string());
        assert_ne!(with_extractor, content_only);
    }

    #[test]
    fn commit_version_includes_registry_version() {
        let registry = ExtractorRegistry::with_defaults();
        assert_eq!(
            commit_version(&registry),
            format!("{};{}", FORMAT_VERSION, registry.version())
        );
    }
}
