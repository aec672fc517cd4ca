//! Blob content pipeline: raw blob bytes to index document.

use chardetng::EncodingDetector;
use git2::Oid;
use tantivy::{IndexWriter, TantivyDocument};
use tracing::debug;

use crate::config::IndexConfig;
use crate::error::Result;
use crate::extractors::SymbolExtractor;
use crate::git::GitRepo;
use crate::search::schema::SchemaFields;

/// The (hash, path) upsert key of a blob record.
pub(super) fn blob_key(blob_id: Oid, path: &str) -> String {
    format!("{blob_id}:{path}")
}

/// Lowercase filename token: everything after the last path separator, or
/// the whole path when there is none.
fn filename_symbol(path: &str) -> String {
    match path.rsplit_once('/') {
        Some((_, name)) => name.to_lowercase(),
        None => path.to_lowercase(),
    }
}

/// Decode blob bytes to text. `None` means binary or undecodable content;
/// never an error.
fn decode_text(bytes: &[u8]) -> Option<String> {
    if bytes.contains(&0) {
        return None;
    }
    let mut detector = EncodingDetector::new();
    detector.feed(bytes, true);
    let encoding = detector.guess(None, true);
    let (text, _, had_errors) = encoding.decode(bytes);
    if had_errors {
        return None;
    }
    Some(text.into_owned())
}

/// Build and add the index document for one blob.
///
/// The hash, path, and filename token are always present so filename
/// search works for every blob; content and extracted symbols only when
/// the blob is small enough and decodes as text.
pub(super) fn index_blob(
    writer: &IndexWriter,
    fields: &SchemaFields,
    git: &GitRepo,
    config: &IndexConfig,
    extractor: Option<&dyn SymbolExtractor>,
    blob_id: Oid,
    path: &str,
    version_stamp: &str,
) -> Result<()> {
    let hash = blob_id.to_string();
    let mut doc = TantivyDocument::new();

    doc.add_text(fields.blob_index_version, version_stamp);
    doc.add_text(fields.blob_key, blob_key(blob_id, path));
    doc.add_text(fields.blob_hash, &hash);
    doc.add_text(fields.blob_path, path);
    doc.add_text(fields.blob_symbols, filename_symbol(path));

    if git.blob_size(blob_id)? <= config.max_blob_size {
        let bytes = git.blob_bytes(blob_id)?;
        match decode_text(&bytes) {
            Some(text) => {
                doc.add_text(fields.blob_text, &text);
                if let Some(extractor) = extractor {
                    match extractor.extract(&text) {
                        Ok(symbols) => {
                            for symbol in symbols {
                                doc.add_text(fields.blob_symbols, symbol.name.to_lowercase());
                            }
                        }
                        Err(e) => debug!(
                            "error extracting symbols from blob (hash: {hash}, path: {path}): {e}"
                        ),
                    }
                }
            }
            None => debug!("ignoring content of binary file '{path}'"),
        }
    } else {
        debug!("ignoring content of large file '{path}'");
    }

    writer.add_document(doc)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filename_symbol_takes_last_path_segment() {
        assert_eq!(filename_symbol("src/Main.go"), "main.go");
        assert_eq!(filename_symbol("README"), "readme");
    }

    #[test]
    fn decode_text_accepts_utf8() {
        assert_eq!(decode_text(b"package main"), Some("package main".to_string()));
    }

    #[test]
    fn decode_text_rejects_binary() {
        assert_eq!(decode_text(b"\x7fELF\x00\x01\x02"), None);
    }

    #[test]
    fn decode_text_handles_legacy_single_byte_encodings() {
        // "café" in windows-1252
        let decoded = decode_text(b"caf\xe9").unwrap();
        assert!(decoded.starts_with("caf"));
    }
}
