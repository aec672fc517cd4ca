//! Tantivy schema for the blob/commit index.
//!
//! Uses `STRING` (raw tokenizer) for fields matched exactly (record keys,
//! symbol tokens, paths) and the registered n-gram analyzer for the blob
//! text field. Version stamps are stored but never searched.

use tantivy::schema::{
    Field, IndexRecordOption, Schema, TextFieldIndexing, TextOptions, STORED, STRING,
};

/// Field name constants for the index schema.
pub mod fields {
    pub const META: &str = "meta";
    pub const COMMIT_HASH: &str = "commit_hash";
    pub const COMMIT_INDEX_VERSION: &str = "commit_index_version";
    pub const LAST_COMMIT_HASH: &str = "last_commit_hash";
    pub const LAST_COMMIT_EXTRACTORS_VERSION: &str = "last_commit_extractors_version";
    pub const BLOB_KEY: &str = "blob_key";
    pub const BLOB_HASH: &str = "blob_hash";
    pub const BLOB_PATH: &str = "blob_path";
    pub const BLOB_INDEX_VERSION: &str = "blob_index_version";
    pub const BLOB_SYMBOLS: &str = "blob_symbols";
    pub const BLOB_TEXT: &str = "blob_text";
}

/// Value of the `meta` key under which the last-indexed-commit record lives.
pub const LAST_COMMIT: &str = "last_commit";

/// Name under which the n-gram analyzer is registered on the index.
pub const NGRAM_TOKENIZER: &str = "ngram";

pub fn build_schema() -> Schema {
    let mut builder = Schema::builder();

    let ngram_text = TextOptions::default().set_indexing_options(
        TextFieldIndexing::default()
            .set_tokenizer(NGRAM_TOKENIZER)
            .set_index_option(IndexRecordOption::WithFreqsAndPositions),
    );

    // Exact-match keys and tokens
    builder.add_text_field(fields::META, STRING);
    builder.add_text_field(fields::COMMIT_HASH, STRING);
    builder.add_text_field(fields::BLOB_KEY, STRING);
    builder.add_text_field(fields::BLOB_HASH, STRING);
    builder.add_text_field(fields::BLOB_PATH, STRING | STORED);
    builder.add_text_field(fields::BLOB_SYMBOLS, STRING);

    // Stored-only payloads
    builder.add_text_field(fields::COMMIT_INDEX_VERSION, STORED);
    builder.add_text_field(fields::LAST_COMMIT_HASH, STORED);
    builder.add_text_field(fields::LAST_COMMIT_EXTRACTORS_VERSION, STORED);
    builder.add_text_field(fields::BLOB_INDEX_VERSION, STORED);

    // Tokenized content, not stored
    builder.add_text_field(fields::BLOB_TEXT, ngram_text);

    builder.build()
}

/// Pre-resolved field handles for document construction and retrieval.
#[derive(Clone)]
pub struct SchemaFields {
    pub meta: Field,
    pub commit_hash: Field,
    pub commit_index_version: Field,
    pub last_commit_hash: Field,
    pub last_commit_extractors_version: Field,
    pub blob_key: Field,
    pub blob_hash: Field,
    pub blob_path: Field,
    pub blob_index_version: Field,
    pub blob_symbols: Field,
    pub blob_text: Field,
}

impl SchemaFields {
    /// Resolve all field handles from a schema.
    ///
    /// # Panics
    /// Panics if the schema was not created by `build_schema()`.
    pub fn new(schema: &Schema) -> Self {
        Self {
            meta: schema.get_field(fields::META).unwrap(),
            commit_hash: schema.get_field(fields::COMMIT_HASH).unwrap(),
            commit_index_version: schema.get_field(fields::COMMIT_INDEX_VERSION).unwrap(),
            last_commit_hash: schema.get_field(fields::LAST_COMMIT_HASH).unwrap(),
            last_commit_extractors_version: schema
                .get_field(fields::LAST_COMMIT_EXTRACTORS_VERSION)
                .unwrap(),
            blob_key: schema.get_field(fields::BLOB_KEY).unwrap(),
            blob_hash: schema.get_field(fields::BLOB_HASH).unwrap(),
            blob_path: schema.get_field(fields::BLOB_PATH).unwrap(),
            blob_index_version: schema.get_field(fields::BLOB_INDEX_VERSION).unwrap(),
            blob_symbols: schema.get_field(fields::BLOB_SYMBOLS).unwrap(),
            blob_text: schema.get_field(fields::BLOB_TEXT).unwrap(),
        }
    }
}
