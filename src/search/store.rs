//! Index directory lifecycle.
//!
//! The n-gram analyzer must be registered every time an index is opened or
//! created; tantivy keeps tokenizers in process memory, not on disk.

use std::path::Path;

use tantivy::tokenizer::{LowerCaser, NgramTokenizer, TextAnalyzer};
use tantivy::Index;

use crate::error::Result;
use crate::search::schema::{build_schema, NGRAM_TOKENIZER};

/// True when a tantivy index has been created in `dir`.
pub fn index_exists(dir: &Path) -> bool {
    dir.join("meta.json").exists()
}

pub fn create_index(dir: &Path, ngram_size: usize) -> Result<Index> {
    let index = Index::create_in_dir(dir, build_schema())?;
    register_ngram_tokenizer(&index, ngram_size)?;
    Ok(index)
}

pub fn open_index(dir: &Path, ngram_size: usize) -> Result<Index> {
    let index = Index::open_in_dir(dir)?;
    register_ngram_tokenizer(&index, ngram_size)?;
    Ok(index)
}

fn register_ngram_tokenizer(index: &Index, ngram_size: usize) -> Result<()> {
    let tokenizer = NgramTokenizer::new(ngram_size, ngram_size, false)?;
    index.tokenizers().register(
        NGRAM_TOKENIZER,
        TextAnalyzer::builder(tokenizer).filter(LowerCaser).build(),
    );
    Ok(())
}
