//! Exact-match lookups and minimal read-side search helpers.
//!
//! Record lookups are "run an exact-match query, take the first hit's
//! stored value". The search helpers cover symbol/filename and substring
//! content queries; anything richer belongs to the host.

use tantivy::collector::TopDocs;
use tantivy::query::{BooleanQuery, Query, TermQuery};
use tantivy::schema::{Field, IndexRecordOption, Value};
use tantivy::tokenizer::TokenStream;
use tantivy::{Index, Searcher, TantivyDocument, Term};

use crate::error::Result;
use crate::search::schema::{SchemaFields, NGRAM_TOKENIZER};

/// Execute an exact-match query on `key_field` and return the first hit's
/// stored `value_field`, if any.
pub fn stored_value(
    searcher: &Searcher,
    key_field: Field,
    key: &str,
    value_field: Field,
) -> Result<Option<String>> {
    let query = TermQuery::new(
        Term::from_field_text(key_field, key),
        IndexRecordOption::Basic,
    );
    let top_docs = searcher.search(&query, &TopDocs::with_limit(1))?;
    let Some((_, address)) = top_docs.first() else {
        return Ok(None);
    };
    let doc: TantivyDocument = searcher.doc(*address)?;
    Ok(doc
        .get_first(value_field)
        .and_then(|value| value.as_str())
        .map(str::to_string))
}

/// Paths of blob records carrying `symbol` as a symbol token (an extracted
/// symbol name or a filename). Matching is exact on the lowercased token.
pub fn paths_with_symbol(
    searcher: &Searcher,
    fields: &SchemaFields,
    symbol: &str,
    limit: usize,
) -> Result<Vec<String>> {
    let query = TermQuery::new(
        Term::from_field_text(fields.blob_symbols, &symbol.to_lowercase()),
        IndexRecordOption::Basic,
    );
    collect_paths(searcher, fields, &query, limit)
}

/// Paths of blob records whose content contains `needle`, as an AND over
/// the needle's n-gram terms.
pub fn paths_with_text(
    index: &Index,
    searcher: &Searcher,
    fields: &SchemaFields,
    needle: &str,
    limit: usize,
) -> Result<Vec<String>> {
    let terms = ngram_terms(index, needle);
    if terms.is_empty() {
        return Ok(Vec::new());
    }
    let clauses: Vec<Box<dyn Query>> = terms
        .into_iter()
        .map(|term| {
            Box::new(TermQuery::new(
                Term::from_field_text(fields.blob_text, &term),
                IndexRecordOption::Basic,
            )) as Box<dyn Query>
        })
        .collect();
    let query = BooleanQuery::intersection(clauses);
    collect_paths(searcher, fields, &query, limit)
}

fn collect_paths(
    searcher: &Searcher,
    fields: &SchemaFields,
    query: &dyn Query,
    limit: usize,
) -> Result<Vec<String>> {
    let top_docs = searcher.search(query, &TopDocs::with_limit(limit))?;
    let mut paths = Vec::with_capacity(top_docs.len());
    for (_, address) in top_docs {
        let doc: TantivyDocument = searcher.doc(address)?;
        if let Some(path) = doc.get_first(fields.blob_path).and_then(|v| v.as_str()) {
            paths.push(path.to_string());
        }
    }
    Ok(paths)
}

/// Tokenize `text` with the registered n-gram analyzer.
fn ngram_terms(index: &Index, text: &str) -> Vec<String> {
    let mut tokenizer = index
        .tokenizers()
        .get(NGRAM_TOKENIZER)
        .expect("ngram tokenizer not registered");
    let mut stream = tokenizer.token_stream(text);
    let mut terms = Vec::new();
    while stream.advance() {
        terms.push(stream.token().text.clone());
    }
    terms.dedup();
    terms
}
