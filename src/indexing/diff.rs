//! Minimal candidate discovery.
//!
//! Diffs the target commit against the last indexed commit when that
//! commit is still usable, and falls back to a full tree walk otherwise.

use git2::Oid;
use tantivy::collector::TopDocs;
use tantivy::query::TermQuery;
use tantivy::schema::{IndexRecordOption, Value};
use tantivy::{Searcher, TantivyDocument, Term};
use tracing::debug;

use crate::error::Result;
use crate::extractors::ExtractorRegistry;
use crate::git::{GitRepo, TreeChange};
use crate::search::queries::stored_value;
use crate::search::schema::{SchemaFields, LAST_COMMIT};

use super::version;

/// Payload of the last-indexed-commit record.
struct LastCommit {
    hash: String,
    extractors_version: String,
}

fn last_commit_record(searcher: &Searcher, fields: &SchemaFields) -> Result<Option<LastCommit>> {
    let query = TermQuery::new(
        Term::from_field_text(fields.meta, LAST_COMMIT),
        IndexRecordOption::Basic,
    );
    let top_docs = searcher.search(&query, &TopDocs::with_limit(1))?;
    let Some((_, address)) = top_docs.first() else {
        return Ok(None);
    };
    let doc: TantivyDocument = searcher.doc(*address)?;
    let hash = doc
        .get_first(fields.last_commit_hash)
        .and_then(|v| v.as_str());
    let extractors_version = doc
        .get_first(fields.last_commit_extractors_version)
        .and_then(|v| v.as_str());
    match (hash, extractors_version) {
        (Some(hash), Some(extractors_version)) => Ok(Some(LastCommit {
            hash: hash.to_string(),
            extractors_version: extractors_version.to_string(),
        })),
        _ => Ok(None),
    }
}

/// Work out the minimal candidate set for indexing `commit_id`.
///
/// Returns `None` when the commit is already indexed at the current scheme;
/// the whole operation is then an idempotent no-op.
pub(super) fn candidates(
    git: &GitRepo,
    commit_id: Oid,
    searcher: Option<&Searcher>,
    fields: &SchemaFields,
    registry: &ExtractorRegistry,
) -> Result<Option<Vec<TreeChange>>> {
    if let Some(searcher) = searcher {
        let stored = stored_value(
            searcher,
            fields.commit_hash,
            &commit_id.to_string(),
            fields.commit_index_version,
        )?;
        if stored.as_deref() == Some(version::commit_version(registry).as_str()) {
            return Ok(None);
        }

        if let Some(last) = last_commit_record(searcher, fields)? {
            if last.extractors_version == registry.version() {
                if let Ok(last_id) = Oid::from_str(&last.hash) {
                    if git.has_commit(last_id) {
                        debug!("diffing {commit_id} against last indexed commit {last_id}");
                        return Ok(Some(git.diff_trees(last_id, commit_id)?));
                    }
                }
            }
        }
    }

    debug!("no usable prior commit, walking full tree of {commit_id}");
    let mut changes = Vec::new();
    git.walk_tree(commit_id, |path, blob_id| {
        changes.push(TreeChange::Upsert { path, blob_id })
    })?;
    Ok(Some(changes))
}
