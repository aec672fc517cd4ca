//! Index orchestration.
//!
//! `IndexManager` is the top-level entry point: it serializes operations
//! per repository, owns the writer lifecycle (commit on success, rollback
//! on any failure), runs the incremental indexing loop, and notifies
//! listeners after successful runs.

mod blob;
mod diff;
mod listener;
mod locks;
pub mod version;

pub use listener::IndexListener;
pub use locks::LockRegistry;

use std::fs;
use std::sync::Arc;

use git2::Oid;
use tantivy::{IndexWriter, Searcher, TantivyDocument, Term};
use tracing::info;

use crate::config::IndexConfig;
use crate::error::Result;
use crate::extractors::ExtractorRegistry;
use crate::git::{GitRepo, TreeChange};
use crate::repo::{Repository, Storage};
use crate::search::queries::stored_value;
use crate::search::schema::{SchemaFields, LAST_COMMIT};
use crate::search::store;

/// Counters describing one indexing run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexResult {
    /// Candidate blobs examined against the previous index state.
    pub checked: u64,
    /// Blobs freshly written this run.
    pub indexed: u64,
}

/// Builds and maintains per-repository search indexes.
pub struct IndexManager {
    storage: Storage,
    extractors: Arc<ExtractorRegistry>,
    config: IndexConfig,
    listeners: Vec<Arc<dyn IndexListener>>,
    locks: LockRegistry,
}

impl IndexManager {
    pub fn new(storage: Storage, extractors: Arc<ExtractorRegistry>, config: IndexConfig) -> Self {
        Self {
            storage,
            extractors,
            config,
            listeners: Vec::new(),
            locks: LockRegistry::new(),
        }
    }

    /// Register a listener. Listeners are notified synchronously, in
    /// registration order; register them before sharing the manager.
    pub fn register_listener(&mut self, listener: Arc<dyn IndexListener>) {
        self.listeners.push(listener);
    }

    /// Bring the repository's index up to `revision`.
    ///
    /// Serialized per repository; concurrent calls for distinct
    /// repositories run in parallel. On any failure the writer transaction
    /// is rolled back and the index is left exactly as it was.
    pub fn index(&self, repository: &Repository, revision: &str) -> Result<IndexResult> {
        let git = GitRepo::open(repository.git_dir())?;
        let commit_id = git.resolve(revision)?;

        info!(
            "indexing commit '{}' of repository '{}'",
            commit_id,
            repository.id()
        );

        let lock = self.locks.get(repository.id());
        let _guard = lock.lock().unwrap();

        let index_dir = self.storage.index_dir(repository);
        fs::create_dir_all(&index_dir)?;

        let result = if store::index_exists(&index_dir) {
            let index = store::open_index(&index_dir, self.config.ngram_size)?;
            let fields = SchemaFields::new(&index.schema());
            let reader = index.reader()?;
            let searcher = reader.searcher();
            let mut writer: IndexWriter = index.writer(self.config.writer_heap_bytes)?;
            match self.run(&git, commit_id, &writer, Some(&searcher), &fields) {
                Ok(result) => {
                    writer.commit()?;
                    result
                }
                Err(e) => {
                    let _ = writer.rollback();
                    return Err(e);
                }
            }
        } else {
            let index = store::create_index(&index_dir, self.config.ngram_size)?;
            let fields = SchemaFields::new(&index.schema());
            let mut writer: IndexWriter = index.writer(self.config.writer_heap_bytes)?;
            match self.run(&git, commit_id, &writer, None, &fields) {
                Ok(result) => {
                    writer.commit()?;
                    result
                }
                Err(e) => {
                    let _ = writer.rollback();
                    return Err(e);
                }
            }
        };

        info!(
            "commit {} indexed (checked blobs: {}, indexed blobs: {})",
            commit_id, result.checked, result.indexed
        );

        if result.indexed != 0 {
            for listener in &self.listeners {
                listener.commit_indexed(repository, revision);
            }
        }

        Ok(result)
    }

    /// Read-only: whether `revision` is fully indexed at the current
    /// scheme. False when no index exists yet.
    pub fn is_indexed(&self, repository: &Repository, revision: &str) -> Result<bool> {
        let git = GitRepo::open(repository.git_dir())?;
        let commit_id = git.resolve(revision)?;

        let index_dir = self.storage.index_dir(repository);
        if !store::index_exists(&index_dir) {
            return Ok(false);
        }
        let index = store::open_index(&index_dir, self.config.ngram_size)?;
        let fields = SchemaFields::new(&index.schema());
        let reader = index.reader()?;
        let searcher = reader.searcher();
        let stored = stored_value(
            &searcher,
            fields.commit_hash,
            &commit_id.to_string(),
            fields.commit_index_version,
        )?;
        Ok(stored.as_deref() == Some(version::commit_version(&self.extractors).as_str()))
    }

    /// Hook for the hosting subsystem: a new commit arrived.
    pub fn commit_received(&self, repository: &Repository, commit_hash: &str) -> Result<IndexResult> {
        self.index(repository, commit_hash)
    }

    /// The repository is being removed: notify listeners, then delete its
    /// index directory.
    pub fn repository_removed(&self, repository: &Repository) -> Result<()> {
        for listener in &self.listeners {
            listener.index_removing(repository);
        }
        let index_dir = self.storage.index_dir(repository);
        if index_dir.exists() {
            fs::remove_dir_all(&index_dir)?;
        }
        Ok(())
    }

    /// One indexing pass against an open writer.
    ///
    /// `searcher` is a snapshot of the index state before this run; absent
    /// on first-time indexing. Mutations go through `writer` only and
    /// become visible when the caller commits.
    fn run(
        &self,
        git: &GitRepo,
        commit_id: Oid,
        writer: &IndexWriter,
        searcher: Option<&Searcher>,
        fields: &SchemaFields,
    ) -> Result<IndexResult> {
        let Some(changes) = diff::candidates(git, commit_id, searcher, fields, &self.extractors)?
        else {
            return Ok(IndexResult {
                checked: 0,
                indexed: 0,
            });
        };

        let mut checked = 0;
        let mut indexed = 0;
        for change in changes {
            match change {
                TreeChange::Upsert { path, blob_id } => {
                    let key = blob::blob_key(blob_id, &path);
                    let existing = match searcher {
                        Some(searcher) => {
                            checked += 1;
                            stored_value(searcher, fields.blob_key, &key, fields.blob_index_version)?
                        }
                        None => None,
                    };
                    let extractor = self.extractors.for_path(&path);
                    let current = version::blob_version(extractor);
                    if existing.as_deref() == Some(current.as_str()) {
                        continue;
                    }
                    if existing.is_some() {
                        writer.delete_term(Term::from_field_text(fields.blob_key, &key));
                    }
                    blob::index_blob(
                        writer, fields, git, &self.config, extractor, blob_id, &path, &current,
                    )?;
                    indexed += 1;
                }
                TreeChange::Removal { path, blob_id } => {
                    checked += 1;
                    let key = blob::blob_key(blob_id, &path);
                    writer.delete_term(Term::from_field_text(fields.blob_key, &key));
                }
            }
        }

        // Record the commit so later runs can tell it has been indexed
        let commit_hash = commit_id.to_string();
        writer.delete_term(Term::from_field_text(fields.commit_hash, &commit_hash));
        let mut doc = TantivyDocument::new();
        doc.add_text(fields.commit_hash, &commit_hash);
        doc.add_text(
            fields.commit_index_version,
            version::commit_version(&self.extractors),
        );
        writer.add_document(doc)?;

        // Record the last indexed commit so the next run can diff against
        // it instead of walking the full tree
        writer.delete_term(Term::from_field_text(fields.meta, LAST_COMMIT));
        let mut doc = TantivyDocument::new();
        doc.add_text(fields.meta, LAST_COMMIT);
        doc.add_text(fields.last_commit_hash, &commit_hash);
        doc.add_text(
            fields.last_commit_extractors_version,
            self.extractors.version(),
        );
        writer.add_document(doc)?;

        Ok(IndexResult { checked, indexed })
    }
}
