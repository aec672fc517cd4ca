//! Read-side access to the git object store.
//!
//! Wraps the primitives the indexer consumes: revision resolution, blob
//! reads, a recursive walk over one commit's tree, and an object-identity
//! diff between two commits' trees. Nothing here writes to the repository.

use std::path::Path;

use git2::{FileMode, ObjectType, Oid, TreeWalkMode, TreeWalkResult};

use crate::error::{IndexError, Result};

/// Type bits of a git tree entry mode.
const MODE_TYPE_MASK: u32 = 0o170000;
/// Type bits of a regular file (covers 0644 and 0755 variants).
const MODE_TYPE_FILE: u32 = 0o100000;

fn is_regular_file_mode(mode: u32) -> bool {
    mode & MODE_TYPE_MASK == MODE_TYPE_FILE
}

fn is_regular_file(mode: FileMode) -> bool {
    matches!(
        mode,
        FileMode::Blob | FileMode::BlobGroupWritable | FileMode::BlobExecutable
    )
}

/// A tree entry whose blob identity differs between two commits.
///
/// Symlinks, submodules, and directories never appear here; an entry that
/// stopped being a regular file surfaces as a `Removal`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TreeChange {
    /// The target commit has a regular file at `path` with this blob id.
    Upsert { path: String, blob_id: Oid },
    /// The base commit had a regular file at `path` (with this blob id)
    /// that is gone, or no longer a regular file, in the target commit.
    Removal { path: String, blob_id: Oid },
}

/// An open git repository plus the object-store reads the indexer needs.
pub struct GitRepo {
    inner: git2::Repository,
}

impl GitRepo {
    pub fn open(path: &Path) -> Result<Self> {
        Ok(Self {
            inner: git2::Repository::open(path)?,
        })
    }

    /// Resolve a revision (commit hash, ref name, ...) to a commit id.
    pub fn resolve(&self, revision: &str) -> Result<Oid> {
        self.inner
            .revparse_single(revision)
            .and_then(|object| object.peel_to_commit())
            .map(|commit| commit.id())
            .map_err(|_| IndexError::RevisionNotFound(revision.to_string()))
    }

    /// Whether `oid` still names a commit present in the object store.
    pub fn has_commit(&self, oid: Oid) -> bool {
        self.inner.find_commit(oid).is_ok()
    }

    /// Object size from the ODB header, without loading the content.
    pub fn blob_size(&self, oid: Oid) -> Result<u64> {
        let (size, _) = self.inner.odb()?.read_header(oid)?;
        Ok(size as u64)
    }

    pub fn blob_bytes(&self, oid: Oid) -> Result<Vec<u8>> {
        Ok(self.inner.find_blob(oid)?.content().to_vec())
    }

    /// Walk the full tree of `commit`, calling `f` for every regular-file
    /// entry with its repo-relative path and blob id.
    pub fn walk_tree(&self, commit: Oid, mut f: impl FnMut(String, Oid)) -> Result<()> {
        let tree = self.inner.find_commit(commit)?.tree()?;
        tree.walk(TreeWalkMode::PreOrder, |dir, entry| {
            if entry.kind() == Some(ObjectType::Blob)
                && is_regular_file_mode(entry.filemode() as u32)
            {
                let name = entry.name().unwrap_or_default();
                // `dir` carries a trailing slash for non-root entries
                let path = if dir.is_empty() {
                    name.to_string()
                } else {
                    format!("{dir}{name}")
                };
                f(path, entry.id());
            }
            TreeWalkResult::Ok
        })?;
        Ok(())
    }

    /// Diff the trees of `base` and `target`, yielding only entries whose
    /// blob identity differs per path. Content is never compared.
    pub fn diff_trees(&self, base: Oid, target: Oid) -> Result<Vec<TreeChange>> {
        let base_tree = self.inner.find_commit(base)?.tree()?;
        let target_tree = self.inner.find_commit(target)?.tree()?;
        let diff = self
            .inner
            .diff_tree_to_tree(Some(&base_tree), Some(&target_tree), None)?;

        let mut changes = Vec::new();
        for delta in diff.deltas() {
            let new_file = delta.new_file();
            let old_file = delta.old_file();
            if is_regular_file(new_file.mode()) {
                if let Some(path) = new_file.path().and_then(Path::to_str) {
                    changes.push(TreeChange::Upsert {
                        path: path.to_string(),
                        blob_id: new_file.id(),
                    });
                }
            } else if is_regular_file(old_file.mode()) {
                if let Some(path) = old_file.path().and_then(Path::to_str) {
                    changes.push(TreeChange::Removal {
                        path: path.to_string(),
                        blob_id: old_file.id(),
                    });
                }
            }
        }
        Ok(changes)
    }
}
