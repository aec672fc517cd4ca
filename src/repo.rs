//! Repository handles and index directory layout.

use std::path::{Path, PathBuf};

/// Handle to a version-controlled project.
///
/// Repositories are created and removed by the surrounding hosting
/// subsystem; the indexer only needs a stable id (used for lock naming and
/// index directory naming) and the location of the git repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Repository {
    id: String,
    git_dir: PathBuf,
}

impl Repository {
    pub fn new(id: impl Into<String>, git_dir: impl Into<PathBuf>) -> Self {
        Self {
            id: id.into(),
            git_dir: git_dir.into(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn git_dir(&self) -> &Path {
        &self.git_dir
    }
}

/// Maps repositories to their on-disk index directories.
///
/// Each repository owns exactly one index, at `<root>/<repository id>`.
#[derive(Debug, Clone)]
pub struct Storage {
    root: PathBuf,
}

impl Storage {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn index_dir(&self, repository: &Repository) -> PathBuf {
        self.root.join(repository.id())
    }
}
