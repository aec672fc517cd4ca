//! Shared fixtures: a scratch git repository plus an index manager rooted
//! in the same temp directory.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use tempfile::TempDir;

use crate::config::IndexConfig;
use crate::extractors::ExtractorRegistry;
use crate::indexing::{IndexListener, IndexManager};
use crate::repo::{Repository, Storage};
use crate::search::schema::SchemaFields;
use crate::search::store;

pub struct Fixture {
    _dir: TempDir,
    pub repo: Repository,
    pub git: git2::Repository,
    pub manager: IndexManager,
    pub config: IndexConfig,
    pub index_root: PathBuf,
}

impl Fixture {
    /// Open the fixture repository's index for reading.
    pub fn open_search(&self) -> (tantivy::Index, tantivy::Searcher, SchemaFields) {
        let dir = self.index_root.join(self.repo.id());
        let index = store::open_index(&dir, self.config.ngram_size).unwrap();
        let fields = SchemaFields::new(&index.schema());
        let searcher = index.reader().unwrap().searcher();
        (index, searcher, fields)
    }
}

pub fn fixture() -> Fixture {
    fixture_with(ExtractorRegistry::with_defaults(), IndexConfig::default())
}

pub fn fixture_with(registry: ExtractorRegistry, config: IndexConfig) -> Fixture {
    init_logging();
    let dir = TempDir::new().unwrap();
    let work = dir.path().join("repo");
    fs::create_dir_all(&work).unwrap();
    let git = git2::Repository::init(&work).unwrap();
    let index_root = dir.path().join("indexes");
    let manager = IndexManager::new(
        Storage::new(&index_root),
        Arc::new(registry),
        config.clone(),
    );
    let repo = Repository::new("test-repo", &work);
    Fixture {
        _dir: dir,
        repo,
        git,
        manager,
        config,
        index_root,
    }
}

/// Opt-in test logging: `RUST_LOG=gitdex=debug cargo test -- --nocapture`.
pub fn init_logging() {
    use tracing_subscriber::EnvFilter;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Write `files` into the working tree, stage everything, and commit.
/// Returns the commit hash.
pub fn commit_files(git: &git2::Repository, files: &[(&str, &str)]) -> String {
    let workdir = git.workdir().unwrap();
    for (path, contents) in files {
        let full = workdir.join(path);
        if let Some(parent) = full.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(full, contents).unwrap();
    }
    let mut index = git.index().unwrap();
    index
        .add_all(["*"], git2::IndexAddOption::DEFAULT, None)
        .unwrap();
    commit_staged(git, index)
}

/// Write a single file with raw bytes (for binary fixtures) and commit.
pub fn commit_file_bytes(git: &git2::Repository, path: &str, contents: &[u8]) -> String {
    let workdir = git.workdir().unwrap();
    fs::write(workdir.join(path), contents).unwrap();
    let mut index = git.index().unwrap();
    index.add_path(Path::new(path)).unwrap();
    commit_staged(git, index)
}

/// Remove `paths` from the working tree and the index, and commit.
pub fn commit_removal(git: &git2::Repository, paths: &[&str]) -> String {
    let workdir = git.workdir().unwrap();
    let mut index = git.index().unwrap();
    for path in paths {
        fs::remove_file(workdir.join(path)).unwrap();
        index.remove_path(Path::new(path)).unwrap();
    }
    commit_staged(git, index)
}

fn commit_staged(git: &git2::Repository, mut index: git2::Index) -> String {
    index.write().unwrap();
    let tree_id = index.write_tree().unwrap();
    let tree = git.find_tree(tree_id).unwrap();
    let signature = git2::Signature::now("tester", "tester@example.com").unwrap();
    let parent = git.head().ok().and_then(|head| head.peel_to_commit().ok());
    let parents: Vec<&git2::Commit> = parent.iter().collect();
    git.commit(Some("HEAD"), &signature, &signature, "commit", &tree, &parents)
        .unwrap()
        .to_string()
}

/// Listener recording every notification it receives.
#[derive(Default)]
pub struct RecordingListener {
    events: Mutex<Vec<String>>,
}

impl RecordingListener {
    pub fn events(&self) -> Vec<String> {
        self.events.lock().unwrap().clone()
    }
}

impl IndexListener for RecordingListener {
    fn commit_indexed(&self, repository: &Repository, revision: &str) {
        self.events
            .lock()
            .unwrap()
            .push(format!("indexed:{}:{}", repository.id(), revision));
    }

    fn index_removing(&self, repository: &Repository) {
        self.events
            .lock()
            .unwrap()
            .push(format!("removing:{}", repository.id()));
    }
}
