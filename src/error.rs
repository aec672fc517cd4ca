use thiserror::Error;

#[derive(Debug, Error)]
pub enum IndexError {
    #[error("revision '{0}' does not resolve to a commit")]
    RevisionNotFound(String),

    #[error("git error: {0}")]
    Git(#[from] git2::Error),

    #[error("search index error: {0}")]
    Search(#[from] tantivy::TantivyError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, IndexError>;
