use crate::services::talks::Talk;
use async_trait::async_trait;
use indexmap::IndexMap;
use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum ArchiveError {
    #[error("Archive io error")]
    Io(#[from] std::io::Error),
    #[error("Archive content is not valid")]
    Json(#[from] serde_json::Error),
}

/// Persistent storage of the talks, keyed by the title.
#[async_trait]
pub trait TalkArchive: Send + Sync {
    /// Load the stored talks, an empty map if nothing was stored yet.
    async fn load(&self) -> Result<IndexMap<String, Talk>, ArchiveError>;

    /// Replace the stored content with the talks.
    async fn store(&self, talks: &[Talk]) -> Result<(), ArchiveError>;
}
