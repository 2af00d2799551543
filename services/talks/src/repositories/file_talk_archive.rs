use super::{ArchiveError, TalkArchive};
use crate::services::talks::Talk;
use async_trait::async_trait;
use indexmap::IndexMap;
use std::{io::ErrorKind, path::PathBuf};
use tokio::fs;

/// Store the talks in a single json file as an object mapping the title to the talk.
pub struct FileTalkArchive {
    path: PathBuf,
}

impl FileTalkArchive {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

#[async_trait]
impl TalkArchive for FileTalkArchive {
    async fn load(&self) -> Result<IndexMap<String, Talk>, ArchiveError> {
        let content = match fs::read(&self.path).await {
            Ok(content) => content,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                log::info!("No talk archive at {}", self.path.display());
                return Ok(IndexMap::new());
            }
            Err(err) => return Err(err.into()),
        };

        let talks: IndexMap<String, Talk> = serde_json::from_slice(&content)?;
        log::info!("Loaded {} talk(s) from {}", talks.len(), self.path.display());
        Ok(talks)
    }

    async fn store(&self, talks: &[Talk]) -> Result<(), ArchiveError> {
        let content: IndexMap<&str, &Talk> = talks.iter().map(|talk| (talk.title.as_str(), talk)).collect();
        let content = serde_json::to_vec(&content)?;

        let temp_path = self.temp_path();
        fs::write(&temp_path, content).await?;
        fs::rename(&temp_path, &self.path).await?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "./file_talk_archive_test.rs"]
mod file_talk_archive_test;
