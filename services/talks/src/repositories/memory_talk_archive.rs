use super::{ArchiveError, TalkArchive};
use crate::services::talks::Talk;
use async_trait::async_trait;
use indexmap::IndexMap;
use std::sync::{Mutex, PoisonError};

/// Keep the talks in memory, nothing survives a restart.
#[derive(Default)]
pub struct MemoryTalkArchive {
    talks: Mutex<IndexMap<String, Talk>>,
}

impl MemoryTalkArchive {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn talks(&self) -> IndexMap<String, Talk> {
        self.talks.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }
}

#[async_trait]
impl TalkArchive for MemoryTalkArchive {
    async fn load(&self) -> Result<IndexMap<String, Talk>, ArchiveError> {
        Ok(self.talks())
    }

    async fn store(&self, talks: &[Talk]) -> Result<(), ArchiveError> {
        let talks = talks.iter().map(|talk| (talk.title.clone(), talk.clone())).collect();
        *self.talks.lock().unwrap_or_else(PoisonError::into_inner) = talks;
        Ok(())
    }
}
