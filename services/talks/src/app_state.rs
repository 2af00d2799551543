use crate::{
    app_config::AppConfig,
    repositories::{ArchiveWriter, FileTalkArchive, MemoryTalkArchive, TalkArchive},
    services::talks::{TalkService, TalkStore},
};
use anyhow::Error as AnyError;
use skillshare_infra::web::WebAppConfig;
use std::{sync::Arc, time::Duration};

struct Inner {
    talks: TalkService,
}

#[derive(Clone)]
pub struct AppState(Arc<Inner>);

impl AppState {
    pub async fn new(config: &WebAppConfig<AppConfig>) -> Result<Self, AnyError> {
        let config_talks = &config.feature;

        let archive: Arc<dyn TalkArchive> = match &config_talks.storage_path {
            Some(path) => {
                log::info!("Talks are stored in {path}");
                Arc::new(FileTalkArchive::new(path))
            }
            None => {
                log::warn!("No storage path, talks are kept in memory only");
                Arc::new(MemoryTalkArchive::new())
            }
        };

        Ok(Self::from_archive(archive, config_talks.max_wait()).await)
    }

    /// Create the state from the archived talks. A failing load is logged and the service starts empty.
    pub async fn from_archive(archive: Arc<dyn TalkArchive>, max_wait: Option<Duration>) -> Self {
        let talks = match archive.load().await {
            Ok(talks) => talks,
            Err(err) => {
                log::error!("Failed to load the talks, starting with none: {err:#?}");
                Default::default()
            }
        };

        let store = TalkStore::from_talks(talks);
        let writer = ArchiveWriter::spawn(archive, Arc::new(store.snapshot()));

        Self(Arc::new(Inner {
            talks: TalkService::new(store, writer, max_wait),
        }))
    }

    pub fn talks(&self) -> &TalkService {
        &self.0.talks
    }
}
