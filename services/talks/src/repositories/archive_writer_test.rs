use crate::{
    repositories::{ArchiveError, ArchiveWriter, MemoryTalkArchive, TalkArchive},
    services::talks::{Talk, TalkSnapshot},
};
use async_trait::async_trait;
use indexmap::IndexMap;
use skillshare_test::test;
use std::sync::Arc;

fn snapshot(version: u64, titles: &[&str]) -> Arc<TalkSnapshot> {
    Arc::new(TalkSnapshot {
        version,
        talks: titles
            .iter()
            .map(|title| Talk {
                title: title.to_string(),
                presenter: "Ann".into(),
                summary: "Basics".into(),
                comments: vec![],
            })
            .collect(),
    })
}

#[test]
async fn latest_snapshot_is_stored() {
    let archive = Arc::new(MemoryTalkArchive::new());
    let writer = ArchiveWriter::spawn(archive.clone(), snapshot(0, &[]));

    writer.store(snapshot(1, &["A"]));
    writer.store(snapshot(2, &["A", "B"]));
    writer.store(snapshot(3, &["B"]));
    writer.flush().await;

    let titles: Vec<_> = archive.talks().keys().cloned().collect();
    assert_eq!(titles, ["B"]);
}

#[test]
async fn flush_without_changes() {
    let archive = Arc::new(MemoryTalkArchive::new());
    let writer = ArchiveWriter::spawn(archive.clone(), snapshot(5, &["A"]));
    writer.flush().await;

    // the initial snapshot is not written back
    assert!(archive.talks().is_empty());
}

struct FailingArchive;

#[async_trait]
impl TalkArchive for FailingArchive {
    async fn load(&self) -> Result<IndexMap<String, Talk>, ArchiveError> {
        Ok(IndexMap::new())
    }

    async fn store(&self, _talks: &[Talk]) -> Result<(), ArchiveError> {
        Err(std::io::Error::other("disk full").into())
    }
}

#[test]
async fn failures_do_not_stop_the_writer() {
    let writer = ArchiveWriter::spawn(Arc::new(FailingArchive), snapshot(0, &[]));

    writer.store(snapshot(1, &["A"]));
    writer.flush().await;
    writer.store(snapshot(2, &["A", "B"]));
    writer.flush().await;
}
