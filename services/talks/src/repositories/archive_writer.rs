use super::TalkArchive;
use crate::services::talks::TalkSnapshot;
use std::sync::Arc;
use tokio::sync::watch;

/// Write-behind persistence of the talk snapshots.
///
/// Snapshots are handed over without waiting and a single task stores them in order. Snapshots
/// arriving during a write are coalesced and only the latest one is stored. Failures are logged only.
pub struct ArchiveWriter {
    snapshot: watch::Sender<Arc<TalkSnapshot>>,
    written: watch::Receiver<u64>,
}

impl ArchiveWriter {
    /// Start the writer task. The initial snapshot is considered to be stored already.
    pub fn spawn(archive: Arc<dyn TalkArchive>, initial: Arc<TalkSnapshot>) -> Self {
        let (written_sender, written) = watch::channel(initial.version);
        let (snapshot, mut snapshot_receiver) = watch::channel(initial);

        tokio::spawn(async move {
            while snapshot_receiver.changed().await.is_ok() {
                let snapshot = snapshot_receiver.borrow_and_update().clone();
                match archive.store(&snapshot.talks).await {
                    Ok(()) => log::debug!("Talks of version {} archived", snapshot.version),
                    Err(err) => log::error!("Failed to archive talks of version {}: {err:#?}", snapshot.version),
                }
                written_sender.send_replace(snapshot.version);
            }
            log::debug!("Archive writer stopped");
        });

        Self { snapshot, written }
    }

    pub fn store(&self, snapshot: Arc<TalkSnapshot>) {
        self.snapshot.send_replace(snapshot);
    }

    /// Wait until the latest snapshot has been processed.
    pub async fn flush(&self) {
        let target = self.snapshot.borrow().version;
        let mut written = self.written.clone();
        if written.wait_for(|version| *version >= target).await.is_err() {
            log::warn!("Archive writer is not running");
        }
    }
}

#[cfg(test)]
#[path = "./archive_writer_test.rs"]
mod archive_writer_test;
