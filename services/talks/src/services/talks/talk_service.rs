use super::{Comment, Talk, TalkError, TalkSnapshot, TalkStore, WaitOutcome, WaiterId, WaiterRegistry};
use crate::repositories::ArchiveWriter;
use std::{
    sync::{Arc, Mutex, MutexGuard, PoisonError, Weak},
    time::Duration,
};
use tokio::sync::oneshot;

struct TalkState {
    store: TalkStore,
    snapshot: Arc<TalkSnapshot>,
    waiters: WaiterRegistry<Arc<TalkSnapshot>>,
}

struct Inner {
    state: Mutex<TalkState>,
    archive: ArchiveWriter,
    max_wait: Option<Duration>,
}

impl Inner {
    fn lock_state(&self) -> MutexGuard<'_, TalkState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Publish the current content of the store. It must be called after each effective mutation
    /// while the lock is still held, thus waiters and the archive see the versions in order.
    fn commit(&self, state: &mut TalkState) {
        let snapshot = Arc::new(state.store.snapshot());
        state.snapshot = snapshot.clone();
        let notified = state.waiters.notify_all(snapshot.clone());
        log::debug!("Talks changed to version {}, {notified} waiter(s) notified", snapshot.version);
        self.archive.store(snapshot);
    }
}

/// Result of a conditional listing.
pub enum TalkPoll {
    /// The client's version is outdated.
    Modified(Arc<TalkSnapshot>),
    /// The client is up to date and does not wait for a change.
    NotModified,
    /// The client waits for the next change.
    Pending(PendingChange),
}

/// A registered wait for the next change. Dropping it before completion releases the waiter.
pub struct PendingChange {
    id: WaiterId,
    receiver: oneshot::Receiver<WaitOutcome<Arc<TalkSnapshot>>>,
    service: Weak<Inner>,
}

impl PendingChange {
    /// Wait for the change, `None` when the wait timed out.
    pub async fn changed(mut self) -> Option<Arc<TalkSnapshot>> {
        match (&mut self.receiver).await {
            Ok(WaitOutcome::Changed(snapshot)) => Some(snapshot),
            Ok(WaitOutcome::TimedOut) => None,
            Err(_) => {
                log::warn!("Waiter {} was released without resolution", self.id);
                None
            }
        }
    }
}

impl Drop for PendingChange {
    fn drop(&mut self) {
        if let Some(service) = self.service.upgrade() {
            service.lock_state().waiters.cancel(self.id);
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TalkStatus {
    pub version: u64,
    pub talk_count: usize,
    pub pending_waiters: usize,
}

/// The talk store with change notification.
///
/// Store, the last snapshot and the waiters share a single lock. The lock is never held across an await.
#[derive(Clone)]
pub struct TalkService(Arc<Inner>);

impl TalkService {
    /// Create the service. The waits of the long-polls are limited to `max_wait` if given.
    pub fn new(store: TalkStore, archive: ArchiveWriter, max_wait: Option<Duration>) -> Self {
        let snapshot = Arc::new(store.snapshot());
        Self(Arc::new(Inner {
            state: Mutex::new(TalkState {
                store,
                snapshot,
                waiters: WaiterRegistry::new(),
            }),
            archive,
            max_wait,
        }))
    }

    pub fn version(&self) -> u64 {
        self.0.lock_state().store.version()
    }

    pub fn snapshot(&self) -> Arc<TalkSnapshot> {
        self.0.lock_state().snapshot.clone()
    }

    pub fn status(&self) -> TalkStatus {
        let state = self.0.lock_state();
        TalkStatus {
            version: state.store.version(),
            talk_count: state.store.len(),
            pending_waiters: state.waiters.len(),
        }
    }

    pub fn get_talk(&self, title: &str) -> Option<Talk> {
        self.0.lock_state().store.get(title).cloned()
    }

    /// Create or replace a talk. Returns false if the talk was already present with the same content.
    pub fn put_talk(&self, title: &str, presenter: &str, summary: &str) -> bool {
        let mut state = self.0.lock_state();
        let changed = state.store.put(title, presenter, summary);
        if changed {
            self.0.commit(&mut state);
        }
        changed
    }

    /// Delete a talk. Returns false if there was no such talk.
    pub fn delete_talk(&self, title: &str) -> bool {
        let mut state = self.0.lock_state();
        let changed = state.store.delete(title);
        if changed {
            self.0.commit(&mut state);
        }
        changed
    }

    pub fn add_comment(&self, title: &str, comment: Comment) -> Result<(), TalkError> {
        let mut state = self.0.lock_state();
        if state.store.add_comment(title, comment) {
            self.0.commit(&mut state);
            Ok(())
        } else {
            Err(TalkError::TalkNotFound(title.to_owned()))
        }
    }

    /// Conditional listing of the talks.
    ///
    /// The `tag` is the version the client has seen, compared as a string to the current version.
    /// When the client is up to date and `wait` is given, a waiter is registered in the same step,
    /// no change can be missed between the check and the registration.
    pub fn poll(&self, tag: Option<&str>, wait: Option<Duration>) -> TalkPoll {
        let mut state = self.0.lock_state();

        let current = state.store.version().to_string();
        if tag != Some(current.as_str()) {
            return TalkPoll::Modified(state.snapshot.clone());
        }

        let wait = match (wait, self.0.max_wait) {
            (None, _) => return TalkPoll::NotModified,
            (Some(wait), Some(max_wait)) => wait.min(max_wait),
            (Some(wait), None) => wait,
        };

        let (id, receiver) = state.waiters.register();
        let service = Arc::downgrade(&self.0);
        let timer = tokio::spawn(async move {
            tokio::time::sleep(wait).await;
            if let Some(service) = service.upgrade() {
                service.lock_state().waiters.expire(id);
            }
        });
        state.waiters.arm(id, timer.abort_handle());
        log::debug!("Waiter {id} registered for {wait:?} at version {current}");

        TalkPoll::Pending(PendingChange {
            id,
            receiver,
            service: Arc::downgrade(&self.0),
        })
    }

    /// Wait until the latest change is persisted.
    pub async fn flush(&self) {
        self.0.archive.flush().await
    }
}

#[cfg(test)]
#[path = "./talk_service_test.rs"]
mod talk_service_test;
