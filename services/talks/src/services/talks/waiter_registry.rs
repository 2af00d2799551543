use std::collections::HashMap;
use tokio::{sync::oneshot, task::AbortHandle};

pub type WaiterId = u64;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WaitOutcome<T> {
    Changed(T),
    TimedOut,
}

struct Waiter<T> {
    sender: oneshot::Sender<WaitOutcome<T>>,
    timer: Option<AbortHandle>,
}

impl<T> Waiter<T> {
    fn resolve(self, outcome: WaitOutcome<T>) -> bool {
        if let Some(timer) = self.timer {
            timer.abort();
        }
        self.sender.send(outcome).is_ok()
    }
}

/// Pending change requests.
///
/// A waiter is resolved at most once: each operation removes the entry before it is fired,
/// thus a racing expiry or notification finds nothing to do.
pub struct WaiterRegistry<T> {
    next_id: WaiterId,
    waiters: HashMap<WaiterId, Waiter<T>>,
}

impl<T> Default for WaiterRegistry<T> {
    fn default() -> Self {
        Self {
            next_id: 0,
            waiters: HashMap::new(),
        }
    }
}

impl<T> WaiterRegistry<T>
where
    T: Clone,
{
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.waiters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.waiters.is_empty()
    }

    pub fn register(&mut self) -> (WaiterId, oneshot::Receiver<WaitOutcome<T>>) {
        let id = self.next_id;
        self.next_id += 1;

        let (sender, receiver) = oneshot::channel();
        self.waiters.insert(id, Waiter { sender, timer: None });
        (id, receiver)
    }

    /// Attach the timeout task to a waiter. If the waiter is already gone, the timer is aborted.
    pub fn arm(&mut self, id: WaiterId, timer: AbortHandle) -> bool {
        match self.waiters.get_mut(&id) {
            Some(waiter) => {
                waiter.timer = Some(timer);
                true
            }
            None => {
                timer.abort();
                false
            }
        }
    }

    /// Resolve the waiter with a timeout. Returns false if the waiter was resolved or cancelled earlier.
    pub fn expire(&mut self, id: WaiterId) -> bool {
        match self.waiters.remove(&id) {
            Some(waiter) => {
                log::trace!("Waiter {id} timed out");
                waiter.resolve(WaitOutcome::TimedOut);
                true
            }
            None => false,
        }
    }

    /// Remove the waiter without resolving it.
    pub fn cancel(&mut self, id: WaiterId) -> bool {
        match self.waiters.remove(&id) {
            Some(waiter) => {
                log::trace!("Waiter {id} cancelled");
                if let Some(timer) = waiter.timer {
                    timer.abort();
                }
                true
            }
            None => false,
        }
    }

    /// Resolve all the current waiters with the value. Returns the number of the waiters that
    /// were still listening.
    pub fn notify_all(&mut self, value: T) -> usize {
        let waiters = std::mem::take(&mut self.waiters);
        log::debug!("Notifying {} waiter(s)", waiters.len());

        waiters
            .into_values()
            .map(|waiter| waiter.resolve(WaitOutcome::Changed(value.clone())))
            .filter(|delivered| *delivered)
            .count()
    }
}

#[cfg(test)]
#[path = "./waiter_registry_test.rs"]
mod waiter_registry_test;
