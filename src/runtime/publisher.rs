// ============================================================================
// Snapshot Publisher
// Single-slot latest-snapshot mailbox drained by a background writer
// ============================================================================

use parking_lot::{Condvar, Mutex};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use crate::domain::TopOfBook;
use crate::interfaces::SnapshotSink;

/// Mailbox state. Only the newest snapshot matters, so a pending value is
/// simply replaced; the worker can never fall arbitrarily behind and no
/// backlog of stale writes accumulates under sustained load.
#[derive(Default)]
struct MailboxState {
    slot: Option<TopOfBook>,
    closed: bool,
}

struct Mailbox {
    state: Mutex<MailboxState>,
    available: Condvar,
}

/// Cloneable handle used by the matching actor to hand off snapshots.
#[derive(Clone)]
pub struct PublishHandle {
    mailbox: Arc<Mailbox>,
}

impl PublishHandle {
    /// Replace the pending snapshot. Costs one brief mailbox lock; sink
    /// latency never reaches the caller.
    pub fn publish(&self, top: TopOfBook) {
        let mut state = self.mailbox.state.lock();
        state.slot = Some(top);
        self.mailbox.available.notify_one();
    }
}

/// Owns the background writer thread and, through it, the sink.
pub struct SnapshotPublisher {
    mailbox: Arc<Mailbox>,
    worker: Option<JoinHandle<()>>,
}

impl SnapshotPublisher {
    /// Spawn the writer thread. The sink moves into the worker, which
    /// serializes all writes by being its only user.
    pub fn spawn(sink: Box<dyn SnapshotSink>) -> Self {
        let mailbox = Arc::new(Mailbox {
            state: Mutex::new(MailboxState::default()),
            available: Condvar::new(),
        });
        let worker_mailbox = Arc::clone(&mailbox);
        let worker = thread::Builder::new()
            .name("snapshot-publisher".into())
            .spawn(move || worker_loop(worker_mailbox, sink))
            .expect("failed to spawn snapshot publisher thread");

        Self {
            mailbox,
            worker: Some(worker),
        }
    }

    pub fn handle(&self) -> PublishHandle {
        PublishHandle {
            mailbox: Arc::clone(&self.mailbox),
        }
    }

    /// Close the mailbox and wait for the worker. A snapshot still pending
    /// at shutdown is flushed before the worker exits.
    pub fn shutdown(self) {
        // Dropping closes the mailbox and joins the worker.
    }
}

impl Drop for SnapshotPublisher {
    fn drop(&mut self) {
        {
            let mut state = self.mailbox.state.lock();
            state.closed = true;
            self.mailbox.available.notify_one();
        }
        if let Some(worker) = self.worker.take() {
            let _ = worker.join();
        }
    }
}

fn worker_loop(mailbox: Arc<Mailbox>, mut sink: Box<dyn SnapshotSink>) {
    loop {
        let next = {
            let mut state = mailbox.state.lock();
            loop {
                if let Some(top) = state.slot.take() {
                    break Some(top);
                }
                if state.closed {
                    break None;
                }
                mailbox.available.wait(&mut state);
            }
        };
        match next {
            Some(top) => {
                if let Err(error) = sink.publish(&top) {
                    tracing::warn!(%error, "failed to publish top-of-book snapshot");
                }
            }
            None => break,
        }
    }
}
