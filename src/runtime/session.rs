// ============================================================================
// Exchange Session
// Input and matching actors over a bounded work queue
// ============================================================================

use chrono::Utc;
use crossbeam::channel::{self, Receiver, Sender};
use parking_lot::Mutex;
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use crate::domain::{
    Command, ExchangeConfig, OrderBook, OrderRequest, SharedLedger, TransactionLedger,
};
use crate::engine::execute_crossings;
use crate::interfaces::{CommandSource, SnapshotSink, TradeReporter};

use super::publisher::{PublishHandle, SnapshotPublisher};

/// A running exchange: the input actor, the matching actor, and the
/// snapshot publisher, wired over a bounded FIFO channel.
///
/// Shutdown is cooperative. The input actor exits on `Terminate` (or source
/// exhaustion) and drops its sender; the disconnected channel is the
/// termination signal, and the matching actor keeps draining until the
/// queue is empty, so no accepted submission is ever lost. There is no
/// per-order cancel and no preemption.
pub struct ExchangeSession {
    input: JoinHandle<()>,
    matcher: JoinHandle<OrderBook>,
    publisher: SnapshotPublisher,
    ledger: SharedLedger,
}

impl ExchangeSession {
    /// Spawn both actors and the publisher worker.
    ///
    /// The book and ledger move into the session; `join` hands them back
    /// for the shutdown save.
    pub fn spawn<S>(
        config: ExchangeConfig,
        book: OrderBook,
        ledger: TransactionLedger,
        source: S,
        reporter: Arc<dyn TradeReporter>,
        sink: Box<dyn SnapshotSink>,
    ) -> Self
    where
        S: CommandSource + Send + 'static,
    {
        let ledger: SharedLedger = Arc::new(Mutex::new(ledger));
        let (sender, receiver) = channel::bounded(config.queue_capacity);
        let publisher = SnapshotPublisher::spawn(sink);

        let input = {
            let ledger = Arc::clone(&ledger);
            let inspect_depth = config.inspect_depth;
            thread::Builder::new()
                .name("exchange-input".into())
                .spawn(move || input_loop(source, sender, ledger, reporter, inspect_depth))
                .expect("failed to spawn input actor")
        };

        let matcher = {
            let ledger = Arc::clone(&ledger);
            let publish = publisher.handle();
            thread::Builder::new()
                .name("exchange-matcher".into())
                .spawn(move || matcher_loop(book, receiver, ledger, publish))
                .expect("failed to spawn matching actor")
        };

        Self {
            input,
            matcher,
            publisher,
            ledger,
        }
    }

    /// Read access to the ledger while the session runs, for embedders that
    /// inspect outside the command stream.
    pub fn ledger(&self) -> SharedLedger {
        Arc::clone(&self.ledger)
    }

    /// Wait for both actors to finish, shut the publisher down, and return
    /// the final book and ledger for the shutdown save.
    pub fn join(self) -> (OrderBook, TransactionLedger) {
        self.input.join().expect("input actor panicked");
        let book = self.matcher.join().expect("matching actor panicked");
        self.publisher.shutdown();
        let ledger = Arc::try_unwrap(self.ledger)
            .map(Mutex::into_inner)
            .unwrap_or_else(|shared| shared.lock().clone());
        (book, ledger)
    }
}

// ============================================================================
// Actor loops
// ============================================================================

/// Input actor: read a command, dispatch or report it, repeat. A
/// `Terminate` command (or source exhaustion) finishes the loop.
fn input_loop(
    mut source: impl CommandSource,
    sender: Sender<OrderRequest>,
    ledger: SharedLedger,
    reporter: Arc<dyn TradeReporter>,
    inspect_depth: usize,
) {
    while let Some(command) = source.next_command() {
        match command {
            Command::Submit(request) => {
                // A closed receiver means the matcher is gone; stop feeding.
                if sender.send(request).is_err() {
                    break;
                }
            }
            Command::Inspect => {
                // Copy under the ledger lock, report outside it.
                let recent = ledger.lock().last_n(inspect_depth);
                reporter.on_recent_trades(&recent);
            }
            Command::Terminate => break,
        }
    }
    // Dropping the sender signals termination; the matcher still drains
    // everything already queued.
    drop(sender);
    tracing::debug!("input actor finished");
}

/// Matching actor: block for work, apply it to the book, run the crossing
/// loop, append settlements, republish the top of book. Exits only once the
/// channel is disconnected *and* drained.
fn matcher_loop(
    mut book: OrderBook,
    receiver: Receiver<OrderRequest>,
    ledger: SharedLedger,
    publish: PublishHandle,
) -> OrderBook {
    for request in receiver.iter() {
        // One instant per triggering command; every settlement of this pass
        // carries it.
        let timestamp = Utc::now();
        let side = request.side();
        book.insert(side, request.into_order(timestamp));

        let transactions = execute_crossings(&mut book, timestamp);
        if !transactions.is_empty() {
            let mut ledger = ledger.lock();
            for transaction in transactions {
                ledger.append(transaction);
            }
        }

        publish.publish(book.top_of_book());
    }
    tracing::debug!("matching actor drained and finished");
    book
}
