// ============================================================================
// Transaction Ledger
// Append-only, time-ordered store of settled transactions
// ============================================================================

use parking_lot::Mutex;
use std::sync::Arc;

use super::Transaction;

/// Append-only store of settled transactions.
///
/// Insertion order is chronological order; entries are never mutated or
/// removed once appended. Bounded "most recent" queries back the inspection
/// commands of the input stream.
#[derive(Debug, Default, Clone)]
pub struct TransactionLedger {
    entries: Vec<Transaction>,
}

impl TransactionLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, transaction: Transaction) {
        self.entries.push(transaction);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The `n` most recently appended transactions, most recent first.
    /// `n` is clamped to the ledger size.
    pub fn last_n(&self, n: usize) -> Vec<Transaction> {
        self.entries.iter().rev().take(n).cloned().collect()
    }

    /// Every transaction in append order, for the persistence gateway.
    pub fn export_transactions(&self) -> Vec<Transaction> {
        self.entries.clone()
    }

    /// Bulk-load transactions in their original append order. Process start
    /// only; never called during steady-state operation.
    pub fn import_transactions(&mut self, transactions: impl IntoIterator<Item = Transaction>) {
        self.entries.extend(transactions);
    }
}

/// The ledger is written by the matching actor and read concurrently by the
/// input actor (inspection queries), so it travels behind its own lock,
/// separate from the work queue. Lock scope stays minimal: acquire around
/// the append or the `last_n` copy, format outside.
pub type SharedLedger = Arc<Mutex<TransactionLedger>>;
