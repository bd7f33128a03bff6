// ============================================================================
// Trade Reporter Interface
// Seam to the ledger inspector collaborator
// ============================================================================

use crate::domain::Transaction;

/// Receives the result of an inspection query over the ledger.
///
/// Batches arrive most recent first, already copied out from under the
/// ledger lock, so implementations may format or block freely.
pub trait TradeReporter: Send + Sync {
    fn on_recent_trades(&self, transactions: &[Transaction]);
}

/// No-op reporter for testing and headless runs.
pub struct NoOpTradeReporter;

impl TradeReporter for NoOpTradeReporter {
    fn on_recent_trades(&self, _transactions: &[Transaction]) {
        // Do nothing
    }
}

/// Logs one line per reported transaction.
pub struct LoggingTradeReporter;

impl TradeReporter for LoggingTradeReporter {
    fn on_recent_trades(&self, transactions: &[Transaction]) {
        if transactions.is_empty() {
            tracing::info!("no transactions settled yet");
            return;
        }
        for tx in transactions {
            tracing::info!(
                quantity = tx.quantity(),
                total_price = %tx.total_price(),
                timestamp = %tx.timestamp(),
                buyer = %tx.buyer(),
                seller = %tx.seller(),
                "settled transaction"
            );
        }
    }
}
