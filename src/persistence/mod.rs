// ============================================================================
// Persistence Gateway
// Best-effort flat-file load/save at process start and stop
// ============================================================================

use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};

use crate::domain::{Order, OrderBook, Side, TransactionLedger};

// ============================================================================
// Errors
// ============================================================================

/// Failures raised by the flat-file gateway.
///
/// None of these abort the process: load failures leave the affected
/// collection empty, save failures leave the previous file contents alone,
/// and both are surfaced to the operator as warnings.
#[derive(Debug)]
pub enum PersistenceError {
    Io(io::Error),
    Encoding(serde_json::Error),
}

impl fmt::Display for PersistenceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PersistenceError::Io(error) => write!(f, "storage i/o failure: {error}"),
            PersistenceError::Encoding(error) => {
                write!(f, "storage encoding failure: {error}")
            }
        }
    }
}

impl std::error::Error for PersistenceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PersistenceError::Io(error) => Some(error),
            PersistenceError::Encoding(error) => Some(error),
        }
    }
}

impl From<io::Error> for PersistenceError {
    fn from(error: io::Error) -> Self {
        PersistenceError::Io(error)
    }
}

impl From<serde_json::Error> for PersistenceError {
    fn from(error: serde_json::Error) -> Self {
        PersistenceError::Encoding(error)
    }
}

// ============================================================================
// Stored records
// ============================================================================

/// One resting order as stored on disk, tagged with its side.
#[derive(Debug, Serialize, Deserialize)]
struct StoredOrder {
    side: Side,
    #[serde(flatten)]
    order: Order,
}

// ============================================================================
// File Store
// ============================================================================

/// JSON Lines storage for the order book and the transaction ledger.
///
/// Used only at process start (load) and stop (save); steady-state
/// operation never touches these files. A missing or unreadable file yields
/// an empty collection, a malformed line is skipped, and every failure is a
/// warning rather than an error.
#[derive(Debug, Clone)]
pub struct FileStore {
    orders_path: PathBuf,
    transactions_path: PathBuf,
}

impl FileStore {
    pub fn new(orders_path: impl Into<PathBuf>, transactions_path: impl Into<PathBuf>) -> Self {
        Self {
            orders_path: orders_path.into(),
            transactions_path: transactions_path.into(),
        }
    }

    /// Load the resting orders, or an empty book when the file is absent or
    /// unreadable.
    pub fn load_book(&self) -> OrderBook {
        let mut book = OrderBook::new();
        match read_lines(&self.orders_path) {
            Ok(lines) => {
                for line in lines {
                    match serde_json::from_str::<StoredOrder>(&line) {
                        Ok(stored) => book.insert(stored.side, stored.order),
                        Err(error) => tracing::warn!(
                            %error,
                            path = %self.orders_path.display(),
                            "skipping malformed order record"
                        ),
                    }
                }
            }
            Err(error) => tracing::warn!(
                %error,
                path = %self.orders_path.display(),
                "could not load orders; starting with an empty book"
            ),
        }
        book
    }

    /// Load the settled transactions, or an empty ledger when the file is
    /// absent or unreadable.
    pub fn load_ledger(&self) -> TransactionLedger {
        let mut ledger = TransactionLedger::new();
        match read_lines(&self.transactions_path) {
            Ok(lines) => {
                for line in lines {
                    match serde_json::from_str(&line) {
                        Ok(transaction) => ledger.append(transaction),
                        Err(error) => tracing::warn!(
                            %error,
                            path = %self.transactions_path.display(),
                            "skipping malformed transaction record"
                        ),
                    }
                }
            }
            Err(error) => tracing::warn!(
                %error,
                path = %self.transactions_path.display(),
                "could not load transactions; starting with an empty ledger"
            ),
        }
        ledger
    }

    /// Persist the resting orders, sells first, each side in priority
    /// order. Warns and keeps the previous contents on failure.
    pub fn save_book(&self, book: &OrderBook) {
        let records = book
            .export_orders()
            .into_iter()
            .map(|(side, order)| StoredOrder { side, order });
        if let Err(error) = save_records(&self.orders_path, records) {
            tracing::warn!(
                %error,
                path = %self.orders_path.display(),
                "could not save order book"
            );
        }
    }

    /// Persist the ledger in append order. Warns on failure.
    pub fn save_ledger(&self, ledger: &TransactionLedger) {
        if let Err(error) = save_records(&self.transactions_path, ledger.export_transactions()) {
            tracing::warn!(
                %error,
                path = %self.transactions_path.display(),
                "could not save transaction ledger"
            );
        }
    }
}

fn read_lines(path: &Path) -> Result<Vec<String>, PersistenceError> {
    let file = fs::File::open(path)?;
    let mut lines = Vec::new();
    for line in BufReader::new(file).lines() {
        let line = line?;
        if !line.trim().is_empty() {
            lines.push(line);
        }
    }
    Ok(lines)
}

fn save_records<T: Serialize>(
    path: &Path,
    records: impl IntoIterator<Item = T>,
) -> Result<(), PersistenceError> {
    let mut contents = String::new();
    for record in records {
        contents.push_str(&serde_json::to_string(&record)?);
        contents.push('\n');
    }
    fs::write(path, contents)?;
    Ok(())
}
