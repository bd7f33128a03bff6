// ============================================================================
// Exchange Engine Library
// Price-time priority matching core with a producer/consumer runtime
// ============================================================================

//! # Exchange Engine
//!
//! A single-process exchange matching core: validated commands stream in
//! from one producer, a price-time-priority order book matches crossing
//! orders into settled transactions, and the best bid/offer is republished
//! after every pass.
//!
//! ## Features
//!
//! - **Price-time priority** order book built on a binary heap per side
//! - **Continuous crossing** with full and partial fills, always at the
//!   resting seller's price
//! - **Two-actor runtime** over a bounded FIFO channel with cooperative,
//!   drain-to-completion shutdown
//! - **Non-blocking snapshot publication** through a latest-only mailbox
//!   and a dedicated writer thread
//! - **Best-effort flat-file persistence** at process start and stop
//!
//! ## Example
//!
//! ```rust
//! use exchange_engine::prelude::*;
//! use rust_decimal::Decimal;
//! use std::sync::Arc;
//!
//! let source = ScriptedSource::new([
//!     Command::Submit(
//!         OrderRequest::new(Side::Sell, "maker".into(), Decimal::from(500), 5).unwrap(),
//!     ),
//!     Command::Submit(
//!         OrderRequest::new(Side::Buy, "taker".into(), Decimal::from(200), 2).unwrap(),
//!     ),
//!     Command::Terminate,
//! ]);
//!
//! let session = ExchangeSession::spawn(
//!     ExchangeConfig::default(),
//!     OrderBook::new(),
//!     TransactionLedger::new(),
//!     source,
//!     Arc::new(NoOpTradeReporter),
//!     Box::new(NoOpSnapshotSink),
//! );
//!
//! let (book, ledger) = session.join();
//! assert_eq!(ledger.len(), 1);
//! assert_eq!(book.peek_best_sell().map(|order| order.quantity()), Some(3));
//! ```

pub mod domain;
pub mod engine;
pub mod interfaces;
pub mod persistence;
pub mod runtime;

// Re-exports for convenience
pub mod prelude {
    pub use crate::domain::{
        Command, CommandError, ExchangeConfig, Order, OrderBook, OrderRequest, SharedLedger,
        Side, TopOfBook, TraderId, Transaction, TransactionLedger,
    };
    pub use crate::engine::execute_crossings;
    pub use crate::interfaces::{
        render_top_of_book, CommandSource, FileSnapshotSink, LoggingTradeReporter,
        NoOpSnapshotSink, NoOpTradeReporter, ScriptedSource, SnapshotSink, TradeReporter,
    };
    pub use crate::persistence::FileStore;
    pub use crate::runtime::ExchangeSession;
}
