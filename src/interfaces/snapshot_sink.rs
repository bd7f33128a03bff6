// ============================================================================
// Snapshot Sink Interface
// Seam for best-bid/best-ask publication
// ============================================================================

use std::io;
use std::path::PathBuf;

use crate::domain::{Order, TopOfBook};

/// Consumes top-of-book snapshots.
///
/// The publisher's worker thread owns the sink exclusively, so writes are
/// serialized by construction; implementations only need to be `Send`.
pub trait SnapshotSink: Send {
    fn publish(&mut self, top: &TopOfBook) -> io::Result<()>;
}

/// Render a snapshot in the published two-line form: the best order on each
/// side as `quantity pricePerUnit timestamp ownerId` (timestamp in unix
/// seconds), or a fixed sentinel when the side is empty. The buy line comes
/// first.
pub fn render_top_of_book(top: &TopOfBook) -> String {
    format!(
        "Top Buy Order: {}\nTop Sell Order: {}\n",
        render_side(top.best_buy.as_ref(), "No Buy Orders"),
        render_side(top.best_sell.as_ref(), "No Sell Orders"),
    )
}

fn render_side(order: Option<&Order>, sentinel: &str) -> String {
    match order {
        Some(order) => format!(
            "{} {} {} {}",
            order.quantity(),
            order.price_per_unit(),
            order.timestamp().timestamp(),
            order.owner(),
        ),
        None => sentinel.to_string(),
    }
}

/// Writes each snapshot to a file with full-overwrite semantics: the file
/// always holds exactly the latest published state, never an appended
/// history.
pub struct FileSnapshotSink {
    path: PathBuf,
}

impl FileSnapshotSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl SnapshotSink for FileSnapshotSink {
    fn publish(&mut self, top: &TopOfBook) -> io::Result<()> {
        std::fs::write(&self.path, render_top_of_book(top))
    }
}

/// Discards snapshots, for tests and headless runs.
pub struct NoOpSnapshotSink;

impl SnapshotSink for NoOpSnapshotSink {
    fn publish(&mut self, _top: &TopOfBook) -> io::Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{OrderBook, TraderId};
    use chrono::{TimeZone, Utc};
    use rust_decimal::Decimal;

    #[test]
    fn test_render_with_orders() {
        let mut book = OrderBook::new();
        book.insert_buy(Order::from_parts(
            2,
            Decimal::from(50),
            Utc.timestamp_opt(1_700_000_000, 0).unwrap(),
            TraderId::from("alice"),
        ));

        let rendered = render_top_of_book(&book.top_of_book());

        assert_eq!(
            rendered,
            "Top Buy Order: 2 50 1700000000 alice\nTop Sell Order: No Sell Orders\n"
        );
    }

    #[test]
    fn test_render_empty_book_uses_sentinels() {
        let rendered = render_top_of_book(&OrderBook::new().top_of_book());

        assert_eq!(
            rendered,
            "Top Buy Order: No Buy Orders\nTop Sell Order: No Sell Orders\n"
        );
    }

    #[test]
    fn test_file_sink_overwrites() {
        let path = std::env::temp_dir().join("exchange_engine_sink_overwrite_test.txt");
        let mut sink = FileSnapshotSink::new(&path);

        let mut book = OrderBook::new();
        book.insert_sell(Order::from_parts(
            1,
            Decimal::from(10),
            Utc.timestamp_opt(1_700_000_000, 0).unwrap(),
            TraderId::from("bob"),
        ));
        sink.publish(&book.top_of_book()).unwrap();
        sink.publish(&OrderBook::new().top_of_book()).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!(
            contents,
            "Top Buy Order: No Buy Orders\nTop Sell Order: No Sell Orders\n"
        );
    }
}
