// ============================================================================
// Order Book Domain Model
// Price-time priority: one binary heap per side
// ============================================================================

use std::cmp::Ordering;
use std::collections::binary_heap::{BinaryHeap, PeekMut};

use super::{Order, Side};

// ============================================================================
// Heap Entries
// ============================================================================

/// An order plus its insertion sequence number.
///
/// The sequence number is the final tie-break after price and timestamp, so
/// orders accepted within the same instant keep FIFO priority, and an
/// export/import round trip (which replays orders in priority order)
/// preserves their relative ranking.
#[derive(Debug, Clone)]
struct BookEntry {
    order: Order,
    seq: u64,
}

/// Sell-side ranking: the cheapest ask is the greatest element, so it
/// surfaces at the top of the max-heap. Ties resolve to the earlier
/// timestamp, then the earlier insertion.
#[derive(Debug, Clone)]
struct SellRank(BookEntry);

impl Ord for SellRank {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .0
            .order
            .price_per_unit()
            .cmp(&self.0.order.price_per_unit())
            .then_with(|| other.0.order.timestamp().cmp(&self.0.order.timestamp()))
            .then_with(|| other.0.seq.cmp(&self.0.seq))
    }
}

impl PartialOrd for SellRank {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for SellRank {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for SellRank {}

/// Buy-side ranking: the highest bid is the greatest element. Ties resolve
/// like the sell side.
#[derive(Debug, Clone)]
struct BuyRank(BookEntry);

impl Ord for BuyRank {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0
            .order
            .price_per_unit()
            .cmp(&other.0.order.price_per_unit())
            .then_with(|| other.0.order.timestamp().cmp(&self.0.order.timestamp()))
            .then_with(|| other.0.seq.cmp(&self.0.seq))
    }
}

impl PartialOrd for BuyRank {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for BuyRank {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for BuyRank {}

// ============================================================================
// Order Book
// ============================================================================

/// The resting order book: two independent priority structures.
///
/// The sell side surfaces the cheapest ask, the buy side the highest bid;
/// equal prices resolve by earlier acceptance. Insert and pop are O(log n),
/// peek is O(1). The book performs no validation; callers guarantee every
/// order arrives with `quantity > 0`.
#[derive(Debug, Clone)]
pub struct OrderBook {
    sells: BinaryHeap<SellRank>,
    buys: BinaryHeap<BuyRank>,
    next_seq: u64,
}

impl OrderBook {
    pub fn new() -> Self {
        Self {
            sells: BinaryHeap::new(),
            buys: BinaryHeap::new(),
            next_seq: 0,
        }
    }

    pub fn insert(&mut self, side: Side, order: Order) {
        match side {
            Side::Sell => self.insert_sell(order),
            Side::Buy => self.insert_buy(order),
        }
    }

    /// Add a resting sell order. Never fails for well-formed input.
    pub fn insert_sell(&mut self, order: Order) {
        let entry = self.entry(order);
        self.sells.push(SellRank(entry));
    }

    /// Add a resting buy order. Never fails for well-formed input.
    pub fn insert_buy(&mut self, order: Order) {
        let entry = self.entry(order);
        self.buys.push(BuyRank(entry));
    }

    fn entry(&mut self, order: Order) -> BookEntry {
        debug_assert!(order.quantity() > 0, "resting orders must have quantity");
        let seq = self.next_seq;
        self.next_seq += 1;
        BookEntry { order, seq }
    }

    /// The highest-priority sell order, if any.
    pub fn peek_best_sell(&self) -> Option<&Order> {
        self.sells.peek().map(|rank| &rank.0.order)
    }

    /// The highest-priority buy order, if any.
    pub fn peek_best_buy(&self) -> Option<&Order> {
        self.buys.peek().map(|rank| &rank.0.order)
    }

    /// Remove and discard the best sell order. No-op when the side is empty.
    pub fn pop_best_sell(&mut self) {
        self.sells.pop();
    }

    /// Remove and discard the best buy order. No-op when the side is empty.
    pub fn pop_best_buy(&mut self) {
        self.buys.pop();
    }

    /// Reduce the best sell order in place, removing it once exhausted.
    /// Reducing never changes the ordering key, so the heap stays intact.
    pub(crate) fn reduce_best_sell(&mut self, quantity: u64) {
        if let Some(mut top) = self.sells.peek_mut() {
            top.0.order.reduce(quantity);
            if top.0.order.quantity() == 0 {
                PeekMut::pop(top);
            }
        }
    }

    /// Reduce the best buy order in place, removing it once exhausted.
    pub(crate) fn reduce_best_buy(&mut self, quantity: u64) {
        if let Some(mut top) = self.buys.peek_mut() {
            top.0.order.reduce(quantity);
            if top.0.order.quantity() == 0 {
                PeekMut::pop(top);
            }
        }
    }

    pub fn sell_depth(&self) -> usize {
        self.sells.len()
    }

    pub fn buy_depth(&self) -> usize {
        self.buys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sells.is_empty() && self.buys.is_empty()
    }

    /// Snapshot the best order on each side for publication.
    pub fn top_of_book(&self) -> TopOfBook {
        TopOfBook {
            best_buy: self.peek_best_buy().cloned(),
            best_sell: self.peek_best_sell().cloned(),
        }
    }

    // ========================================================================
    // Bulk persistence hooks (process start/stop only)
    // ========================================================================

    /// Every resting order, sells first, each side in priority order.
    pub fn export_orders(&self) -> Vec<(Side, Order)> {
        let mut orders = Vec::with_capacity(self.sells.len() + self.buys.len());
        let mut sells = self.sells.clone();
        while let Some(rank) = sells.pop() {
            orders.push((Side::Sell, rank.0.order));
        }
        let mut buys = self.buys.clone();
        while let Some(rank) = buys.pop() {
            orders.push((Side::Buy, rank.0.order));
        }
        orders
    }

    /// Bulk-load resting orders. Process start only.
    pub fn import_orders(&mut self, orders: impl IntoIterator<Item = (Side, Order)>) {
        for (side, order) in orders {
            self.insert(side, order);
        }
    }
}

impl Default for OrderBook {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Top-of-Book Snapshot
// ============================================================================

/// Immutable snapshot of the best order on each side, captured by the
/// matching actor after every pass and handed to the publisher.
#[derive(Debug, Clone, PartialEq)]
pub struct TopOfBook {
    pub best_buy: Option<Order>,
    pub best_sell: Option<Order>,
}
