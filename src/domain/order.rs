// ============================================================================
// Order Domain Model
// ============================================================================

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Value Objects
// ============================================================================

/// Identifies the trader behind an order or a transaction side.
///
/// Trader registration and balances live outside this crate; here the id is
/// an opaque name. Equality on `TraderId` is what the self-trade check uses.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TraderId(String);

impl TraderId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for TraderId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for TraderId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl fmt::Display for TraderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Buy,
    Sell,
}

// ============================================================================
// Order Entity
// ============================================================================

/// A resting intent to trade.
///
/// Immutable after creation except for `quantity`, which only ever shrinks
/// as fills are applied. The price per unit is derived from the submitted
/// total price exactly once, at creation; partial fills never recompute it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    quantity: u64,
    price_per_unit: Decimal,
    timestamp: DateTime<Utc>,
    owner: TraderId,
}

impl Order {
    /// Create an order from the submitted total price.
    ///
    /// Callers must guarantee `quantity > 0`; the command layer enforces it
    /// before anything reaches this constructor.
    pub fn new(
        quantity: u64,
        total_price: Decimal,
        timestamp: DateTime<Utc>,
        owner: TraderId,
    ) -> Self {
        debug_assert!(quantity > 0, "order quantity must be positive");
        Self {
            quantity,
            price_per_unit: total_price / Decimal::from(quantity),
            timestamp,
            owner,
        }
    }

    /// Reconstruct an order whose price per unit is already known.
    ///
    /// Used by bulk import: the stored price is taken as-is, never
    /// re-derived from a total.
    pub fn from_parts(
        quantity: u64,
        price_per_unit: Decimal,
        timestamp: DateTime<Utc>,
        owner: TraderId,
    ) -> Self {
        debug_assert!(quantity > 0, "order quantity must be positive");
        Self {
            quantity,
            price_per_unit,
            timestamp,
            owner,
        }
    }

    pub fn quantity(&self) -> u64 {
        self.quantity
    }

    pub fn price_per_unit(&self) -> Decimal {
        self.price_per_unit
    }

    /// Acceptance instant, assigned by the matching actor; the price-time
    /// tie-break ranks earlier timestamps first.
    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn owner(&self) -> &TraderId {
        &self.owner
    }

    /// Apply a fill. An order at zero afterwards must leave the book; the
    /// book's reduce operations handle the removal.
    pub(crate) fn reduce(&mut self, quantity: u64) {
        debug_assert!(
            quantity <= self.quantity,
            "fill exceeds remaining quantity"
        );
        self.quantity -= quantity;
    }
}
