// ============================================================================
// Transaction Domain Model
// ============================================================================

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::TraderId;

/// An immutable record of a completed trade between two orders.
///
/// The price per unit is always the resting sell order's price, regardless
/// of which side triggered the match. Once appended to the ledger a
/// transaction is never mutated or re-matched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    quantity: u64,
    price_per_unit: Decimal,
    timestamp: DateTime<Utc>,
    seller: TraderId,
    buyer: TraderId,
}

impl Transaction {
    pub fn new(
        quantity: u64,
        price_per_unit: Decimal,
        timestamp: DateTime<Utc>,
        seller: TraderId,
        buyer: TraderId,
    ) -> Self {
        debug_assert!(quantity > 0, "transaction quantity must be positive");
        Self {
            quantity,
            price_per_unit,
            timestamp,
            seller,
            buyer,
        }
    }

    pub fn quantity(&self) -> u64 {
        self.quantity
    }

    pub fn price_per_unit(&self) -> Decimal {
        self.price_per_unit
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn seller(&self) -> &TraderId {
        &self.seller
    }

    pub fn buyer(&self) -> &TraderId {
        &self.buyer
    }

    /// Notional value of the trade (price per unit × quantity), derived on
    /// demand rather than stored.
    pub fn total_price(&self) -> Decimal {
        self.price_per_unit * Decimal::from(self.quantity)
    }
}
