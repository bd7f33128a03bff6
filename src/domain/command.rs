// ============================================================================
// Validated Commands
// Values produced by the external command validator
// ============================================================================

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use std::fmt;

use super::{Order, Side, TraderId};

/// A range-checked request to place an order.
///
/// Construction is the validation boundary: the matching core assumes every
/// request it sees satisfies `quantity > 0` and `total_price > 0`, so both
/// are rejected here and nowhere downstream.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderRequest {
    side: Side,
    owner: TraderId,
    total_price: Decimal,
    quantity: u64,
}

impl OrderRequest {
    pub fn new(
        side: Side,
        owner: TraderId,
        total_price: Decimal,
        quantity: u64,
    ) -> Result<Self, CommandError> {
        if quantity == 0 {
            return Err(CommandError::NonPositiveQuantity);
        }
        if total_price <= Decimal::ZERO {
            return Err(CommandError::NonPositivePrice);
        }
        Ok(Self {
            side,
            owner,
            total_price,
            quantity,
        })
    }

    pub fn side(&self) -> Side {
        self.side
    }

    pub fn owner(&self) -> &TraderId {
        &self.owner
    }

    pub fn total_price(&self) -> Decimal {
        self.total_price
    }

    pub fn quantity(&self) -> u64 {
        self.quantity
    }

    /// Turn the request into a resting order stamped with its acceptance
    /// instant. The order's price per unit is derived here, once.
    pub fn into_order(self, timestamp: DateTime<Utc>) -> Order {
        Order::new(self.quantity, self.total_price, timestamp, self.owner)
    }
}

/// A validated command from the input stream.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Place a buy or sell order.
    Submit(OrderRequest),
    /// Report the most recent transactions through the `TradeReporter`.
    Inspect,
    /// Begin cooperative shutdown; already-accepted submissions still drain.
    Terminate,
}

/// Rejection reasons for malformed order parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandError {
    NonPositiveQuantity,
    NonPositivePrice,
}

impl fmt::Display for CommandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommandError::NonPositiveQuantity => {
                write!(f, "quantity must be greater than zero")
            }
            CommandError::NonPositivePrice => {
                write!(f, "total price must be greater than zero")
            }
        }
    }
}

impl std::error::Error for CommandError {}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_valid_request() {
        let request = OrderRequest::new(
            Side::Buy,
            TraderId::from("alice"),
            Decimal::from(100),
            4,
        )
        .unwrap();

        assert_eq!(request.quantity(), 4);
        assert_eq!(request.total_price(), Decimal::from(100));
    }

    #[test]
    fn test_zero_quantity_rejected() {
        let result = OrderRequest::new(
            Side::Buy,
            TraderId::from("alice"),
            Decimal::from(100),
            0,
        );

        assert_eq!(result.unwrap_err(), CommandError::NonPositiveQuantity);
    }

    #[test]
    fn test_non_positive_price_rejected() {
        for total in [Decimal::ZERO, Decimal::from(-100)] {
            let result = OrderRequest::new(Side::Sell, TraderId::from("bob"), total, 1);
            assert_eq!(result.unwrap_err(), CommandError::NonPositivePrice);
        }
    }

    #[test]
    fn test_into_order_derives_price() {
        let request = OrderRequest::new(
            Side::Sell,
            TraderId::from("bob"),
            Decimal::from(50),
            2,
        )
        .unwrap();

        let order = request.into_order(Utc.timestamp_opt(1_700_000_000, 0).unwrap());

        assert_eq!(order.price_per_unit(), Decimal::from(25));
        assert_eq!(order.owner(), &TraderId::from("bob"));
    }
}
