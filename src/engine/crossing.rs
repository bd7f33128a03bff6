// ============================================================================
// Crossing Engine
// Matches the top of book until no further trade is possible
// ============================================================================

use chrono::{DateTime, Utc};

use crate::domain::{OrderBook, Transaction};

/// Run the crossing loop after an insertion.
///
/// Repeats until the book no longer crosses: take the best sell and best
/// buy, trade the smaller of their quantities at the **resting sell
/// order's** price, and drop whichever order is exhausted. Each iteration
/// settles at most one transaction.
///
/// A top-of-book pair owned by the same trader halts the loop outright;
/// the engine does not search deeper for another counterparty. Deliberate
/// policy, not best-execution: both orders simply stay resting.
///
/// Every transaction produced by one call carries `timestamp`, captured
/// once by the caller before the loop starts.
pub fn execute_crossings(book: &mut OrderBook, timestamp: DateTime<Utc>) -> Vec<Transaction> {
    let mut transactions = Vec::new();

    loop {
        let (sell, buy) = match (book.peek_best_sell(), book.peek_best_buy()) {
            (Some(sell), Some(buy)) => (sell, buy),
            _ => break,
        };
        if sell.price_per_unit() > buy.price_per_unit() {
            break;
        }
        if sell.owner() == buy.owner() {
            break;
        }

        let quantity = sell.quantity().min(buy.quantity());
        transactions.push(Transaction::new(
            quantity,
            sell.price_per_unit(),
            timestamp,
            sell.owner().clone(),
            buy.owner().clone(),
        ));
        book.reduce_best_sell(quantity);
        book.reduce_best_buy(quantity);
    }

    transactions
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Order, TraderId};
    use chrono::TimeZone;
    use rust_decimal::Decimal;

    fn instant(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(secs, 0).unwrap()
    }

    fn order(quantity: u64, total_price: i64, secs: i64, owner: &str) -> Order {
        Order::new(
            quantity,
            Decimal::from(total_price),
            instant(secs),
            TraderId::from(owner),
        )
    }

    #[test]
    fn test_full_match_empties_both_sides() {
        let mut book = OrderBook::new();
        book.insert_buy(order(1, 100, 100, "alice"));
        book.insert_sell(order(1, 100, 101, "bob"));

        let transactions = execute_crossings(&mut book, instant(101));

        assert_eq!(transactions.len(), 1);
        assert_eq!(transactions[0].quantity(), 1);
        assert!(book.is_empty());
    }

    #[test]
    fn test_no_cross_leaves_orders_resting() {
        let mut book = OrderBook::new();
        book.insert_buy(order(1, 90, 100, "alice"));
        book.insert_sell(order(1, 100, 101, "bob"));

        let transactions = execute_crossings(&mut book, instant(101));

        assert!(transactions.is_empty());
        assert_eq!(book.buy_depth(), 1);
        assert_eq!(book.sell_depth(), 1);
    }

    #[test]
    fn test_partial_match_leaves_remainder_resting() {
        // Buy 2 @ 25/unit, sell 5 @ 20/unit: the sell rests with 3 left.
        let mut book = OrderBook::new();
        book.insert_buy(order(2, 50, 100, "alice"));
        book.insert_sell(order(5, 100, 101, "bob"));

        let transactions = execute_crossings(&mut book, instant(101));

        assert_eq!(transactions.len(), 1);
        assert_eq!(transactions[0].quantity(), 2);
        assert!(book.peek_best_buy().is_none());
        assert_eq!(book.peek_best_sell().map(Order::quantity), Some(3));
    }

    #[test]
    fn test_trade_price_is_resting_sellers() {
        // Buyer pays 100/unit, seller asked 20/unit: the trade settles at
        // the seller's price, whichever side triggered the pass.
        let mut book = OrderBook::new();
        book.insert_sell(order(1, 20, 100, "bob"));
        book.insert_buy(order(1, 100, 101, "alice"));

        let transactions = execute_crossings(&mut book, instant(101));

        assert_eq!(transactions.len(), 1);
        assert_eq!(transactions[0].price_per_unit(), Decimal::from(20));
        assert_eq!(transactions[0].seller(), &TraderId::from("bob"));
        assert_eq!(transactions[0].buyer(), &TraderId::from("alice"));
    }

    #[test]
    fn test_self_trade_halts_matching() {
        let mut book = OrderBook::new();
        book.insert_buy(order(1, 100, 100, "alice"));
        book.insert_sell(order(1, 100, 101, "alice"));

        let transactions = execute_crossings(&mut book, instant(101));

        assert!(transactions.is_empty());
        assert_eq!(book.buy_depth(), 1);
        assert_eq!(book.sell_depth(), 1);
    }

    #[test]
    fn test_self_trade_halt_does_not_search_deeper() {
        // Bob's buy at 100 crosses too, but Alice's own pair sits at the
        // top of both sides, so the whole pass stops before reaching it.
        let mut book = OrderBook::new();
        book.insert_buy(order(1, 110, 100, "alice"));
        book.insert_buy(order(1, 100, 101, "bob"));
        book.insert_sell(order(1, 90, 102, "alice"));

        let transactions = execute_crossings(&mut book, instant(102));

        assert!(transactions.is_empty());
        assert_eq!(book.buy_depth(), 2);
        assert_eq!(book.sell_depth(), 1);
    }

    #[test]
    fn test_multiple_orders_some_match() {
        let mut book = OrderBook::new();
        book.insert_buy(order(1, 100, 100, "alice"));
        book.insert_buy(order(1, 90, 101, "charlie"));
        book.insert_sell(order(1, 100, 102, "bob"));
        book.insert_sell(order(1, 110, 103, "dave"));

        let transactions = execute_crossings(&mut book, instant(103));

        assert_eq!(transactions.len(), 1);
        assert_eq!(book.buy_depth(), 1);
        assert_eq!(book.sell_depth(), 1);
    }

    #[test]
    fn test_aggregate_drain_settles_one_transaction_per_fill() {
        let mut book = OrderBook::new();
        for i in 0..10 {
            book.insert_buy(order(1, 10, 100 + i, "alice"));
        }
        book.insert_sell(order(10, 100, 200, "bob"));

        let transactions = execute_crossings(&mut book, instant(200));

        assert_eq!(transactions.len(), 10);
        assert!(book.is_empty());
        for tx in &transactions {
            assert_eq!(tx.quantity(), 1);
            assert_eq!(tx.price_per_unit(), Decimal::from(10));
        }
    }

    #[test]
    fn test_shared_timestamp_across_one_pass() {
        let mut book = OrderBook::new();
        book.insert_buy(order(1, 10, 100, "alice"));
        book.insert_buy(order(1, 10, 101, "charlie"));
        book.insert_sell(order(2, 20, 200, "bob"));

        let stamp = instant(200);
        let transactions = execute_crossings(&mut book, stamp);

        assert_eq!(transactions.len(), 2);
        assert!(transactions.iter().all(|tx| tx.timestamp() == stamp));
    }
}
