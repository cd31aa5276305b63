//! Order book depth types.
//!
//! - [`PriceLevel`] - A single price level with the amount resting on it
//! - [`OrderBook`] - Ask depth on the withdrawal venue and bid depth on the deposit venue
//!
//! # Ordering
//!
//! Levels arrive already sorted by execution priority (best price first).
//! Nothing in this crate re-sorts them; consumers walk them in given order.
//!
//! # Examples
//!
//! ```
//! use spreadcast::domain::book::{OrderBook, PriceLevel};
//! use rust_decimal_macros::dec;
//!
//! let book = OrderBook::new(
//!     vec![PriceLevel::new(dec!(100), dec!(2)), PriceLevel::new(dec!(101), dec!(3))],
//!     vec![PriceLevel::new(dec!(103), dec!(4))],
//! );
//!
//! assert_eq!(book.asks()[0].price(), dec!(100));
//! assert_eq!(book.bids().len(), 1);
//! ```

use std::fmt;

use super::money::{Price, Volume};

/// A single price level in an order book.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriceLevel {
    price: Price,
    amount: Volume,
}

impl PriceLevel {
    /// Creates a new price level.
    #[must_use]
    pub const fn new(price: Price, amount: Volume) -> Self {
        Self { price, amount }
    }

    /// Returns the price at this level.
    #[must_use]
    pub const fn price(&self) -> Price {
        self.price
    }

    /// Returns the amount available at this level.
    #[must_use]
    pub const fn amount(&self) -> Volume {
        self.amount
    }
}

/// Which side of an opportunity's book a computation ran on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BookSide {
    /// Asks on the withdrawal venue (where the coin is bought).
    Asks,
    /// Bids on the deposit venue (where the coin is sold).
    Bids,
}

impl fmt::Display for BookSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Asks => write!(f, "asks"),
            Self::Bids => write!(f, "bids"),
        }
    }
}

/// The two depth lists an opportunity carries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderBook {
    asks: Vec<PriceLevel>,
    bids: Vec<PriceLevel>,
}

impl OrderBook {
    /// Creates a book from ask and bid levels, each best-first.
    #[must_use]
    pub const fn new(asks: Vec<PriceLevel>, bids: Vec<PriceLevel>) -> Self {
        Self { asks, bids }
    }

    /// Ask levels on the withdrawal venue.
    #[must_use]
    pub fn asks(&self) -> &[PriceLevel] {
        &self.asks
    }

    /// Bid levels on the deposit venue.
    #[must_use]
    pub fn bids(&self) -> &[PriceLevel] {
        &self.bids
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn sides_keep_their_given_order() {
        let book = OrderBook::new(
            vec![PriceLevel::new(dec!(1), dec!(10))],
            vec![PriceLevel::new(dec!(2), dec!(20)), PriceLevel::new(dec!(1.9), dec!(5))],
        );

        assert_eq!(book.asks().len(), 1);
        assert_eq!(book.bids()[0].price(), dec!(2));
        assert_eq!(book.bids()[1].amount(), dec!(5));
    }

    #[test]
    fn empty_book_has_no_depth() {
        let book = OrderBook::default();
        assert!(book.asks().is_empty());
        assert!(book.bids().is_empty());
    }

    #[test]
    fn book_side_display() {
        assert_eq!(BookSide::Asks.to_string(), "asks");
        assert_eq!(BookSide::Bids.to_string(), "bids");
    }
}
