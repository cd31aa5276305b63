//! Domain validation errors for core domain types.
//!
//! These errors are returned when an invariant of an opportunity, a user or a
//! derived trade quote does not hold. They are recovered per item by the
//! pipeline and never abort processing.
//!
//! # Examples
//!
//! ```
//! use spreadcast::domain::book::{BookSide, OrderBook, PriceLevel};
//! use spreadcast::domain::economics::TradeEconomics;
//! use spreadcast::domain::error::DomainError;
//! use spreadcast::domain::id::{ChatId, UserId};
//! use spreadcast::domain::opportunity::Opportunity;
//! use spreadcast::domain::user::User;
//! use rust_decimal_macros::dec;
//!
//! let opportunity = Opportunity::builder()
//!     .symbol("BTC")
//!     .withdrawal_exchange("Mexc")
//!     .deposit_exchange("Kucoin")
//!     .book(OrderBook::new(
//!         vec![PriceLevel::new(dec!(100), dec!(2))],
//!         vec![PriceLevel::new(dec!(101), dec!(2))],
//!     ))
//!     .available_ask_volume(dec!(5))
//!     .build()
//!     .unwrap();
//! let user = User::new(UserId::new(1), ChatId::new(1)).with_volume_bounds(dec!(0), dec!(5));
//!
//! let result = TradeEconomics::evaluate(&opportunity, &user);
//! assert!(matches!(
//!     result,
//!     Err(DomainError::InsufficientLiquidity { side: BookSide::Asks, .. })
//! ));
//! ```

use thiserror::Error;

use super::book::BookSide;

/// Errors that occur when domain invariants are violated.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Volume must be positive for pricing.
    #[error("volume must be positive, got {volume}")]
    NonPositiveVolume {
        /// The invalid volume that was provided.
        volume: rust_decimal::Decimal,
    },

    /// The book side cannot fill the requested amount.
    #[error("insufficient liquidity on {side} for {requested}")]
    InsufficientLiquidity {
        /// Which side of the book ran dry.
        side: BookSide,
        /// The amount that was requested.
        requested: rust_decimal::Decimal,
    },

    /// A computed execution price was zero, so ratios are undefined.
    #[error("execution price on {side} is zero")]
    ZeroPrice {
        /// Which side produced the zero price.
        side: BookSide,
    },

    /// An intermediate amount left the representable decimal range.
    #[error("arithmetic overflow computing {quantity}")]
    Overflow {
        /// The quantity being computed.
        quantity: &'static str,
    },

    /// Opportunities must name a symbol.
    #[error("symbol cannot be empty")]
    EmptySymbol,

    /// Opportunities must name both venues.
    #[error("exchange name cannot be empty: {role}")]
    EmptyExchange {
        /// Either "withdrawal" or "deposit".
        role: &'static str,
    },

    /// Fees cannot be negative.
    #[error("{field} cannot be negative, got {value}")]
    NegativeFee {
        /// The fee field that failed validation.
        field: &'static str,
        /// The invalid value.
        value: rust_decimal::Decimal,
    },
}
