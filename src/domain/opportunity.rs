//! Opportunity type with builder pattern.
//!
//! An [`Opportunity`] is one arbitrage event for a symbol: buy on the
//! withdrawal venue's asks, move the coin over a network, sell into the
//! deposit venue's bids. It is immutable once built and owned by the
//! processing of a single event.

use rust_decimal::Decimal;

use super::book::OrderBook;
use super::error::DomainError;
use super::money::{Rate, Volume};

/// A cross-exchange arbitrage opportunity.
///
/// Use `Opportunity::builder()` to construct instances.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Opportunity {
    symbol: String,
    withdrawal_exchange: String,
    deposit_exchange: String,
    book: OrderBook,
    maker_fee: Rate,
    withdrawal_fee: Volume,
    withdrawal_network: String,
    withdrawal_time: String,
    lifetime: String,
    available_ask_volume: Volume,
    quoted_spread_pct: Decimal,
    quoted_profit: Decimal,
    volume_24h: Volume,
    same_contracts: Option<bool>,
}

impl Opportunity {
    /// Create a new builder.
    #[must_use]
    pub fn builder() -> OpportunityBuilder {
        OpportunityBuilder::new()
    }

    /// Traded base asset, e.g. `BTC`.
    #[must_use]
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// Venue the coin is bought on and withdrawn from.
    #[must_use]
    pub fn withdrawal_exchange(&self) -> &str {
        &self.withdrawal_exchange
    }

    /// Venue the coin is deposited to and sold on.
    #[must_use]
    pub fn deposit_exchange(&self) -> &str {
        &self.deposit_exchange
    }

    /// Ask depth (withdrawal side) and bid depth (deposit side).
    #[must_use]
    pub fn book(&self) -> &OrderBook {
        &self.book
    }

    /// Maker fee rate applied to the traded volume.
    #[must_use]
    pub fn maker_fee(&self) -> Rate {
        self.maker_fee
    }

    /// Fixed withdrawal fee, in units of the traded volume.
    #[must_use]
    pub fn withdrawal_fee(&self) -> Volume {
        self.withdrawal_fee
    }

    /// Network the coin is withdrawn over.
    #[must_use]
    pub fn withdrawal_network(&self) -> &str {
        &self.withdrawal_network
    }

    /// Human-readable estimated withdrawal time.
    #[must_use]
    pub fn withdrawal_time(&self) -> &str {
        &self.withdrawal_time
    }

    /// Human-readable lifetime of the spread so far.
    #[must_use]
    pub fn lifetime(&self) -> &str {
        &self.lifetime
    }

    /// Aggregate ask volume the opportunity supports; caps every user's size.
    #[must_use]
    pub fn available_ask_volume(&self) -> Volume {
        self.available_ask_volume
    }

    /// Spread reported by the scanner for the full available volume, in
    /// percent.
    #[must_use]
    pub fn quoted_spread_pct(&self) -> Decimal {
        self.quoted_spread_pct
    }

    /// Profit reported by the scanner for the full available volume.
    #[must_use]
    pub fn quoted_profit(&self) -> Decimal {
        self.quoted_profit
    }

    /// Traded volume of the symbol over the last 24 hours.
    #[must_use]
    pub fn volume_24h(&self) -> Volume {
        self.volume_24h
    }

    /// Whether both venues list the same token contract. `None` when the
    /// scanner did not say.
    #[must_use]
    pub fn same_contracts(&self) -> Option<bool> {
        self.same_contracts
    }
}

/// Builder for constructing `Opportunity` instances.
#[derive(Debug, Default)]
pub struct OpportunityBuilder {
    symbol: Option<String>,
    withdrawal_exchange: Option<String>,
    deposit_exchange: Option<String>,
    book: OrderBook,
    maker_fee: Rate,
    withdrawal_fee: Volume,
    withdrawal_network: String,
    withdrawal_time: String,
    lifetime: String,
    available_ask_volume: Volume,
    quoted_spread_pct: Decimal,
    quoted_profit: Decimal,
    volume_24h: Volume,
    same_contracts: Option<bool>,
}

impl OpportunityBuilder {
    /// Create a new empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn symbol(mut self, symbol: impl Into<String>) -> Self {
        self.symbol = Some(symbol.into());
        self
    }

    #[must_use]
    pub fn withdrawal_exchange(mut self, exchange: impl Into<String>) -> Self {
        self.withdrawal_exchange = Some(exchange.into());
        self
    }

    #[must_use]
    pub fn deposit_exchange(mut self, exchange: impl Into<String>) -> Self {
        self.deposit_exchange = Some(exchange.into());
        self
    }

    #[must_use]
    pub fn book(mut self, book: OrderBook) -> Self {
        self.book = book;
        self
    }

    #[must_use]
    pub fn maker_fee(mut self, rate: Rate) -> Self {
        self.maker_fee = rate;
        self
    }

    #[must_use]
    pub fn withdrawal_fee(mut self, fee: Volume) -> Self {
        self.withdrawal_fee = fee;
        self
    }

    #[must_use]
    pub fn withdrawal_network(mut self, network: impl Into<String>) -> Self {
        self.withdrawal_network = network.into();
        self
    }

    #[must_use]
    pub fn withdrawal_time(mut self, time: impl Into<String>) -> Self {
        self.withdrawal_time = time.into();
        self
    }

    #[must_use]
    pub fn lifetime(mut self, lifetime: impl Into<String>) -> Self {
        self.lifetime = lifetime.into();
        self
    }

    #[must_use]
    pub fn available_ask_volume(mut self, volume: Volume) -> Self {
        self.available_ask_volume = volume;
        self
    }

    #[must_use]
    pub fn quoted_spread_pct(mut self, spread: Decimal) -> Self {
        self.quoted_spread_pct = spread;
        self
    }

    #[must_use]
    pub fn quoted_profit(mut self, profit: Decimal) -> Self {
        self.quoted_profit = profit;
        self
    }

    #[must_use]
    pub fn volume_24h(mut self, volume: Volume) -> Self {
        self.volume_24h = volume;
        self
    }

    #[must_use]
    pub fn same_contracts(mut self, same: bool) -> Self {
        self.same_contracts = Some(same);
        self
    }

    /// Build the opportunity.
    ///
    /// # Errors
    ///
    /// Returns an error if the symbol or either venue is missing or blank,
    /// or if a fee is negative.
    pub fn build(self) -> Result<Opportunity, DomainError> {
        let symbol = self
            .symbol
            .filter(|s| !s.trim().is_empty())
            .ok_or(DomainError::EmptySymbol)?;
        let withdrawal_exchange = self
            .withdrawal_exchange
            .filter(|s| !s.trim().is_empty())
            .ok_or(DomainError::EmptyExchange { role: "withdrawal" })?;
        let deposit_exchange = self
            .deposit_exchange
            .filter(|s| !s.trim().is_empty())
            .ok_or(DomainError::EmptyExchange { role: "deposit" })?;

        if self.maker_fee < Rate::ZERO {
            return Err(DomainError::NegativeFee {
                field: "maker_fee",
                value: self.maker_fee,
            });
        }
        if self.withdrawal_fee < Volume::ZERO {
            return Err(DomainError::NegativeFee {
                field: "withdrawal_fee",
                value: self.withdrawal_fee,
            });
        }

        Ok(Opportunity {
            symbol,
            withdrawal_exchange,
            deposit_exchange,
            book: self.book,
            maker_fee: self.maker_fee,
            withdrawal_fee: self.withdrawal_fee,
            withdrawal_network: self.withdrawal_network,
            withdrawal_time: self.withdrawal_time,
            lifetime: self.lifetime,
            available_ask_volume: self.available_ask_volume,
            quoted_spread_pct: self.quoted_spread_pct,
            quoted_profit: self.quoted_profit,
            volume_24h: self.volume_24h,
            same_contracts: self.same_contracts,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::book::PriceLevel;
    use rust_decimal_macros::dec;

    fn base() -> OpportunityBuilder {
        Opportunity::builder()
            .symbol("BTC")
            .withdrawal_exchange("Mexc")
            .deposit_exchange("Kucoin")
    }

    #[test]
    fn builder_creates_opportunity() {
        let opp = base()
            .book(OrderBook::new(
                vec![PriceLevel::new(dec!(110), dec!(10))],
                vec![PriceLevel::new(dec!(120), dec!(13))],
            ))
            .maker_fee(dec!(0.002))
            .withdrawal_fee(dec!(0.1))
            .withdrawal_network("ERC20")
            .withdrawal_time("30s")
            .lifetime("12m")
            .available_ask_volume(dec!(3890))
            .build()
            .unwrap();

        assert_eq!(opp.symbol(), "BTC");
        assert_eq!(opp.withdrawal_exchange(), "Mexc");
        assert_eq!(opp.deposit_exchange(), "Kucoin");
        assert_eq!(opp.book().asks().len(), 1);
        assert_eq!(opp.maker_fee(), dec!(0.002));
        assert_eq!(opp.withdrawal_fee(), dec!(0.1));
        assert_eq!(opp.withdrawal_network(), "ERC20");
        assert_eq!(opp.withdrawal_time(), "30s");
        assert_eq!(opp.lifetime(), "12m");
        assert_eq!(opp.available_ask_volume(), dec!(3890));
    }

    #[test]
    fn builder_fails_without_symbol() {
        let result = Opportunity::builder()
            .withdrawal_exchange("Mexc")
            .deposit_exchange("Kucoin")
            .build();
        assert_eq!(result, Err(DomainError::EmptySymbol));
    }

    #[test]
    fn builder_fails_with_blank_symbol() {
        let result = base().symbol("   ").build();
        assert_eq!(result, Err(DomainError::EmptySymbol));
    }

    #[test]
    fn builder_fails_without_deposit_exchange() {
        let result = Opportunity::builder()
            .symbol("ETH")
            .withdrawal_exchange("Gate")
            .build();
        assert_eq!(result, Err(DomainError::EmptyExchange { role: "deposit" }));
    }

    #[test]
    fn builder_rejects_negative_withdrawal_fee() {
        let result = base().withdrawal_fee(dec!(-0.5)).build();
        assert!(matches!(
            result,
            Err(DomainError::NegativeFee {
                field: "withdrawal_fee",
                ..
            })
        ));
    }

    #[test]
    fn builder_defaults_fees_to_zero() {
        let opp = base().build().unwrap();
        assert_eq!(opp.maker_fee(), dec!(0));
        assert_eq!(opp.withdrawal_fee(), dec!(0));
        assert!(opp.book().bids().is_empty());
    }
}
