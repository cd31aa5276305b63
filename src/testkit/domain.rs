//! Builders for domain values used across tests.
//!
//! The default opportunity is BTC withdrawn from Mexc and deposited to
//! Kucoin, with 1500 of available ask volume and books deep enough to fill
//! it on both sides.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde_json::json;

use crate::domain::book::{OrderBook, PriceLevel};
use crate::domain::id::{ChatId, UserId};
use crate::domain::opportunity::Opportunity;
use crate::domain::user::User;

/// Create a book from `(price, amount)` pairs, best level first.
pub fn book(asks: &[(Decimal, Decimal)], bids: &[(Decimal, Decimal)]) -> OrderBook {
    let levels = |side: &[(Decimal, Decimal)]| {
        side.iter()
            .map(|&(price, amount)| PriceLevel::new(price, amount))
            .collect()
    };
    OrderBook::new(levels(asks), levels(bids))
}

fn default_asks() -> Vec<(Decimal, Decimal)> {
    vec![(dec!(100), dec!(600)), (dec!(101), dec!(1000))]
}

fn default_bids() -> Vec<(Decimal, Decimal)> {
    vec![(dec!(103), dec!(500)), (dec!(102), dec!(1500))]
}

/// The default opportunity for `symbol`.
pub fn opportunity(symbol: &str) -> Opportunity {
    opportunity_between(symbol, "Mexc", "Kucoin")
}

/// The default opportunity with custom venues.
pub fn opportunity_between(symbol: &str, withdraw: &str, deposit: &str) -> Opportunity {
    Opportunity::builder()
        .symbol(symbol)
        .withdrawal_exchange(withdraw)
        .deposit_exchange(deposit)
        .withdrawal_network("BEP20")
        .withdrawal_time("5 min")
        .lifetime("1m")
        .maker_fee(dec!(0.001))
        .withdrawal_fee(dec!(1))
        .available_ask_volume(dec!(1500))
        .quoted_spread_pct(dec!(2.5))
        .quoted_profit(dec!(30))
        .volume_24h(dec!(1000000))
        .same_contracts(true)
        .book(book(&default_asks(), &default_bids()))
        .build()
        .expect("valid test opportunity")
}

/// A user with no limits whose chat id equals their user id.
pub fn user(id: i64) -> User {
    User::new(UserId::new(id), ChatId::new(id))
}

/// A user capped at `max` volume.
pub fn user_with_max(id: i64, max: Decimal) -> User {
    user(id).with_volume_bounds(Decimal::ZERO, max)
}

/// A wire envelope carrying the default opportunity for `symbol`.
pub fn update_payload(symbol: &str) -> String {
    let levels = |side: Vec<(Decimal, Decimal)>| {
        side.into_iter()
            .map(|(price, amount)| {
                json!({ "price": price.to_string(), "amount": amount.to_string() })
            })
            .collect::<Vec<_>>()
    };
    json!({
        "type": "update_data",
        "update": {
            "symbol": symbol,
            "withdrawal_exchange": "Mexc",
            "deposit_exchange": "Kucoin",
            "withdrawal_network": "BEP20",
            "withdrawal_fee": "1",
            "withdrawal_time": "5 min",
            "maker_fee": "0.001",
            "time_life": "1m",
            "volume24h": "1000000",
            "same_contracts": true,
            "data": { "up": { "ask_vol_usdt": "1500", "spread": "2.5", "profit": "30" } },
            "order_book": {
                "asks": levels(default_asks()),
                "bids": levels(default_bids()),
            }
        }
    })
    .to_string()
}

/// An envelope of a kind the pipeline ignores.
pub fn ping_payload() -> String {
    json!({ "type": "ping" }).to_string()
}
