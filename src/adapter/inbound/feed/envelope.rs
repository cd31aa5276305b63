//! Wire format of the arbitrage update feed.
//!
//! Each message is a JSON envelope `{"type": ..., "update": {...}}`. Only the
//! configured update kind carries an opportunity; anything else is ignored.
//! Numeric fields accept JSON numbers or decimal strings.

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::domain::book::{OrderBook, PriceLevel};
use crate::domain::opportunity::Opportunity;
use crate::error::{Error, Result};

/// Envelope tag of an opportunity update.
pub const DEFAULT_UPDATE_KIND: &str = "update_data";

#[derive(Debug, Deserialize)]
struct Envelope {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    update: Option<serde_json::Value>,
}

/// One arbitrage pair as published by the scanner.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerData {
    pub symbol: String,
    pub withdrawal_exchange: String,
    pub deposit_exchange: String,
    #[serde(default)]
    pub withdrawal_network: String,
    #[serde(default)]
    pub withdrawal_fee: Decimal,
    #[serde(default)]
    pub withdrawal_time: String,
    #[serde(default)]
    pub maker_fee: Decimal,
    #[serde(default)]
    pub time_life: String,
    /// Traded volume of the symbol over the last 24 hours.
    #[serde(default, rename = "volume24h")]
    pub volume_24h: Decimal,
    #[serde(default)]
    pub same_contracts: Option<bool>,
    pub data: SpreadData,
    pub order_book: OrderBookData,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SpreadData {
    pub up: UpData,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpData {
    /// Ask-side volume, in quote units, the scanner saw as executable.
    pub ask_vol_usdt: Decimal,
    /// Spread in percent at that volume.
    #[serde(default)]
    pub spread: Decimal,
    #[serde(default)]
    pub profit: Decimal,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct OrderBookData {
    #[serde(default)]
    pub asks: Vec<LevelData>,
    #[serde(default)]
    pub bids: Vec<LevelData>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct LevelData {
    pub price: Decimal,
    pub amount: Decimal,
}

impl From<LevelData> for PriceLevel {
    fn from(level: LevelData) -> Self {
        PriceLevel::new(level.price, level.amount)
    }
}

impl TryFrom<ServerData> for Opportunity {
    type Error = Error;

    fn try_from(data: ServerData) -> Result<Self> {
        let book = OrderBook::new(
            data.order_book.asks.into_iter().map(Into::into).collect(),
            data.order_book.bids.into_iter().map(Into::into).collect(),
        );

        let up = data.data.up;
        let mut builder = Opportunity::builder()
            .symbol(data.symbol)
            .withdrawal_exchange(data.withdrawal_exchange)
            .deposit_exchange(data.deposit_exchange)
            .withdrawal_network(data.withdrawal_network)
            .withdrawal_fee(data.withdrawal_fee)
            .withdrawal_time(data.withdrawal_time)
            .maker_fee(data.maker_fee)
            .lifetime(data.time_life)
            .available_ask_volume(up.ask_vol_usdt)
            .quoted_spread_pct(up.spread)
            .quoted_profit(up.profit)
            .volume_24h(data.volume_24h)
            .book(book);
        if let Some(same) = data.same_contracts {
            builder = builder.same_contracts(same);
        }
        Ok(builder.build()?)
    }
}

/// Decode one raw payload.
///
/// Returns `Ok(None)` for a well-formed envelope of any kind other than
/// `update_kind`.
///
/// # Errors
///
/// Returns an error if the payload is not valid JSON, the update does not
/// match the expected shape, or the opportunity fails validation.
pub fn decode_envelope(payload: &str, update_kind: &str) -> Result<Option<Opportunity>> {
    let envelope: Envelope = serde_json::from_str(payload)?;
    if envelope.kind != update_kind {
        return Ok(None);
    }

    let update = envelope
        .update
        .ok_or_else(|| Error::Parse(format!("'{update_kind}' envelope has no update")))?;
    let data: ServerData = serde_json::from_value(update)?;
    Opportunity::try_from(data).map(Some)
}
