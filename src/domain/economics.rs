//! Per-user trade economics for an opportunity.
//!
//! Computed fresh for every (opportunity, matching user) pair and never
//! cached. The user's size is clamped to what the opportunity supports, the
//! buy leg is priced on the asks, and the sell leg is priced on the bids for
//! the size left after the withdrawal fee.

use rust_decimal::Decimal;

use super::book::BookSide;
use super::error::DomainError;
use super::money::{Price, Volume};
use super::opportunity::Opportunity;
use super::pricing::{depth_weighted_price, DepthPrice};
use super::user::User;

/// Clamp a user's maximum size to the opportunity's available ask volume.
#[must_use]
pub fn clamp_volume(user_max: Volume, available_ask_volume: Volume) -> Volume {
    user_max.min(available_ask_volume)
}

/// Maker fee on `volume` plus the flat withdrawal fee.
///
/// # Errors
///
/// [`DomainError::Overflow`] if the fee leaves the decimal range.
pub fn total_fee(
    maker_fee: Decimal,
    volume: Volume,
    withdrawal_fee: Volume,
) -> Result<Decimal, DomainError> {
    maker_fee
        .checked_mul(volume)
        .and_then(|fee| fee.checked_add(withdrawal_fee))
        .ok_or(DomainError::Overflow { quantity: "total fee" })
}

/// Derived economics of one user's trade on one opportunity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TradeEconomics {
    /// User-clamped trade volume.
    pub volume: Volume,
    /// Volume left to sell after the withdrawal fee.
    pub net_volume: Volume,
    /// Depth-weighted buy price on the withdrawal venue.
    pub buy_price: Price,
    /// Depth-weighted sell price on the deposit venue.
    pub sell_price: Price,
    /// Spread between sell and buy price, in percent.
    pub spread_pct: Decimal,
    /// Absolute profit of the round trip.
    pub profit: Decimal,
    /// Maker fee on the volume plus the withdrawal fee.
    pub total_fee: Decimal,
    /// Base units bought (`volume / buy_price`).
    pub base_bought: Volume,
    /// Base units sold (`net_volume / sell_price`).
    pub base_sold: Volume,
}

impl TradeEconomics {
    /// Price both legs of `opportunity` for `user`.
    ///
    /// # Errors
    ///
    /// - [`DomainError::NonPositiveVolume`] if the clamped volume, or what is
    ///   left of it after the withdrawal fee, is not strictly positive.
    /// - [`DomainError::InsufficientLiquidity`] if either side cannot fill.
    /// - [`DomainError::ZeroPrice`] if a leg prices at zero.
    /// - [`DomainError::Overflow`] if an amount leaves the decimal range.
    pub fn evaluate(opportunity: &Opportunity, user: &User) -> Result<Self, DomainError> {
        let volume = clamp_volume(user.volume_max(), opportunity.available_ask_volume());
        if volume <= Decimal::ZERO {
            return Err(DomainError::NonPositiveVolume { volume });
        }

        let withdrawal_fee = opportunity.withdrawal_fee();
        let net_volume = volume
            .checked_sub(withdrawal_fee)
            .ok_or(DomainError::Overflow { quantity: "net volume" })?;
        if net_volume <= Decimal::ZERO {
            return Err(DomainError::NonPositiveVolume { volume: net_volume });
        }

        let book = opportunity.book();
        let buy_price = filled(
            depth_weighted_price(book.asks(), volume),
            BookSide::Asks,
            volume,
        )?;
        let sell_price = filled(
            depth_weighted_price(book.bids(), net_volume),
            BookSide::Bids,
            net_volume,
        )?;

        let total_fee = total_fee(opportunity.maker_fee(), volume, withdrawal_fee)?;
        if buy_price.is_zero() {
            return Err(DomainError::ZeroPrice {
                side: BookSide::Asks,
            });
        }
        let spread_pct = sell_price
            .checked_sub(buy_price)
            .and_then(|diff| diff.checked_div(buy_price))
            .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
            .ok_or(DomainError::Overflow { quantity: "spread" })?;
        let profit = sell_price
            .checked_mul(net_volume)
            .zip(buy_price.checked_mul(volume))
            .and_then(|(proceeds, cost)| proceeds.checked_sub(cost))
            .ok_or(DomainError::Overflow { quantity: "profit" })?;

        let base_bought = volume.checked_div(buy_price).ok_or(DomainError::ZeroPrice {
            side: BookSide::Asks,
        })?;
        let base_sold = net_volume
            .checked_div(sell_price)
            .ok_or(DomainError::ZeroPrice {
                side: BookSide::Bids,
            })?;

        Ok(Self {
            volume,
            net_volume,
            buy_price,
            sell_price,
            spread_pct,
            profit,
            total_fee,
            base_bought,
            base_sold,
        })
    }
}

fn filled(price: DepthPrice, side: BookSide, requested: Volume) -> Result<Price, DomainError> {
    match price {
        DepthPrice::Filled(price) => Ok(price),
        DepthPrice::InsufficientLiquidity => {
            Err(DomainError::InsufficientLiquidity { side, requested })
        }
        DepthPrice::Overflow => Err(DomainError::Overflow {
            quantity: "execution price",
        }),
    }
}
