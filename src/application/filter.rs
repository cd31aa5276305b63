//! Default criteria filter.
//!
//! Rejects an opportunity for a user when any of its venues, its coin or its
//! withdrawal network is blacklisted, when the offered volume is below the
//! user's minimum, when the scanner's quoted spread or profit falls outside
//! the user's range, when the 24h turnover is too thin, when the venues list
//! different contracts for a user who checks them, or when the estimated fee
//! exceeds the user's ceiling.

use rust_decimal::Decimal;
use tracing::trace;

use crate::domain::economics::{clamp_volume, total_fee};
use crate::domain::{opportunity::Opportunity, user::User};
use crate::port::outbound::filter::OpportunityFilter;

/// Blacklist, range and fee-ceiling checks.
#[derive(Debug, Clone, Copy, Default)]
pub struct CriteriaFilter;

impl CriteriaFilter {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    fn blacklisted(opportunity: &Opportunity, user: &User) -> Option<&'static str> {
        let blacklist = user.blacklist();
        if blacklist.blocks_withdraw_exchange(opportunity.withdrawal_exchange()) {
            Some("withdraw_exchange")
        } else if blacklist.blocks_deposit_exchange(opportunity.deposit_exchange()) {
            Some("deposit_exchange")
        } else if blacklist.blocks_coin(opportunity.symbol()) {
            Some("coin")
        } else if blacklist.blocks_network(opportunity.withdrawal_network()) {
            Some("network")
        } else {
            None
        }
    }

    /// First criterion the opportunity fails for this user.
    fn rejection(opportunity: &Opportunity, user: &User) -> Option<&'static str> {
        if let Some(reason) = Self::blacklisted(opportunity, user) {
            return Some(reason);
        }

        if opportunity.available_ask_volume() < user.volume_min() {
            return Some("volume_min");
        }

        if !within(opportunity.quoted_spread_pct(), user.spread_min(), user.spread_max()) {
            return Some("spread");
        }

        if !within(opportunity.quoted_profit(), user.profit_min(), user.profit_max()) {
            return Some("profit");
        }

        if opportunity.volume_24h() < user.daily_turnover_min() {
            return Some("daily_turnover");
        }

        if user.check_contract() && opportunity.same_contracts() == Some(false) {
            return Some("contract");
        }

        if let Some(fee_max) = user.total_fee_max() {
            let volume = clamp_volume(user.volume_max(), opportunity.available_ask_volume());
            match total_fee(opportunity.maker_fee(), volume, opportunity.withdrawal_fee()) {
                Ok(fee) if fee <= fee_max => {}
                Ok(_) => return Some("total_fee_max"),
                Err(_) => return Some("total_fee_overflow"),
            }
        }

        None
    }
}

fn within(value: Decimal, min: Decimal, max: Option<Decimal>) -> bool {
    value >= min && !matches!(max, Some(max) if value > max)
}

impl OpportunityFilter for CriteriaFilter {
    fn matches(&self, opportunity: &Opportunity, user: &User) -> bool {
        match Self::rejection(opportunity, user) {
            Some(reason) => {
                trace!(user = %user.id(), symbol = opportunity.symbol(), reason, "Rejected");
                false
            }
            None => true,
        }
    }

    fn name(&self) -> &'static str {
        "criteria"
    }
}
