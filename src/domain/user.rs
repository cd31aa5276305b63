//! Subscribed user configuration.
//!
//! A [`User`] is loaded once at startup and shared by reference across
//! evaluations; nothing in the pipeline mutates it. Blacklist names are held
//! normalized (trimmed, uppercase) so lookups are case-insensitive.

use std::collections::HashSet;

use rust_decimal::Decimal;

use super::id::{ChatId, UserId};
use super::money::Volume;

/// Normalize a venue, coin or network name for blacklist comparison.
#[must_use]
pub fn normalize_name(name: &str) -> String {
    name.trim().to_uppercase()
}

/// The four independent blacklist categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlacklistCategory {
    DepositExchange,
    WithdrawExchange,
    Coin,
    Network,
}

/// Names a user never wants to see in an opportunity.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Blacklist {
    deposit_exchanges: HashSet<String>,
    withdraw_exchanges: HashSet<String>,
    coins: HashSet<String>,
    networks: HashSet<String>,
}

impl Blacklist {
    /// Create an empty blacklist.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a normalized name to `category`.
    pub fn insert(&mut self, category: BlacklistCategory, name: &str) {
        let set = match category {
            BlacklistCategory::DepositExchange => &mut self.deposit_exchanges,
            BlacklistCategory::WithdrawExchange => &mut self.withdraw_exchanges,
            BlacklistCategory::Coin => &mut self.coins,
            BlacklistCategory::Network => &mut self.networks,
        };
        set.insert(normalize_name(name));
    }

    /// Names held in `category`, in no particular order.
    pub fn names(&self, category: BlacklistCategory) -> impl Iterator<Item = &str> {
        let set = match category {
            BlacklistCategory::DepositExchange => &self.deposit_exchanges,
            BlacklistCategory::WithdrawExchange => &self.withdraw_exchanges,
            BlacklistCategory::Coin => &self.coins,
            BlacklistCategory::Network => &self.networks,
        };
        set.iter().map(String::as_str)
    }

    #[must_use]
    pub fn with_deposit_exchange(mut self, name: &str) -> Self {
        self.insert(BlacklistCategory::DepositExchange, name);
        self
    }

    #[must_use]
    pub fn with_withdraw_exchange(mut self, name: &str) -> Self {
        self.insert(BlacklistCategory::WithdrawExchange, name);
        self
    }

    #[must_use]
    pub fn with_coin(mut self, name: &str) -> Self {
        self.insert(BlacklistCategory::Coin, name);
        self
    }

    #[must_use]
    pub fn with_network(mut self, name: &str) -> Self {
        self.insert(BlacklistCategory::Network, name);
        self
    }

    #[must_use]
    pub fn blocks_deposit_exchange(&self, name: &str) -> bool {
        self.deposit_exchanges.contains(&normalize_name(name))
    }

    #[must_use]
    pub fn blocks_withdraw_exchange(&self, name: &str) -> bool {
        self.withdraw_exchanges.contains(&normalize_name(name))
    }

    #[must_use]
    pub fn blocks_coin(&self, name: &str) -> bool {
        self.coins.contains(&normalize_name(name))
    }

    #[must_use]
    pub fn blocks_network(&self, name: &str) -> bool {
        self.networks.contains(&normalize_name(name))
    }

    /// Total number of blacklisted entries across all categories.
    #[must_use]
    pub fn len(&self) -> usize {
        self.deposit_exchanges.len()
            + self.withdraw_exchanges.len()
            + self.coins.len()
            + self.networks.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A subscribed user and the criteria the filter consults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    id: UserId,
    chat_id: ChatId,
    volume_min: Volume,
    volume_max: Volume,
    total_fee_max: Option<Volume>,
    spread_min: Decimal,
    spread_max: Option<Decimal>,
    profit_min: Decimal,
    profit_max: Option<Decimal>,
    daily_turnover_min: Volume,
    check_contract: bool,
    blacklist: Blacklist,
}

impl User {
    /// Create a user with no limits, no contract check and an empty
    /// blacklist.
    #[must_use]
    pub fn new(id: UserId, chat_id: ChatId) -> Self {
        Self {
            id,
            chat_id,
            volume_min: Volume::ZERO,
            volume_max: Volume::MAX,
            total_fee_max: None,
            spread_min: Decimal::ZERO,
            spread_max: None,
            profit_min: Decimal::ZERO,
            profit_max: None,
            daily_turnover_min: Volume::ZERO,
            check_contract: false,
            blacklist: Blacklist::default(),
        }
    }

    /// Set the minimum and maximum trade volume.
    #[must_use]
    pub fn with_volume_bounds(mut self, min: Volume, max: Volume) -> Self {
        self.volume_min = min;
        self.volume_max = max;
        self
    }

    /// Set the largest total fee the user accepts. `None` disables the check.
    #[must_use]
    pub fn with_total_fee_max(mut self, max: Option<Volume>) -> Self {
        self.total_fee_max = max;
        self
    }

    /// Accepted quoted spread range, in percent. `None` leaves it open above.
    #[must_use]
    pub fn with_spread_bounds(mut self, min: Decimal, max: Option<Decimal>) -> Self {
        self.spread_min = min;
        self.spread_max = max;
        self
    }

    /// Accepted quoted profit range. `None` leaves it open above.
    #[must_use]
    pub fn with_profit_bounds(mut self, min: Decimal, max: Option<Decimal>) -> Self {
        self.profit_min = min;
        self.profit_max = max;
        self
    }

    #[must_use]
    pub fn with_daily_turnover_min(mut self, min: Volume) -> Self {
        self.daily_turnover_min = min;
        self
    }

    /// Skip opportunities whose venues list different token contracts.
    #[must_use]
    pub fn with_contract_check(mut self, enabled: bool) -> Self {
        self.check_contract = enabled;
        self
    }

    #[must_use]
    pub fn with_blacklist(mut self, blacklist: Blacklist) -> Self {
        self.blacklist = blacklist;
        self
    }

    #[must_use]
    pub const fn id(&self) -> UserId {
        self.id
    }

    #[must_use]
    pub const fn chat_id(&self) -> ChatId {
        self.chat_id
    }

    #[must_use]
    pub const fn volume_min(&self) -> Volume {
        self.volume_min
    }

    #[must_use]
    pub const fn volume_max(&self) -> Volume {
        self.volume_max
    }

    #[must_use]
    pub const fn total_fee_max(&self) -> Option<Volume> {
        self.total_fee_max
    }

    #[must_use]
    pub const fn spread_min(&self) -> Decimal {
        self.spread_min
    }

    #[must_use]
    pub const fn spread_max(&self) -> Option<Decimal> {
        self.spread_max
    }

    #[must_use]
    pub const fn profit_min(&self) -> Decimal {
        self.profit_min
    }

    #[must_use]
    pub const fn profit_max(&self) -> Option<Decimal> {
        self.profit_max
    }

    #[must_use]
    pub const fn daily_turnover_min(&self) -> Volume {
        self.daily_turnover_min
    }

    #[must_use]
    pub const fn check_contract(&self) -> bool {
        self.check_contract
    }

    #[must_use]
    pub fn blacklist(&self) -> &Blacklist {
        &self.blacklist
    }
}
