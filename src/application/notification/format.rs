//! Message formatting for opportunity notifications.
//!
//! Output is Telegram MarkdownV2. Every number is rendered with two decimals
//! and every free-text field is escaped, so the same inputs always produce
//! the same bytes.

use rust_decimal::{Decimal, RoundingStrategy};

use crate::domain::economics::TradeEconomics;
use crate::domain::opportunity::Opportunity;
use crate::domain::venue::Venue;

/// Default quote asset used in venue links and volume labels.
pub const DEFAULT_QUOTE_ASSET: &str = "USDT";

/// Renders opportunity notifications.
#[derive(Debug, Clone)]
pub struct MessageComposer {
    quote_asset: String,
}

impl Default for MessageComposer {
    fn default() -> Self {
        Self::new(DEFAULT_QUOTE_ASSET)
    }
}

impl MessageComposer {
    #[must_use]
    pub fn new(quote_asset: impl Into<String>) -> Self {
        Self {
            quote_asset: quote_asset.into(),
        }
    }

    #[must_use]
    pub fn quote_asset(&self) -> &str {
        &self.quote_asset
    }

    /// Render the full notification for one user's trade.
    #[must_use]
    pub fn compose(&self, opportunity: &Opportunity, econ: &TradeEconomics) -> String {
        let symbol = escape_markdown(opportunity.symbol());
        let withdraw = escape_markdown(opportunity.withdrawal_exchange());
        let deposit = escape_markdown(opportunity.deposit_exchange());
        let network = escape_markdown(opportunity.withdrawal_network());
        let quote = escape_markdown(&self.quote_asset);
        let spread = number(econ.spread_pct);
        let profit = number(econ.profit);

        format!(
            "{symbol} \\| {withdraw} → {deposit} \\| {spread}% {profit}$\n\
            \n\
            🪙 Coin: *{symbol}*\n\
            🔗 Exchanges: {links}\n\
            \n\
            {withdraw}:\n    💰 Price: $*{buy}*\n    📊 Volume: *{volume}* {quote} → *{bought}* {symbol}\n    🏦 Withdrawal: *{network}*\n\
            \n\
            {deposit}:\n    💰 Price: $*{sell}*\n    📊 Volume: *{sold}* {symbol} → *{net}* {quote}\n    🏦 Deposit: *{network}*\n\
            \n\
            📈 Spread: *{spread}%*\n\
            💵 Profit: *{profit}$*\n\
            ✂️ Fee: *{fee}$*\n\
            ⏳ Withdrawal time: \\~*{withdrawal_time}*\n\
            💰 Max volume: *{max_volume}$*\n\
            \n\
            ⏳ Lifetime: *{lifetime}*",
            links = self.venue_links(opportunity),
            buy = number(econ.buy_price),
            volume = number(econ.volume),
            bought = number(econ.base_bought),
            sell = number(econ.sell_price),
            sold = number(econ.base_sold),
            net = number(econ.net_volume),
            fee = number(econ.total_fee),
            withdrawal_time = escape_markdown(opportunity.withdrawal_time()),
            max_volume = number(opportunity.available_ask_volume()),
            lifetime = escape_markdown(opportunity.lifetime()),
        )
    }

    /// Hyperlinks to the withdrawal then deposit venue, joined by an arrow.
    ///
    /// A venue missing from the table is left out.
    #[must_use]
    pub fn venue_links(&self, opportunity: &Opportunity) -> String {
        [opportunity.withdrawal_exchange(), opportunity.deposit_exchange()]
            .into_iter()
            .filter_map(Venue::from_name)
            .map(|venue| {
                let url = venue.trade_url(opportunity.symbol(), &self.quote_asset);
                format!(
                    "[{}]({})",
                    escape_markdown(venue.as_str()),
                    escape_link_url(&url)
                )
            })
            .collect::<Vec<_>>()
            .join(" → ")
    }
}

fn number(value: Decimal) -> String {
    let rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    escape_markdown(&format!("{rounded:.2}"))
}

/// Escape special characters for Telegram MarkdownV2.
#[must_use]
pub fn escape_markdown(text: &str) -> String {
    const SPECIAL: [char; 18] = [
        '_', '*', '[', ']', '(', ')', '~', '`', '>', '#', '+', '-', '=', '|', '{', '}', '.', '!',
    ];
    let mut result = String::with_capacity(text.len() * 2);
    for c in text.chars() {
        if SPECIAL.contains(&c) || c == '\\' {
            result.push('\\');
        }
        result.push(c);
    }
    result
}

/// Inside a link target only `)` and `\` need escaping.
fn escape_link_url(url: &str) -> String {
    url.replace('\\', "\\\\").replace(')', "\\)")
}
