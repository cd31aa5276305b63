//! Static table of supported trading venues and their spot-market URLs.
//!
//! Lookups key on the uppercased exchange name. An unknown name is not an
//! error: callers simply omit the link.

use std::fmt;

/// A venue with a known spot-trading page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Venue {
    Mexc,
    Gate,
    Bybit,
    Bingx,
    Bitget,
    Kucoin,
    Htx,
    Okx,
    Poloniex,
    Bitmart,
    Binance,
}

impl Venue {
    /// Every venue in the table.
    pub const ALL: [Self; 11] = [
        Self::Mexc,
        Self::Gate,
        Self::Bybit,
        Self::Bingx,
        Self::Bitget,
        Self::Kucoin,
        Self::Htx,
        Self::Okx,
        Self::Poloniex,
        Self::Bitmart,
        Self::Binance,
    ];

    /// Look up a venue by exchange name, ignoring case and surrounding spaces.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let key = name.trim().to_uppercase();
        Self::ALL.into_iter().find(|venue| venue.as_str() == key)
    }

    /// Uppercase table key.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Mexc => "MEXC",
            Self::Gate => "GATE",
            Self::Bybit => "BYBIT",
            Self::Bingx => "BINGX",
            Self::Bitget => "BITGET",
            Self::Kucoin => "KUCOIN",
            Self::Htx => "HTX",
            Self::Okx => "OKX",
            Self::Poloniex => "POLONIEX",
            Self::Bitmart => "BITMART",
            Self::Binance => "BINANCE",
        }
    }

    /// Spot trading page for `base`/`quote` on this venue.
    #[must_use]
    pub fn trade_url(self, base: &str, quote: &str) -> String {
        match self {
            Self::Mexc => format!("https://www.mexc.com/ru-RU/exchange/{base}_{quote}"),
            Self::Gate => format!("https://www.gate.io/trade/{base}_{quote}"),
            Self::Bybit => format!("https://www.bybit.com/trade/spot/{base}{quote}"),
            Self::Bingx => format!("https://bingx.com/en-us/spot/{base}{quote}"),
            Self::Bitget => format!("https://www.bitget.com/spot/{base}{quote}"),
            Self::Kucoin => format!("https://www.kucoin.com/trade/{base}-{quote}"),
            Self::Htx => format!("https://www.htx.com/en-us/markets/{base}{quote}"),
            Self::Okx => format!("https://www.okx.com/trade-spot/{base}-{quote}"),
            Self::Poloniex => format!("https://www.poloniex.com/trade/{base}_{quote}"),
            Self::Bitmart => format!("https://www.bitmart.com/trade/en?symbol={base}_{quote}"),
            Self::Binance => format!("https://www.binance.com/en/trade/{base}_{quote}"),
        }
    }
}

impl fmt::Display for Venue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
