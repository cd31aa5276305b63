//! Depth-weighted execution pricing.
//!
//! Converts an ordered list of book levels and a target amount into the
//! average price a taker would pay (or receive) filling that amount, best
//! level first.
//!
//! # Examples
//!
//! ```
//! use spreadcast::domain::book::PriceLevel;
//! use spreadcast::domain::pricing::{depth_weighted_price, DepthPrice};
//! use rust_decimal_macros::dec;
//!
//! let asks = [PriceLevel::new(dec!(100), dec!(2)), PriceLevel::new(dec!(101), dec!(3))];
//!
//! assert_eq!(depth_weighted_price(&asks, dec!(4)), DepthPrice::Filled(dec!(100.5)));
//! assert_eq!(depth_weighted_price(&asks, dec!(6)), DepthPrice::InsufficientLiquidity);
//! ```

use rust_decimal::Decimal;

use super::book::PriceLevel;
use super::money::{Price, Volume};

/// Outcome of walking the book for a target amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DepthPrice {
    /// The target was filled at this average price.
    Filled(Price),
    /// The levels hold less than the target amount.
    InsufficientLiquidity,
    /// The level products exceed the representable decimal range.
    Overflow,
}

impl DepthPrice {
    /// The filled price, if any.
    #[must_use]
    pub const fn price(self) -> Option<Price> {
        match self {
            Self::Filled(price) => Some(price),
            Self::InsufficientLiquidity | Self::Overflow => None,
        }
    }
}

/// Average execution price for `target` across `levels`, walked in order.
///
/// The walk stops at the first level whose amount covers what is still
/// remaining; later levels are never examined. If the levels seen hold less
/// than `target` in total the result is [`DepthPrice::InsufficientLiquidity`].
///
/// `target` must be strictly positive. A zero target cannot be priced and
/// also yields `InsufficientLiquidity`. Levels whose running totals leave the
/// decimal range yield [`DepthPrice::Overflow`].
pub fn depth_weighted_price<'a, I>(levels: I, target: Volume) -> DepthPrice
where
    I: IntoIterator<Item = &'a PriceLevel>,
{
    if target <= Decimal::ZERO {
        return DepthPrice::InsufficientLiquidity;
    }

    let mut remaining = target;
    let mut weighted_sum = Decimal::ZERO;
    let mut available = Decimal::ZERO;

    for level in levels {
        let Some(total) = available.checked_add(level.amount()) else {
            return DepthPrice::Overflow;
        };
        available = total;

        let take = remaining.min(level.amount());
        let Some(sum) = take
            .checked_mul(level.price())
            .and_then(|cost| weighted_sum.checked_add(cost))
        else {
            return DepthPrice::Overflow;
        };
        weighted_sum = sum;

        if remaining <= level.amount() {
            break;
        }
        remaining -= level.amount();
    }

    if available < target {
        return DepthPrice::InsufficientLiquidity;
    }

    match weighted_sum.checked_div(target) {
        Some(price) => DepthPrice::Filled(price),
        None => DepthPrice::Overflow,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use std::cell::Cell;

    fn level(price: Decimal, amount: Decimal) -> PriceLevel {
        PriceLevel::new(price, amount)
    }

    #[test]
    fn partial_fill_of_second_level() {
        let levels = [level(dec!(100), dec!(2)), level(dec!(101), dec!(3))];
        assert_eq!(
            depth_weighted_price(&levels, dec!(4)),
            DepthPrice::Filled(dec!(100.5))
        );
    }

    #[test]
    fn exact_fill_of_first_level_uses_its_price() {
        let levels = [level(dec!(100), dec!(2)), level(dec!(150), dec!(3))];
        assert_eq!(
            depth_weighted_price(&levels, dec!(2)),
            DepthPrice::Filled(dec!(100))
        );
    }

    #[test]
    fn consuming_every_level_exactly() {
        let levels = [level(dec!(10), dec!(1)), level(dec!(20), dec!(1))];
        assert_eq!(
            depth_weighted_price(&levels, dec!(2)),
            DepthPrice::Filled(dec!(15))
        );
    }

    #[test]
    fn shallow_book_is_insufficient() {
        let levels = [level(dec!(100), dec!(2))];
        assert_eq!(
            depth_weighted_price(&levels, dec!(5)),
            DepthPrice::InsufficientLiquidity
        );
    }

    #[test]
    fn empty_book_is_insufficient() {
        let levels: [PriceLevel; 0] = [];
        assert_eq!(
            depth_weighted_price(&levels, dec!(0.01)),
            DepthPrice::InsufficientLiquidity
        );
    }

    #[test]
    fn zero_target_is_not_priced() {
        let levels = [level(dec!(100), dec!(2))];
        assert_eq!(
            depth_weighted_price(&levels, dec!(0)),
            DepthPrice::InsufficientLiquidity
        );
    }

    #[test]
    fn sufficiency_ignores_level_prices() {
        let cheap = [level(dec!(1), dec!(1)), level(dec!(1), dec!(1))];
        let dear = [level(dec!(1000), dec!(1)), level(dec!(999), dec!(1))];
        assert_eq!(
            depth_weighted_price(&cheap, dec!(3)),
            DepthPrice::InsufficientLiquidity
        );
        assert_eq!(
            depth_weighted_price(&dear, dec!(3)),
            DepthPrice::InsufficientLiquidity
        );
    }

    #[test]
    fn oversized_level_product_is_overflow() {
        let huge = dec!(1000000000000000);
        let levels = [level(huge, huge)];
        assert_eq!(depth_weighted_price(&levels, huge), DepthPrice::Overflow);
    }

    #[test]
    fn oversized_running_sum_is_overflow() {
        let levels = [
            level(dec!(70000000000000000000000000000), dec!(1)),
            level(dec!(70000000000000000000000000000), dec!(1)),
        ];
        assert_eq!(depth_weighted_price(&levels, dec!(2)), DepthPrice::Overflow);
    }

    #[test]
    fn walk_stops_at_the_satisfying_level() {
        let levels = [
            level(dec!(100), dec!(2)),
            level(dec!(101), dec!(3)),
            level(dec!(500), dec!(100)),
            level(dec!(900), dec!(100)),
        ];
        let seen = Cell::new(0usize);

        let counted = levels.iter().inspect(|_| seen.set(seen.get() + 1));
        let result = depth_weighted_price(counted, dec!(4));

        assert_eq!(result, DepthPrice::Filled(dec!(100.5)));
        assert_eq!(seen.get(), 2);
    }

    #[test]
    fn matches_closed_form_weighted_sum() {
        let levels = [
            level(dec!(110), dec!(10)),
            level(dec!(115), dec!(5)),
            level(dec!(116), dec!(8)),
            level(dec!(117), dec!(11)),
        ];
        let target = dec!(20);

        let mut remaining = target;
        let mut expected = Decimal::ZERO;
        for l in &levels {
            let take = remaining.min(l.amount());
            expected += take * l.price();
            remaining -= take;
        }

        assert_eq!(
            depth_weighted_price(&levels, target),
            DepthPrice::Filled(expected / target)
        );
    }

    #[test]
    fn price_accessor() {
        assert_eq!(DepthPrice::Filled(dec!(3)).price(), Some(dec!(3)));
        assert_eq!(DepthPrice::InsufficientLiquidity.price(), None);
        assert_eq!(DepthPrice::Overflow.price(), None);
    }
}
