//! Monetary types for price and volume representation.

use rust_decimal::Decimal;

/// Price represented as a Decimal for precision.
pub type Price = Decimal;

/// Volume represented as a Decimal for precision.
pub type Volume = Decimal;

/// Fee rate expressed as a fraction (0.002 = 0.2%).
pub type Rate = Decimal;

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn rates_scale_volumes_exactly() {
        let rate: Rate = dec!(0.002);
        let volume: Volume = dec!(1500);

        assert_eq!(rate * volume, dec!(3.000));
    }
}
