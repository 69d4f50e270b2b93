use rust_decimal::{Decimal, RoundingStrategy};

/// Formats a currency amount for display, e.g. `$19.99`.
///
/// Amounts are carried unrounded everywhere else; rounding to cents happens
/// only here.
#[must_use]
pub fn format_money(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    format!("${rounded:.2}")
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    #[test]
    fn pads_whole_amounts_to_two_places() {
        assert_eq!(format_money(Decimal::from(25)), "$25.00");
    }

    #[test]
    fn rounds_half_cent_away_from_zero() {
        assert_eq!(format_money(Decimal::from_str("2.345").unwrap()), "$2.35");
        assert_eq!(format_money(Decimal::from_str("2.344").unwrap()), "$2.34");
    }

    #[test]
    fn zero_formats_as_zero_dollars() {
        assert_eq!(format_money(Decimal::ZERO), "$0.00");
    }
}
