//! Money display

use rust_decimal::{Decimal, RoundingStrategy};
use rusty_money::iso::Currency;

/// Rounds `amount` to the minor unit of `currency` for display.
///
/// Rounds half away from zero and always shows the currency's full exponent,
/// so `100.5` yuan displays as `100.50`. Cart arithmetic never goes through
/// this function; only rendered amounts do.
pub fn round_for_display(amount: Decimal, currency: &Currency) -> Decimal {
    let mut rounded =
        amount.round_dp_with_strategy(currency.exponent, RoundingStrategy::MidpointAwayFromZero);

    rounded.rescale(currency.exponent);

    rounded
}
