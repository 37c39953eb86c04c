//! Money

use rusty_money::{Formatter, Money, Params, Position, iso};

/// Formats a stored rupiah amount for display: `Rp` symbol, `.`-grouped
/// digits, no decimal places.
///
/// Stored amounts stay plain integers; this is purely presentation.
#[must_use]
pub fn format_idr(amount: u64) -> String {
    // Amounts beyond i64 cannot occur from real sales data; clamp rather
    // than panic if one ever does.
    let amount = i64::try_from(amount).unwrap_or(i64::MAX);
    let money = Money::from_major(amount, iso::IDR);

    let positions = [Position::Symbol, Position::Space, Position::Amount];
    let params = Params {
        symbol: Some("Rp"),
        digit_separator: '.',
        exponent_separator: ',',
        rounding: Some(0),
        positions: &positions,
        ..Default::default()
    };

    Formatter::money(&money, params)
}
