//! Display formatting for derived quantities.
//!
//! Non-finite values never reach the user as `NaN` or `inf`; they render as
//! [`PLACEHOLDER`].

use rust_decimal::prelude::*;

/// Shown in place of a value that is `NaN` or infinite.
pub const PLACEHOLDER: &str = "—";

/// Formats a stable-denominated value as `$1,234.56` (`-$1,234.56` when
/// negative).
pub fn format_currency(value: f64) -> String {
    if !value.is_finite() {
        return PLACEHOLDER.to_string();
    }
    match Decimal::from_f64(value) {
        Some(d) => format_currency_decimal(d),
        // Beyond Decimal's range.
        None => {
            let (negative, digits) = two_places_f64(value);
            format!("{}${}", if negative { "-" } else { "" }, digits)
        }
    }
}

/// Formats a decimal as currency, rounding half away from zero to cents.
pub fn format_currency_decimal(value: Decimal) -> String {
    let (negative, digits) = two_places(value);
    format!("{}${}", if negative { "-" } else { "" }, digits)
}

/// Formats a fraction as a percentage: `0.1147` becomes `11.47%`.
pub fn format_percent(fraction: f64) -> String {
    let percent = fraction * 100.0;
    if !percent.is_finite() {
        return PLACEHOLDER.to_string();
    }
    match Decimal::from_f64(percent) {
        Some(d) => format_percent_decimal(d),
        None => {
            let (negative, digits) = two_places_f64(percent);
            format!("{}{}%", if negative { "-" } else { "" }, digits)
        }
    }
}

/// Formats an already-scaled percentage value: `11.468` becomes `11.47%`.
pub fn format_percent_decimal(percent: Decimal) -> String {
    let (negative, digits) = two_places(percent);
    format!("{}{}%", if negative { "-" } else { "" }, digits)
}

/// Formats a token quantity with a fixed number of decimals.
pub fn format_amount(value: f64, decimals: usize) -> String {
    if !value.is_finite() {
        return PLACEHOLDER.to_string();
    }
    format!("{value:.decimals$}")
}

/// Rounds to two places and returns the sign separately from the grouped
/// magnitude, so that `-0.001` does not print as `-0.00`.
fn two_places(value: Decimal) -> (bool, String) {
    let rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let negative = rounded.is_sign_negative() && !rounded.is_zero();
    (negative, group_fixed(&format!("{:.2}", rounded.abs())))
}

/// Same as [`two_places`] for finite values too large for `Decimal`.
fn two_places_f64(value: f64) -> (bool, String) {
    let magnitude = format!("{:.2}", value.abs());
    let negative = value < 0.0 && magnitude.bytes().any(|b| b.is_ascii_digit() && b != b'0');
    (negative, group_fixed(&magnitude))
}

/// Inserts thousands separators into a fixed-point `digits.frac` string.
fn group_fixed(magnitude: &str) -> String {
    let (integer, fraction) = magnitude.split_once('.').unwrap_or((magnitude, "00"));
    format!("{}.{}", group_thousands(integer), fraction)
}

fn group_thousands(integer: &str) -> String {
    let len = integer.len();
    let mut grouped = String::with_capacity(len + len / 3);
    for (i, ch) in integer.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(0.0), "$0.00");
        assert_eq!(format_currency(5.5), "$5.50");
        assert_eq!(format_currency(999.994), "$999.99");
        assert_eq!(format_currency(1234.5), "$1,234.50");
        assert_eq!(format_currency(1234567.891), "$1,234,567.89");
        assert_eq!(format_currency(-2.5), "-$2.50");
        assert_eq!(format_currency(-0.001), "$0.00");
    }

    #[test]
    fn test_format_currency_rounds_half_away_from_zero() {
        assert_eq!(format_currency(0.125), "$0.13");
        assert_eq!(format_currency(-0.125), "-$0.13");
        assert_eq!(format_currency_decimal(dec!(2.675)), "$2.68");
        assert_eq!(format_currency_decimal(dec!(-1000.005)), "-$1,000.01");
    }

    #[test]
    fn test_format_non_finite() {
        assert_eq!(format_currency(f64::NAN), PLACEHOLDER);
        assert_eq!(format_currency(f64::INFINITY), PLACEHOLDER);
        assert_eq!(format_percent(f64::NEG_INFINITY), PLACEHOLDER);
        assert_eq!(format_amount(f64::NAN, 6), PLACEHOLDER);
    }

    #[test]
    fn test_format_overflowing_values() {
        // 1e307 * 100 overflows to infinity
        assert_eq!(format_percent(1e307), PLACEHOLDER);

        let huge = format_currency(1e30);
        assert!(huge.starts_with("$1,000,000,000,"), "{huge}");
        assert!(huge.ends_with(".00"), "{huge}");
        assert!(!huge.contains('e'));

        let negative = format_currency(-1e30);
        assert!(negative.starts_with("-$1,000,000,000,"), "{negative}");

        let percent = format_percent(1e28);
        assert!(percent.starts_with("1,000,000,000,"), "{percent}");
        assert!(percent.ends_with(".00%"), "{percent}");
    }

    #[test]
    fn test_format_percent() {
        assert_eq!(format_percent(0.1147), "11.47%");
        assert_eq!(format_percent(5.978), "597.80%");
        assert_eq!(format_percent(-0.0058), "-0.58%");
        assert_eq!(format_percent(0.0), "0.00%");
        assert_eq!(format_percent_decimal(dec!(1234.5)), "1,234.50%");
    }

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount(0.213342, 6), "0.213342");
        assert_eq!(format_amount(525.70329, 2), "525.70");
    }

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands("1"), "1");
        assert_eq!(group_thousands("123"), "123");
        assert_eq!(group_thousands("1234"), "1,234");
        assert_eq!(group_thousands("123456"), "123,456");
        assert_eq!(group_thousands("1234567"), "1,234,567");
    }
}
