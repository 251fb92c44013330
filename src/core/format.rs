/// Significant digits used for slice values in label text.
pub const VALUE_PRECISION: usize = 10;
/// Significant digits used for slice percentages in label text.
pub const PERCENT_PRECISION: usize = 3;

/// Formats `fraction` (0..=1) as a percentage with three significant digits.
///
/// Trailing zeros and a dangling decimal point are removed, so `1/3` becomes
/// `33.3%` and `0.5` becomes `50%`. Non-finite fractions read as `0%`.
#[must_use]
pub fn format_percent(fraction: f64) -> String {
    let percent = fraction * 100.0;
    let percent = if percent.is_finite() { percent } else { 0.0 };
    let mut text = trim_fraction_zeros(to_precision(percent, PERCENT_PRECISION));
    text.push('%');
    text
}

/// Formats a slice value with ten significant digits, trailing zeros removed.
#[must_use]
pub fn format_value(value: f64) -> String {
    trim_fraction_zeros(to_precision(value, VALUE_PRECISION))
}

/// Digits after the point that make `{:e}` print a finite `f64` exactly.
const EXACT_DIGITS: usize = 800;
/// Largest significant-digit count `to_precision` honors.
const MAX_PRECISION: usize = 100;

/// Rounds to `precision` significant digits, ties away from zero.
///
/// Rounding works on the exact decimal expansion of `value`, so a value that
/// sits exactly halfway (like `3.125` at three digits) rounds up in magnitude.
/// Uses positional notation unless the decimal exponent is below -6 or at
/// least `precision`, in which case it switches to `d.ddde+N` notation.
#[must_use]
pub fn to_precision(value: f64, precision: usize) -> String {
    let precision = precision.clamp(1, MAX_PRECISION);
    if !value.is_finite() {
        return format!("{value}");
    }
    if value == 0.0 {
        return format!("{:.*}", precision - 1, 0.0);
    }

    let (digits, exponent) = round_significant(value.abs(), precision);
    let sign = if value < 0.0 { "-" } else { "" };

    if exponent < -6 || exponent >= precision as i32 {
        let (lead, rest) = digits.split_at(1);
        let exp_sign = if exponent < 0 { '-' } else { '+' };
        let point = if rest.is_empty() { "" } else { "." };
        return format!("{sign}{lead}{point}{rest}e{exp_sign}{}", exponent.unsigned_abs());
    }

    if exponent < 0 {
        let zeros = "0".repeat(exponent.unsigned_abs() as usize - 1);
        return format!("{sign}0.{zeros}{digits}");
    }
    let (whole, fraction) = digits.split_at(exponent as usize + 1);
    if fraction.is_empty() {
        format!("{sign}{whole}")
    } else {
        format!("{sign}{whole}.{fraction}")
    }
}

/// First `precision` significant digits of a finite positive `value`, rounded
/// half up on its exact expansion, plus the decimal exponent of the first one.
fn round_significant(value: f64, precision: usize) -> (String, i32) {
    let exact = format!("{:.*e}", EXACT_DIGITS, value);
    let (mantissa, exponent) = exact.split_once('e').unwrap_or((exact.as_str(), "0"));
    let mut exponent: i32 = exponent.parse().unwrap_or(0);
    let expansion: Vec<u8> = mantissa.bytes().filter(u8::is_ascii_digit).collect();

    let mut digits = expansion[..precision].to_vec();
    if expansion.get(precision).is_some_and(|&next| next >= b'5') {
        let mut carry = true;
        for digit in digits.iter_mut().rev() {
            if *digit == b'9' {
                *digit = b'0';
            } else {
                *digit += 1;
                carry = false;
                break;
            }
        }
        if carry {
            digits.insert(0, b'1');
            digits.pop();
            exponent += 1;
        }
    }
    (String::from_utf8_lossy(&digits).into_owned(), exponent)
}

/// Formats a coordinate for path data and transform strings.
///
/// Shortest round-trip form, with `-0` printed as `0`.
#[must_use]
pub fn svg_number(value: f64) -> String {
    crate::core::value::format_plain_number(value)
}

fn trim_fraction_zeros(text: String) -> String {
    if !text.contains('.') || text.contains('e') {
        return text;
    }
    text.trim_end_matches('0').trim_end_matches('.').to_owned()
}

#[cfg(test)]
mod tests {
    use super::{format_percent, format_value, svg_number, to_precision};

    #[test]
    fn to_precision_switches_notation_on_exponent() {
        assert_eq!(to_precision(33.3333, 3), "33.3");
        assert_eq!(to_precision(50.0, 3), "50.0");
        assert_eq!(to_precision(100.0, 3), "100");
        assert_eq!(to_precision(1234.0, 3), "1.23e+3");
        assert_eq!(to_precision(0.000_000_123_4, 3), "1.23e-7");
        assert_eq!(to_precision(0.0, 3), "0.00");
        assert_eq!(to_precision(99.95, 3), "100");
        assert_eq!(to_precision(-2.5, 1), "-3");
        assert_eq!(to_precision(0.05, 1), "0.05");
        assert_eq!(to_precision(999_500.0, 3), "1.00e+6");
    }

    #[test]
    fn exact_halfway_values_round_away_from_zero() {
        assert_eq!(to_precision(3.125, 3), "3.13");
        assert_eq!(to_precision(0.125, 2), "0.13");
        assert_eq!(to_precision(2.5, 1), "3");
        assert_eq!(format_percent(1.0 / 32.0), "3.13%");
        assert_eq!(format_percent(49.0 / 400.0), "12.3%");
        // Just below the tie in binary, so it rounds down.
        assert_eq!(to_precision(1.005, 3), "1.00");
    }

    #[test]
    fn percentages_drop_trailing_zeros() {
        assert_eq!(format_percent(1.0 / 3.0), "33.3%");
        assert_eq!(format_percent(0.5), "50%");
        assert_eq!(format_percent(1.0), "100%");
        assert_eq!(format_percent(0.0), "0%");
        assert_eq!(format_percent(f64::NAN), "0%");
        assert_eq!(format_percent(0.0125), "1.25%");
    }

    #[test]
    fn values_keep_ten_significant_digits() {
        assert_eq!(format_value(3.0), "3");
        assert_eq!(format_value(2.5), "2.5");
        assert_eq!(format_value(1.0 / 3.0), "0.3333333333");
        assert_eq!(format_value(12_345_678_901.0), "1.234567890e+10");
    }

    #[test]
    fn svg_numbers_use_shortest_form() {
        assert_eq!(svg_number(10.0), "10");
        assert_eq!(svg_number(-0.0), "0");
        assert_eq!(svg_number(-2.5), "-2.5");
    }
}
