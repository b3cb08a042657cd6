use winnow::ascii::{digit0, digit1, hex_digit1, oct_digit1};
use winnow::combinator::{alt, opt, preceded};
use winnow::token::{literal, one_of, take_while};
use winnow::{ModalResult, Parser};

/// Coerce text to a number the way a JavaScript `Number(text)` call does
///
/// Surrounding whitespace is ignored. Decimal literals with an optional sign and
/// exponent, `Infinity`, and `0x`/`0o`/`0b` prefixed integers are accepted.
/// Anything else, including blank text, yields NaN.
///
/// # Examples
/// ```
/// use locale_number_format::to_number;
///
/// assert_eq!(to_number(" 1.50 "), 1.5);
/// assert_eq!(to_number("0x1F"), 31.0);
/// assert!(to_number("1,5").is_nan());
/// ```
pub fn to_number(text: &str) -> f64 {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return f64::NAN;
    }

    numeric_literal.parse(trimmed).unwrap_or(f64::NAN)
}

/// Count the characters between the first and second decimal points
///
/// Returns 0 when the text has no decimal point. Everything after the point
/// counts, so "1.5e3" gives 3 and "1.50 " gives 3.
pub fn fraction_digit_count(text: &str) -> usize {
    text.split('.').nth(1).map_or(0, |fraction| fraction.chars().count())
}

/// Render a number the way JavaScript's `Number.prototype.toString` does
///
/// Magnitudes at or above 1e21, or below 1e-6, use exponent notation with an
/// explicit exponent sign. Negative zero renders as "0".
pub fn number_to_string(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if value == 0.0 {
        return "0".to_string();
    }

    let magnitude = value.abs();
    if (1e-6..1e21).contains(&magnitude) {
        return format!("{value}");
    }

    let exponential = format!("{value:e}");
    match exponential.split_once('e') {
        Some((mantissa, exponent)) if !exponent.starts_with('-') => {
            format!("{mantissa}e+{exponent}")
        }
        _ => exponential,
    }
}

fn numeric_literal(input: &mut &str) -> ModalResult<f64> {
    alt((infinity, radix_integer, decimal_literal)).parse_next(input)
}

fn sign(input: &mut &str) -> ModalResult<char> {
    one_of(['+', '-']).parse_next(input)
}

fn infinity(input: &mut &str) -> ModalResult<f64> {
    (opt(sign), literal("Infinity"))
        .map(|(sign, _)| {
            if sign == Some('-') {
                f64::NEG_INFINITY
            } else {
                f64::INFINITY
            }
        })
        .parse_next(input)
}

fn radix_integer(input: &mut &str) -> ModalResult<f64> {
    alt((
        preceded(alt(("0x", "0X")), hex_digit1).map(|digits| fold_digits(digits, 16)),
        preceded(alt(("0o", "0O")), oct_digit1).map(|digits| fold_digits(digits, 8)),
        preceded(
            alt(("0b", "0B")),
            take_while(1.., |c: char| c == '0' || c == '1'),
        )
        .map(|digits| fold_digits(digits, 2)),
    ))
    .parse_next(input)
}

fn decimal_literal(input: &mut &str) -> ModalResult<f64> {
    (
        opt(sign),
        alt(((digit1, opt(('.', digit0))).void(), ('.', digit1).void())),
        opt((one_of(['e', 'E']), opt(sign), digit1)),
    )
        .take()
        .try_map(str::parse::<f64>)
        .parse_next(input)
}

// Radix literals may exceed u64, so accumulate in floating point like JS does.
fn fold_digits(digits: &str, radix: u32) -> f64 {
    digits
        .chars()
        .filter_map(|c| c.to_digit(radix))
        .fold(0.0, |acc, digit| acc * radix as f64 + digit as f64)
}
