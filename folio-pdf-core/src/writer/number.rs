//! Canonical decimal form of numbers.
//!
//! PDF numbers never use exponents, and writers conventionally drop the
//! leading zero of magnitudes below one (`.5`, not `0.5`). Output must be
//! identical on every platform, so nothing here goes through locale-aware
//! formatting.

use crate::error::{PdfError, Result};

/// Magnitudes below this are written as `0` in adaptive mode.
const ADAPTIVE_ZERO_THRESHOLD: f64 = 0.000015;

/// Magnitudes from this up are written as integers in adaptive mode.
const ADAPTIVE_INTEGER_THRESHOLD: f64 = 32767.0;

/// How many fraction digits real numbers get when serialized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RealPrecision {
    /// Five digits below 1, two digits below 32767, none above, and `0` for
    /// anything smaller than 0.000015.
    #[default]
    Adaptive,
    /// Always up to this many digits.
    Fixed(usize),
}

impl RealPrecision {
    /// Fraction digits to use for `value`, or `None` when it is written as a
    /// plain `0`.
    fn digits_for(&self, value: f64) -> Option<usize> {
        match *self {
            RealPrecision::Fixed(digits) => Some(digits),
            RealPrecision::Adaptive => {
                let magnitude = value.abs();
                if magnitude < ADAPTIVE_ZERO_THRESHOLD {
                    None
                } else if magnitude < 1.0 {
                    Some(5)
                } else if magnitude < ADAPTIVE_INTEGER_THRESHOLD {
                    Some(2)
                } else {
                    Some(0)
                }
            }
        }
    }
}

/// Formats `value` under `precision`.
pub fn format_real(value: f64, precision: RealPrecision) -> Result<String> {
    if !value.is_finite() {
        return Err(PdfError::NonFiniteNumber(value));
    }
    match precision.digits_for(value) {
        Some(digits) => format_number(value, digits),
        None => Ok("0".to_string()),
    }
}

/// Formats `value` with at most `max_fraction_digits` digits after the point.
///
/// Rounding is half away from zero, applied to the shortest decimal string
/// that round-trips to `value`. Trailing fraction zeros are dropped, a value
/// with no fraction left has no point, and a result of zero is always `0`.
pub fn format_number(value: f64, max_fraction_digits: usize) -> Result<String> {
    if !value.is_finite() {
        return Err(PdfError::NonFiniteNumber(value));
    }

    // `Display` for f64 gives the shortest round-trip form and never an exponent
    let shortest = value.abs().to_string();
    let (int_part, frac_part) = shortest.split_once('.').unwrap_or((shortest.as_str(), ""));

    let mut digits: Vec<u8> = int_part
        .bytes()
        .chain(frac_part.bytes().take(max_fraction_digits))
        .collect();
    let mut int_len = int_part.len();

    let round_up = frac_part
        .as_bytes()
        .get(max_fraction_digits)
        .is_some_and(|&next| next >= b'5');
    if round_up && increment(&mut digits) {
        int_len += 1;
    }

    let (int_digits, frac_digits) = digits.split_at(int_len);
    let int_digits = trim_start(int_digits, b'0');
    let frac_digits = trim_end(frac_digits, b'0');

    if int_digits.is_empty() && frac_digits.is_empty() {
        return Ok("0".to_string());
    }

    let mut out = String::with_capacity(int_digits.len() + frac_digits.len() + 2);
    if value < 0.0 {
        out.push('-');
    }
    out.extend(int_digits.iter().map(|&b| char::from(b)));
    if !frac_digits.is_empty() {
        out.push('.');
        out.extend(frac_digits.iter().map(|&b| char::from(b)));
    }
    Ok(out)
}

/// Adds one unit in the last place of a decimal digit string. Returns true
/// when the carry ran off the front and a new leading `1` was inserted.
fn increment(digits: &mut Vec<u8>) -> bool {
    for digit in digits.iter_mut().rev() {
        if *digit == b'9' {
            *digit = b'0';
        } else {
            *digit += 1;
            return false;
        }
    }
    digits.insert(0, b'1');
    true
}

fn trim_start(bytes: &[u8], byte: u8) -> &[u8] {
    let start = bytes.iter().position(|&b| b != byte).unwrap_or(bytes.len());
    &bytes[start..]
}

fn trim_end(bytes: &[u8], byte: u8) -> &[u8] {
    let end = bytes.iter().rposition(|&b| b != byte).map_or(0, |i| i + 1);
    &bytes[..end]
}
