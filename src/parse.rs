//! Strict numeric parsing of user-typed text.
//!
//! Each base conversion scans the longest numeric prefix of a text, skipping
//! leading whitespace like the C `strto*` family, and reports how many bytes
//! it consumed. Strict parsing only accepts a result when the whole text was
//! consumed, so `"12abc"` is rejected instead of being read as `12`.

use std::str::FromStr;

/// Value produced by a conversion together with the number of bytes consumed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Parsed<T> {
    pub value: T,
    pub consumed: usize,
}

/// Base conversion of the numeric prefix of a text.
pub trait Scan: Sized {
    /// Scan the longest valid numeric prefix of `text`.
    ///
    /// Returns `None` if no conversion can be performed or if the value is
    /// out of range for `Self`.
    fn scan(text: &str) -> Option<Parsed<Self>>;
}

impl Scan for f64 {
    fn scan(text: &str) -> Option<Parsed<Self>> {
        scan_float(text)
    }
}

impl Scan for i32 {
    fn scan(text: &str) -> Option<Parsed<Self>> {
        scan_signed(text)
    }
}

impl Scan for i64 {
    fn scan(text: &str) -> Option<Parsed<Self>> {
        scan_signed(text)
    }
}

impl Scan for usize {
    fn scan(text: &str) -> Option<Parsed<Self>> {
        scan_size(text)
    }
}

/// Run `convert` on `text` and keep the result only if all of `text` was consumed.
pub fn strict_conversion<T, F>(text: &str, convert: F) -> Option<Parsed<T>>
where
    F: FnOnce(&str) -> Option<Parsed<T>>,
{
    let parsed = convert(text)?;
    (parsed.consumed == text.len()).then_some(parsed)
}

/// Parse `text` as a `T`.
///
/// With `strict` set, trailing characters make the parse fail. Otherwise the
/// numeric prefix is used and the rest of the text is ignored.
pub fn parse<T: Scan>(text: &str, strict: bool) -> Option<T> {
    let parsed = if strict {
        strict_conversion(text, T::scan)?
    } else {
        T::scan(text)?
    };
    Some(parsed.value)
}

/// Parse `text` as a double, failing on malformed or out-of-range input.
pub fn parse_double(text: &str, strict: bool) -> Option<f64> {
    parse(text, strict)
}

pub fn parse_int(text: &str, strict: bool) -> Option<i32> {
    parse(text, strict)
}

pub fn parse_long_long(text: &str, strict: bool) -> Option<i64> {
    parse(text, strict)
}

/// Parse `text` as a size.
///
/// Negative values are rejected rather than wrapped around, and so are
/// values above `usize::MAX`.
pub fn parse_size(text: &str, strict: bool) -> Option<usize> {
    parse(text, strict)
}

fn skip_whitespace(bytes: &[u8]) -> usize {
    bytes
        .iter()
        .take_while(|b| matches!(b, b' ' | b'\t' | b'\n' | b'\x0b' | b'\x0c' | b'\r'))
        .count()
}

fn skip_sign(bytes: &[u8], pos: usize) -> usize {
    match bytes.get(pos) {
        Some(b'+' | b'-') => pos + 1,
        _ => pos,
    }
}

fn count_digits(bytes: &[u8], pos: usize) -> usize {
    bytes[pos..].iter().take_while(|b| b.is_ascii_digit()).count()
}

fn starts_with_ignore_case(bytes: &[u8], word: &[u8]) -> bool {
    bytes.len() >= word.len() && bytes[..word.len()].eq_ignore_ascii_case(word)
}

fn scan_special(bytes: &[u8]) -> Option<(f64, usize)> {
    if starts_with_ignore_case(bytes, b"infinity") {
        Some((f64::INFINITY, 8))
    } else if starts_with_ignore_case(bytes, b"inf") {
        Some((f64::INFINITY, 3))
    } else if starts_with_ignore_case(bytes, b"nan") {
        Some((f64::NAN, 3))
    } else {
        None
    }
}

/// Magnitude of a float scanned from `pos`, with its end and whether the
/// significand is zero.
struct Magnitude {
    value: f64,
    end: usize,
    zero: bool,
}

fn scan_float(text: &str) -> Option<Parsed<f64>> {
    let bytes = text.as_bytes();
    let start = skip_whitespace(bytes);
    let pos = skip_sign(bytes, start);
    let negative = bytes.get(start) == Some(&b'-');

    if let Some((value, len)) = scan_special(&bytes[pos..]) {
        let value = if negative { -value } else { value };
        return Some(Parsed {
            value,
            consumed: pos + len,
        });
    }

    let magnitude = match scan_hex_magnitude(bytes, pos) {
        Some(magnitude) => magnitude,
        None => scan_decimal_magnitude(text, pos)?,
    };

    // Overflow, and underflow to zero or to a subnormal, are out of range.
    let value = magnitude.value;
    if value.is_infinite() || (!magnitude.zero && value < f64::MIN_POSITIVE) {
        return None;
    }

    Some(Parsed {
        value: if negative { -value } else { value },
        consumed: magnitude.end,
    })
}

fn scan_decimal_magnitude(text: &str, mut pos: usize) -> Option<Magnitude> {
    let bytes = text.as_bytes();
    let mantissa_start = pos;
    let int_digits = count_digits(bytes, pos);
    pos += int_digits;
    let mut frac_digits = 0;
    if bytes.get(pos) == Some(&b'.') {
        frac_digits = count_digits(bytes, pos + 1);
        if int_digits + frac_digits > 0 {
            pos += 1 + frac_digits;
        }
    }
    if int_digits + frac_digits == 0 {
        return None;
    }
    let zero = bytes[mantissa_start..pos]
        .iter()
        .all(|&b| b == b'0' || b == b'.');

    // An exponent marker without digits is left unconsumed.
    if matches!(bytes.get(pos), Some(b'e' | b'E')) {
        let exp_start = skip_sign(bytes, pos + 1);
        let exp_digits = count_digits(bytes, exp_start);
        if exp_digits > 0 {
            pos = exp_start + exp_digits;
        }
    }

    let value = text[mantissa_start..pos].parse().ok()?;
    Some(Magnitude {
        value,
        end: pos,
        zero,
    })
}

// Exponents past this bound give zero or infinity for any 60-bit significand.
const HEX_EXP_BOUND: i64 = 2200;

/// Scan a `0x` significand with an optional binary `p` exponent.
///
/// Returns `None` if no hex digit follows the prefix, in which case the
/// text reads as the decimal `0`.
fn scan_hex_magnitude(bytes: &[u8], pos: usize) -> Option<Magnitude> {
    if !starts_with_ignore_case(&bytes[pos..], b"0x") {
        return None;
    }
    let mut pos = pos + 2;

    // Keep up to 60 significant bits; lower digits only set a sticky bit.
    let mut mantissa: u64 = 0;
    let mut exp: i64 = 0;
    let mut sticky = false;
    let mut n_digits = 0;
    let mut seen_dot = false;
    loop {
        match bytes.get(pos) {
            Some(b'.') if !seen_dot => seen_dot = true,
            Some(&b) if b.is_ascii_hexdigit() => {
                let digit = u64::from((b as char).to_digit(16)?);
                n_digits += 1;
                if mantissa < 1 << 56 {
                    mantissa = mantissa * 16 + digit;
                    if seen_dot {
                        exp -= 4;
                    }
                } else {
                    sticky |= digit != 0;
                    if !seen_dot {
                        exp += 4;
                    }
                }
            }
            _ => break,
        }
        pos += 1;
    }
    if n_digits == 0 {
        return None;
    }
    let zero = mantissa == 0 && !sticky;
    if sticky {
        mantissa |= 1;
    }

    if matches!(bytes.get(pos), Some(b'p' | b'P')) {
        let exp_start = skip_sign(bytes, pos + 1);
        let exp_digits = count_digits(bytes, exp_start);
        if exp_digits > 0 {
            let bin_exp = bytes[exp_start..exp_start + exp_digits]
                .iter()
                .fold(0i64, |acc, &b| {
                    (acc * 10 + i64::from(b - b'0')).min(HEX_EXP_BOUND)
                });
            if bytes[pos + 1] == b'-' {
                exp -= bin_exp;
            } else {
                exp += bin_exp;
            }
            pos = exp_start + exp_digits;
        }
    }

    Some(Magnitude {
        value: scale_by_pow2(mantissa as f64, exp.clamp(-HEX_EXP_BOUND, HEX_EXP_BOUND)),
        end: pos,
        zero,
    })
}

fn scale_by_pow2(mut value: f64, mut exp: i64) -> f64 {
    const STEP: i64 = 1000;
    while exp > STEP {
        value *= 2f64.powi(STEP as i32);
        exp -= STEP;
    }
    while exp < -STEP {
        value *= 2f64.powi(-STEP as i32);
        exp += STEP;
    }
    value * 2f64.powi(exp as i32)
}

fn integer_span(bytes: &[u8]) -> Option<(usize, usize)> {
    let start = skip_whitespace(bytes);
    let digits_start = skip_sign(bytes, start);
    let digits = count_digits(bytes, digits_start);
    (digits > 0).then_some((start, digits_start + digits))
}

fn scan_signed<T: FromStr>(text: &str) -> Option<Parsed<T>> {
    let (start, end) = integer_span(text.as_bytes())?;
    let value = text[start..end].parse().ok()?;
    Some(Parsed {
        value,
        consumed: end,
    })
}

fn scan_size(text: &str) -> Option<Parsed<usize>> {
    let (start, end) = integer_span(text.as_bytes())?;
    let literal = &text[start..end];
    let value = match literal.strip_prefix('-') {
        Some(digits) if digits.bytes().all(|b| b == b'0') => 0,
        Some(_) => return None,
        None => literal.parse().ok()?,
    };
    Some(Parsed {
        value,
        consumed: end,
    })
}
