//! Conversion of raw values into typed values
//!
//! Every conversion is strict: the complete value (apart from surrounding whitespace) has to be
//! consumed, otherwise the conversion fails. Values like `42abc` are therefore rejected instead of
//! being read as `42`.

use crate::classify::trim;
use core::num::IntErrorKind;
use thiserror_no_std::Error;

/// The reasons for which a raw value could not be converted
#[derive(Debug, Error, Eq, PartialEq, Copy, Clone)]
pub enum ConversionError {
    /// The value does not start with anything that could be converted
    #[error("The value does not contain a number")]
    NoConversion,
    /// The value starts with a number but has other characters after it
    #[error("The value has trailing characters after the number")]
    TrailingCharacters,
    /// The number does not fit into the requested type
    #[error("The number is out of range for the requested type")]
    Overflow,
    /// The value is none of `true`, `yes`, `1`, `false`, `no` or `0`
    #[error("The value is not a boolean")]
    NotABoolean,
    /// The destination cannot hold the value together with its terminating NUL byte
    #[error("The value needs {needed} bytes but the destination only holds {capacity}")]
    DestinationTooSmall { needed: usize, capacity: usize },
}

/// Types that can be converted from a raw ini value
pub trait FromIniValue: Sized {
    /// Convert `raw`, which may still be surrounded by whitespace
    fn from_ini_value(raw: &[u8]) -> Result<Self, ConversionError>;
}

/// Convert a raw value into `T`
pub fn parse_value<T: FromIniValue>(raw: &[u8]) -> Result<T, ConversionError> {
    T::from_ini_value(raw)
}

/// Copy a trimmed raw value into `dest` and terminate it with a NUL byte.
///
/// Returns the copied value without its terminator.
pub fn copy_value<'d>(raw: &[u8], dest: &'d mut [u8]) -> Result<&'d [u8], ConversionError> {
    let value = trim(raw);
    if value.len() + 1 > dest.len() {
        return Err(ConversionError::DestinationTooSmall {
            needed: value.len() + 1,
            capacity: dest.len(),
        });
    }
    dest[..value.len()].copy_from_slice(value);
    dest[value.len()] = 0;
    Ok(&dest[..value.len()])
}

const TRUE_WORDS: [&[u8]; 3] = [b"true", b"yes", b"1"];
const FALSE_WORDS: [&[u8]; 3] = [b"false", b"no", b"0"];

impl FromIniValue for bool {
    fn from_ini_value(raw: &[u8]) -> Result<Self, ConversionError> {
        let value = trim(raw);
        if TRUE_WORDS.iter().any(|w| w.eq_ignore_ascii_case(value)) {
            Ok(true)
        } else if FALSE_WORDS.iter().any(|w| w.eq_ignore_ascii_case(value)) {
            Ok(false)
        } else {
            Err(ConversionError::NotABoolean)
        }
    }
}

/// Length of the leading `[sign]digits` part of `text` or 0 if there are no digits
fn integer_prefix_len(text: &[u8], allow_minus: bool) -> usize {
    let sign = match text.first() {
        Some(b'+') => 1,
        Some(b'-') if allow_minus => 1,
        _ => 0,
    };
    let digits = text[sign..].iter().take_while(|c| c.is_ascii_digit()).count();
    if digits == 0 {
        0
    } else {
        sign + digits
    }
}

/// Check that `text` is exactly one (optionally signed) decimal integer
fn integer_text(raw: &[u8], signed: bool) -> Result<&str, ConversionError> {
    let text = trim(raw);
    match integer_prefix_len(text, signed) {
        0 => Err(ConversionError::NoConversion),
        n if n < text.len() => Err(ConversionError::TrailingCharacters),
        // only ascii signs and digits remain
        _ => core::str::from_utf8(text).map_err(|_| ConversionError::NoConversion),
    }
}

macro_rules! impl_from_ini_value_for_int {
    ($signed:expr => $($t:ty),+) => {
        $(
            impl FromIniValue for $t {
                fn from_ini_value(raw: &[u8]) -> Result<Self, ConversionError> {
                    integer_text(raw, $signed)?
                        .parse::<$t>()
                        .map_err(|e| match e.kind() {
                            IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => {
                                ConversionError::Overflow
                            }
                            _ => ConversionError::NoConversion,
                        })
                }
            }
        )+
    };
}

impl_from_ini_value_for_int!(true => i8, i16, i32, i64, isize);
impl_from_ini_value_for_int!(false => u8, u16, u32, u64, usize);

/// Length of the leading floating point number in `text` or 0 if it does not start with one
fn float_prefix_len(text: &[u8]) -> usize {
    let mut i = match text.first() {
        Some(b'+' | b'-') => 1,
        _ => 0,
    };

    for word in [&b"infinity"[..], b"inf", b"nan"] {
        if text
            .get(i..i + word.len())
            .is_some_and(|t| t.eq_ignore_ascii_case(word))
        {
            return i + word.len();
        }
    }

    let count_digits = |from: usize| text[from..].iter().take_while(|c| c.is_ascii_digit()).count();
    let int_digits = count_digits(i);
    i += int_digits;
    let mut frac_digits = 0;
    if text.get(i) == Some(&b'.') {
        frac_digits = count_digits(i + 1);
        if int_digits + frac_digits > 0 {
            i += 1 + frac_digits;
        }
    }
    if int_digits + frac_digits == 0 {
        return 0;
    }

    // an exponent only counts if it has digits
    if matches!(text.get(i), Some(b'e' | b'E')) {
        let sign = usize::from(matches!(text.get(i + 1), Some(b'+' | b'-')));
        let exp_digits = count_digits(i + 1 + sign);
        if exp_digits > 0 {
            i += 1 + sign + exp_digits;
        }
    }
    i
}

fn float_text(raw: &[u8]) -> Result<&str, ConversionError> {
    let text = trim(raw);
    match float_prefix_len(text) {
        0 => Err(ConversionError::NoConversion),
        n if n < text.len() => Err(ConversionError::TrailingCharacters),
        _ => core::str::from_utf8(text).map_err(|_| ConversionError::NoConversion),
    }
}

macro_rules! impl_from_ini_value_for_float {
    ($($t:ty),+) => {
        $(
            impl FromIniValue for $t {
                fn from_ini_value(raw: &[u8]) -> Result<Self, ConversionError> {
                    let text = float_text(raw)?;
                    let value = text
                        .parse::<$t>()
                        .map_err(|_| ConversionError::NoConversion)?;
                    let is_inf_literal = text
                        .trim_start_matches(|c: char| c == '+' || c == '-')
                        .as_bytes()
                        .first()
                        .is_some_and(|c| c.eq_ignore_ascii_case(&b'i'));
                    if value.is_infinite() && !is_inf_literal {
                        return Err(ConversionError::Overflow);
                    }
                    Ok(value)
                }
            }
        )+
    };
}

impl_from_ini_value_for_float!(f32, f64);
