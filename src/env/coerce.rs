//! Type coercion
//!
//! Converts raw environment strings into typed field values. The supported
//! kinds are strings, booleans, base-10 integers of every width, and
//! durations written as `<number><unit>` segments (`"1s"`, `"500ms"`,
//! `"1h30m"`).

use std::fmt;
use std::num::ParseIntError;
use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

/// Target kind of a configuration field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    /// Used verbatim
    String,
    /// Exactly `true` or `false`
    Bool,
    /// Signed integer of the given bit width
    Signed(u32),
    /// Unsigned integer of the given bit width
    Unsigned(u32),
    /// Magnitude plus unit suffix
    Duration,
    /// A kind with no coercion rule, named for error reporting
    Other(&'static str),
}

impl FieldKind {
    /// Whether a coercion rule exists for this kind
    pub fn is_supported(&self) -> bool {
        !matches!(self, FieldKind::Other(_))
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldKind::String => write!(f, "string"),
            FieldKind::Bool => write!(f, "bool"),
            FieldKind::Signed(bits) => write!(f, "i{}", bits),
            FieldKind::Unsigned(bits) => write!(f, "u{}", bits),
            FieldKind::Duration => write!(f, "duration"),
            FieldKind::Other(name) => write!(f, "{}", name),
        }
    }
}

/// Why a raw string could not be coerced
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoerceError {
    /// Boolean literal other than `true`/`false`
    #[error("invalid boolean literal, expected \"true\" or \"false\"")]
    InvalidBool,

    /// Integer parse failure, including out-of-range values
    #[error("{0}")]
    InvalidInt(#[from] ParseIntError),

    /// Malformed, negative or overflowing duration
    #[error("{0}")]
    InvalidDuration(String),

    /// The named variable is set but its value is not valid unicode
    #[error("value of {0} is not valid unicode")]
    NotUnicode(String),
}

/// A type that can be read from a single environment string
///
/// Implemented for the field types the resolver knows how to coerce.
/// [`KIND`](EnvValue::KIND) is what ends up in error messages.
pub trait EnvValue: Sized {
    /// Kind reported for fields of this type
    const KIND: FieldKind;

    /// Coerce a raw, non-empty environment string
    fn from_env_str(raw: &str) -> Result<Self, CoerceError>;
}

impl EnvValue for String {
    const KIND: FieldKind = FieldKind::String;

    fn from_env_str(raw: &str) -> Result<Self, CoerceError> {
        Ok(raw.to_string())
    }
}

impl EnvValue for PathBuf {
    const KIND: FieldKind = FieldKind::String;

    fn from_env_str(raw: &str) -> Result<Self, CoerceError> {
        Ok(PathBuf::from(raw))
    }
}

impl EnvValue for bool {
    const KIND: FieldKind = FieldKind::Bool;

    fn from_env_str(raw: &str) -> Result<Self, CoerceError> {
        match raw {
            "true" => Ok(true),
            "false" => Ok(false),
            _ => Err(CoerceError::InvalidBool),
        }
    }
}

macro_rules! impl_env_value_int {
    ($kind:ident => $($ty:ty),+) => {
        $(
            impl EnvValue for $ty {
                const KIND: FieldKind = FieldKind::$kind(<$ty>::BITS);

                fn from_env_str(raw: &str) -> Result<Self, CoerceError> {
                    Ok(raw.parse::<$ty>()?)
                }
            }
        )+
    };
}

impl_env_value_int!(Signed => i8, i16, i32, i64, isize);
impl_env_value_int!(Unsigned => u8, u16, u32, u64, usize);

impl EnvValue for Duration {
    const KIND: FieldKind = FieldKind::Duration;

    fn from_env_str(raw: &str) -> Result<Self, CoerceError> {
        parse_duration(raw)
    }
}

/// Optional fields stay `None` when unset
impl<T: EnvValue> EnvValue for Option<T> {
    const KIND: FieldKind = T::KIND;

    fn from_env_str(raw: &str) -> Result<Self, CoerceError> {
        T::from_env_str(raw).map(Some)
    }
}

const NANOS_PER_MICRO: u128 = 1_000;
const NANOS_PER_MILLI: u128 = 1_000_000;
const NANOS_PER_SEC: u128 = 1_000_000_000;

fn unit_nanos(unit: &str) -> Option<u128> {
    match unit {
        "ns" => Some(1),
        // micro sign and greek mu are both accepted
        "us" | "\u{b5}s" | "\u{3bc}s" => Some(NANOS_PER_MICRO),
        "ms" => Some(NANOS_PER_MILLI),
        "s" => Some(NANOS_PER_SEC),
        "m" => Some(60 * NANOS_PER_SEC),
        "h" => Some(3600 * NANOS_PER_SEC),
        _ => None,
    }
}

/// Parse a duration string such as `"300ms"`, `"1.5h"` or `"2h45m"`
///
/// A duration is a sequence of decimal numbers, each with an optional
/// fraction and a mandatory unit suffix. Valid units are `ns`, `us` (or
/// `µs`), `ms`, `s`, `m` and `h`. The bare string `"0"` is accepted. An
/// optional leading `+` is allowed; negative durations are rejected unless
/// they are zero.
pub fn parse_duration(raw: &str) -> Result<Duration, CoerceError> {
    let invalid = |reason: &str| CoerceError::InvalidDuration(format!("{} \"{}\"", reason, raw));

    let mut s = raw;
    let mut negative = false;
    if let Some(rest) = s.strip_prefix('-') {
        negative = true;
        s = rest;
    } else if let Some(rest) = s.strip_prefix('+') {
        s = rest;
    }

    if s == "0" {
        return Ok(Duration::ZERO);
    }
    if s.is_empty() {
        return Err(invalid("invalid duration"));
    }

    let mut total: u128 = 0;
    while !s.is_empty() {
        // Integer part
        let int_len = s.bytes().take_while(u8::is_ascii_digit).count();
        let (int_digits, rest) = s.split_at(int_len);
        s = rest;

        // Fraction part
        let mut frac: u128 = 0;
        let mut scale: u128 = 1;
        let mut has_frac_digits = false;
        if let Some(rest) = s.strip_prefix('.') {
            let frac_len = rest.bytes().take_while(u8::is_ascii_digit).count();
            let (frac_digits, rest) = rest.split_at(frac_len);
            s = rest;
            has_frac_digits = frac_len > 0;
            // digits past 1e-18 cannot change the nanosecond result
            for b in frac_digits.bytes().take(18) {
                frac = frac * 10 + u128::from(b - b'0');
                scale *= 10;
            }
        }

        if int_digits.is_empty() && !has_frac_digits {
            return Err(invalid("invalid duration"));
        }

        let unit_len = s
            .char_indices()
            .find(|(_, c)| *c == '.' || c.is_ascii_digit())
            .map(|(i, _)| i)
            .unwrap_or(s.len());
        if unit_len == 0 {
            return Err(invalid("missing unit in duration"));
        }
        let (unit, rest) = s.split_at(unit_len);
        s = rest;

        let unit = match unit_nanos(unit) {
            Some(nanos) => nanos,
            None => {
                return Err(CoerceError::InvalidDuration(format!(
                    "unknown unit \"{}\" in duration \"{}\"",
                    unit, raw
                )))
            }
        };

        let whole: u128 = if int_digits.is_empty() {
            0
        } else {
            int_digits.parse().map_err(|_| invalid("invalid duration"))?
        };

        total = whole
            .checked_mul(unit)
            .and_then(|v| v.checked_add(frac * unit / scale))
            .and_then(|v| total.checked_add(v))
            .ok_or_else(|| invalid("invalid duration"))?;
    }

    let nanos = u64::try_from(total).map_err(|_| invalid("duration out of range"))?;
    if negative && nanos != 0 {
        return Err(invalid("negative duration"));
    }

    Ok(Duration::from_nanos(nanos))
}
