//! Conversions from raw field text to typed values.

use crate::error::ParseError;
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime};
use std::str::FromStr;

/// A type that can be decoded from the text of a single field.
pub trait FromField: Sized {
    /// Parses `value` into `Self`.
    ///
    /// # Errors
    ///
    /// Returns an error if `value` is not a valid literal for `Self`.
    fn from_field(value: &str) -> Result<Self, ParseError>;
}

macro_rules! from_str_field {
    ($($t:ty),*) => {
        $(
            impl FromField for $t {
                fn from_field(value: &str) -> Result<Self, ParseError> {
                    parse::<$t>(value)
                }
            }
        )*
    };
}

from_str_field!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, String);

// `str::parse` rounds out-of-range literals to infinity; only the spelled-out
// infinities are accepted as such.
macro_rules! from_float_field {
    ($($t:ty),*) => {
        $(
            impl FromField for $t {
                fn from_field(value: &str) -> Result<Self, ParseError> {
                    let v = parse::<$t>(value)?;
                    if v.is_infinite() && !is_infinity_literal(value) {
                        return Err(ParseError::out_of_range(value));
                    }
                    Ok(v)
                }
            }
        )*
    };
}

from_float_field!(f32, f64);

fn is_infinity_literal(v: &str) -> bool {
    let digits = v.strip_prefix(&['+', '-'][..]).unwrap_or(v);
    digits.eq_ignore_ascii_case("inf") || digits.eq_ignore_ascii_case("infinity")
}

impl FromField for bool {
    fn from_field(value: &str) -> Result<Self, ParseError> {
        parse_bool(value)
    }
}

fn parse<T>(v: &str) -> Result<T, ParseError>
where
    T: FromStr,
    <T as FromStr>::Err: Into<ParseError>,
{
    v.parse::<T>().map_err(Into::into)
}

/// Parses the boolean literals `1`, `t`, `T`, `TRUE`, `true`, `True`, `0`,
/// `f`, `F`, `FALSE`, `false` and `False`.
///
/// # Errors
///
/// Returns an error for any other input.
pub fn parse_bool(v: &str) -> Result<bool, ParseError> {
    match v {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Ok(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Ok(false),
        _ => Err(ParseError::invalid_bool(v)),
    }
}

/// Parses `v` with a `strftime`-style `format`.
///
/// A format without time fields is accepted; the result is then midnight of
/// the parsed date.
///
/// # Errors
///
/// Returns an error if `v` does not match `format`.
pub fn parse_time(format: &str, v: &str) -> Result<NaiveDateTime, ParseError> {
    match NaiveDateTime::parse_from_str(v, format) {
        Ok(t) => Ok(t),
        Err(e) => match NaiveDate::parse_from_str(v, format) {
            Ok(d) => d.and_hms_opt(0, 0, 0).ok_or_else(|| e.into()),
            Err(_) => Err(e.into()),
        },
    }
}

/// Parses `v` with a `strftime`-style `format` that includes a UTC offset
/// field such as `%z`, keeping the offset.
///
/// # Errors
///
/// Returns an error if `v` does not match `format`, or `format` has no offset
/// field.
pub fn parse_datetime(format: &str, v: &str) -> Result<DateTime<FixedOffset>, ParseError> {
    DateTime::parse_from_str(v, format).map_err(Into::into)
}
