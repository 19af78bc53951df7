/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! Field types for FIX tag-value messages.
//!
//! This module provides:
//! - [`FieldTag`]: Type-safe wrapper for FIX field tag numbers
//! - [`FieldRef`]: Zero-copy reference to a field within a message buffer
//! - [`FieldValue`]: A field value coerced to its semantic type
//!
//! Coercions on [`FieldRef`] are strict: anything that does not match the
//! wire shape of the target type is an
//! [`IncorrectDataFormat`](MessageRejectError::IncorrectDataFormat) error.

use crate::error::MessageRejectError;
use crate::types::{MarketTime, format_date, parse_date};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// FIX field tag number.
///
/// Tags are positive integers that identify fields within a FIX message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(transparent)]
#[serde(transparent)]
pub struct FieldTag(u32);

impl FieldTag {
    /// Creates a new field tag.
    ///
    /// # Arguments
    /// * `tag` - The tag number (must be > 0)
    #[inline]
    #[must_use]
    pub const fn new(tag: u32) -> Self {
        Self(tag)
    }

    /// Returns the raw tag number.
    #[inline]
    #[must_use]
    pub const fn value(self) -> u32 {
        self.0
    }
}

impl From<u32> for FieldTag {
    fn from(tag: u32) -> Self {
        Self(tag)
    }
}

impl From<FieldTag> for u32 {
    fn from(tag: FieldTag) -> Self {
        tag.0
    }
}

impl fmt::Display for FieldTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Zero-copy reference to a field within a FIX message buffer.
///
/// This struct holds references to the original message buffer,
/// avoiding allocation during parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldRef<'a> {
    /// The field tag number.
    pub tag: u32,
    /// Reference to the field value bytes (without delimiters).
    pub value: &'a [u8],
}

impl<'a> FieldRef<'a> {
    /// Creates a new field reference.
    ///
    /// # Arguments
    /// * `tag` - The field tag number
    /// * `value` - Reference to the value bytes
    #[inline]
    #[must_use]
    pub const fn new(tag: u32, value: &'a [u8]) -> Self {
        Self { tag, value }
    }

    /// Returns the field tag.
    #[inline]
    #[must_use]
    pub const fn tag(&self) -> FieldTag {
        FieldTag(self.tag)
    }

    /// Returns the value as a string slice.
    ///
    /// # Errors
    /// Returns `IncorrectDataFormat` if the value is not valid UTF-8.
    pub fn as_str(&self) -> Result<&'a str, MessageRejectError> {
        std::str::from_utf8(self.value)
            .map_err(|_| MessageRejectError::incorrect_format(self.tag, "value is not valid UTF-8"))
    }

    /// Returns the value as a signed integer.
    ///
    /// Accepts an optional leading `-` followed by ASCII digits.
    ///
    /// # Errors
    /// Returns `IncorrectDataFormat` for any other shape or on overflow.
    pub fn as_int(&self) -> Result<i64, MessageRejectError> {
        let digits = self.value.strip_prefix(b"-").unwrap_or(self.value);
        if digits.is_empty() || !digits.iter().all(u8::is_ascii_digit) {
            return Err(self.format_error("integer"));
        }
        self.as_str()?
            .parse()
            .map_err(|_| MessageRejectError::incorrect_format(self.tag, "integer out of range"))
    }

    /// Returns the value as an exact decimal.
    ///
    /// Only the canonical form is accepted: an optional leading `-`, an
    /// integer part without leading zeros, and an optional `.` followed by at
    /// least one digit. Negative zero is refused. The parsed value keeps the
    /// wire scale, so formatting it reproduces the wire text.
    ///
    /// # Errors
    /// Returns `IncorrectDataFormat` for any other shape or when the value
    /// does not fit a [`Decimal`] without rounding.
    pub fn as_decimal(&self) -> Result<Decimal, MessageRejectError> {
        let negative = self.value.first() == Some(&b'-');
        let body = if negative { &self.value[1..] } else { self.value };
        let (int_part, frac_part) = match body.iter().position(|&b| b == b'.') {
            Some(dot) => (&body[..dot], Some(&body[dot + 1..])),
            None => (body, None),
        };
        let all_digits = |part: &[u8]| !part.is_empty() && part.iter().all(u8::is_ascii_digit);
        if !all_digits(int_part) || !frac_part.is_none_or(all_digits) {
            return Err(self.format_error("decimal"));
        }
        if int_part.len() > 1 && int_part[0] == b'0' {
            return Err(self.format_error("decimal without leading zeros"));
        }
        if negative && body.iter().all(|&b| b == b'0' || b == b'.') {
            return Err(self.format_error("decimal other than negative zero"));
        }

        let value = Decimal::from_str(self.as_str()?)
            .map_err(|_| MessageRejectError::incorrect_format(self.tag, "decimal out of range"))?;
        if value.scale() as usize != frac_part.map_or(0, <[u8]>::len) {
            return Err(MessageRejectError::incorrect_format(
                self.tag,
                "decimal precision exceeds 28 digits",
            ));
        }
        Ok(value)
    }

    /// Returns the value as a calendar date (`yyyyMMdd`).
    ///
    /// # Errors
    /// Returns `IncorrectDataFormat` if the value is not a valid date.
    pub fn as_date(&self) -> Result<NaiveDate, MessageRejectError> {
        parse_date(self.value).ok_or_else(|| self.format_error("date (yyyyMMdd)"))
    }

    /// Returns the value as a time of day (`HH:mm:ss` or `HH:mm:ss.sss`).
    ///
    /// # Errors
    /// Returns `IncorrectDataFormat` if the value is not a valid time.
    pub fn as_time(&self) -> Result<MarketTime, MessageRejectError> {
        MarketTime::parse(self.value).ok_or_else(|| self.format_error("time (HH:mm:ss[.sss])"))
    }

    /// Returns the value as a single character.
    ///
    /// # Errors
    /// Returns `IncorrectDataFormat` if the value is not a single ASCII character.
    pub fn as_char(&self) -> Result<char, MessageRejectError> {
        match self.value {
            [b] if b.is_ascii() => Ok(char::from(*b)),
            _ => Err(self.format_error("single ASCII character")),
        }
    }

    /// Returns the raw bytes of the value.
    #[inline]
    #[must_use]
    pub const fn as_bytes(&self) -> &'a [u8] {
        self.value
    }

    /// Returns the length of the value in bytes.
    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.value.len()
    }

    /// Returns true if the value is empty.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    fn format_error(&self, expected: &str) -> MessageRejectError {
        MessageRejectError::incorrect_format(
            self.tag,
            format!(
                "expected {expected}, got '{}'",
                String::from_utf8_lossy(self.value)
            ),
        )
    }
}

/// A field value coerced to its semantic type.
///
/// String values borrow from the message buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FieldValue<'a> {
    /// String value.
    Str(&'a str),
    /// Integer value.
    Int(i64),
    /// Exact decimal value.
    Decimal(Decimal),
    /// Calendar date.
    Date(NaiveDate),
    /// Time of day.
    Time(MarketTime),
    /// Single character value.
    Char(char),
}

impl<'a> FieldValue<'a> {
    /// Returns the value as a string, if it is a Str variant.
    #[must_use]
    pub const fn as_str(&self) -> Option<&'a str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the value as an i64, if it is an Int variant.
    #[must_use]
    pub const fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns the value as a Decimal, if it is a Decimal variant.
    #[must_use]
    pub const fn as_decimal(&self) -> Option<Decimal> {
        match self {
            Self::Decimal(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns the value as a date, if it is a Date variant.
    #[must_use]
    pub const fn as_date(&self) -> Option<NaiveDate> {
        match self {
            Self::Date(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns the value as a time, if it is a Time variant.
    #[must_use]
    pub const fn as_time(&self) -> Option<MarketTime> {
        match self {
            Self::Time(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns the value as a char, if it is a Char variant.
    #[must_use]
    pub const fn as_char(&self) -> Option<char> {
        match self {
            Self::Char(v) => Some(*v),
            _ => None,
        }
    }
}

impl fmt::Display for FieldValue<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Str(s) => f.write_str(s),
            Self::Int(v) => write!(f, "{v}"),
            Self::Decimal(v) => write!(f, "{v}"),
            Self::Date(d) => f.write_str(&format_date(*d)),
            Self::Time(t) => write!(f, "{t}"),
            Self::Char(c) => write!(f, "{c}"),
        }
    }
}
