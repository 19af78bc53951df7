/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! Core value types for HNX InfoGate fields.
//!
//! This module provides:
//! - [`MarketTime`]: wire time of day (`HH:mm:ss[.sss]`) that remembers its precision
//! - [`parse_date`] / [`format_date`]: wire dates (`yyyyMMdd`)
//! - [`SessionRejectReason`]: FIX tag 373 codes
//! - [`to_display_f64`]: explicit lossy conversion of exact decimals

use arrayvec::ArrayString;
use chrono::{NaiveDate, NaiveTime, Timelike};
use num_derive::{FromPrimitive, ToPrimitive};
use num_traits::{FromPrimitive, ToPrimitive};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fmt::Write;

/// Length of a wire date (`yyyyMMdd`).
pub const DATE_LEN: usize = 8;

/// Length of a wire time without milliseconds (`HH:mm:ss`).
pub const TIME_LEN: usize = 8;

/// Length of a wire time with milliseconds (`HH:mm:ss.sss`).
pub const TIME_MILLIS_LEN: usize = 12;

/// Precision a [`MarketTime`] was sent with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum TimePrecision {
    /// `HH:mm:ss`
    Seconds,
    /// `HH:mm:ss.sss`
    Millis,
}

/// Time of day as sent by the exchange.
///
/// Keeps the wire precision so that formatting reproduces the original text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct MarketTime {
    time: NaiveTime,
    precision: TimePrecision,
}

impl MarketTime {
    /// Creates a market time.
    #[must_use]
    pub const fn new(time: NaiveTime, precision: TimePrecision) -> Self {
        Self { time, precision }
    }

    /// Parses `HH:mm:ss` or `HH:mm:ss.sss`.
    ///
    /// Returns `None` for any other shape or an out-of-range component.
    #[must_use]
    pub fn parse(bytes: &[u8]) -> Option<Self> {
        let precision = match bytes.len() {
            TIME_LEN => TimePrecision::Seconds,
            TIME_MILLIS_LEN if bytes[8] == b'.' => TimePrecision::Millis,
            _ => return None,
        };
        if bytes[2] != b':' || bytes[5] != b':' {
            return None;
        }

        let hour = digits(&bytes[0..2])?;
        let minute = digits(&bytes[3..5])?;
        let second = digits(&bytes[6..8])?;
        let milli = match precision {
            TimePrecision::Seconds => 0,
            TimePrecision::Millis => digits(&bytes[9..12])?,
        };

        let time = NaiveTime::from_hms_milli_opt(hour, minute, second, milli)?;
        Some(Self { time, precision })
    }

    /// Returns the time of day.
    #[inline]
    #[must_use]
    pub const fn time(&self) -> NaiveTime {
        self.time
    }

    /// Returns the wire precision.
    #[inline]
    #[must_use]
    pub const fn precision(&self) -> TimePrecision {
        self.precision
    }

    /// Formats the time back to its wire form.
    #[must_use]
    pub fn format(&self) -> ArrayString<TIME_MILLIS_LEN> {
        let mut buf = ArrayString::new();
        let _ = write!(
            buf,
            "{:02}:{:02}:{:02}",
            self.time.hour(),
            self.time.minute(),
            self.time.second()
        );
        if self.precision == TimePrecision::Millis {
            let _ = write!(buf, ".{:03}", self.time.nanosecond() / 1_000_000);
        }
        buf
    }
}

impl fmt::Display for MarketTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format())
    }
}

/// Parses a wire date (`yyyyMMdd`).
#[must_use]
pub fn parse_date(bytes: &[u8]) -> Option<NaiveDate> {
    if bytes.len() != DATE_LEN {
        return None;
    }
    let year = digits(&bytes[0..4])?;
    let month = digits(&bytes[4..6])?;
    let day = digits(&bytes[6..8])?;
    NaiveDate::from_ymd_opt(i32::try_from(year).ok()?, month, day)
}

/// Formats a date in wire form (`yyyyMMdd`).
#[must_use]
pub fn format_date(date: NaiveDate) -> ArrayString<DATE_LEN> {
    let mut buf = ArrayString::new();
    let _ = write!(buf, "{}", date.format("%Y%m%d"));
    buf
}

/// Converts an exact decimal to `f64` for display.
///
/// This is lossy; never feed the result back into price or quantity arithmetic.
#[must_use]
pub fn to_display_f64(value: Decimal) -> f64 {
    value.to_f64().unwrap_or(f64::NAN)
}

fn digits(bytes: &[u8]) -> Option<u32> {
    bytes.iter().try_fold(0u32, |acc, &b| {
        b.is_ascii_digit().then(|| acc * 10 + u32::from(b - b'0'))
    })
}

/// SessionRejectReason (tag 373) values.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, FromPrimitive, ToPrimitive, Serialize, Deserialize,
)]
#[repr(u32)]
pub enum SessionRejectReason {
    /// Invalid tag number.
    InvalidTagNumber = 0,
    /// Required tag missing.
    RequiredTagMissing = 1,
    /// Tag not defined for this message type.
    TagNotDefinedForMessageType = 2,
    /// Undefined tag.
    UndefinedTag = 3,
    /// Tag specified without a value.
    TagSpecifiedWithoutValue = 4,
    /// Value is incorrect (out of range) for this tag.
    ValueIsIncorrect = 5,
    /// Incorrect data format for value.
    IncorrectDataFormat = 6,
    /// Invalid MsgType.
    InvalidMsgType = 11,
    /// Tag appears more than once.
    TagAppearsMoreThanOnce = 13,
    /// Tag specified out of required order.
    TagSpecifiedOutOfRequiredOrder = 14,
    /// Repeating group fields out of order.
    RepeatingGroupFieldsOutOfOrder = 15,
    /// Incorrect NumInGroup count for repeating group.
    IncorrectNumInGroupCount = 16,
    /// Other.
    Other = 99,
}

impl SessionRejectReason {
    /// Returns the wire code.
    #[must_use]
    pub fn code(self) -> u32 {
        self.to_u32().unwrap_or(99)
    }

    /// Looks up a reason by wire code.
    #[must_use]
    pub fn from_code(code: u32) -> Option<Self> {
        Self::from_u32(code)
    }
}

impl fmt::Display for SessionRejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_market_time_seconds() {
        let t = MarketTime::parse(b"09:15:30").unwrap();
        assert_eq!(t.time(), NaiveTime::from_hms_opt(9, 15, 30).unwrap());
        assert_eq!(t.precision(), TimePrecision::Seconds);
        assert_eq!(t.to_string(), "09:15:30");
    }

    #[test]
    fn test_market_time_millis_roundtrip() {
        for wire in ["14:45:00.000", "10:00:01.007", "23:59:59.999"] {
            let t = MarketTime::parse(wire.as_bytes()).unwrap();
            assert_eq!(t.precision(), TimePrecision::Millis);
            assert_eq!(t.format().as_str(), wire);
        }
    }

    #[test]
    fn test_market_time_rejects_bad_shapes() {
        assert!(MarketTime::parse(b"9:15:30").is_none());
        assert!(MarketTime::parse(b"09-15-30").is_none());
        assert!(MarketTime::parse(b"25:00:00").is_none());
        assert!(MarketTime::parse(b"09:15:30.5").is_none());
        assert!(MarketTime::parse(b"09:15:30,500").is_none());
        assert!(MarketTime::parse(b"").is_none());
    }

    #[test]
    fn test_date_roundtrip() {
        let date = parse_date(b"20240131").unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2024, 1, 31).unwrap());
        assert_eq!(format_date(date).as_str(), "20240131");
    }

    #[test]
    fn test_date_rejects_invalid() {
        assert!(parse_date(b"20240230").is_none());
        assert!(parse_date(b"2024-1-31").is_none());
        assert!(parse_date(b"2024013").is_none());
        assert!(parse_date(b"+2024013").is_none());
    }

    #[test]
    fn test_to_display_f64() {
        let d = Decimal::from_str("15200.5").unwrap();
        assert_eq!(to_display_f64(d), 15200.5);
    }

    #[test]
    fn test_session_reject_reason_codes() {
        assert_eq!(SessionRejectReason::TagAppearsMoreThanOnce.code(), 13);
        assert_eq!(
            SessionRejectReason::from_code(16),
            Some(SessionRejectReason::IncorrectNumInGroupCount)
        );
        assert_eq!(SessionRejectReason::from_code(42), None);
    }
}
