/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! FIX frame encoder.
//!
//! Builds frames in tag=value form. BeginString, BodyLength and CheckSum
//! are added by [`Encoder::finish`]; typed writers emit exactly the wire
//! forms the accessors accept, so a decoded value re-encodes to its
//! original bytes.

use crate::checksum::Checksum;
use bytes::{BufMut, BytesMut};
use chrono::NaiveDate;
use infogate_core::field::FieldValue;
use infogate_core::message::TAG_MSG_TYPE;
use infogate_core::types::{MarketTime, format_date};
use rust_decimal::Decimal;
use std::fmt::Write;

/// SOH (Start of Header) delimiter used in FIX messages.
pub const SOH: u8 = 0x01;

/// FIX frame encoder.
#[derive(Debug)]
pub struct Encoder {
    /// Buffer for the message body (between BodyLength and Checksum).
    body: BytesMut,
    /// The BeginString value (e.g., "FIX.4.4").
    begin_string: &'static str,
}

impl Encoder {
    /// Creates a new encoder with the specified BeginString.
    ///
    /// # Arguments
    /// * `begin_string` - The FIX version string (e.g., "FIX.4.4")
    #[must_use]
    pub fn new(begin_string: &'static str) -> Self {
        Self::with_capacity(begin_string, 256)
    }

    /// Creates a new encoder with pre-allocated capacity.
    ///
    /// # Arguments
    /// * `begin_string` - The FIX version string
    /// * `capacity` - Initial buffer capacity in bytes
    #[must_use]
    pub fn with_capacity(begin_string: &'static str, capacity: usize) -> Self {
        Self {
            body: BytesMut::with_capacity(capacity),
            begin_string,
        }
    }

    /// Creates an encoder whose first body field is MsgType (tag 35).
    ///
    /// # Arguments
    /// * `begin_string` - The FIX version string
    /// * `msg_type` - The tag 35 code
    #[must_use]
    pub fn new_message(begin_string: &'static str, msg_type: &str) -> Self {
        let mut encoder = Self::new(begin_string);
        encoder.put_str(TAG_MSG_TYPE, msg_type);
        encoder
    }

    /// Appends a field with a string value.
    #[inline]
    pub fn put_str(&mut self, tag: u32, value: &str) {
        self.put_raw(tag, value.as_bytes());
    }

    /// Appends a field with an integer value.
    #[inline]
    pub fn put_int(&mut self, tag: u32, value: i64) {
        let mut buf = itoa::Buffer::new();
        self.put_raw(tag, buf.format(value).as_bytes());
    }

    /// Appends a field with an exact decimal, keeping its scale.
    #[inline]
    pub fn put_decimal(&mut self, tag: u32, value: Decimal) {
        self.put_tag(tag);
        let _ = write!(self.body, "{value}");
        self.body.put_u8(SOH);
    }

    /// Appends a field with a date in `yyyyMMdd` form.
    #[inline]
    pub fn put_date(&mut self, tag: u32, value: NaiveDate) {
        self.put_raw(tag, format_date(value).as_bytes());
    }

    /// Appends a field with a time of day in its original precision.
    #[inline]
    pub fn put_time(&mut self, tag: u32, value: MarketTime) {
        self.put_raw(tag, value.format().as_bytes());
    }

    /// Appends a field with a single character value.
    #[inline]
    pub fn put_char(&mut self, tag: u32, value: char) {
        let mut buf = [0u8; 4];
        let s = value.encode_utf8(&mut buf);
        self.put_raw(tag, s.as_bytes());
    }

    /// Appends a field from a coerced value.
    pub fn put_value(&mut self, tag: u32, value: &FieldValue<'_>) {
        match *value {
            FieldValue::Str(s) => self.put_str(tag, s),
            FieldValue::Int(v) => self.put_int(tag, v),
            FieldValue::Decimal(v) => self.put_decimal(tag, v),
            FieldValue::Date(v) => self.put_date(tag, v),
            FieldValue::Time(v) => self.put_time(tag, v),
            FieldValue::Char(v) => self.put_char(tag, v),
        }
    }

    /// Appends a field with raw bytes.
    #[inline]
    pub fn put_raw(&mut self, tag: u32, value: &[u8]) {
        self.put_tag(tag);
        self.body.put_slice(value);
        self.body.put_u8(SOH);
    }

    fn put_tag(&mut self, tag: u32) {
        let mut tag_buf = itoa::Buffer::new();
        self.body.put_slice(tag_buf.format(tag).as_bytes());
        self.body.put_u8(b'=');
    }

    /// Finalizes the frame.
    ///
    /// Prepends BeginString (tag 8) and BodyLength (tag 9) and appends
    /// CheckSum (tag 10).
    #[must_use]
    pub fn finish(self) -> BytesMut {
        let body_len = self.body.len();
        let mut len_buf = itoa::Buffer::new();
        let len_str = len_buf.format(body_len);

        let mut message =
            BytesMut::with_capacity(self.begin_string.len() + len_str.len() + body_len + 16);
        message.put_slice(b"8=");
        message.put_slice(self.begin_string.as_bytes());
        message.put_u8(SOH);
        message.put_slice(b"9=");
        message.put_slice(len_str.as_bytes());
        message.put_u8(SOH);
        message.put_slice(&self.body);

        let checksum = Checksum::of(&message);
        message.put_slice(b"10=");
        message.put_slice(&checksum.to_ascii());
        message.put_u8(SOH);

        message
    }

    /// Returns the current body length.
    #[inline]
    #[must_use]
    pub fn body_len(&self) -> usize {
        self.body.len()
    }

    /// Clears the encoder for reuse.
    #[inline]
    pub fn clear(&mut self) {
        self.body.clear();
    }
}

impl Default for Encoder {
    fn default() -> Self {
        Self::new("FIX.4.4")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decoder::Decoder;
    use infogate_core::field::FieldRef;
    use std::str::FromStr;

    #[test]
    fn test_encoder_basic() {
        let message = Encoder::new_message("FIX.4.4", "0").finish();
        let msg_str = String::from_utf8_lossy(&message);

        assert!(msg_str.starts_with("8=FIX.4.4\x019=5\x0135=0\x01"));
        assert!(msg_str.ends_with('\x01'));
        assert!(msg_str.contains("10="));
    }

    #[test]
    fn test_encoder_typed_writers() {
        let mut encoder = Encoder::new_message("FIX.4.4", "SI");
        encoder.put_int(326, 17);
        encoder.put_decimal(31, Decimal::from_str("15200.50").unwrap());
        encoder.put_date(388, NaiveDate::from_ymd_opt(2024, 1, 15).unwrap());
        encoder.put_time(399, MarketTime::parse(b"09:15:00.120").unwrap());
        encoder.put_char(426, 'A');

        let message = encoder.finish();
        let msg_str = String::from_utf8_lossy(&message);

        assert!(msg_str.contains("326=17\x01"));
        assert!(msg_str.contains("31=15200.50\x01"));
        assert!(msg_str.contains("388=20240115\x01"));
        assert!(msg_str.contains("399=09:15:00.120\x01"));
        assert!(msg_str.contains("426=A\x01"));
    }

    #[test]
    fn test_decimal_and_time_reencode_unchanged() {
        for (tag, wire) in [(31u32, "25350.5"), (31, "0.001"), (5, "-12.30")] {
            let value = FieldRef::new(tag, wire.as_bytes()).as_decimal().unwrap();
            let mut encoder = Encoder::new("FIX.4.4");
            encoder.put_value(tag, &FieldValue::Decimal(value));
            let expected = format!("{tag}={wire}\x01");
            assert!(String::from_utf8_lossy(&encoder.finish()).contains(&expected));
        }
        for wire in ["14:30:00", "14:30:00.005"] {
            let value = FieldRef::new(399, wire.as_bytes()).as_time().unwrap();
            let mut encoder = Encoder::new("FIX.4.4");
            encoder.put_value(399, &FieldValue::Time(value));
            let expected = format!("399={wire}\x01");
            assert!(String::from_utf8_lossy(&encoder.finish()).contains(&expected));
        }
    }

    #[test]
    fn test_finish_decodes_with_validation() {
        let mut encoder = Encoder::new_message("FIX.4.4", "MI");
        encoder.put_str(341, "HNX");
        let bytes = encoder.finish();
        let msg = Decoder::new(&bytes).decode().unwrap();
        assert_eq!(msg.get_field_str(341), Some("HNX"));
    }

    #[test]
    fn test_encoder_clear() {
        let mut encoder = Encoder::new_message("FIX.4.4", "0");
        assert!(encoder.body_len() > 0);

        encoder.clear();
        assert_eq!(encoder.body_len(), 0);
    }
}
