/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! Zero-copy FIX 4.4 frame decoder.
//!
//! The decoder splits one frame into header, body and trailer without
//! copying field values. BeginString, BodyLength and CheckSum are checked
//! as configured; every field after them is kept in wire order.

use crate::checksum::Checksum;
use infogate_core::error::DecodeError;
use infogate_core::field::FieldRef;
use infogate_core::message::{RawMessage, TAG_BEGIN_STRING, TAG_MSG_TYPE};
use memchr::memchr;

/// SOH (Start of Header) delimiter used in FIX messages.
pub const SOH: u8 = 0x01;

/// Equals sign delimiter between tag and value.
pub const EQUALS: u8 = b'=';

/// BodyLength tag.
pub const TAG_BODY_LENGTH: u32 = 9;

/// CheckSum tag.
pub const TAG_CHECKSUM: u32 = 10;

/// Default upper bound for one frame, in bytes.
pub const DEFAULT_MAX_MESSAGE_SIZE: usize = 64 * 1024;

/// Returns true for the FIX 4.4 standard header tags.
#[must_use]
pub const fn is_header_tag(tag: u32) -> bool {
    matches!(
        tag,
        8 | 9
            | 34
            | 35
            | 43
            | 49
            | 50
            | 52
            | 56
            | 57
            | 90
            | 91
            | 97
            | 115
            | 116
            | 122
            | 128
            | 129
            | 142
            | 143
            | 144
            | 145
            | 212
            | 213
            | 347
            | 369
            | 627
            | 628
            | 629
            | 630
    )
}

/// Returns true for the FIX 4.4 standard trailer tags.
#[must_use]
pub const fn is_trailer_tag(tag: u32) -> bool {
    matches!(tag, 10 | 89 | 93)
}

/// Zero-copy FIX frame decoder.
///
/// A decoder may be reused over a buffer holding several back-to-back
/// frames; each call to [`decode`](Self::decode) consumes one.
#[derive(Debug)]
pub struct Decoder<'a> {
    /// Input buffer.
    input: &'a [u8],
    /// Current position in the buffer.
    offset: usize,
    /// Whether to validate checksums.
    validate_checksum: bool,
    /// Whether to compare BodyLength with the bytes received.
    validate_length: bool,
    /// Largest accepted frame.
    max_message_size: usize,
}

impl<'a> Decoder<'a> {
    /// Creates a new decoder for the given input buffer.
    ///
    /// # Arguments
    /// * `input` - The FIX message bytes to decode
    #[inline]
    #[must_use]
    pub const fn new(input: &'a [u8]) -> Self {
        Self {
            input,
            offset: 0,
            validate_checksum: true,
            validate_length: true,
            max_message_size: DEFAULT_MAX_MESSAGE_SIZE,
        }
    }

    /// Sets whether to validate checksums during decoding.
    #[inline]
    #[must_use]
    pub const fn with_checksum_validation(mut self, validate: bool) -> Self {
        self.validate_checksum = validate;
        self
    }

    /// Sets whether to validate BodyLength during decoding.
    #[inline]
    #[must_use]
    pub const fn with_length_validation(mut self, validate: bool) -> Self {
        self.validate_length = validate;
        self
    }

    /// Sets the largest accepted frame size in bytes.
    #[inline]
    #[must_use]
    pub const fn with_max_message_size(mut self, max_message_size: usize) -> Self {
        self.max_message_size = max_message_size;
        self
    }

    /// Decodes one frame from the buffer.
    ///
    /// # Returns
    /// A `RawMessage` containing zero-copy references to the parsed fields.
    ///
    /// # Errors
    /// Returns `DecodeError` if the frame is malformed, incomplete or fails
    /// an enabled validation.
    pub fn decode(&mut self) -> Result<RawMessage<'a>, DecodeError> {
        let start = self.offset;

        let begin_string = self.read_field()?;
        if begin_string.tag != TAG_BEGIN_STRING || !begin_string.value.starts_with(b"FIX") {
            return Err(DecodeError::InvalidBeginString);
        }

        let body_length = match self.read_field() {
            Ok(field) if field.tag == TAG_BODY_LENGTH => field,
            Ok(_) => return Err(DecodeError::MissingBodyLength),
            Err(err) => return Err(err),
        };
        let declared = parse_length(body_length.value).ok_or(DecodeError::InvalidBodyLength)?;
        let body_start = self.offset;
        let size = (body_start - start)
            .checked_add(declared)
            .ok_or(DecodeError::InvalidBodyLength)?;
        if size > self.max_message_size {
            return Err(DecodeError::MessageTooLarge {
                size,
                max_size: self.max_message_size,
            });
        }

        let msg_type = self.read_field()?;
        if msg_type.tag != TAG_MSG_TYPE {
            return Err(DecodeError::MissingMsgType);
        }

        let mut builder = RawMessage::builder(&[]);
        builder.push_header(begin_string.tag, begin_string.value);
        builder.push_header(body_length.tag, body_length.value);
        builder.push_header(msg_type.tag, msg_type.value);

        let (checksum_start, checksum) = loop {
            let field_start = self.offset;
            let field = self.read_field()?;
            if self.offset - start > self.max_message_size {
                return Err(DecodeError::MessageTooLarge {
                    size: self.offset - start,
                    max_size: self.max_message_size,
                });
            }
            if field.tag == TAG_CHECKSUM {
                break (field_start, field);
            }
            if is_header_tag(field.tag) {
                builder.push_header(field.tag, field.value);
            } else if is_trailer_tag(field.tag) {
                builder.push_trailer(field.tag, field.value);
            } else {
                builder.push_body(field.tag, field.value);
            }
        };
        builder.push_trailer(checksum.tag, checksum.value);

        if self.validate_length && checksum_start - body_start != declared {
            return Err(DecodeError::BodyLengthMismatch {
                declared,
                actual: checksum_start - body_start,
            });
        }

        if self.validate_checksum {
            let declared = Checksum::parse(checksum.value).ok_or_else(|| {
                DecodeError::InvalidFieldValue {
                    tag: TAG_CHECKSUM,
                    reason: "invalid checksum format".to_string(),
                }
            })?;
            let calculated = Checksum::of(&self.input[start..checksum_start]);
            if calculated != declared {
                return Err(DecodeError::ChecksumMismatch {
                    calculated: calculated.value(),
                    declared: declared.value(),
                });
            }
        }

        Ok(builder.with_buffer(&self.input[start..self.offset]).build())
    }

    /// Parses the next field from the buffer.
    ///
    /// # Returns
    /// The next field, or `None` if the buffer is exhausted or malformed.
    #[inline]
    pub fn next_field(&mut self) -> Option<FieldRef<'a>> {
        self.read_field().ok()
    }

    fn read_field(&mut self) -> Result<FieldRef<'a>, DecodeError> {
        let remaining = self.input.get(self.offset..).unwrap_or_default();
        if remaining.is_empty() {
            return Err(DecodeError::Incomplete);
        }

        let eq_pos = memchr(EQUALS, remaining).ok_or(DecodeError::Incomplete)?;
        let tag = parse_tag(&remaining[..eq_pos]).ok_or(DecodeError::InvalidTag {
            offset: self.offset,
        })?;

        let value_start = eq_pos + 1;
        let soh_pos = memchr(SOH, &remaining[value_start..]).ok_or(DecodeError::Incomplete)?;
        let value = &remaining[value_start..value_start + soh_pos];

        self.offset += value_start + soh_pos + 1;
        Ok(FieldRef::new(tag, value))
    }

    /// Returns the current offset in the buffer.
    #[inline]
    #[must_use]
    pub const fn offset(&self) -> usize {
        self.offset
    }

    /// Returns the remaining bytes in the buffer.
    #[inline]
    #[must_use]
    pub fn remaining(&self) -> &'a [u8] {
        self.input.get(self.offset..).unwrap_or_default()
    }

    /// Returns true if the buffer has been fully consumed.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.offset >= self.input.len()
    }

    /// Resets the decoder to the beginning of the buffer.
    #[inline]
    pub fn reset(&mut self) {
        self.offset = 0;
    }
}

/// Parses a tag number from ASCII bytes.
///
/// # Returns
/// The parsed tag number, or `None` if invalid.
#[inline]
fn parse_tag(bytes: &[u8]) -> Option<u32> {
    if bytes.is_empty() || bytes.len() > 10 {
        return None;
    }

    let mut result: u32 = 0;
    for &b in bytes {
        if !b.is_ascii_digit() {
            return None;
        }
        result = result.checked_mul(10)?.checked_add(u32::from(b - b'0'))?;
    }

    (result > 0).then_some(result)
}

fn parse_length(bytes: &[u8]) -> Option<usize> {
    if bytes.is_empty() {
        return None;
    }
    bytes.iter().try_fold(0usize, |acc, &b| {
        if b.is_ascii_digit() {
            acc.checked_mul(10)?.checked_add(usize::from(b - b'0'))
        } else {
            None
        }
    })
}
