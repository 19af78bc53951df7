/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! Message types for FIX tag-value frames.
//!
//! This module provides:
//! - [`MsgType`]: session and HNX InfoGate message type codes (tag 35)
//! - [`RawMessage`]: zero-copy, immutable view of one decoded frame split into
//!   header, body and trailer
//! - [`RawMessageBuilder`]: the single way to assemble a [`RawMessage`]

use crate::error::MessageRejectError;
use crate::field::FieldRef;
use crate::store::{FieldSlice, FieldStore};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// MsgType tag.
pub const TAG_MSG_TYPE: u32 = 35;

/// BeginString tag.
pub const TAG_BEGIN_STRING: u32 = 8;

/// Message type codes seen on an InfoGate feed.
///
/// Session-level types are listed so that a feed handler can tell them
/// apart from market data; anything else is `Custom`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MsgType {
    /// Heartbeat (0) - Session level.
    Heartbeat,
    /// Test Request (1) - Session level.
    TestRequest,
    /// Resend Request (2) - Session level.
    ResendRequest,
    /// Reject (3) - Session level.
    Reject,
    /// Sequence Reset (4) - Session level.
    SequenceReset,
    /// Logout (5) - Session level.
    Logout,
    /// Logon (A) - Session level.
    Logon,
    /// Stock information snapshot (SI).
    StockInfo,
    /// Derivative information snapshot (DI).
    DerivativeInfo,
    /// Top N price ladder (TP).
    TopNPrice,
    /// Auction match price (EP).
    AuctionMatch,
    /// Board information (BI).
    BoardInfo,
    /// Index update (I).
    Index,
    /// Market information (MI).
    MarketInfo,
    /// Any other code.
    Custom(String),
}

impl MsgType {
    /// Returns the tag 35 code.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Heartbeat => "0",
            Self::TestRequest => "1",
            Self::ResendRequest => "2",
            Self::Reject => "3",
            Self::SequenceReset => "4",
            Self::Logout => "5",
            Self::Logon => "A",
            Self::StockInfo => "SI",
            Self::DerivativeInfo => "DI",
            Self::TopNPrice => "TP",
            Self::AuctionMatch => "EP",
            Self::BoardInfo => "BI",
            Self::Index => "I",
            Self::MarketInfo => "MI",
            Self::Custom(s) => s.as_str(),
        }
    }

    /// Returns true if this is a session-level message.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        matches!(
            self,
            Self::Heartbeat
                | Self::TestRequest
                | Self::ResendRequest
                | Self::Reject
                | Self::SequenceReset
                | Self::Logout
                | Self::Logon
        )
    }
}

impl FromStr for MsgType {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "0" => Self::Heartbeat,
            "1" => Self::TestRequest,
            "2" => Self::ResendRequest,
            "3" => Self::Reject,
            "4" => Self::SequenceReset,
            "5" => Self::Logout,
            "A" => Self::Logon,
            "SI" => Self::StockInfo,
            "DI" => Self::DerivativeInfo,
            "TP" => Self::TopNPrice,
            "EP" => Self::AuctionMatch,
            "BI" => Self::BoardInfo,
            "I" => Self::Index,
            "MI" => Self::MarketInfo,
            other => Self::Custom(other.to_string()),
        })
    }
}

impl fmt::Display for MsgType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Zero-copy view of one decoded frame.
///
/// Fields are kept in wire order within each segment; body order is what
/// repeating groups are bounded by. A `RawMessage` cannot be modified once
/// built.
#[derive(Debug, Clone)]
pub struct RawMessage<'a> {
    buffer: &'a [u8],
    fields: FieldStore<'a>,
    body_start: usize,
    trailer_start: usize,
}

impl<'a> RawMessage<'a> {
    /// Starts building a message over `buffer`.
    #[must_use]
    pub fn builder(buffer: &'a [u8]) -> RawMessageBuilder<'a> {
        RawMessageBuilder::new(buffer)
    }

    /// Returns the frame bytes the fields borrow from.
    #[inline]
    #[must_use]
    pub const fn buffer(&self) -> &'a [u8] {
        self.buffer
    }

    /// Returns every field: header, then body, then trailer.
    #[inline]
    #[must_use]
    pub fn fields(&self) -> FieldSlice<'_> {
        self.fields.as_slice()
    }

    /// Returns the header fields.
    #[must_use]
    pub fn header(&self) -> FieldSlice<'_> {
        self.segment(0, self.body_start)
    }

    /// Returns the body fields.
    #[must_use]
    pub fn body(&self) -> FieldSlice<'_> {
        self.segment(self.body_start, self.trailer_start)
    }

    /// Returns the trailer fields.
    #[must_use]
    pub fn trailer(&self) -> FieldSlice<'_> {
        self.segment(self.trailer_start, self.fields.len())
    }

    fn segment(&self, start: usize, end: usize) -> FieldSlice<'_> {
        self.fields.as_slice().sub(start..end).unwrap_or_default()
    }

    /// Returns the tag 35 code, if present.
    #[must_use]
    pub fn msg_type(&self) -> Option<&'a str> {
        self.get_field_str(TAG_MSG_TYPE)
    }

    /// Returns the tag 35 code, telling an absent type from an unreadable one.
    ///
    /// # Errors
    /// `FieldNotFound` if tag 35 is absent, `IncorrectDataFormat` if its value
    /// is not valid UTF-8.
    pub fn require_msg_type(&self) -> Result<&'a str, MessageRejectError> {
        self.get_field(TAG_MSG_TYPE)
            .ok_or(MessageRejectError::FieldNotFound { tag: TAG_MSG_TYPE })?
            .as_str()
    }

    /// Returns the parsed message type, if tag 35 is present.
    #[must_use]
    pub fn kind(&self) -> Option<MsgType> {
        self.msg_type().and_then(|s| s.parse().ok())
    }

    /// Returns the BeginString value (e.g., "FIX.4.4"), if present.
    #[must_use]
    pub fn begin_string(&self) -> Option<&'a str> {
        self.get_field_str(TAG_BEGIN_STRING)
    }

    /// Gets the first occurrence of `tag` anywhere in the message.
    #[must_use]
    pub fn get_field(&self, tag: u32) -> Option<FieldRef<'a>> {
        self.fields.get_first(tag)
    }

    /// Gets a field value as a string.
    ///
    /// # Returns
    /// The field value, or `None` if not found or invalid UTF-8.
    #[must_use]
    pub fn get_field_str(&self, tag: u32) -> Option<&'a str> {
        self.get_field(tag).and_then(|f| f.as_str().ok())
    }

    /// Returns the number of fields in the message.
    #[inline]
    #[must_use]
    pub fn field_count(&self) -> usize {
        self.fields.len()
    }

    /// Returns the frame length in bytes.
    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.buffer.len()
    }

    /// Returns true if the frame is empty.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }
}

/// Assembles a [`RawMessage`] segment by segment.
///
/// Fields may be added in any order across segments; within a segment the
/// order of insertion is kept.
#[derive(Debug, Clone)]
pub struct RawMessageBuilder<'a> {
    buffer: &'a [u8],
    header: SmallVec<[FieldRef<'a>; 8]>,
    body: FieldStore<'a>,
    trailer: SmallVec<[FieldRef<'a>; 2]>,
}

impl<'a> RawMessageBuilder<'a> {
    /// Creates an empty builder over `buffer`.
    #[must_use]
    pub fn new(buffer: &'a [u8]) -> Self {
        Self {
            buffer,
            header: SmallVec::new(),
            body: FieldStore::new(),
            trailer: SmallVec::new(),
        }
    }

    /// Replaces the frame bytes, for callers that learn the frame end last.
    #[must_use]
    pub fn with_buffer(mut self, buffer: &'a [u8]) -> Self {
        self.buffer = buffer;
        self
    }

    /// Appends a header field.
    #[must_use]
    pub fn header(mut self, tag: u32, value: &'a [u8]) -> Self {
        self.push_header(tag, value);
        self
    }

    /// Appends a body field.
    #[must_use]
    pub fn body(mut self, tag: u32, value: &'a [u8]) -> Self {
        self.push_body(tag, value);
        self
    }

    /// Appends a trailer field.
    #[must_use]
    pub fn trailer(mut self, tag: u32, value: &'a [u8]) -> Self {
        self.push_trailer(tag, value);
        self
    }

    /// Appends a header field in place.
    pub fn push_header(&mut self, tag: u32, value: &'a [u8]) {
        self.header.push(FieldRef::new(tag, value));
    }

    /// Appends a body field in place.
    pub fn push_body(&mut self, tag: u32, value: &'a [u8]) {
        self.body.put(tag, value);
    }

    /// Appends a trailer field in place.
    pub fn push_trailer(&mut self, tag: u32, value: &'a [u8]) {
        self.trailer.push(FieldRef::new(tag, value));
    }

    /// Freezes the fields into a message.
    #[must_use]
    pub fn build(self) -> RawMessage<'a> {
        let body_start = self.header.len();
        let trailer_start = body_start + self.body.len();
        let mut fields: FieldStore<'a> = self.header.into_iter().collect();
        fields.extend(self.body.iter());
        fields.extend(self.trailer);
        RawMessage {
            buffer: self.buffer,
            fields,
            body_start,
            trailer_start,
        }
    }
}
