/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! Error types for the InfoGate codec.
//!
//! Two families live here:
//! - [`DecodeError`]: wire framing problems found while turning bytes into a
//!   [`RawMessage`](crate::message::RawMessage).
//! - [`MessageRejectError`]: field and message level problems found while
//!   reading a decoded message, raised by accessors, group extraction,
//!   the router and business handlers.
//!
//! [`FixError`] wraps both for callers that drive the whole pipeline.

use crate::types::SessionRejectReason;
use thiserror::Error;

/// Result type alias using [`FixError`] as the error type.
pub type Result<T> = std::result::Result<T, FixError>;

/// Top-level error type for the decode-and-dispatch pipeline.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FixError {
    /// Error during wire decoding.
    #[error("decode error: {0}")]
    Decode(#[from] DecodeError),

    /// Message rejected while reading fields or by a handler.
    #[error("message rejected: {0}")]
    Reject(#[from] MessageRejectError),
}

/// Errors that occur during FIX wire decoding.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// Message buffer is incomplete, need more data.
    #[error("incomplete message, need more data")]
    Incomplete,

    /// Invalid BeginString field (tag 8).
    #[error("invalid begin string: expected 8=FIX.x.y")]
    InvalidBeginString,

    /// Missing BodyLength field (tag 9).
    #[error("missing body length field (tag 9)")]
    MissingBodyLength,

    /// Invalid BodyLength value.
    #[error("invalid body length value")]
    InvalidBodyLength,

    /// Declared BodyLength does not match the bytes between tag 9 and tag 10.
    #[error("body length mismatch: declared {declared}, actual {actual}")]
    BodyLengthMismatch {
        /// Declared body length.
        declared: usize,
        /// Counted body length.
        actual: usize,
    },

    /// Missing MsgType field (tag 35).
    #[error("missing msg type field (tag 35)")]
    MissingMsgType,

    /// Checksum mismatch between calculated and declared values.
    #[error("checksum mismatch: calculated {calculated}, declared {declared}")]
    ChecksumMismatch {
        /// Calculated checksum value.
        calculated: u8,
        /// Declared checksum value in message.
        declared: u8,
    },

    /// Invalid tag format (not a valid integer).
    #[error("invalid tag format at offset {offset}")]
    InvalidTag {
        /// Byte offset of the malformed field.
        offset: usize,
    },

    /// Invalid field value at the framing level.
    #[error("invalid field value for tag {tag}: {reason}")]
    InvalidFieldValue {
        /// The tag number of the field.
        tag: u32,
        /// Description of why the value is invalid.
        reason: String,
    },

    /// Message exceeds maximum allowed size.
    #[error("message too large: {size} bytes exceeds maximum {max_size}")]
    MessageTooLarge {
        /// Actual message size in bytes.
        size: usize,
        /// Maximum allowed size in bytes.
        max_size: usize,
    },
}

/// Business-level rejection raised by a message handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectReason {
    /// Rejection reason code.
    pub code: u32,
    /// Human-readable rejection text.
    pub text: String,
    /// Reference tag that caused the rejection.
    pub ref_tag: Option<u32>,
}

impl RejectReason {
    /// Creates a new rejection reason.
    #[must_use]
    pub fn new(code: u32, text: impl Into<String>) -> Self {
        Self {
            code,
            text: text.into(),
            ref_tag: None,
        }
    }

    /// Sets the reference tag.
    #[must_use]
    pub const fn with_ref_tag(mut self, tag: u32) -> Self {
        self.ref_tag = Some(tag);
        self
    }
}

impl std::fmt::Display for RejectReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.ref_tag {
            Some(tag) => write!(f, "[{}] {} (tag {})", self.code, self.text, tag),
            None => write!(f, "[{}] {}", self.code, self.text),
        }
    }
}

/// Errors raised while reading a decoded message.
///
/// Accessors, the group extractor and the router return this type, and
/// handlers return it too, so a handler can forward accessor failures with `?`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MessageRejectError {
    /// A required tag is absent.
    #[error("required tag missing: {tag}")]
    FieldNotFound {
        /// The missing tag.
        tag: u32,
    },

    /// The raw bytes cannot be coerced to the declared semantic type.
    #[error("incorrect data format for tag {tag}: {reason}")]
    IncorrectDataFormat {
        /// The offending tag.
        tag: u32,
        /// What was wrong with the value.
        reason: String,
    },

    /// A non-repeating tag occurs more than once in the same scope.
    #[error("tag appears more than once: {tag}")]
    TagAppearsMoreThanOnce {
        /// The duplicated tag.
        tag: u32,
    },

    /// The tag has no entry in the field directory.
    #[error("undefined tag: {tag}")]
    UndefinedTag {
        /// The unknown tag.
        tag: u32,
    },

    /// A repeating group's count field disagrees with its delimiter occurrences.
    #[error("repeating group count mismatch for tag {count_tag}: expected {expected}, found {actual}")]
    RepeatingGroupCountMismatch {
        /// The NumInGroup tag.
        count_tag: u32,
        /// Declared number of instances.
        expected: usize,
        /// Instances found on the wire.
        actual: usize,
    },

    /// No handler is registered for the message type code.
    #[error("unknown message type: {msg_type}")]
    UnknownMessageType {
        /// The tag 35 value.
        msg_type: String,
    },

    /// Business rejection raised by a handler.
    #[error("rejected: {0}")]
    Rejected(RejectReason),
}

impl MessageRejectError {
    /// Shorthand for an [`IncorrectDataFormat`](Self::IncorrectDataFormat) error.
    #[must_use]
    pub fn incorrect_format(tag: u32, reason: impl Into<String>) -> Self {
        Self::IncorrectDataFormat {
            tag,
            reason: reason.into(),
        }
    }

    /// Returns the SessionRejectReason (tag 373) matching this error.
    #[must_use]
    pub const fn session_reject_reason(&self) -> SessionRejectReason {
        match self {
            Self::FieldNotFound { .. } => SessionRejectReason::RequiredTagMissing,
            Self::IncorrectDataFormat { .. } => SessionRejectReason::IncorrectDataFormat,
            Self::TagAppearsMoreThanOnce { .. } => SessionRejectReason::TagAppearsMoreThanOnce,
            Self::UndefinedTag { .. } => SessionRejectReason::UndefinedTag,
            Self::RepeatingGroupCountMismatch { .. } => {
                SessionRejectReason::IncorrectNumInGroupCount
            }
            Self::UnknownMessageType { .. } => SessionRejectReason::InvalidMsgType,
            Self::Rejected(_) => SessionRejectReason::Other,
        }
    }

    /// Returns the RefTagID (tag 371) to report, if any.
    #[must_use]
    pub const fn ref_tag(&self) -> Option<u32> {
        match self {
            Self::FieldNotFound { tag }
            | Self::IncorrectDataFormat { tag, .. }
            | Self::TagAppearsMoreThanOnce { tag }
            | Self::UndefinedTag { tag } => Some(*tag),
            Self::RepeatingGroupCountMismatch { count_tag, .. } => Some(*count_tag),
            Self::UnknownMessageType { .. } => Some(35),
            Self::Rejected(reason) => reason.ref_tag,
        }
    }
}

impl From<RejectReason> for MessageRejectError {
    fn from(reason: RejectReason) -> Self {
        Self::Rejected(reason)
    }
}
