/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! Session identity passed to message handlers.

use infogate_core::message::RawMessage;
use std::fmt;

/// SenderCompID tag.
const TAG_SENDER_COMP_ID: u32 = 49;
/// TargetCompID tag.
const TAG_TARGET_COMP_ID: u32 = 56;
/// SenderSubID tag.
const TAG_SENDER_SUB_ID: u32 = 50;
/// TargetSubID tag.
const TAG_TARGET_SUB_ID: u32 = 57;

/// Session identifier, from the local side's point of view.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SessionId {
    /// BeginString (FIX version).
    pub begin_string: String,
    /// Sender CompID (local).
    pub sender_comp_id: String,
    /// Target CompID (counterparty).
    pub target_comp_id: String,
    /// Optional sender sub ID.
    pub sender_sub_id: Option<String>,
    /// Optional target sub ID.
    pub target_sub_id: Option<String>,
}

impl SessionId {
    /// Creates a new session ID.
    #[must_use]
    pub fn new(
        begin_string: impl Into<String>,
        sender_comp_id: impl Into<String>,
        target_comp_id: impl Into<String>,
    ) -> Self {
        Self {
            begin_string: begin_string.into(),
            sender_comp_id: sender_comp_id.into(),
            target_comp_id: target_comp_id.into(),
            sender_sub_id: None,
            target_sub_id: None,
        }
    }

    /// Derives the local session ID from the header of an inbound message.
    ///
    /// The counterparty's SenderCompID becomes the target and vice versa.
    ///
    /// # Returns
    /// `None` if BeginString, SenderCompID or TargetCompID is missing.
    #[must_use]
    pub fn from_inbound(raw: &RawMessage<'_>) -> Option<Self> {
        let mut id = Self::new(
            raw.begin_string()?,
            raw.get_field_str(TAG_TARGET_COMP_ID)?,
            raw.get_field_str(TAG_SENDER_COMP_ID)?,
        );
        id.sender_sub_id = raw.get_field_str(TAG_TARGET_SUB_ID).map(str::to_string);
        id.target_sub_id = raw.get_field_str(TAG_SENDER_SUB_ID).map(str::to_string);
        Some(id)
    }

    /// Sets the sender sub ID.
    #[must_use]
    pub fn with_sender_sub_id(mut self, sub_id: impl Into<String>) -> Self {
        self.sender_sub_id = Some(sub_id.into());
        self
    }

    /// Sets the target sub ID.
    #[must_use]
    pub fn with_target_sub_id(mut self, sub_id: impl Into<String>) -> Self {
        self.target_sub_id = Some(sub_id.into());
        self
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}->{}",
            self.begin_string, self.sender_comp_id, self.target_comp_id
        )
    }
}
