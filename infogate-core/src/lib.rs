/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! # InfoGate Core
//!
//! Core types and error definitions for the InfoGate FIX market-data codec.
//!
//! This crate provides the building blocks used across all InfoGate crates:
//! - **Error types**: `DecodeError`, `MessageRejectError` and `FixError` with `thiserror`
//! - **Field types**: `FieldTag`, `FieldRef` and `FieldValue`
//! - **Tag-value store**: `FieldStore` and the borrowed `FieldSlice` window
//! - **Message types**: `RawMessage` split into header, body and trailer, and `MsgType`
//! - **Value types**: `MarketTime`, wire dates, `SessionRejectReason`
//!
//! ## Zero-Copy Design
//!
//! Every field borrows its value from the frame buffer. Views, group
//! instances and accessor scopes are windows over the same field list.

pub mod error;
pub mod field;
pub mod message;
pub mod store;
pub mod types;

pub use error::{DecodeError, FixError, MessageRejectError, RejectReason, Result};
pub use field::{FieldRef, FieldTag, FieldValue};
pub use message::{MsgType, RawMessage, RawMessageBuilder, TAG_BEGIN_STRING, TAG_MSG_TYPE};
pub use store::{FieldSlice, FieldStore};
pub use types::{
    MarketTime, SessionRejectReason, TimePrecision, format_date, parse_date, to_display_f64,
};
