/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! # InfoGate Tag-Value
//!
//! Zero-copy FIX tag=value decoding and typed field access for HNX InfoGate
//! market data.
//!
//! ## Features
//!
//! - **Zero-copy parsing**: Field values reference the original buffer
//! - **SIMD-accelerated**: Uses `memchr` for fast delimiter search
//! - **Typed access**: One coercion path per semantic type, with the
//!   directory's absent-field policy applied uniformly
//! - **Repeating groups**: Instances split on the delimiter tag and checked
//!   against the declared count

pub mod accessor;
pub mod checksum;
pub mod decoder;
pub mod encoder;
pub mod group;

pub use accessor::{FromField, Scope};
pub use checksum::Checksum;
pub use decoder::{Decoder, is_header_tag, is_trailer_tag};
pub use encoder::Encoder;
pub use group::{GroupInstance, extract_groups};
pub use infogate_core::message::RawMessage;
