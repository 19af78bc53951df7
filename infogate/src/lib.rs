/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! # InfoGate
//!
//! FIX 4.4 tag-value codec, typed field registry and message router for the
//! HNX InfoGate market-data feed.
//!
//! ## Features
//!
//! - **Zero-copy parsing**: Field values reference the original buffer
//! - **One coercion path**: Every typed getter is driven by the field directory
//! - **Typed views**: Read-only projections per message type, validated lazily
//! - **Repeating groups**: Count-checked instance extraction in wire order
//! - **Routing**: Immutable, hot-swappable tag 35 dispatch table
//!
//! ## Quick Start
//!
//! ```rust
//! use infogate::prelude::*;
//! use std::sync::Arc;
//!
//! let directory = Arc::new(hnx::directory().unwrap());
//! let mut builder = Router::builder(directory);
//! builder
//!     .route::<AuctionMatchKind, _>(|view, _session| {
//!         let _price = view.price()?;
//!         Ok(())
//!     })
//!     .unwrap();
//! let router = builder.build();
//!
//! let mut encoder = Encoder::new_message("FIX.4.4", "EP");
//! encoder.put_str(49, "HNX");
//! encoder.put_str(56, "FEED");
//! encoder.put_str(55, "ABC");
//! encoder.put_str(31, "15200.5");
//! encoder.put_str(32, "1000");
//! let frame = encoder.finish();
//!
//! let raw = Decoder::new(&frame).decode().unwrap();
//! let session = SessionId::from_inbound(&raw).unwrap();
//! router.dispatch(&raw, &session).unwrap();
//! ```
//!
//! ## Crate Organization
//!
//! - [`core`]: Fundamental types, field store and error definitions
//! - [`dictionary`]: Field directory, message layouts and the HNX table
//! - [`tagvalue`]: Wire codec, typed accessors and group extraction
//! - [`messages`]: Typed message views
//! - [`engine`]: Router, session workers and hot reload

pub mod core {
    //! Core types, field store and error definitions.
    pub use infogate_core::*;
}

pub mod dictionary {
    //! Field directory, message layouts and the HNX table.
    pub use infogate_dictionary::*;
}

pub mod tagvalue {
    //! Wire codec, typed accessors and group extraction.
    pub use infogate_tagvalue::*;
}

pub mod messages {
    //! Typed message views.
    pub use infogate_messages::*;
}

pub mod engine {
    //! Router, session workers and hot reload.
    pub use infogate_engine::*;
}

/// Prelude module for convenient imports.
pub mod prelude {
    // Core types
    pub use infogate_core::{
        DecodeError, FieldRef, FieldTag, FieldValue, FixError, MarketTime, MessageRejectError,
        MsgType, RawMessage, RejectReason, SessionRejectReason, TimePrecision,
    };

    // Dictionary
    pub use infogate_dictionary::{
        DefaultPolicy, Directory, DirectoryBuilder, FieldDef, GroupDef, MemberDef, MessageDef,
        SemanticType, hnx,
    };

    // Tag-value encoding and access
    pub use infogate_tagvalue::{Decoder, Encoder, GroupInstance, Scope};

    // Views
    pub use infogate_messages::{
        AuctionMatch, AuctionMatchKind, BidAskLevel, BoardInfo, BoardInfoKind, DerivativeInfo,
        DerivativeInfoKind, Index, IndexKind, MarketInfo, MarketInfoKind, MessageKind,
        MessageView, ScopedView, StockInfo, StockInfoKind, TopNPrice, TopNPriceKind,
    };

    // Engine
    pub use infogate_engine::{
        Router, RouterBuilder, RouterError, SessionEvent, SessionId, SessionWorker, SharedRouter,
        WorkerConfig,
    };
}
