/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! # InfoGate Messages
//!
//! Typed views over HNX InfoGate market-data messages.
//!
//! Each view borrows a decoded frame and exposes only the getters that are
//! meaningful for its message type. Fields are validated lazily, when their
//! getter is called; [`ScopedView::validate`] checks everything at once.
//!
//! | code | view |
//! |------|------|
//! | `SI` | [`StockInfo`] |
//! | `DI` | [`DerivativeInfo`] |
//! | `TP` | [`TopNPrice`] |
//! | `EP` | [`AuctionMatch`] |
//! | `BI` | [`BoardInfo`] |
//! | `I`  | [`Index`] |
//! | `MI` | [`MarketInfo`] |

mod macros;

pub mod auction_match;
pub mod board_info;
pub mod common;
pub mod derivative_info;
pub mod index;
pub mod market_info;
pub mod stock_info;
pub mod top_n_price;
pub mod view;

pub use auction_match::{AuctionMatch, AuctionMatchKind, MatchType};
pub use board_info::{BoardInfo, BoardInfoKind, BoardStatus};
pub use common::{board_code, symbol};
pub use derivative_info::{DerivativeInfo, DerivativeInfoKind};
pub use index::{Index, IndexKind};
pub use market_info::{MarketInfo, MarketInfoKind};
pub use stock_info::{StockInfo, StockInfoKind};
pub use top_n_price::{BidAskLevel, TopNPrice, TopNPriceKind};
pub use view::{MessageKind, MessageView, ScopedView};

#[doc(hidden)]
pub mod __private {
    pub use infogate_core::MessageRejectError;
    pub use infogate_dictionary::{MemberDef, MessageDef};
    pub use infogate_tagvalue::Scope;
    pub use std::sync::LazyLock;
}
