/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! Top N price ladder (`TP`).

use crate::{group_view, view};
use infogate_dictionary::hnx::{BOARD_CODE, NO_TOP_PRICE, NUM_TOP_PRICE, SYMBOL};
use rust_decimal::Decimal;

view! {
    /// Best bid and offer levels of one instrument.
    pub struct TopNPrice<'s> as TopNPriceKind {
        msg_type: "TP",
        key: SYMBOL,
        fields {
            /// Symbol (55).
            required symbol: &'s str = SYMBOL,
            /// Board code (425).
            optional board_code: &'s str = BOARD_CODE,
        }
        groups {
            /// Price levels (555), in wire order.
            required levels: BidAskLevel = NO_TOP_PRICE,
        }
    }
}

group_view! {
    /// One level of the price ladder.
    pub struct BidAskLevel<'s> {
        /// Level number (556), starting at 1.
        required num_top_price: i64 = NUM_TOP_PRICE,
        /// Bid price (132).
        optional best_bid_price: Decimal = 132,
        /// Bid quantity (1321).
        optional best_bid_qtty: Decimal = 1321,
        /// Offer price (133).
        optional best_offer_price: Decimal = 133,
        /// Offer quantity (1331).
        optional best_offer_qtty: Decimal = 1331,
    }
}
