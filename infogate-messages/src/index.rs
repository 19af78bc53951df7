/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! Index update (`I`).

use crate::view;
use infogate_dictionary::hnx::INDEX_CODE;
use rust_decimal::Decimal;

view! {
    /// Value and session totals of a market index.
    pub struct Index<'s> as IndexKind {
        msg_type: "I",
        key: INDEX_CODE,
        fields {
            /// Index code (2).
            required index_code: &'s str = INDEX_CODE,
            /// Index value (3).
            optional value: Decimal = 3,
            /// Change from prior close (5).
            optional change: Decimal = 5,
            /// Change ratio (6).
            optional ratio_change: Decimal = 6,
            /// Total traded quantity (7).
            optional total_qtty: Decimal = 7,
            /// Total traded value (14).
            optional total_value: Decimal = 14,
            /// Prior index value (23).
            optional prior_index_val: Decimal = 23,
            /// Session high (24).
            optional highest_index: Decimal = 24,
            /// Session low (25).
            optional lowest_index: Decimal = 25,
        }
    }
}
