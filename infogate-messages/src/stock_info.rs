/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! Stock information snapshot (`SI`).
//!
//! Prices read `None` when absent; quantities, totals and counters read
//! zero.

use crate::view;
use chrono::NaiveDate;
use infogate_core::types::MarketTime;
use infogate_dictionary::hnx::{BOARD_CODE, SYMBOL};
use rust_decimal::Decimal;

view! {
    /// Reference data, prices and session totals of one security.
    pub struct StockInfo<'s> as StockInfoKind {
        msg_type: "SI",
        key: SYMBOL,
        fields {
            /// Symbol (55).
            required symbol: &'s str = SYMBOL,
            /// Board code (425).
            optional board_code: &'s str = BOARD_CODE,
            /// Security trading status (326).
            optional security_trading_status: i64 = 326,
            /// Security type (167).
            optional security_type: &'s str = 167,
            /// Issue date (225).
            optional issue_date: NaiveDate = 225,
            /// Issuer (106).
            optional issuer: &'s str = 106,
            /// Security description (107).
            optional security_desc: &'s str = 107,
            /// Best bid price (132).
            optional best_bid_price: Decimal = 132,
            /// Best bid quantity (1321).
            optional best_bid_qtty: Decimal = 1321,
            /// Best offer price (133).
            optional best_offer_price: Decimal = 133,
            /// Best offer quantity (1331).
            optional best_offer_qtty: Decimal = 1331,
            /// Total bid quantity (134).
            optional total_bid_qtty: Decimal = 134,
            /// Total offer quantity (135).
            optional total_offer_qtty: Decimal = 135,
            /// Reference price (260).
            optional basic_price: Decimal = 260,
            /// Floor price (333).
            optional floor_price: Decimal = 333,
            /// Ceiling price (332).
            optional ceiling_price: Decimal = 332,
            /// Put-through floor price (3331).
            optional floor_price_pt: Decimal = 3331,
            /// Put-through ceiling price (3321).
            optional ceiling_price_pt: Decimal = 3321,
            /// Par value (334).
            optional par_value: Decimal = 334,
            /// Last match price (31).
            optional match_price: Decimal = 31,
            /// Last match quantity (32).
            optional match_qtty: Decimal = 32,
            /// Open price (137).
            optional open_price: Decimal = 137,
            /// Prior open price (138).
            optional prior_open_price: Decimal = 138,
            /// Close price (139).
            optional close_price: Decimal = 139,
            /// Prior close price (140).
            optional prior_close_price: Decimal = 140,
            /// Total volume traded (387).
            optional total_volume_traded: Decimal = 387,
            /// Total value traded (3871).
            optional total_value_traded: Decimal = 3871,
            /// Mid price (631).
            optional mid_px: Decimal = 631,
            /// Trading date (388).
            optional trading_date: NaiveDate = 388,
            /// Time (399).
            optional time: MarketTime = 399,
            /// Trading unit (400).
            optional trading_unit: Decimal = 400,
            /// Listed quantity (109).
            optional total_listing_qtty: Decimal = 109,
            /// Days since listing (17).
            optional date_no: Decimal = 17,
            /// Adjusted quantity (230).
            optional adjust_qtty: Decimal = 230,
            /// Corporate action status (232).
            optional reference_status: &'s str = 232,
            /// Current price (255).
            optional current_price: Decimal = 255,
            /// Current quantity (2551).
            optional current_qtty: Decimal = 2551,
            /// Session high (266).
            optional highest_price: Decimal = 266,
            /// Session low (2661).
            optional lowest_price: Decimal = 2661,
            /// Prior price (277).
            optional prior_price: Decimal = 277,
            /// Match value (310).
            optional match_value: Decimal = 310,
            /// Offer count (320).
            optional offer_count: Decimal = 320,
            /// Bid count (321).
            optional bid_count: Decimal = 321,
            /// Order-book traded quantity (391).
            optional normal_total_traded_qtty: Decimal = 391,
            /// Order-book traded value (392).
            optional normal_total_traded_value: Decimal = 392,
            /// Put-through match quantity (393).
            optional put_through_match_qtty: Decimal = 393,
            /// Put-through match price (3931).
            optional put_through_match_price: Decimal = 3931,
            /// Put-through traded quantity (394).
            optional put_through_total_traded_qtty: Decimal = 394,
            /// Put-through traded value (3941).
            optional put_through_total_traded_value: Decimal = 3941,
            /// Total buy quantity (395).
            optional total_buy_trading_qtty: Decimal = 395,
            /// Buy order count (3951).
            optional buy_count: Decimal = 3951,
            /// Total buy value (3952).
            optional total_buy_trading_value: Decimal = 3952,
            /// Total sell quantity (396).
            optional total_sell_trading_qtty: Decimal = 396,
            /// Sell order count (3961).
            optional sell_count: Decimal = 3961,
            /// Total sell value (3962).
            optional total_sell_trading_value: Decimal = 3962,
            /// Foreign buy quantity (397).
            optional buy_foreign_qtty: Decimal = 397,
            /// Foreign buy value (3971).
            optional buy_foreign_value: Decimal = 3971,
            /// Foreign sell quantity (398).
            optional sell_foreign_qtty: Decimal = 398,
            /// Foreign sell value (3981).
            optional sell_foreign_value: Decimal = 3981,
            /// Remaining foreign room (3301).
            optional remain_foreign_qtty: Decimal = 3301,
            /// Maturity date (541).
            optional maturity_date: NaiveDate = 541,
            /// Coupon rate (223).
            optional coupon_rate: Decimal = 223,
            /// Odd-lot bid quantity (1341).
            optional total_bid_qtty_odd: Decimal = 1341,
            /// Odd-lot offer quantity (1351).
            optional total_offer_qtty_odd: Decimal = 1351,
            /// Trading session code (336).
            optional trading_session_id: &'s str = 336,
            /// Trading session status (340).
            optional trad_ses_status: &'s str = 340,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::{MessageKind, MessageView, ScopedView};
    use infogate_core::MessageRejectError;
    use infogate_core::message::RawMessage;
    use infogate_dictionary::hnx;
    use std::str::FromStr;

    #[test]
    fn test_stock_info_getters() {
        let dir = hnx::directory().unwrap();
        let raw = RawMessage::builder(b"")
            .header(35, b"SI")
            .body(55, b"VND")
            .body(425, b"LIS_BRD_01")
            .body(326, b"0")
            .body(260, b"25000")
            .body(332, b"26700")
            .body(333, b"23300")
            .body(31, b"25350.5")
            .body(387, b"1250000")
            .body(388, b"20240115")
            .body(399, b"14:30:00")
            .build();
        let view = StockInfoKind::from_raw(&raw, &dir);

        assert_eq!(view.symbol().unwrap(), "VND");
        assert_eq!(view.board_code().unwrap(), Some("LIS_BRD_01"));
        assert_eq!(view.security_trading_status().unwrap(), Some(0));
        assert_eq!(view.basic_price().unwrap(), Some(Decimal::from(25000)));
        assert_eq!(
            view.match_price().unwrap(),
            Some(Decimal::from_str("25350.5").unwrap())
        );
        assert_eq!(view.total_volume_traded().unwrap(), Some(Decimal::from(1_250_000)));
        assert_eq!(
            view.trading_date().unwrap(),
            NaiveDate::from_ymd_opt(2024, 1, 15)
        );
        assert_eq!(view.time().unwrap().unwrap().to_string(), "14:30:00");
        assert_eq!(view.key(), Some("VND"));
        assert!(view.validate().is_ok());
    }

    #[test]
    fn test_stock_info_absent_price_and_quantity() {
        let dir = hnx::directory().unwrap();
        let raw = RawMessage::builder(b"").body(55, b"VND").build();
        let view = StockInfoKind::from_raw(&raw, &dir);

        assert_eq!(view.close_price().unwrap(), None);
        assert_eq!(view.match_qtty().unwrap(), Some(Decimal::ZERO));
        assert_eq!(view.remain_foreign_qtty().unwrap(), Some(Decimal::ZERO));
        assert_eq!(view.maturity_date().unwrap(), None);
        assert_eq!(view.issuer().unwrap(), None);
    }

    #[test]
    fn test_stock_info_malformed_date() {
        let dir = hnx::directory().unwrap();
        let raw = RawMessage::builder(b"")
            .body(55, b"VND")
            .body(388, b"2024-01-15")
            .build();
        let view = StockInfoKind::from_raw(&raw, &dir);
        assert!(matches!(
            view.trading_date(),
            Err(MessageRejectError::IncorrectDataFormat { tag: 388, .. })
        ));
        assert!(view.validate().is_err());
        assert_eq!(view.symbol().unwrap(), "VND");
    }
}
