/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! Market information (`MI`).

use crate::view;
use infogate_dictionary::hnx::MARKET_CODE;

view! {
    /// Market-wide notice.
    pub struct MarketInfo<'s> as MarketInfoKind {
        msg_type: "MI",
        key: MARKET_CODE,
        fields {
            /// Market code (341).
            required market_code: &'s str = MARKET_CODE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::{MessageKind, MessageView};
    use infogate_core::MessageRejectError;
    use infogate_core::message::RawMessage;
    use infogate_dictionary::hnx;

    #[test]
    fn test_market_info() {
        let dir = hnx::directory().unwrap();
        let raw = RawMessage::builder(b"").body(341, b"HNX").build();
        let view = MarketInfoKind::from_raw(&raw, &dir);
        assert_eq!(view.market_code().unwrap(), "HNX");
        assert_eq!(view.key(), Some("HNX"));
    }

    #[test]
    fn test_market_info_duplicate_code() {
        let dir = hnx::directory().unwrap();
        let raw = RawMessage::builder(b"")
            .body(341, b"HNX")
            .body(341, b"UPCOM")
            .build();
        let view = MarketInfoKind::from_raw(&raw, &dir);
        assert_eq!(
            view.market_code().unwrap_err(),
            MessageRejectError::TagAppearsMoreThanOnce { tag: 341 }
        );
    }
}
