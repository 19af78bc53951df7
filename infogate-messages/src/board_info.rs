/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! Board information (`BI`).

use crate::view;
use infogate_core::MessageRejectError;
use infogate_core::types::MarketTime;
use infogate_dictionary::hnx::{BOARD_CODE, BOARD_STATUS};
use std::fmt;

view! {
    /// Status and breadth of one trading board.
    pub struct BoardInfo<'s> as BoardInfoKind {
        msg_type: "BI",
        key: BOARD_CODE,
        fields {
            /// Board code (425), e.g. `LIS_BRD_01`.
            required board_code: &'s str = BOARD_CODE,
            /// Board status (426), see [`BoardInfo::status`].
            optional board_status: char = BOARD_STATUS,
            /// Trading session code (336).
            optional trading_session_id: &'s str = 336,
            /// Trading session status (340).
            optional trad_ses_status: &'s str = 340,
            /// Board name (421).
            optional name: &'s str = 421,
            /// Symbols up (251).
            optional num_symbol_advances: i64 = 251,
            /// Symbols unchanged (252).
            optional num_symbol_no_change: i64 = 252,
            /// Symbols down (253).
            optional num_symbol_declines: i64 = 253,
            /// Time (399). Not part of the exchange's board layout; read when
            /// a feed stamps board snapshots like stock updates.
            optional time: MarketTime = 399,
        }
    }
}

/// Board status carried in tag 426.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BoardStatus {
    /// Active (`A`).
    Active,
    /// Closed (`C`).
    Closed,
    /// Temporarily paused (`P`).
    Paused,
}

impl BoardStatus {
    /// Returns the wire code.
    #[must_use]
    pub const fn code(self) -> char {
        match self {
            Self::Active => 'A',
            Self::Closed => 'C',
            Self::Paused => 'P',
        }
    }
}

impl TryFrom<char> for BoardStatus {
    type Error = char;

    fn try_from(code: char) -> Result<Self, Self::Error> {
        match code {
            'A' => Ok(Self::Active),
            'C' => Ok(Self::Closed),
            'P' => Ok(Self::Paused),
            other => Err(other),
        }
    }
}

impl fmt::Display for BoardStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl BoardInfo<'_> {
    /// Returns the board status, if tag 426 is present.
    ///
    /// # Errors
    /// `IncorrectDataFormat` for a code other than `A`, `C` or `P`.
    pub fn status(&self) -> Result<Option<BoardStatus>, MessageRejectError> {
        self.board_status()?
            .map(|code| {
                BoardStatus::try_from(code).map_err(|other| {
                    MessageRejectError::incorrect_format(
                        BOARD_STATUS,
                        format!("unknown board status '{other}'"),
                    )
                })
            })
            .transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::{MessageKind, MessageView};
    use infogate_core::message::RawMessage;
    use infogate_core::types::TimePrecision;
    use infogate_dictionary::hnx;

    #[test]
    fn test_board_info_getters() {
        let dir = hnx::directory().unwrap();
        let raw = RawMessage::builder(b"")
            .header(35, b"BI")
            .body(425, b"LIS_BRD_01")
            .body(426, b"A")
            .body(336, b"LIS_CON_NML")
            .body(251, b"120")
            .body(253, b"45")
            .body(399, b"10:15:30")
            .build();
        let view = BoardInfoKind::from_raw(&raw, &dir);

        assert_eq!(view.board_code().unwrap(), "LIS_BRD_01");
        assert_eq!(view.status().unwrap(), Some(BoardStatus::Active));
        assert_eq!(view.trading_session_id().unwrap(), Some("LIS_CON_NML"));
        assert_eq!(view.num_symbol_advances().unwrap(), Some(120));
        assert_eq!(view.num_symbol_no_change().unwrap(), Some(0));
        assert_eq!(view.num_symbol_declines().unwrap(), Some(45));
        assert_eq!(view.name().unwrap(), None);
        assert_eq!(
            view.time().unwrap().unwrap().precision(),
            TimePrecision::Seconds
        );
        assert_eq!(view.key(), Some("LIS_BRD_01"));
    }

    #[test]
    fn test_board_status_codes() {
        for status in [BoardStatus::Active, BoardStatus::Closed, BoardStatus::Paused] {
            assert_eq!(BoardStatus::try_from(status.code()), Ok(status));
        }
        assert_eq!(BoardStatus::try_from('Z'), Err('Z'));
        assert_eq!(BoardStatus::Paused.to_string(), "P");
    }

    #[test]
    fn test_board_status_unknown() {
        let dir = hnx::directory().unwrap();
        let raw = RawMessage::builder(b"")
            .body(425, b"UPC_BRD_01")
            .body(426, b"X")
            .build();
        let view = BoardInfoKind::from_raw(&raw, &dir);
        assert!(matches!(
            view.status(),
            Err(MessageRejectError::IncorrectDataFormat { tag: 426, .. })
        ));
    }
}
