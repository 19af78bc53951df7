/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! Auction match price (`EP`).

use crate::view;
use infogate_core::MessageRejectError;
use infogate_dictionary::hnx::{ACTION_TYPE, SYMBOL};
use rust_decimal::Decimal;
use std::fmt;

view! {
    /// Indicative or final price of a periodic auction.
    pub struct AuctionMatch<'s> as AuctionMatchKind {
        msg_type: "EP",
        key: SYMBOL,
        fields {
            /// Symbol (55).
            required symbol: &'s str = SYMBOL,
            /// Match type (33), see [`AuctionMatch::match_type`].
            optional action_type: char = ACTION_TYPE,
            /// Auction match price (31).
            required price: Decimal = 31,
            /// Auction match quantity (32).
            required qtty: Decimal = 32,
        }
    }
}

/// Auction match type carried in tag 33.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MatchType {
    /// Final match (`A`). Not sent for derivatives.
    Final,
    /// Provisional match (`M`).
    Provisional,
}

impl MatchType {
    /// Returns the wire code.
    #[must_use]
    pub const fn code(self) -> char {
        match self {
            Self::Final => 'A',
            Self::Provisional => 'M',
        }
    }
}

impl TryFrom<char> for MatchType {
    type Error = char;

    fn try_from(code: char) -> Result<Self, Self::Error> {
        match code {
            'A' => Ok(Self::Final),
            'M' => Ok(Self::Provisional),
            other => Err(other),
        }
    }
}

impl fmt::Display for MatchType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl AuctionMatch<'_> {
    /// Returns the match type, if tag 33 is present.
    ///
    /// # Errors
    /// `IncorrectDataFormat` for a code other than `A` or `M`.
    pub fn match_type(&self) -> Result<Option<MatchType>, MessageRejectError> {
        self.action_type()?
            .map(|code| {
                MatchType::try_from(code).map_err(|other| {
                    MessageRejectError::incorrect_format(
                        ACTION_TYPE,
                        format!("unknown match type '{other}'"),
                    )
                })
            })
            .transpose()
    }
}
