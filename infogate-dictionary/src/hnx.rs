/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! HNX InfoGate field and group table.
//!
//! Prices are `NoDefault` so that an absent price never reads as zero.
//! Quantities, totals and counters use the `Zero` default.

use crate::directory::{Directory, DirectoryBuilder, DirectoryError};
use crate::schema::{Cardinality, FieldDef, GroupDef, MemberDef, SemanticType};

/// Symbol.
pub const SYMBOL: u32 = 55;
/// BoardCode.
pub const BOARD_CODE: u32 = 425;
/// BoardStatus.
pub const BOARD_STATUS: u32 = 426;
/// ActionType.
pub const ACTION_TYPE: u32 = 33;
/// IndexCode.
pub const INDEX_CODE: u32 = 2;
/// MarketCode.
pub const MARKET_CODE: u32 = 341;
/// NoTopPrice, count of the top-N price ladder.
pub const NO_TOP_PRICE: u32 = 555;
/// NumTopPrice, delimiter of the top-N price ladder.
pub const NUM_TOP_PRICE: u32 = 556;

use SemanticType::{Char, Date, Decimal, Int, String as Str, Time};

const HEADER: &[(u32, &str, SemanticType)] = &[
    (8, "BeginString", Str),
    (9, "BodyLength", Int),
    (35, "MsgType", Str),
    (49, "SenderCompID", Str),
    (56, "TargetCompID", Str),
    (34, "MsgSeqNum", Int),
    (52, "SendingTime", Str),
    (10, "CheckSum", Str),
];

const NO_DEFAULT: &[(u32, &str, SemanticType)] = &[
    (SYMBOL, "Symbol", Str),
    (BOARD_CODE, "BoardCode", Str),
    (BOARD_STATUS, "BoardStatus", Char),
    (ACTION_TYPE, "ActionType", Char),
    (INDEX_CODE, "IndexCode", Str),
    (MARKET_CODE, "MarketCode", Str),
    (326, "SecurityTradingStatus", Int),
    (167, "SecurityType", Str),
    (225, "IssueDate", Date),
    (106, "Issuer", Str),
    (107, "SecurityDesc", Str),
    (232, "ReferenceStatus", Str),
    (336, "TradingSessionID", Str),
    (340, "TradSesStatus", Str),
    (421, "Name", Str),
    (800, "Underlying", Str),
    // Sent as dd/MM/yyyy text, unlike the yyyyMMdd dates below.
    (802, "FirstTradingDate", Str),
    (803, "LastTradingDate", Str),
    (388, "TradingDate", Date),
    (541, "MaturityDate", Date),
    (399, "Time", Time),
    (132, "BestBidPrice", Decimal),
    (133, "BestOfferPrice", Decimal),
    (260, "BasicPrice", Decimal),
    (333, "FloorPrice", Decimal),
    (332, "CeilingPrice", Decimal),
    (3331, "FloorPricePT", Decimal),
    (3321, "CeilingPricePT", Decimal),
    (334, "ParValue", Decimal),
    (31, "MatchPrice", Decimal),
    (137, "OpenPrice", Decimal),
    (138, "PriorOpenPrice", Decimal),
    (139, "ClosePrice", Decimal),
    (140, "PriorClosePrice", Decimal),
    (631, "MidPx", Decimal),
    (255, "CurrentPrice", Decimal),
    (266, "HighestPrice", Decimal),
    (2661, "LowestPrice", Decimal),
    (277, "PriorPrice", Decimal),
    (3931, "PutThroughMatchPrice", Decimal),
    (223, "CouponRate", Decimal),
    (3, "Value", Decimal),
    (5, "Change", Decimal),
    (6, "RatioChange", Decimal),
    (23, "PriorIndexVal", Decimal),
    (24, "HighestIndex", Decimal),
    (25, "LowestIndex", Decimal),
];

const ZERO_DEFAULT: &[(u32, &str, SemanticType)] = &[
    (251, "NumSymbolAdvances", Int),
    (252, "NumSymbolNoChange", Int),
    (253, "NumSymbolDeclines", Int),
    (1321, "BestBidQtty", Decimal),
    (1331, "BestOfferQtty", Decimal),
    (134, "TotalBidQtty", Decimal),
    (135, "TotalOfferQtty", Decimal),
    (32, "MatchQtty", Decimal),
    (387, "TotalVolumeTraded", Decimal),
    (3871, "TotalValueTraded", Decimal),
    (400, "TradingUnit", Decimal),
    (109, "TotalListingQtty", Decimal),
    (17, "DateNo", Decimal),
    (230, "AdjustQtty", Decimal),
    (2551, "CurrentQtty", Decimal),
    (310, "MatchValue", Decimal),
    (320, "OfferCount", Decimal),
    (321, "BidCount", Decimal),
    (391, "NormalTotalTradedQtty", Decimal),
    (392, "NormalTotalTradedValue", Decimal),
    (393, "PutThroughMatchQtty", Decimal),
    (394, "PutThroughTotalTradedQtty", Decimal),
    (3941, "PutThroughTotalTradedValue", Decimal),
    (395, "TotalBuyTradingQtty", Decimal),
    (3951, "BuyCount", Decimal),
    (3952, "TotalBuyTradingValue", Decimal),
    (396, "TotalSellTradingQtty", Decimal),
    (3961, "SellCount", Decimal),
    (3962, "TotalSellTradingValue", Decimal),
    (397, "BuyForeignQtty", Decimal),
    (3971, "BuyForeignValue", Decimal),
    (398, "SellForeignQtty", Decimal),
    (3981, "SellForeignValue", Decimal),
    (3301, "RemainForeignQtty", Decimal),
    (1341, "TotalBidQttyOdd", Decimal),
    (1351, "TotalOfferQttyOdd", Decimal),
    (7, "TotalQtty", Decimal),
    (14, "TotalValue", Decimal),
    (801, "OpenInterest", Decimal),
    (8011, "OpenInterestChange", Decimal),
];

/// Returns a builder holding the HNX InfoGate field and group table.
///
/// Callers may merge their own definitions before building.
#[must_use]
pub fn builder() -> DirectoryBuilder {
    let mut builder = Directory::builder();
    for &(tag, name, ty) in HEADER.iter().chain(NO_DEFAULT) {
        builder = builder.field(FieldDef::new(tag, name, ty));
    }
    for &(tag, name, ty) in ZERO_DEFAULT {
        builder = builder.field(FieldDef::new(tag, name, ty).zero_default());
    }
    builder
        .field(FieldDef::group_count(NO_TOP_PRICE, "NoTopPrice"))
        .field(
            FieldDef::new(NUM_TOP_PRICE, "NumTopPrice", Int)
                .with_cardinality(Cardinality::GroupMember),
        )
        .group(top_price_group())
}

/// Builds the HNX InfoGate directory.
///
/// # Errors
/// Returns a [`DirectoryError`] only if the table itself is inconsistent.
pub fn directory() -> Result<Directory, DirectoryError> {
    builder().build()
}

fn top_price_group() -> GroupDef {
    GroupDef::new(NO_TOP_PRICE, "NoTopPrice", NUM_TOP_PRICE)
        .with_field(MemberDef::required(NUM_TOP_PRICE, "NumTopPrice"))
        .with_field(MemberDef::optional(132, "BestBidPrice"))
        .with_field(MemberDef::optional(1321, "BestBidQtty"))
        .with_field(MemberDef::optional(133, "BestOfferPrice"))
        .with_field(MemberDef::optional(1331, "BestOfferQtty"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::DefaultPolicy;

    #[test]
    fn test_hnx_directory_builds() {
        let dir = directory().unwrap();
        assert_eq!(dir.field(SYMBOL).unwrap().semantic_type, SemanticType::String);
        assert_eq!(dir.field(31).unwrap().default, DefaultPolicy::NoDefault);
        assert_eq!(dir.field(387).unwrap().default, DefaultPolicy::Zero);
        assert_eq!(dir.field(399).unwrap().semantic_type, SemanticType::Time);
        assert_eq!(dir.field(388).unwrap().semantic_type, SemanticType::Date);
        assert_eq!(dir.field(802).unwrap().semantic_type, SemanticType::String);
    }

    #[test]
    fn test_hnx_top_price_group() {
        let dir = directory().unwrap();
        let group = dir.group(NO_TOP_PRICE).unwrap();
        assert_eq!(group.delimiter_tag, NUM_TOP_PRICE);
        assert_eq!(group.fields.len(), 5);
        assert!(dir.is_group_member(group, 1331));
        assert!(!dir.is_group_member(group, SYMBOL));
    }

    #[test]
    fn test_hnx_builder_accepts_extensions() {
        let dir = builder()
            .field(FieldDef::new(9001, "VendorNote", SemanticType::String))
            .build()
            .unwrap();
        assert!(dir.field(9001).is_some());
    }
}
