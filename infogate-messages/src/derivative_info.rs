/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! Derivative information snapshot (`DI`).
//!
//! Carries every stock snapshot field plus contract data. The stock getters
//! are reached through [`DerivativeInfo::as_stock`].

use crate::stock_info::{StockInfo, StockInfoKind};
use crate::view;
use crate::view::ScopedView;
use infogate_dictionary::hnx::SYMBOL;
use rust_decimal::Decimal;

view! {
    /// Snapshot of one futures contract.
    pub struct DerivativeInfo<'s> as DerivativeInfoKind {
        msg_type: "DI",
        key: SYMBOL,
        extends: StockInfoKind,
        fields {
            /// Contract symbol (55).
            required symbol: &'s str = SYMBOL,
            /// Underlying code (800).
            optional underlying: &'s str = 800,
            /// Open interest (801).
            optional open_interest: Decimal = 801,
            /// Open interest change (8011).
            optional open_interest_change: Decimal = 8011,
            /// First trading date (802), `dd/MM/yyyy`.
            optional first_trading_date: &'s str = 802,
            /// Last trading date (803), `dd/MM/yyyy`.
            optional last_trading_date: &'s str = 803,
        }
    }
}

impl<'s> DerivativeInfo<'s> {
    /// Returns the stock snapshot getters over the same fields.
    #[must_use]
    pub fn as_stock(&self) -> StockInfo<'s> {
        StockInfo::from_scope(self.scope())
    }
}
