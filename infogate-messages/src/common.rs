/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! Getters shared by several message types.
//!
//! These are free functions over any view instead of methods repeated on
//! every view type.

use crate::view::ScopedView;
use infogate_core::MessageRejectError;
use infogate_dictionary::hnx::{BOARD_CODE, SYMBOL};

/// Returns the instrument symbol (tag 55).
///
/// # Errors
/// `FieldNotFound` if absent, `UndefinedTag` if the directory lacks tag 55.
pub fn symbol<'s, V: ScopedView<'s>>(view: &V) -> Result<&'s str, MessageRejectError> {
    view.scope().require(SYMBOL)
}

/// Returns the board code (tag 425), if present.
///
/// # Errors
/// `FieldNotFound` if the view declares it required and it is absent.
pub fn board_code<'s, V: ScopedView<'s>>(view: &V) -> Result<Option<&'s str>, MessageRejectError> {
    view.scope().lookup(BOARD_CODE)
}
