/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! View traits.
//!
//! A view is a read-only projection over a [`Scope`]; it borrows the frame
//! and validates a field only when its getter is called. A [`MessageKind`]
//! ties a tag 35 code to its view type and message layout.

use infogate_core::MessageRejectError;
use infogate_core::message::RawMessage;
use infogate_dictionary::{Directory, MessageDef};
use infogate_tagvalue::Scope;

/// A typed projection over a scope of fields.
pub trait ScopedView<'s>: Sized {
    /// Wraps a scope.
    fn from_scope(scope: Scope<'s>) -> Self;

    /// Returns the wrapped scope.
    fn scope(&self) -> Scope<'s>;

    /// Validates every declared member eagerly.
    ///
    /// # Errors
    /// The first reject found, see [`Scope::check_required`].
    fn validate(&self) -> Result<(), MessageRejectError> {
        self.scope().check_required()
    }
}

/// A view over a whole message body.
pub trait MessageView<'s>: ScopedView<'s> {
    /// Tag of the identifying field (instrument, board, index or market).
    const KEY_TAG: u32;

    /// Returns the identifying value for logging, if present and readable.
    fn key(&self) -> Option<&'s str> {
        self.scope()
            .fields()
            .get_first(Self::KEY_TAG)
            .and_then(|f| f.as_str().ok())
    }
}

/// A message type: tag 35 code, view and layout.
pub trait MessageKind: 'static {
    /// Tag 35 code.
    const MSG_TYPE: &'static str;

    /// Message name.
    const NAME: &'static str;

    /// View constructed for messages of this type.
    type View<'s>: MessageView<'s>;

    /// Returns the message layout (required and optional members).
    fn definition() -> &'static MessageDef;

    /// Wraps a body scope in this kind's view.
    fn view(scope: Scope<'_>) -> Self::View<'_> {
        ScopedView::from_scope(scope)
    }

    /// Builds the view over a decoded message.
    fn from_raw<'s>(raw: &'s RawMessage<'_>, directory: &'s Directory) -> Self::View<'s> {
        Self::view(Scope::for_message(raw, directory, Self::definition()))
    }
}
