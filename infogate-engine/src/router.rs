/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! Message-type router.
//!
//! A [`Router`] maps tag 35 codes to handlers. Dispatch reads the code,
//! builds the registered view over the message body and calls the handler;
//! the handler's error is returned unchanged. The table is fixed once built,
//! see [`RouterBuilder`](crate::builder::RouterBuilder) and
//! [`SharedRouter`](crate::shared::SharedRouter).

use crate::builder::RouterBuilder;
use crate::session::SessionId;
use infogate_core::MessageRejectError;
use infogate_core::message::RawMessage;
use infogate_dictionary::{Directory, MessageDef};
use infogate_messages::{MessageKind, MessageView};
use infogate_tagvalue::Scope;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, warn};

/// Handler with the view type erased.
type ErasedHandler =
    Box<dyn for<'s> Fn(Scope<'s>, &SessionId) -> Result<(), MessageRejectError> + Send + Sync>;

/// Errors raised while building a routing table.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouterError {
    /// A handler is already registered for the code.
    #[error("duplicate message type: {msg_type}")]
    DuplicateMessageType {
        /// The tag 35 code.
        msg_type: String,
    },

    /// The message layout names a field missing from the directory.
    #[error("message type {msg_type} declares undefined field {tag}")]
    UndefinedField {
        /// The tag 35 code.
        msg_type: String,
        /// The undefined tag.
        tag: u32,
    },

    /// The message layout names a group missing from the directory.
    #[error("message type {msg_type} declares undefined group {count_tag}")]
    UndefinedGroup {
        /// The tag 35 code.
        msg_type: String,
        /// The undefined count tag.
        count_tag: u32,
    },
}

/// Registration entry for one message type.
pub struct MessageTypeDescriptor {
    code: &'static str,
    name: &'static str,
    definition: &'static MessageDef,
    handler: ErasedHandler,
}

impl MessageTypeDescriptor {
    /// Creates the descriptor of message kind `K` with its handler.
    ///
    /// # Arguments
    /// * `handler` - Called with the view and the session of every
    ///   message of kind `K`
    #[must_use]
    pub fn new<K, F>(handler: F) -> Self
    where
        K: MessageKind,
        F: for<'s> Fn(&K::View<'s>, &SessionId) -> Result<(), MessageRejectError>
            + Send
            + Sync
            + 'static,
    {
        Self {
            code: K::MSG_TYPE,
            name: K::NAME,
            definition: K::definition(),
            handler: erase(move |scope, session| {
                let view = K::view(scope);
                debug!(
                    msg_type = K::MSG_TYPE,
                    key = view.key().unwrap_or_default(),
                    %session,
                    "dispatching"
                );
                handler(&view, session)
            }),
        }
    }

    /// Returns the tag 35 code.
    #[inline]
    #[must_use]
    pub const fn code(&self) -> &'static str {
        self.code
    }

    /// Returns the message name.
    #[inline]
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Returns the message layout.
    #[inline]
    #[must_use]
    pub const fn definition(&self) -> &'static MessageDef {
        self.definition
    }

    /// Returns the tags every message of this type must carry.
    pub fn required_tags(&self) -> impl Iterator<Item = u32> + '_ {
        self.definition.required_tags()
    }

    pub(crate) fn validate(&self, directory: &Directory) -> Result<(), RouterError> {
        if let Some(member) = self
            .definition
            .fields
            .iter()
            .find(|m| directory.field(m.tag).is_none())
        {
            return Err(RouterError::UndefinedField {
                msg_type: self.code.to_string(),
                tag: member.tag,
            });
        }
        if let Some(member) = self
            .definition
            .groups
            .iter()
            .find(|m| directory.group(m.tag).is_none())
        {
            return Err(RouterError::UndefinedGroup {
                msg_type: self.code.to_string(),
                count_tag: member.tag,
            });
        }
        Ok(())
    }
}

impl fmt::Debug for MessageTypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MessageTypeDescriptor")
            .field("code", &self.code)
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

fn erase<G>(handler: G) -> ErasedHandler
where
    G: for<'s> Fn(Scope<'s>, &SessionId) -> Result<(), MessageRejectError> + Send + Sync + 'static,
{
    Box::new(handler)
}

/// Immutable routing table.
#[derive(Debug)]
pub struct Router {
    directory: Arc<Directory>,
    routes: HashMap<&'static str, MessageTypeDescriptor>,
}

impl Router {
    /// Starts building a router over `directory`.
    #[must_use]
    pub fn builder(directory: Arc<Directory>) -> RouterBuilder {
        RouterBuilder::new(directory)
    }

    pub(crate) fn from_parts(
        directory: Arc<Directory>,
        routes: HashMap<&'static str, MessageTypeDescriptor>,
    ) -> Self {
        Self { directory, routes }
    }

    /// Dispatches a decoded message to the handler of its type.
    ///
    /// # Errors
    /// - `FieldNotFound` for tag 35 if the message has no type
    /// - `IncorrectDataFormat` for tag 35 if the type is not valid UTF-8
    /// - `UnknownMessageType` if no handler is registered; no handler runs
    /// - any error returned by the handler, unchanged
    pub fn dispatch(
        &self,
        raw: &RawMessage<'_>,
        session: &SessionId,
    ) -> Result<(), MessageRejectError> {
        let msg_type = raw.require_msg_type()?;
        let Some(route) = self.routes.get(msg_type) else {
            warn!(msg_type, %session, "no handler for message type");
            return Err(MessageRejectError::UnknownMessageType {
                msg_type: msg_type.to_string(),
            });
        };
        let scope = Scope::for_message(raw, &self.directory, route.definition);
        (route.handler)(scope, session)
    }

    /// Returns true if a handler is registered for `code`.
    #[must_use]
    pub fn contains(&self, code: &str) -> bool {
        self.routes.contains_key(code)
    }

    /// Returns the descriptor registered for `code`.
    #[must_use]
    pub fn descriptor(&self, code: &str) -> Option<&MessageTypeDescriptor> {
        self.routes.get(code)
    }

    /// Returns the registered codes, in no particular order.
    pub fn codes(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.routes.keys().copied()
    }

    /// Returns the field directory views are built with.
    #[must_use]
    pub fn directory(&self) -> &Arc<Directory> {
        &self.directory
    }

    /// Returns the number of registered message types.
    #[must_use]
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    /// Returns true if no message type is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use infogate_core::RejectReason;
    use infogate_dictionary::hnx;
    use infogate_messages::{AuctionMatchKind, BoardInfoKind, IndexKind};
    use parking_lot::Mutex;
    use rust_decimal::Decimal;

    fn session() -> SessionId {
        SessionId::new("FIX.4.4", "FEED", "HNX")
    }

    fn directory() -> Arc<Directory> {
        Arc::new(hnx::directory().unwrap())
    }

    #[test]
    fn test_dispatch_to_handler() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let mut builder = Router::builder(directory());
        builder
            .route::<AuctionMatchKind, _>(move |view, _session| {
                sink.lock().push((view.symbol()?.to_string(), view.price()?));
                Ok(())
            })
            .unwrap();
        let router = builder.build();

        let raw = RawMessage::builder(b"")
            .header(35, b"EP")
            .body(55, b"ABC")
            .body(31, b"100")
            .body(32, b"5")
            .build();
        router.dispatch(&raw, &session()).unwrap();
        assert_eq!(*seen.lock(), vec![("ABC".to_string(), Decimal::from(100))]);
    }

    #[test]
    fn test_dispatch_missing_msg_type() {
        let router = Router::builder(directory()).build();
        let raw = RawMessage::builder(b"").body(55, b"ABC").build();
        assert_eq!(
            router.dispatch(&raw, &session()).unwrap_err(),
            MessageRejectError::FieldNotFound { tag: 35 }
        );
    }

    #[test]
    fn test_dispatch_msg_type_not_utf8() {
        let calls = Arc::new(Mutex::new(0usize));
        let counter = Arc::clone(&calls);
        let mut builder = Router::builder(directory());
        builder
            .route::<IndexKind, _>(move |_view, _session| {
                *counter.lock() += 1;
                Ok(())
            })
            .unwrap();
        let router = builder.build();
        let raw = RawMessage::builder(b"")
            .header(35, b"\xff")
            .body(55, b"ABC")
            .build();

        let err = router.dispatch(&raw, &session()).unwrap_err();
        assert!(matches!(
            err,
            MessageRejectError::IncorrectDataFormat { tag: 35, .. }
        ));
        assert_eq!(err.ref_tag(), Some(35));
        assert_eq!(*calls.lock(), 0);
    }

    #[test]
    fn test_dispatch_unknown_type_runs_no_handler() {
        let calls = Arc::new(Mutex::new(0usize));
        let counter = Arc::clone(&calls);
        let mut builder = Router::builder(directory());
        builder
            .route::<IndexKind, _>(move |_view, _session| {
                *counter.lock() += 1;
                Ok(())
            })
            .unwrap();
        let router = builder.build();

        let raw = RawMessage::builder(b"").header(35, b"ZZ").build();
        assert_eq!(
            router.dispatch(&raw, &session()).unwrap_err(),
            MessageRejectError::UnknownMessageType {
                msg_type: "ZZ".to_string()
            }
        );
        assert_eq!(*calls.lock(), 0);
    }

    #[test]
    fn test_handler_error_unchanged() {
        let mut builder = Router::builder(directory());
        builder
            .route::<BoardInfoKind, _>(|view, _session| {
                Err(RejectReason::new(99, format!("board {} halted", view.board_code()?))
                    .with_ref_tag(425)
                    .into())
            })
            .unwrap();
        let router = builder.build();

        let raw = RawMessage::builder(b"")
            .header(35, b"BI")
            .body(425, b"LIS_BRD_01")
            .build();
        let err = router.dispatch(&raw, &session()).unwrap_err();
        assert_eq!(
            err,
            MessageRejectError::Rejected(
                RejectReason::new(99, "board LIS_BRD_01 halted").with_ref_tag(425)
            )
        );
    }

    #[test]
    fn test_router_introspection() {
        let mut builder = Router::builder(directory());
        builder
            .route::<AuctionMatchKind, _>(|_, _| Ok(()))
            .unwrap()
            .route::<IndexKind, _>(|_, _| Ok(()))
            .unwrap();
        let router = builder.build();

        assert_eq!(router.len(), 2);
        assert!(router.contains("EP"));
        assert!(!router.contains("SI"));
        let descriptor = router.descriptor("EP").unwrap();
        assert_eq!(descriptor.name(), "AuctionMatch");
        assert_eq!(descriptor.required_tags().collect::<Vec<_>>(), vec![55, 31, 32]);
        let mut codes: Vec<_> = router.codes().collect();
        codes.sort_unstable();
        assert_eq!(codes, vec!["EP", "I"]);
    }
}
