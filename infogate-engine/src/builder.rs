/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! Router builder.
//!
//! Registration happens once, before sessions start. Each registration is
//! checked against the field directory, and a second registration for the
//! same code is refused while the first one stays in place.

use crate::router::{MessageTypeDescriptor, Router, RouterError};
use crate::session::SessionId;
use infogate_core::MessageRejectError;
use infogate_dictionary::Directory;
use infogate_messages::MessageKind;
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::sync::Arc;
use tracing::debug;

/// Builder for a [`Router`].
#[derive(Debug)]
pub struct RouterBuilder {
    /// Directory views are read through.
    directory: Arc<Directory>,
    /// Registered message types by code.
    routes: HashMap<&'static str, MessageTypeDescriptor>,
}

impl RouterBuilder {
    /// Creates an empty builder.
    #[must_use]
    pub fn new(directory: Arc<Directory>) -> Self {
        Self {
            directory,
            routes: HashMap::new(),
        }
    }

    /// Registers `handler` for message kind `K`.
    ///
    /// # Errors
    /// See [`register`](Self::register).
    pub fn route<K, F>(&mut self, handler: F) -> Result<&mut Self, RouterError>
    where
        K: MessageKind,
        F: for<'s> Fn(&K::View<'s>, &SessionId) -> Result<(), MessageRejectError>
            + Send
            + Sync
            + 'static,
    {
        self.register(MessageTypeDescriptor::new::<K, F>(handler))
    }

    /// Registers a message type descriptor.
    ///
    /// # Errors
    /// - `DuplicateMessageType` if the code is already registered; the
    ///   earlier registration is kept
    /// - `UndefinedField` or `UndefinedGroup` if the layout names a member
    ///   missing from the directory
    pub fn register(
        &mut self,
        descriptor: MessageTypeDescriptor,
    ) -> Result<&mut Self, RouterError> {
        descriptor.validate(&self.directory)?;
        match self.routes.entry(descriptor.code()) {
            Entry::Occupied(_) => Err(RouterError::DuplicateMessageType {
                msg_type: descriptor.code().to_string(),
            }),
            Entry::Vacant(slot) => {
                debug!(
                    msg_type = descriptor.code(),
                    name = descriptor.name(),
                    "registered message type"
                );
                slot.insert(descriptor);
                Ok(self)
            }
        }
    }

    /// Returns true if `code` is registered.
    #[must_use]
    pub fn is_registered(&self, code: &str) -> bool {
        self.routes.contains_key(code)
    }

    /// Returns the number of registered message types.
    #[must_use]
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    /// Returns true if nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Freezes the registrations into a router.
    #[must_use]
    pub fn build(self) -> Router {
        Router::from_parts(self.directory, self.routes)
    }
}
