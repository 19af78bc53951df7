/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! Copy-on-write router handle.
//!
//! Sessions load the current [`Router`] once per message. A swap installs a
//! new table for subsequent loads; messages already dispatching keep the
//! table they loaded.

use crate::router::Router;
use parking_lot::RwLock;
use std::sync::Arc;
use tracing::info;

/// Shared, swappable routing table.
#[derive(Debug)]
pub struct SharedRouter {
    current: RwLock<Arc<Router>>,
}

impl SharedRouter {
    /// Wraps a built router.
    #[must_use]
    pub fn new(router: Router) -> Self {
        Self {
            current: RwLock::new(Arc::new(router)),
        }
    }

    /// Returns the current routing table.
    #[must_use]
    pub fn load(&self) -> Arc<Router> {
        Arc::clone(&self.current.read())
    }

    /// Installs `router` and returns the table it replaces.
    pub fn swap(&self, router: Router) -> Arc<Router> {
        let next = Arc::new(router);
        let codes = next.len();
        let previous = std::mem::replace(&mut *self.current.write(), next);
        info!(message_types = codes, "routing table swapped");
        previous
    }
}

impl From<Router> for SharedRouter {
    fn from(router: Router) -> Self {
        Self::new(router)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::SessionId;
    use infogate_core::MessageRejectError;
    use infogate_core::message::RawMessage;
    use infogate_dictionary::{Directory, hnx};
    use infogate_messages::{IndexKind, MarketInfoKind};

    fn directory() -> Arc<Directory> {
        Arc::new(hnx::directory().unwrap())
    }

    #[test]
    fn test_swap_changes_subsequent_loads() {
        let dir = directory();
        let mut first = Router::builder(Arc::clone(&dir));
        first.route::<IndexKind, _>(|_, _| Ok(())).unwrap();
        let shared = SharedRouter::new(first.build());

        let held = shared.load();
        assert!(held.contains("I"));

        let mut second = Router::builder(dir);
        second.route::<MarketInfoKind, _>(|_, _| Ok(())).unwrap();
        let previous = shared.swap(second.build());

        assert!(previous.contains("I"));
        assert!(held.contains("I"));
        assert!(shared.load().contains("MI"));
        assert!(!shared.load().contains("I"));

        let raw = RawMessage::builder(b"")
            .header(35, b"I")
            .body(2, b"HNXIndex")
            .build();
        let session = SessionId::new("FIX.4.4", "FEED", "HNX");
        assert!(held.dispatch(&raw, &session).is_ok());
        assert_eq!(
            shared.load().dispatch(&raw, &session).unwrap_err(),
            MessageRejectError::UnknownMessageType {
                msg_type: "I".to_string()
            }
        );
    }
}
