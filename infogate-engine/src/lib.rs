/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! # InfoGate Engine
//!
//! Message routing for the InfoGate market-data gateway.
//!
//! This crate provides:
//! - **Router**: Maps tag 35 codes to typed handlers
//! - **Builder API**: Fluent, validated handler registration
//! - **Shared router**: Atomically replaceable routing table
//! - **Session workers**: Ordered per-session decode and dispatch

pub mod builder;
pub mod router;
pub mod session;
pub mod shared;
pub mod worker;

pub use builder::RouterBuilder;
pub use router::{MessageTypeDescriptor, Router, RouterError};
pub use session::SessionId;
pub use shared::SharedRouter;
pub use worker::{SessionEvent, SessionWorker, WorkerConfig, WorkerError, WorkerStats};
