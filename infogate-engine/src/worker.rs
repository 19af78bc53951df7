/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! Per-session processing unit.
//!
//! Each session owns one [`SessionWorker`]: a tokio task fed by a bounded
//! queue of framed messages. Frames are decoded and dispatched strictly in
//! arrival order; different sessions run in parallel. Session-level
//! messages (logon, heartbeat, ...) are left to the session layer and only
//! counted here.
//!
//! Rejects and decode failures are reported on an optional event channel so
//! the session layer can answer with a Reject.

use crate::session::SessionId;
use crate::shared::SharedRouter;
use bytes::Bytes;
use infogate_core::error::{DecodeError, FixError, MessageRejectError};
use infogate_tagvalue::Decoder;
use infogate_tagvalue::decoder::DEFAULT_MAX_MESSAGE_SIZE;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// MsgSeqNum tag.
const TAG_MSG_SEQ_NUM: u32 = 34;

/// Default queue capacity, in frames.
pub const DEFAULT_QUEUE_CAPACITY: usize = 1024;

/// Worker configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkerConfig {
    /// Bounded queue capacity, in frames.
    pub queue_capacity: usize,
    /// Whether to validate CheckSum (tag 10).
    pub validate_checksum: bool,
    /// Largest accepted frame, in bytes.
    pub max_message_size: usize,
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            queue_capacity: DEFAULT_QUEUE_CAPACITY,
            validate_checksum: true,
            max_message_size: DEFAULT_MAX_MESSAGE_SIZE,
        }
    }
}

impl WorkerConfig {
    /// Sets the queue capacity. Zero is raised to one.
    #[must_use]
    pub const fn with_queue_capacity(mut self, capacity: usize) -> Self {
        self.queue_capacity = if capacity == 0 { 1 } else { capacity };
        self
    }

    /// Enables or disables checksum validation.
    #[must_use]
    pub const fn with_checksum_validation(mut self, validate: bool) -> Self {
        self.validate_checksum = validate;
        self
    }

    /// Sets the largest accepted frame.
    #[must_use]
    pub const fn with_max_message_size(mut self, max_message_size: usize) -> Self {
        self.max_message_size = max_message_size;
        self
    }
}

/// Outcome reported back to the session layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// A message was rejected by the router or its handler.
    Rejected {
        /// Session the message arrived on.
        session: SessionId,
        /// MsgSeqNum (34) of the rejected message, if readable.
        seq_num: Option<u64>,
        /// Tag 35 code, if present.
        msg_type: Option<String>,
        /// The reject.
        error: MessageRejectError,
    },
    /// A frame could not be decoded.
    DecodeFailed {
        /// Session the frame arrived on.
        session: SessionId,
        /// The decode error.
        error: DecodeError,
    },
}

impl SessionEvent {
    /// Returns the session the event belongs to.
    #[must_use]
    pub const fn session(&self) -> &SessionId {
        match self {
            Self::Rejected { session, .. } | Self::DecodeFailed { session, .. } => session,
        }
    }

    /// Returns the underlying error.
    #[must_use]
    pub fn error(&self) -> FixError {
        match self {
            Self::Rejected { error, .. } => FixError::Reject(error.clone()),
            Self::DecodeFailed { error, .. } => FixError::Decode(error.clone()),
        }
    }
}

/// Counters of one worker, returned when it stops.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WorkerStats {
    /// Frames taken from the queue.
    pub received: u64,
    /// Messages dispatched successfully.
    pub dispatched: u64,
    /// Session-level messages skipped.
    pub admin: u64,
    /// Messages rejected.
    pub rejected: u64,
    /// Frames that failed to decode.
    pub decode_failures: u64,
}

/// Errors raised by the worker handle.
#[derive(Debug, Error)]
pub enum WorkerError {
    /// The worker no longer accepts frames.
    #[error("session worker is closed")]
    Closed,

    /// The worker task failed.
    #[error("session worker task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

/// How the worker should stop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stop {
    /// Finish the in-flight message and discard the queue.
    Now,
    /// Stop accepting frames and process what is queued.
    Drain,
}

/// Handle to a running session worker.
///
/// Dropping the handle stops the worker like [`SessionWorker::shutdown`].
#[derive(Debug)]
pub struct SessionWorker {
    session: SessionId,
    frames: mpsc::Sender<Bytes>,
    stop: oneshot::Sender<Stop>,
    task: JoinHandle<WorkerStats>,
}

impl SessionWorker {
    /// Spawns a worker for `session` on the current tokio runtime.
    ///
    /// # Arguments
    /// * `session` - The session the frames belong to
    /// * `router` - The shared routing table
    /// * `config` - Queue and decoder settings
    /// * `events` - Where rejects and decode failures are reported
    #[must_use]
    pub fn spawn(
        session: SessionId,
        router: Arc<SharedRouter>,
        config: WorkerConfig,
        events: Option<mpsc::UnboundedSender<SessionEvent>>,
    ) -> Self {
        let (frames, rx) = mpsc::channel(config.queue_capacity.max(1));
        let (stop, stop_rx) = oneshot::channel();
        let unit = Unit {
            session: session.clone(),
            router,
            config,
            events,
            stats: WorkerStats::default(),
        };
        let task = tokio::spawn(unit.run(rx, stop_rx));
        Self {
            session,
            frames,
            stop,
            task,
        }
    }

    /// Returns the session this worker serves.
    #[must_use]
    pub const fn session(&self) -> &SessionId {
        &self.session
    }

    /// Returns a sender the session layer can feed frames through.
    #[must_use]
    pub fn sender(&self) -> mpsc::Sender<Bytes> {
        self.frames.clone()
    }

    /// Queues one frame, waiting while the queue is full.
    ///
    /// # Errors
    /// Returns `WorkerError::Closed` if the worker has stopped.
    pub async fn submit(&self, frame: Bytes) -> Result<(), WorkerError> {
        self.frames.send(frame).await.map_err(|_| WorkerError::Closed)
    }

    /// Stops after the in-flight message; queued frames are discarded.
    ///
    /// # Errors
    /// Returns `WorkerError::Join` if the worker task panicked.
    pub async fn shutdown(self) -> Result<WorkerStats, WorkerError> {
        self.stop_with(Stop::Now).await
    }

    /// Stops accepting frames, processes everything queued, then stops.
    ///
    /// # Errors
    /// Returns `WorkerError::Join` if the worker task panicked.
    pub async fn finish(self) -> Result<WorkerStats, WorkerError> {
        self.stop_with(Stop::Drain).await
    }

    async fn stop_with(self, how: Stop) -> Result<WorkerStats, WorkerError> {
        let _ = self.stop.send(how);
        drop(self.frames);
        Ok(self.task.await?)
    }
}

/// State owned by the worker task.
struct Unit {
    session: SessionId,
    router: Arc<SharedRouter>,
    config: WorkerConfig,
    events: Option<mpsc::UnboundedSender<SessionEvent>>,
    stats: WorkerStats,
}

impl Unit {
    async fn run(
        mut self,
        mut rx: mpsc::Receiver<Bytes>,
        mut stop: oneshot::Receiver<Stop>,
    ) -> WorkerStats {
        info!(session = %self.session, "session worker started");
        let mut draining = false;
        loop {
            let frame = if draining {
                rx.recv().await
            } else {
                tokio::select! {
                    biased;
                    how = &mut stop => match how {
                        Ok(Stop::Drain) => {
                            rx.close();
                            draining = true;
                            continue;
                        }
                        Ok(Stop::Now) | Err(_) => break,
                    },
                    frame = rx.recv() => frame,
                }
            };
            match frame {
                Some(frame) => self.process(&frame),
                None => break,
            }
        }
        info!(session = %self.session, stats = ?self.stats, "session worker stopped");
        self.stats
    }

    fn process(&mut self, frame: &[u8]) {
        self.stats.received += 1;
        let decoded = Decoder::new(frame)
            .with_checksum_validation(self.config.validate_checksum)
            .with_max_message_size(self.config.max_message_size)
            .decode();
        let raw = match decoded {
            Ok(raw) => raw,
            Err(error) => {
                self.stats.decode_failures += 1;
                warn!(session = %self.session, %error, "failed to decode frame");
                self.emit(SessionEvent::DecodeFailed {
                    session: self.session.clone(),
                    error,
                });
                return;
            }
        };

        if raw.kind().is_some_and(|kind| kind.is_admin()) {
            self.stats.admin += 1;
            debug!(session = %self.session, msg_type = raw.msg_type(), "skipping session message");
            return;
        }

        match self.router.load().dispatch(&raw, &self.session) {
            Ok(()) => self.stats.dispatched += 1,
            Err(error) => {
                self.stats.rejected += 1;
                warn!(
                    session = %self.session,
                    msg_type = raw.msg_type(),
                    reason = error.session_reject_reason().code(),
                    %error,
                    "message rejected"
                );
                self.emit(SessionEvent::Rejected {
                    session: self.session.clone(),
                    seq_num: raw
                        .get_field_str(TAG_MSG_SEQ_NUM)
                        .and_then(|s| s.parse().ok()),
                    msg_type: raw.msg_type().map(str::to_string),
                    error,
                });
            }
        }
    }

    fn emit(&self, event: SessionEvent) {
        if let Some(events) = &self.events {
            let _ = events.send(event);
        }
    }
}
