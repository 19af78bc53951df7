//! Configuration and logging for the replay example.

use std::env;

/// Default number of times the sample feed is replayed.
pub const DEFAULT_ROUNDS: u32 = 1;

/// Replay configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct ReplayConfig {
    /// Local CompID (TargetCompID of the feed).
    pub local_comp_id: String,
    /// Exchange CompID (SenderCompID of the feed).
    pub exchange_comp_id: String,
    /// Worker queue capacity.
    pub queue_capacity: usize,
    /// Whether the worker validates CheckSum.
    pub validate_checksum: bool,
    /// Number of passes over the sample feed.
    pub rounds: u32,
}

impl ReplayConfig {
    /// Reads `INFOGATE_*` variables, falling back to defaults.
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            local_comp_id: env::var("INFOGATE_LOCAL").unwrap_or_else(|_| "FEED".to_string()),
            exchange_comp_id: env::var("INFOGATE_EXCHANGE")
                .unwrap_or_else(|_| "HNX".to_string()),
            queue_capacity: env::var("INFOGATE_QUEUE_CAPACITY")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(infogate::engine::worker::DEFAULT_QUEUE_CAPACITY),
            validate_checksum: env::var("INFOGATE_VALIDATE_CHECKSUM")
                .map(|v| v != "0" && !v.eq_ignore_ascii_case("false"))
                .unwrap_or(true),
            rounds: env::var("INFOGATE_ROUNDS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_ROUNDS),
        }
    }
}

/// Initializes logging for the example.
pub fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .try_init();
}
