//! Replays a sample HNX InfoGate feed through a session worker.
//!
//! Frames are produced with the encoder, queued on a [`SessionWorker`] and
//! routed to typed handlers. Rejects and decode failures come back on the
//! event channel, the way a session layer would receive them.
//!
//! ```text
//! RUST_LOG=debug INFOGATE_ROUNDS=3 cargo run --example replay
//! ```

use anyhow::Context;
use bytes::Bytes;
use infogate::prelude::*;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{info, warn};
mod common;
use common::{ReplayConfig, init_logging};

const BEGIN_STRING: &str = "FIX.4.4";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();
    let cfg = ReplayConfig::from_env();
    info!(?cfg, "starting replay");

    let directory = Arc::new(hnx::directory().context("building the HNX directory")?);
    let router = Arc::new(SharedRouter::new(build_router(directory)?));
    let session = SessionId::new(BEGIN_STRING, &cfg.local_comp_id, &cfg.exchange_comp_id);

    let (events_tx, mut events_rx) = mpsc::unbounded_channel();
    let worker = SessionWorker::spawn(
        session,
        Arc::clone(&router),
        WorkerConfig::default()
            .with_queue_capacity(cfg.queue_capacity)
            .with_checksum_validation(cfg.validate_checksum),
        Some(events_tx),
    );

    let mut seq = 1;
    for _ in 0..cfg.rounds {
        for frame in sample_feed(&cfg, &mut seq) {
            worker.submit(frame).await?;
        }
    }
    let stats = worker.finish().await?;

    while let Some(event) = events_rx.recv().await {
        match &event {
            SessionEvent::Rejected {
                seq_num, msg_type, error, ..
            } => warn!(
                ?seq_num,
                ?msg_type,
                reason = error.session_reject_reason().code(),
                ref_tag = ?error.ref_tag(),
                "would send Reject"
            ),
            SessionEvent::DecodeFailed { error, .. } => warn!(%error, "dropped frame"),
        }
    }
    info!(?stats, "replay finished");
    Ok(())
}

fn build_router(directory: Arc<Directory>) -> anyhow::Result<Router> {
    let mut builder = Router::builder(directory);
    builder
        .route::<AuctionMatchKind, _>(|view, _session| {
            info!(
                symbol = view.symbol()?,
                price = %view.price()?,
                qtty = %view.qtty()?,
                match_type = ?view.match_type()?,
                "auction match"
            );
            Ok(())
        })?
        .route::<TopNPriceKind, _>(|view, _session| {
            for level in view.levels()? {
                info!(
                    symbol = view.symbol()?,
                    level = level.num_top_price()?,
                    bid = ?level.best_bid_price()?,
                    offer = ?level.best_offer_price()?,
                    "top price"
                );
            }
            Ok(())
        })?
        .route::<BoardInfoKind, _>(|view, _session| {
            info!(
                board = view.board_code()?,
                status = ?view.status()?,
                advances = ?view.num_symbol_advances()?,
                "board info"
            );
            Ok(())
        })?
        .route::<IndexKind, _>(|view, _session| {
            info!(index = view.index_code()?, value = ?view.value()?, "index");
            Ok(())
        })?
        .route::<StockInfoKind, _>(|view, _session| {
            info!(
                symbol = view.symbol()?,
                basic = ?view.basic_price()?,
                ceiling = ?view.ceiling_price()?,
                floor = ?view.floor_price()?,
                "stock info"
            );
            Ok(())
        })?;
    Ok(builder.build())
}

fn sample_feed(cfg: &ReplayConfig, seq: &mut i64) -> Vec<Bytes> {
    let mut frames = Vec::new();
    let mut frame = |msg_type: &str, body: &[(u32, &str)]| {
        let mut encoder = Encoder::new_message(BEGIN_STRING, msg_type);
        encoder.put_str(49, &cfg.exchange_comp_id);
        encoder.put_str(56, &cfg.local_comp_id);
        encoder.put_int(34, *seq);
        *seq += 1;
        for &(tag, value) in body {
            encoder.put_str(tag, value);
        }
        frames.push(encoder.finish().freeze());
    };

    frame("BI", &[(425, "LIS_BRD_01"), (426, "A"), (251, "120"), (399, "09:00:00")]);
    frame(
        "SI",
        &[(55, "VND"), (425, "LIS_BRD_01"), (260, "25000"), (332, "26700"), (333, "23300")],
    );
    frame("EP", &[(55, "VND"), (33, "M"), (31, "25350.5"), (32, "1000")]);
    frame(
        "TP",
        &[
            (55, "VND"),
            (555, "2"),
            (556, "1"),
            (132, "25300"),
            (1321, "500"),
            (133, "25400"),
            (1331, "700"),
            (556, "2"),
            (132, "25200"),
            (1321, "900"),
        ],
    );
    frame("I", &[(2, "HNXINDEX"), (3, "231.45"), (5, "-1.2")]);
    // No handler registered for MI.
    frame("MI", &[(341, "HNX")]);
    // Required symbol missing.
    frame("EP", &[(31, "25350.5"), (32, "1000")]);
    frames.push(Bytes::from_static(b"8=FIX.4.4\x019=5\x0135=0\x0110=000\x01"));
    frames
}
