//! Forwards every constructed failure to a tracing subscriber.
//!
//! Run with: cargo run --example tracing_demo --features tracing

use faultline::future::{flat_map_concurrent, OutcomeFutureExt};
use faultline::{hook, Outcome};

async fn fetch(id: u32) -> Outcome<String> {
    if id % 3 == 0 {
        Outcome::fail(format!("record {} is locked", id))
    } else {
        Outcome::ok(format!("record {}", id))
    }
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    hook::trace_failures();
    tracing::info!("Starting tracing demo");

    let batch = flat_map_concurrent(1..=7, 3, fetch)
        .with_context_async("syncing records")
        .await;

    match batch.into_result() {
        Ok(records) => tracing::info!("synced {} records", records.len()),
        Err(error) => tracing::error!(%error, "sync failed"),
    }
}
