//! `figbridge-agent` -- reference design-tool host.
//!
//! Polls a relay for commands addressed to one host id and executes them
//! against a simulated canvas.
//!
//! # Environment variables
//!
//! | Variable           | Required | Default                 | Description                 |
//! |--------------------|----------|-------------------------|-----------------------------|
//! | `RELAY_URL`        | no       | `http://localhost:3456` | Relay base URL              |
//! | `HOST_ID`          | yes      | --                      | Host id (the file key)      |
//! | `POLL_INTERVAL_MS` | no       | `2000`                  | Poll period ms, 0 = default |
//! | `HOST_VERSION`     | no       | crate version           | Version sent at registration|

use figbridge_agent::client::RelayClient;
use figbridge_agent::executor::SimulatedCanvas;
use figbridge_agent::poller::{poll_interval_from, run_polling_loop};
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "figbridge_agent=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let relay_url =
        std::env::var("RELAY_URL").unwrap_or_else(|_| "http://localhost:3456".into());

    let host_id = std::env::var("HOST_ID").unwrap_or_else(|_| {
        tracing::error!("HOST_ID environment variable is required");
        std::process::exit(1);
    });

    let interval = poll_interval_from(std::env::var("POLL_INTERVAL_MS").ok().as_deref());

    let version = std::env::var("HOST_VERSION")
        .unwrap_or_else(|_| env!("CARGO_PKG_VERSION").to_string());

    tracing::info!(
        host_id = %host_id,
        relay_url = %relay_url,
        interval_ms = interval.as_millis() as u64,
        "Starting figbridge-agent",
    );

    let client = RelayClient::new(relay_url);
    let canvas = SimulatedCanvas::new();
    let cancel = CancellationToken::new();

    let stop = cancel.clone();
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                tracing::info!("Received SIGINT (Ctrl-C), stopping");
                stop.cancel();
            }
            Err(e) => tracing::error!(error = %e, "Failed to install Ctrl-C handler"),
        }
    });

    run_polling_loop(&client, &host_id, Some(&version), &canvas, interval, cancel).await;
}
