//! Register-then-poll loop.
//!
//! Registers once, then on every tick drains the host's queue, executes
//! the commands in order and posts one result per command. Relay failures
//! are logged and the loop carries on with the next tick.

use std::time::Duration;

use figbridge_core::protocol::{Command, ResultReport};
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

use crate::client::RelayClient;
use crate::executor::CommandExecutor;

/// Default interval between polls.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(2000);

/// Interval from a `POLL_INTERVAL_MS` value. Missing, unparsable and zero
/// values fall back to [`DEFAULT_POLL_INTERVAL`].
pub fn poll_interval_from(raw: Option<&str>) -> Duration {
    raw.and_then(|v| v.trim().parse::<u64>().ok())
        .filter(|ms| *ms > 0)
        .map(Duration::from_millis)
        .unwrap_or(DEFAULT_POLL_INTERVAL)
}

/// Run the polling loop for `host_id` until `cancel` is triggered.
pub async fn run_polling_loop(
    client: &RelayClient,
    host_id: &str,
    version: Option<&str>,
    executor: &dyn CommandExecutor,
    interval: Duration,
    cancel: CancellationToken,
) {
    match client.register(host_id, version).await {
        Ok(registered) => {
            tracing::info!(host_id, relay_url = %registered.relay_url, "Registered with relay");
        }
        Err(e) => {
            // Registration is informational; polling works without it.
            tracing::warn!(host_id, error = %e, "Registration failed, polling anyway");
        }
    }

    // A zero period would panic in `tokio::time::interval`.
    let interval = if interval.is_zero() {
        tracing::warn!(host_id, "Zero poll interval, using default");
        DEFAULT_POLL_INTERVAL
    } else {
        interval
    };
    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::info!(host_id, "Polling loop stopping");
                break;
            }
            _ = ticker.tick() => {
                poll_once(client, host_id, executor).await;
            }
        }
    }
}

/// One drain-execute-report cycle. Returns how many commands were handled.
pub async fn poll_once(
    client: &RelayClient,
    host_id: &str,
    executor: &dyn CommandExecutor,
) -> usize {
    let commands = match client.poll(host_id).await {
        Ok(commands) => commands,
        Err(e) => {
            tracing::error!(host_id, error = %e, "Poll failed");
            return 0;
        }
    };

    if !commands.is_empty() {
        tracing::info!(host_id, count = commands.len(), "Received commands");
    }

    let count = commands.len();
    for command in commands {
        let report = execute(executor, &command).await;
        if let Err(e) = client.post_result(&report).await {
            // The relay times the operation out on its own.
            tracing::error!(token = %command.token, error = %e, "Failed to post result");
        }
    }
    count
}

async fn execute(executor: &dyn CommandExecutor, command: &Command) -> ResultReport {
    match executor.execute(command).await {
        Ok(data) => {
            tracing::debug!(token = %command.token, action = %command.action, "Command executed");
            ResultReport::success(command.token, data)
        }
        Err(e) => {
            tracing::warn!(token = %command.token, action = %command.action, error = %e, "Command failed");
            ResultReport::failure(command.token, e.0)
        }
    }
}
