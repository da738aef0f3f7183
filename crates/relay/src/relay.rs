//! The relay facade: queue a command for a host and await its result.

use std::collections::BTreeSet;
use std::sync::Arc;
use std::time::Duration;

use figbridge_core::protocol::{Command, CommandAction, ResultAck, ResultReport};
use figbridge_core::types::{CorrelationToken, HostId, Timestamp};
use serde::Serialize;
use tokio::sync::oneshot;

use crate::error::RelayError;
use crate::hosts::HostRegistry;
use crate::pending::{Outcome, PendingTable};
use crate::queue::HostQueues;

/// Default time a caller waits for a host to report back.
pub const DEFAULT_COMMAND_TIMEOUT: Duration = Duration::from_secs(30);

/// Owns all mutable relay state. Share it behind an `Arc`.
pub struct Relay {
    queues: HostQueues,
    pending: Arc<PendingTable>,
    hosts: HostRegistry,
    default_timeout: Duration,
}

/// A command that has been queued and whose result has not been awaited
/// yet.
///
/// Dropping it abandons the wait; the pending entry is still reaped when
/// its deadline passes.
#[derive(Debug)]
pub struct PendingCommand {
    token: CorrelationToken,
    host_id: HostId,
    timeout: Duration,
    receiver: oneshot::Receiver<Outcome>,
}

impl PendingCommand {
    pub fn token(&self) -> CorrelationToken {
        self.token
    }

    pub fn host_id(&self) -> &str {
        &self.host_id
    }

    /// Suspend until the host reports back or the deadline passes.
    pub async fn wait(self) -> Result<serde_json::Value, RelayError> {
        match self.receiver.await {
            Ok(outcome) => outcome,
            // The continuation is only dropped unsent if the table itself
            // went away, in which case no result can ever arrive.
            Err(_) => Err(RelayError::Timeout {
                host_id: self.host_id,
                timeout_ms: self.timeout.as_millis() as u64,
            }),
        }
    }
}

/// Per-host view combining registration, queue and pending state.
#[derive(Debug, Clone, Serialize)]
pub struct HostSummary {
    pub host_id: HostId,
    pub version: Option<String>,
    pub registered_at: Option<Timestamp>,
    pub last_poll_at: Option<Timestamp>,
    pub queued_commands: usize,
    pub pending_operations: usize,
}

impl Relay {
    pub fn new(default_timeout: Duration) -> Self {
        Self {
            queues: HostQueues::new(),
            pending: Arc::new(PendingTable::new()),
            hosts: HostRegistry::new(),
            default_timeout,
        }
    }

    pub fn default_timeout(&self) -> Duration {
        self.default_timeout
    }

    // -----------------------------------------------------------------------
    // Caller side
    // -----------------------------------------------------------------------

    /// Queue a command for `host_id` and return a handle to await its
    /// result.
    ///
    /// The continuation is registered before the command becomes visible to
    /// a drain, so a host cannot report on a token the table has not seen.
    pub async fn dispatch(
        &self,
        host_id: &str,
        action: CommandAction,
        payload: serde_json::Value,
        timeout: Duration,
    ) -> PendingCommand {
        let (token, receiver) = loop {
            let token = CorrelationToken::generate();
            let (tx, rx) = oneshot::channel();
            if self.pending.register(token, host_id, tx, timeout).await {
                break (token, rx);
            }
        };

        self.queues
            .enqueue(host_id, Command::new(token, action, payload))
            .await;

        tracing::info!(
            host_id,
            %token,
            %action,
            timeout_ms = timeout.as_millis() as u64,
            "Command queued for host",
        );

        PendingCommand {
            token,
            host_id: host_id.to_string(),
            timeout,
            receiver,
        }
    }

    /// Queue a command and wait for its result.
    ///
    /// Resolves with the data the host reported, or fails with
    /// [`RelayError::RemoteExecution`] if the host reported failure, or
    /// [`RelayError::Timeout`] if nothing arrived within `timeout`.
    pub async fn submit(
        &self,
        host_id: &str,
        action: CommandAction,
        payload: serde_json::Value,
        timeout: Duration,
    ) -> Result<serde_json::Value, RelayError> {
        self.dispatch(host_id, action, payload, timeout)
            .await
            .wait()
            .await
    }

    /// [`submit`](Self::submit) with the relay's default timeout.
    pub async fn submit_with_default_timeout(
        &self,
        host_id: &str,
        action: CommandAction,
        payload: serde_json::Value,
    ) -> Result<serde_json::Value, RelayError> {
        self.submit(host_id, action, payload, self.default_timeout)
            .await
    }

    // -----------------------------------------------------------------------
    // Host side
    // -----------------------------------------------------------------------

    /// Record a host registration. Informational only.
    pub async fn register_host(&self, host_id: &str, version: Option<String>) {
        tracing::info!(host_id, version = ?version, "Host registered");
        self.hosts.register(host_id, version).await;
    }

    /// Destructively drain the host's queue.
    pub async fn poll_commands(&self, host_id: &str) -> Vec<Command> {
        self.hosts.touch_poll(host_id).await;
        self.queues.drain(host_id).await
    }

    /// Route a host-reported result to its waiting caller.
    ///
    /// Always acknowledges, including for unknown, expired, duplicate or
    /// malformed tokens.
    pub async fn post_result(&self, report: ResultReport) -> ResultAck {
        match report.token() {
            Some(token) => {
                self.pending
                    .resolve_or_reject(token, report.success, report.data, report.error)
                    .await;
            }
            None => {
                tracing::debug!(operation_id = %report.operation_id, "Result with malformed token ignored");
            }
        }
        ResultAck { received: true }
    }

    // -----------------------------------------------------------------------
    // Diagnostics
    // -----------------------------------------------------------------------

    pub async fn pending_count(&self) -> usize {
        self.pending.len().await
    }

    pub async fn is_pending(&self, token: CorrelationToken) -> bool {
        self.pending.is_pending(token).await
    }

    pub async fn queue_depth(&self, host_id: &str) -> usize {
        self.queues.depth(host_id).await
    }

    /// Every host that has registered, polled, or had a command queued.
    pub async fn host_summaries(&self) -> Vec<HostSummary> {
        let records = self.hosts.list().await;
        let mut ids: BTreeSet<HostId> = records.iter().map(|r| r.host_id.clone()).collect();
        ids.extend(self.queues.hosts().await);

        let mut summaries = Vec::with_capacity(ids.len());
        for host_id in ids {
            let record = records.iter().find(|r| r.host_id == host_id);
            summaries.push(HostSummary {
                version: record.and_then(|r| r.version.clone()),
                registered_at: record.and_then(|r| r.registered_at),
                last_poll_at: record.and_then(|r| r.last_poll_at),
                queued_commands: self.queues.depth(&host_id).await,
                pending_operations: self.pending.count_for_host(&host_id).await,
                host_id,
            });
        }
        summaries
    }
}

impl Default for Relay {
    fn default() -> Self {
        Self::new(DEFAULT_COMMAND_TIMEOUT)
    }
}
