//! Correlation table of in-flight operations.
//!
//! Every entry owns the sending half of a oneshot channel (the suspended
//! caller's continuation) and the abort handle of its expiry task. An
//! entry leaves the table exactly once, under the table lock, through
//! whichever of [`PendingTable::resolve_or_reject`] or
//! [`PendingTable::expire`] gets there first. The continuation is completed
//! only after removal, so a token can never be completed twice. Calls for a
//! token that is no longer present are silent no-ops.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use figbridge_core::types::{CorrelationToken, HostId};
use tokio::sync::{oneshot, Mutex};
use tokio::task::AbortHandle;
use tokio::time::Instant;

use crate::error::RelayError;

/// What a suspended caller eventually receives.
pub type Outcome = Result<serde_json::Value, RelayError>;

/// Sending half of a suspended caller's continuation.
pub type Continuation = oneshot::Sender<Outcome>;

/// Message used when a host reports failure without saying why.
pub const DEFAULT_FAILURE_MESSAGE: &str = "Operation failed";

struct PendingEntry {
    host_id: HostId,
    timeout_ms: u64,
    continuation: Continuation,
    expiry: AbortHandle,
}

/// Token -> waiting continuation, with per-token timeouts.
pub struct PendingTable {
    entries: Mutex<HashMap<CorrelationToken, PendingEntry>>,
}

impl PendingTable {
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Register a continuation for `token` and schedule its expiry once
    /// `timeout` has passed.
    ///
    /// Returns `false` (dropping `continuation`) if the token is already
    /// pending; the existing entry is left untouched.
    pub async fn register(
        self: &Arc<Self>,
        token: CorrelationToken,
        host_id: &str,
        continuation: Continuation,
        timeout: Duration,
    ) -> bool {
        let mut entries = self.entries.lock().await;
        if entries.contains_key(&token) {
            tracing::error!(%token, host_id, "Correlation token already pending");
            return false;
        }

        let timeout_ms = timeout.as_millis() as u64;
        let deadline = Instant::now() + timeout;

        // The expiry task needs the table lock to act, so it cannot observe
        // the table before this insert completes.
        let table = Arc::clone(self);
        let expiry = tokio::spawn(async move {
            tokio::time::sleep_until(deadline).await;
            table.expire(token).await;
        })
        .abort_handle();

        entries.insert(
            token,
            PendingEntry {
                host_id: host_id.to_string(),
                timeout_ms,
                continuation,
                expiry,
            },
        );
        tracing::debug!(%token, host_id, timeout_ms, "Operation registered");
        true
    }

    /// Complete the operation for `token` with a host-reported outcome.
    ///
    /// `success` selects between resolving with `data` (null if absent) and
    /// rejecting with `error` (a generic message if absent). Returns whether
    /// a waiting operation was found.
    pub async fn resolve_or_reject(
        &self,
        token: CorrelationToken,
        success: bool,
        data: Option<serde_json::Value>,
        error: Option<String>,
    ) -> bool {
        let Some(entry) = self.entries.lock().await.remove(&token) else {
            tracing::debug!(%token, success, "Stale result ignored");
            return false;
        };
        entry.expiry.abort();

        let outcome = if success {
            tracing::debug!(%token, host_id = %entry.host_id, "Operation resolved");
            Ok(data.unwrap_or(serde_json::Value::Null))
        } else {
            let message = error.unwrap_or_else(|| DEFAULT_FAILURE_MESSAGE.to_string());
            tracing::info!(%token, host_id = %entry.host_id, error = %message, "Operation rejected by host");
            Err(RelayError::RemoteExecution { message })
        };

        // The caller may have stopped waiting; that is not our concern.
        let _ = entry.continuation.send(outcome);
        true
    }

    /// Time out the operation for `token` if it is still pending.
    ///
    /// Returns whether a waiting operation was found.
    pub async fn expire(&self, token: CorrelationToken) -> bool {
        let Some(entry) = self.entries.lock().await.remove(&token) else {
            tracing::debug!(%token, "Expiry for completed operation ignored");
            return false;
        };

        tracing::warn!(
            %token,
            host_id = %entry.host_id,
            timeout_ms = entry.timeout_ms,
            "Operation timed out",
        );
        let _ = entry.continuation.send(Err(RelayError::Timeout {
            host_id: entry.host_id,
            timeout_ms: entry.timeout_ms,
        }));
        true
    }

    pub async fn is_pending(&self, token: CorrelationToken) -> bool {
        self.entries.lock().await.contains_key(&token)
    }

    /// Total number of in-flight operations.
    pub async fn len(&self) -> usize {
        self.entries.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// Number of in-flight operations targeting `host_id`.
    pub async fn count_for_host(&self, host_id: &str) -> usize {
        self.entries
            .lock()
            .await
            .values()
            .filter(|e| e.host_id == host_id)
            .count()
    }
}

impl Default for PendingTable {
    fn default() -> Self {
        Self::new()
    }
}
