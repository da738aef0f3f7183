//! Per-host command mailboxes.
//!
//! Each host gets its own `Mutex<Vec<Command>>` slot, so appends and drains
//! for one host never wait on another host's lock. The outer map lock is
//! only held long enough to find or create a slot. Slots are never removed,
//! which keeps a concurrent enqueue from writing into a slot that a drain
//! has just discarded.

use std::collections::HashMap;
use std::sync::Arc;

use figbridge_core::protocol::Command;
use figbridge_core::types::HostId;
use tokio::sync::{Mutex, RwLock};

type Slot = Arc<Mutex<Vec<Command>>>;

/// FIFO mailboxes keyed by host identity.
pub struct HostQueues {
    slots: RwLock<HashMap<HostId, Slot>>,
}

impl HostQueues {
    pub fn new() -> Self {
        Self {
            slots: RwLock::new(HashMap::new()),
        }
    }

    /// Append a command to the tail of the host's queue, creating the
    /// queue on first use.
    pub async fn enqueue(&self, host_id: &str, command: Command) {
        let slot = self.slot_or_create(host_id).await;
        let mut commands = slot.lock().await;
        commands.push(command);
        tracing::debug!(host_id, depth = commands.len(), "Command enqueued");
    }

    /// Remove and return every queued command for the host, oldest first.
    ///
    /// Unknown hosts and empty queues both yield an empty vector.
    pub async fn drain(&self, host_id: &str) -> Vec<Command> {
        let Some(slot) = self.slot(host_id).await else {
            return Vec::new();
        };
        let drained = std::mem::take(&mut *slot.lock().await);
        if !drained.is_empty() {
            tracing::debug!(host_id, count = drained.len(), "Queue drained");
        }
        drained
    }

    /// Number of commands currently waiting for the host.
    pub async fn depth(&self, host_id: &str) -> usize {
        match self.slot(host_id).await {
            Some(slot) => slot.lock().await.len(),
            None => 0,
        }
    }

    /// Hosts that have had at least one command queued.
    pub async fn hosts(&self) -> Vec<HostId> {
        self.slots.read().await.keys().cloned().collect()
    }

    // ---- private helpers ----

    async fn slot(&self, host_id: &str) -> Option<Slot> {
        self.slots.read().await.get(host_id).cloned()
    }

    async fn slot_or_create(&self, host_id: &str) -> Slot {
        if let Some(slot) = self.slot(host_id).await {
            return slot;
        }
        let mut slots = self.slots.write().await;
        Arc::clone(
            slots
                .entry(host_id.to_string())
                .or_insert_with(|| Arc::new(Mutex::new(Vec::new()))),
        )
    }
}

impl Default for HostQueues {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use figbridge_core::protocol::CommandAction;
    use figbridge_core::types::CorrelationToken;
    use serde_json::json;

    use super::*;

    fn command(n: u32) -> Command {
        Command::new(
            CorrelationToken::generate(),
            CommandAction::CreateFrame,
            json!({ "n": n }),
        )
    }

    #[tokio::test]
    async fn drain_returns_commands_in_enqueue_order() {
        let queues = HostQueues::new();
        let sent: Vec<_> = (0..5).map(command).collect();
        for cmd in &sent {
            queues.enqueue("file", cmd.clone()).await;
        }

        let drained = queues.drain("file").await;
        assert_eq!(drained, sent);
    }

    #[tokio::test]
    async fn second_drain_is_empty() {
        let queues = HostQueues::new();
        queues.enqueue("file", command(1)).await;

        assert_eq!(queues.drain("file").await.len(), 1);
        assert!(queues.drain("file").await.is_empty());
    }

    #[tokio::test]
    async fn unknown_host_drains_empty() {
        let queues = HostQueues::new();
        assert!(queues.drain("never-seen").await.is_empty());
        assert_eq!(queues.depth("never-seen").await, 0);
    }

    #[tokio::test]
    async fn hosts_are_isolated() {
        let queues = HostQueues::new();
        queues.enqueue("a", command(1)).await;
        queues.enqueue("b", command(2)).await;
        queues.enqueue("a", command(3)).await;

        let a = queues.drain("a").await;
        assert_eq!(a.len(), 2);
        assert_eq!(a[0].payload["n"], 1);
        assert_eq!(a[1].payload["n"], 3);
        assert_eq!(queues.depth("b").await, 1);

        let mut hosts = queues.hosts().await;
        hosts.sort();
        assert_eq!(hosts, vec!["a".to_string(), "b".to_string()]);
    }

    #[tokio::test]
    async fn enqueue_after_drain_starts_fresh() {
        let queues = HostQueues::new();
        queues.enqueue("file", command(1)).await;
        queues.drain("file").await;
        queues.enqueue("file", command(2)).await;

        let drained = queues.drain("file").await;
        assert_eq!(drained.len(), 1);
        assert_eq!(drained[0].payload["n"], 2);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_enqueue_and_drain_lose_nothing() {
        let queues = Arc::new(HostQueues::new());
        let mut producers = Vec::new();
        for p in 0..4u32 {
            let queues = Arc::clone(&queues);
            producers.push(tokio::spawn(async move {
                for i in 0..100 {
                    queues.enqueue("file", command(p * 1000 + i)).await;
                }
            }));
        }

        let drainer = {
            let queues = Arc::clone(&queues);
            tokio::spawn(async move {
                let mut seen = Vec::new();
                for _ in 0..50 {
                    seen.extend(queues.drain("file").await);
                    tokio::task::yield_now().await;
                }
                seen
            })
        };

        for p in producers {
            p.await.unwrap();
        }
        let mut seen = drainer.await.unwrap();
        seen.extend(queues.drain("file").await);

        assert_eq!(seen.len(), 400);
        // Per-producer order is preserved.
        for p in 0..4u32 {
            let ns: Vec<u64> = seen
                .iter()
                .map(|c| c.payload["n"].as_u64().unwrap())
                .filter(|n| *n / 1000 == u64::from(p))
                .collect();
            let mut sorted = ns.clone();
            sorted.sort();
            assert_eq!(ns, sorted);
        }
    }
}
