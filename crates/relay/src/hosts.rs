//! Informational record of hosts that have talked to the relay.
//!
//! Nothing here gates submission: commands may be queued for a host the
//! relay has never heard from.

use std::collections::HashMap;

use chrono::Utc;
use figbridge_core::types::{HostId, Timestamp};
use serde::Serialize;
use tokio::sync::RwLock;

/// What the relay knows about one host.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HostRecord {
    pub host_id: HostId,
    /// Version string sent at registration, if any.
    pub version: Option<String>,
    pub registered_at: Option<Timestamp>,
    pub last_poll_at: Option<Timestamp>,
}

impl HostRecord {
    fn new(host_id: &str) -> Self {
        Self {
            host_id: host_id.to_string(),
            version: None,
            registered_at: None,
            last_poll_at: None,
        }
    }
}

pub struct HostRegistry {
    hosts: RwLock<HashMap<HostId, HostRecord>>,
}

impl HostRegistry {
    pub fn new() -> Self {
        Self {
            hosts: RwLock::new(HashMap::new()),
        }
    }

    /// Record a registration. Re-registering overwrites the version and
    /// registration time.
    pub async fn register(&self, host_id: &str, version: Option<String>) {
        let mut hosts = self.hosts.write().await;
        let record = hosts
            .entry(host_id.to_string())
            .or_insert_with(|| HostRecord::new(host_id));
        record.version = version;
        record.registered_at = Some(Utc::now());
    }

    /// Note that the host just polled its queue.
    ///
    /// Only hosts that registered are tracked; polls for any other id leave
    /// the registry untouched. Returns whether a record was updated.
    pub async fn touch_poll(&self, host_id: &str) -> bool {
        let mut hosts = self.hosts.write().await;
        match hosts.get_mut(host_id) {
            Some(record) => {
                record.last_poll_at = Some(Utc::now());
                true
            }
            None => false,
        }
    }

    pub async fn get(&self, host_id: &str) -> Option<HostRecord> {
        self.hosts.read().await.get(host_id).cloned()
    }

    /// All known hosts, sorted by id.
    pub async fn list(&self) -> Vec<HostRecord> {
        let mut records: Vec<_> = self.hosts.read().await.values().cloned().collect();
        records.sort_by(|a, b| a.host_id.cmp(&b.host_id));
        records
    }
}

impl Default for HostRegistry {
    fn default() -> Self {
        Self::new()
    }
}
