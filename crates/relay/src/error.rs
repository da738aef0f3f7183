use figbridge_core::types::HostId;

/// Failure outcome of a submitted command, as seen by the caller.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RelayError {
    /// No result arrived before the deadline.
    #[error(
        "Operation timed out after {timeout_ms}ms: host '{host_id}' is unreachable or not draining its queue"
    )]
    Timeout { host_id: HostId, timeout_ms: u64 },

    /// The host reported that executing the command failed.
    #[error("Remote execution failed: {message}")]
    RemoteExecution { message: String },
}
