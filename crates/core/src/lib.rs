//! Shared types for the figbridge relay.
//!
//! Holds the wire protocol spoken between the relay and design-tool
//! hosts, the correlation token type, and the pure colour/layout helpers
//! used by both the tool layer and the reference host agent. Has no
//! internal dependencies.

pub mod color;
pub mod error;
pub mod layout;
pub mod protocol;
pub mod types;
