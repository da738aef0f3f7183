//! Command relay and pending-operation correlation engine.
//!
//! Hosts (design-tool plugins) cannot be called directly: they poll for
//! queued commands and report results out of band. [`Relay`] turns that
//! into an awaitable call:
//!
//! - [`queue::HostQueues`] -- per-host FIFO mailboxes drained destructively
//!   by polling hosts.
//! - [`pending::PendingTable`] -- correlation token -> suspended caller, with
//!   a deadline-bound expiry task per token.
//! - [`hosts::HostRegistry`] -- informational registration and last-poll
//!   bookkeeping.
//! - [`Relay`] -- the facade tying them together.

pub mod error;
pub mod hosts;
pub mod pending;
pub mod queue;
pub mod relay;

pub use error::RelayError;
pub use relay::{PendingCommand, Relay};
