//! `figbridge-agent` library crate.
//!
//! A reference host: registers with a relay, drains its queue on an
//! interval, executes each command and reports one result per command.
//! The binary entrypoint lives in `main.rs`.

pub mod client;
pub mod executor;
pub mod poller;
