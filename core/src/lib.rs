//! Core library: configuration, wire protocol, the recommendation fetcher,
//! field persistence and the request-cycle state machine shared by the CLI
//! and TUI front ends.

pub mod client;
pub mod config;
pub mod error;
pub mod protocol;
pub mod request;
pub mod store;
