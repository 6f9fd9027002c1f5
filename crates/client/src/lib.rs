//! Async wrapper around the `netbird` command-line client.
//!
//! The manager never talks to the NetBird daemon directly; every query and
//! action shells out to the CLI. Each call is bounded by a timeout so a hung
//! daemon cannot stall the caller.

mod cli;
mod error;
mod platform;

pub use cli::{DEFAULT_BINARY, DEFAULT_TIMEOUT, NetbirdCli};
pub use error::FetchError;
pub use platform::detect_os_info;
