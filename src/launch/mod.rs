//! Process launching for buttons and autostart commands.

pub mod autostart;
pub mod command;
pub mod runner;
pub mod state;

pub use autostart::Autostart;
pub use runner::{LaunchEvent, LaunchRunner};
pub use state::LauncherId;

/// Polling interval for launch completion events, in milliseconds.
pub const EVENT_POLL_INTERVAL_MS: u64 = 100;
