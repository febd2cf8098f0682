//! Logging to standard error via [`tracing`].
//!
//! Standard output carries the protocol response and nothing else, so every
//! log line is written to standard error.

mod subscriber;

pub use subscriber::init_subscriber;

/// Target for events describing what a dry run would have changed.
pub const DRY_RUN_TARGET: &str = "nvim_adapter::dry_run";

/// Environment variable holding [`tracing_subscriber::EnvFilter`] directives.
pub const LOG_ENV: &str = "NVIM_ADAPTER_LOG";

/// Prefix of every log line.
const PREFIX: &str = "[nvim-adapter]";
