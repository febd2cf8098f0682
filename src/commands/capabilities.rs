//! Command: describe this adapter.
use anyhow::Result;
use serde_json::{Value, json};

use super::{Command, Context, Handler};
use crate::protocol::Outcome;

/// Version reported by the adapter: `git describe` at build time, or the
/// crate version when built outside a repository.
#[must_use]
pub fn version() -> &'static str {
    option_env!("NVIM_ADAPTER_VERSION").unwrap_or(env!("CARGO_PKG_VERSION"))
}

/// Handler for `capabilities`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Capabilities;

impl Handler for Capabilities {
    fn handle(&self, _ctx: &Context<'_>, _args: &Value) -> Result<Outcome> {
        let commands = Command::ALL.map(Command::as_str);
        Ok(Outcome::data(json!({
            "name": env!("CARGO_PKG_NAME"),
            "version": version(),
            "commands": commands,
        })))
    }
}
