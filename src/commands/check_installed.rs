//! Command: report whether a package is present under the plugin root.
use anyhow::Result;
use serde_json::{Value, json};

use super::{Command, Context, Handler, package_arg};
use crate::protocol::Outcome;
use crate::resources::ResourceState;
use crate::resources::plugin_dir::dir_state;

/// Handler for `check_installed`.
#[derive(Debug, Clone, Copy, Default)]
pub struct CheckInstalled;

impl Handler for CheckInstalled {
    fn handle(&self, ctx: &Context<'_>, args: &Value) -> Result<Outcome> {
        let package = package_arg(Command::CheckInstalled, args)?;
        let dir = package.install_dir(&ctx.config.plugin_root);
        let installed = match dir_state(&dir)? {
            ResourceState::Correct => true,
            ResourceState::Missing
            | ResourceState::Incorrect { .. }
            | ResourceState::Invalid { .. } => false,
        };
        tracing::debug!("{package}: installed={installed} ({})", dir.display());
        Ok(Outcome::data(json!(installed)))
    }
}
