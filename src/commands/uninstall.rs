//! Command: remove a package directory.
use anyhow::Result;
use serde_json::Value;

use super::{Command, Context, Handler, package_arg};
use crate::protocol::Outcome;
use crate::resources::plugin_dir::PluginDirResource;
use crate::resources::reconcile_removal;

/// Handler for `uninstall`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Uninstall;

impl Handler for Uninstall {
    fn handle(&self, ctx: &Context<'_>, args: &Value) -> Result<Outcome> {
        let package = package_arg(Command::Uninstall, args)?;
        let resource = PluginDirResource::new(
            package,
            &ctx.config.plugin_root,
            &ctx.config.repository_base,
            None,
            ctx.executor,
        );
        let changed = reconcile_removal(&resource, ctx.dry_run)?;
        Ok(Outcome::changed(changed))
    }
}
