//! Command: clone a package into the plugin root.
use anyhow::Result;
use serde_json::Value;

use super::{Command, Context, Handler, optional_str, package_arg};
use crate::protocol::Outcome;
use crate::resources::plugin_dir::PluginDirResource;
use crate::resources::reconcile;

/// Handler for `install`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Install;

impl Handler for Install {
    fn handle(&self, ctx: &Context<'_>, args: &Value) -> Result<Outcome> {
        let package = package_arg(Command::Install, args)?;
        let version = optional_str(Command::Install, args, "version")?.map(str::to_string);
        let resource = PluginDirResource::new(
            package,
            &ctx.config.plugin_root,
            &ctx.config.repository_base,
            version,
            ctx.executor,
        );
        let changed = reconcile(&resource, ctx.dry_run)?;
        Ok(Outcome::changed(changed))
    }
}
