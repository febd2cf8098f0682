//! Command: render settings into the managed config file.
use anyhow::Result;
use serde_json::Value;

use super::{Command, Context, Handler, optional_arg};
use crate::protocol::Outcome;
use crate::resources::config_file::ConfigFileResource;
use crate::resources::reconcile;
use crate::serializer::render_document;
use crate::settings::Settings;

/// Handler for `apply_config` (also reachable as `apply`).
///
/// The whole document is rendered before the file is inspected, so an
/// unsupported value aborts the command without touching disk.
#[derive(Debug, Clone, Copy, Default)]
pub struct ApplyConfig;

impl Handler for ApplyConfig {
    fn handle(&self, ctx: &Context<'_>, args: &Value) -> Result<Outcome> {
        let settings = Settings::from_arg(optional_arg(Command::ApplyConfig, args, "settings")?)?;
        tracing::debug!("rendering {} setting(s)", settings.len());
        let resource = ConfigFileResource::new(
            ctx.config.config_file.clone(),
            render_document(&settings),
        );
        let changed = reconcile(&resource, ctx.dry_run)?;
        Ok(Outcome::changed(changed))
    }
}
