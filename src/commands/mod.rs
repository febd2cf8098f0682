//! Command routing: a closed set of commands, each served by a [`Handler`].
pub mod apply_config;
pub mod capabilities;
pub mod check_installed;
pub mod install;
pub mod uninstall;

use anyhow::Result;
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use crate::config::AdapterConfig;
use crate::error::ProtocolError;
use crate::exec::Executor;
use crate::package::PackageId;
use crate::protocol::{Outcome, Request, Response, recover_request_id};

/// Every command the adapter understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    /// Report whether a package directory exists.
    CheckInstalled,
    /// Render settings into the managed config file.
    ApplyConfig,
    /// Clone a package into the plugin root.
    Install,
    /// Remove a package directory.
    Uninstall,
    /// Describe this adapter.
    Capabilities,
}

impl Command {
    /// All commands, in the order they are advertised.
    pub const ALL: [Self; 5] = [
        Self::CheckInstalled,
        Self::ApplyConfig,
        Self::Install,
        Self::Uninstall,
        Self::Capabilities,
    ];

    /// Canonical wire name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::CheckInstalled => "check_installed",
            Self::ApplyConfig => "apply_config",
            Self::Install => "install",
            Self::Uninstall => "uninstall",
            Self::Capabilities => "capabilities",
        }
    }
}

impl FromStr for Command {
    type Err = ProtocolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "check_installed" => Ok(Self::CheckInstalled),
            "apply_config" | "apply" => Ok(Self::ApplyConfig),
            "install" => Ok(Self::Install),
            "uninstall" => Ok(Self::Uninstall),
            "capabilities" => Ok(Self::Capabilities),
            other => Err(ProtocolError::UnknownCommand(other.to_string())),
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Everything a handler may use while serving one request.
#[derive(Debug, Clone, Copy)]
pub struct Context<'a> {
    /// Resolved adapter configuration.
    pub config: &'a AdapterConfig,
    /// Runner for external programs.
    pub executor: &'a dyn Executor,
    /// Effective dry-run flag (request context OR command line).
    pub dry_run: bool,
}

/// A command implementation.
pub trait Handler: Send + Sync {
    /// Serve one request.
    ///
    /// # Errors
    ///
    /// Returns an error if the arguments are invalid or the command fails.
    fn handle(&self, ctx: &Context<'_>, args: &Value) -> Result<Outcome>;
}

/// The handler registered for `command`.
#[must_use]
pub fn handler(command: Command) -> &'static dyn Handler {
    match command {
        Command::CheckInstalled => &check_installed::CheckInstalled,
        Command::ApplyConfig => &apply_config::ApplyConfig,
        Command::Install => &install::Install,
        Command::Uninstall => &uninstall::Uninstall,
        Command::Capabilities => &capabilities::Capabilities,
    }
}

/// Routes decoded requests to handlers and wraps the result in a
/// [`Response`].
pub struct Dispatcher {
    config: AdapterConfig,
    executor: Arc<dyn Executor>,
    force_dry_run: bool,
}

impl fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dispatcher")
            .field("config", &self.config)
            .field("executor", &"<dyn Executor>")
            .field("force_dry_run", &self.force_dry_run)
            .finish()
    }
}

impl Dispatcher {
    /// Create a dispatcher over a resolved configuration.
    #[must_use]
    pub const fn new(config: AdapterConfig, executor: Arc<dyn Executor>) -> Self {
        Self {
            config,
            executor,
            force_dry_run: false,
        }
    }

    /// Force dry-run for every request, whatever its context says.
    #[must_use]
    pub const fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.force_dry_run = dry_run;
        self
    }

    /// The configuration handlers run against.
    #[must_use]
    pub const fn config(&self) -> &AdapterConfig {
        &self.config
    }

    /// Decode raw request bytes and dispatch them.
    ///
    /// Bytes that are not UTF-8 yield a failure response with no
    /// `requestId`.
    #[must_use]
    pub fn handle_bytes(&self, raw: &[u8]) -> Response {
        match std::str::from_utf8(raw) {
            Ok(text) => self.handle_raw(text),
            Err(err) => {
                let err = anyhow::Error::new(ProtocolError::from(err));
                tracing::error!("{err:#}");
                Response::failure(None, &err)
            }
        }
    }

    /// Decode raw request text and dispatch it.
    ///
    /// Always yields a response; a request that cannot be decoded still has
    /// its `requestId` echoed when one can be recovered.
    #[must_use]
    pub fn handle_raw(&self, raw: &str) -> Response {
        match Request::decode(raw) {
            Ok(request) => self.dispatch(&request),
            Err(err) => {
                let err = anyhow::Error::new(err);
                tracing::error!("{err:#}");
                Response::failure(recover_request_id(raw), &err)
            }
        }
    }

    /// Run a decoded request through its handler.
    #[must_use]
    pub fn dispatch(&self, request: &Request) -> Response {
        let result = request
            .command
            .parse::<Command>()
            .map_err(anyhow::Error::from)
            .and_then(|command| {
                let ctx = Context {
                    config: &self.config,
                    executor: self.executor.as_ref(),
                    dry_run: self.force_dry_run || request.context().dry_run,
                };
                tracing::debug!("dispatching {command} (dry_run={})", ctx.dry_run);
                handler(command).handle(&ctx, &request.args)
            });
        if let Err(err) = &result {
            tracing::error!("{}: {err:#}", request.command);
        }
        Response::from_result(request.request_id.clone(), result)
    }
}

/// View `args` as an object; `null` counts as empty.
fn args_object(
    command: Command,
    args: &Value,
) -> Result<Option<&Map<String, Value>>, ProtocolError> {
    match args {
        Value::Null => Ok(None),
        Value::Object(map) => Ok(Some(map)),
        _ => Err(ProtocolError::InvalidArgs {
            command: command.as_str(),
            reason: "args must be an object".to_string(),
        }),
    }
}

/// Look up an argument, treating `null` as absent.
fn optional_arg<'a>(
    command: Command,
    args: &'a Value,
    key: &str,
) -> Result<Option<&'a Value>, ProtocolError> {
    Ok(args_object(command, args)?
        .and_then(|map| map.get(key))
        .filter(|v| !v.is_null()))
}

/// Look up an optional string argument.
fn optional_str<'a>(
    command: Command,
    args: &'a Value,
    key: &str,
) -> Result<Option<&'a str>, ProtocolError> {
    optional_arg(command, args, key)?
        .map(|v| {
            v.as_str().ok_or_else(|| ProtocolError::InvalidArgs {
                command: command.as_str(),
                reason: format!("'{key}' must be a string"),
            })
        })
        .transpose()
}

/// The required `packageId` argument, parsed.
fn package_arg(command: Command, args: &Value) -> Result<PackageId> {
    let raw =
        optional_str(command, args, "packageId")?.ok_or_else(|| ProtocolError::InvalidArgs {
            command: command.as_str(),
            reason: "missing 'packageId'".to_string(),
        })?;
    Ok(raw.parse()?)
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::resources::test_helpers::MockExecutor;
    use serde_json::json;

    fn dispatcher(dir: &std::path::Path) -> Dispatcher {
        let config = AdapterConfig::new(&dir.join("nvim"), &dir.join("start"));
        Dispatcher::new(config, Arc::new(MockExecutor::ok()))
    }

    #[test]
    fn parses_every_canonical_name() {
        for command in Command::ALL {
            assert_eq!(command.as_str().parse::<Command>().unwrap(), command);
            assert_eq!(command.to_string(), command.as_str());
        }
    }

    #[test]
    fn apply_is_an_alias() {
        assert_eq!("apply".parse::<Command>().unwrap(), Command::ApplyConfig);
    }

    #[test]
    fn unknown_command_names_the_command() {
        let err = "frobnicate".parse::<Command>().unwrap_err();
        assert_eq!(err.to_string(), "unknown command: frobnicate");
    }

    #[test]
    fn command_names_are_case_sensitive() {
        assert!("Install".parse::<Command>().is_err());
    }

    #[test]
    fn optional_str_rejects_non_strings() {
        let err = optional_str(Command::Install, &json!({"version": 3}), "version").unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid arguments for 'install': 'version' must be a string"
        );
    }

    #[test]
    fn optional_arg_treats_null_as_absent() {
        let args = json!({"version": null});
        assert_eq!(optional_arg(Command::Install, &args, "version").unwrap(), None);
        assert_eq!(optional_arg(Command::Install, &Value::Null, "version").unwrap(), None);
    }

    #[test]
    fn non_object_args_are_rejected() {
        let err = package_arg(Command::Uninstall, &json!(["tpope/vim-fugitive"])).unwrap_err();
        assert!(err.to_string().contains("args must be an object"), "{err}");
    }

    #[test]
    fn package_arg_missing() {
        let err = package_arg(Command::CheckInstalled, &json!({})).unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid arguments for 'check_installed': missing 'packageId'"
        );
    }

    #[test]
    fn package_arg_malformed() {
        let err = package_arg(Command::CheckInstalled, &json!({"packageId": "nope"})).unwrap_err();
        assert!(err.to_string().contains("invalid package id 'nope'"), "{err}");
    }

    #[test]
    fn dispatch_unknown_command_echoes_request_id() {
        let dir = tempfile::tempdir().unwrap();
        let response = dispatcher(dir.path())
            .handle_raw(r#"{"command":"frobnicate","requestId":"r-9"}"#);
        assert!(!response.success);
        assert_eq!(response.request_id.as_deref(), Some("r-9"));
        assert!(response.error.unwrap().contains("frobnicate"));
    }

    #[test]
    fn malformed_request_recovers_request_id() {
        let dir = tempfile::tempdir().unwrap();
        let response = dispatcher(dir.path()).handle_raw(r#"{"requestId":"r-1","args":{}}"#);
        assert!(!response.success);
        assert_eq!(response.request_id.as_deref(), Some("r-1"));
    }

    #[test]
    fn empty_input_is_a_failure() {
        let dir = tempfile::tempdir().unwrap();
        let response = dispatcher(dir.path()).handle_raw("   \n");
        assert!(!response.success);
        assert_eq!(response.request_id, None);
        assert!(response.error.unwrap().contains("empty request"));
    }

    #[test]
    fn non_utf8_input_is_a_failure() {
        let dir = tempfile::tempdir().unwrap();
        let response = dispatcher(dir.path()).handle_bytes(b"{\"requestId\":\"r-2\",\xff}");
        assert!(!response.success);
        assert_eq!(response.request_id, None);
        assert!(response.error.unwrap().contains("not valid UTF-8"));
    }

    #[test]
    fn utf8_bytes_are_dispatched() {
        let dir = tempfile::tempdir().unwrap();
        let response = dispatcher(dir.path())
            .handle_bytes(br#"{"command":"capabilities","requestId":"r-3"}"#);
        assert!(response.success, "{response:?}");
        assert_eq!(response.request_id.as_deref(), Some("r-3"));
    }

    #[test]
    fn forced_dry_run_overrides_context() {
        let dir = tempfile::tempdir().unwrap();
        let d = dispatcher(dir.path()).with_dry_run(true);
        let response = d.handle_raw(
            r#"{"command":"apply","args":{"settings":{"number":true}},"context":{"dryRun":false}}"#,
        );
        assert!(response.success, "{response:?}");
        assert_eq!(response.changed, Some(true));
        assert!(!d.config().config_file.exists());
    }
}
