//! Adapter configuration: where `init.lua` lives, where packages live.
//!
//! Each field resolves independently: command-line flag, then the adapter's
//! TOML file, then the platform default.
pub mod toml_loader;

use anyhow::Result;
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::cli::GlobalOpts;
use crate::platform::{EnvLookup, Platform};

/// Default name of the managed Neovim config file.
pub const DEFAULT_INIT_FILE: &str = "init.lua";

/// Default host that `author/name` package ids are cloned from.
pub const DEFAULT_REPOSITORY_BASE: &str = "https://github.com";

/// Contents of `adapter.toml`.  Every key is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    /// Neovim configuration directory.
    pub config_dir: Option<PathBuf>,
    /// Name of the managed file inside `config_dir`.
    pub init_file: Option<String>,
    /// Directory holding one sub-directory per installed package.
    pub plugin_root: Option<PathBuf>,
    /// Base URL package ids are appended to when cloning.
    pub repository_base: Option<String>,
}

/// Fully resolved configuration, injected into every command handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdapterConfig {
    /// The managed config artifact.
    pub config_file: PathBuf,
    /// Directory holding one sub-directory per installed package.
    pub plugin_root: PathBuf,
    /// Base URL package ids are appended to when cloning.
    pub repository_base: String,
}

impl AdapterConfig {
    /// Build a configuration rooted at explicit directories.
    #[must_use]
    pub fn new(config_dir: &Path, plugin_root: &Path) -> Self {
        Self {
            config_file: config_dir.join(DEFAULT_INIT_FILE),
            plugin_root: plugin_root.to_path_buf(),
            repository_base: DEFAULT_REPOSITORY_BASE.to_string(),
        }
    }

    /// Resolve the configuration from command-line options, the adapter's
    /// TOML file and platform defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if an explicitly named config file is missing, the
    /// TOML is invalid, or a default location cannot be derived from the
    /// environment.
    pub fn resolve(opts: &GlobalOpts, platform: &Platform, env: EnvLookup<'_>) -> Result<Self> {
        let file: FileConfig = match &opts.config {
            Some(path) => toml_loader::load_config(path, true)?,
            None => {
                // Both directories on the command line: the default file is not consulted.
                if opts.config_dir.is_some() && opts.plugin_root.is_some() {
                    FileConfig::default()
                } else {
                    toml_loader::load_config(&platform.adapter_config_file(env)?, false)?
                }
            }
        };
        tracing::debug!("adapter config file: {file:?}");

        let config_dir = match opts.config_dir.clone().or(file.config_dir) {
            Some(dir) => dir,
            None => platform.nvim_config_dir(env)?,
        };
        let plugin_root = match opts.plugin_root.clone().or(file.plugin_root) {
            Some(dir) => dir,
            None => platform.plugin_root(env)?,
        };
        let init_file = file
            .init_file
            .unwrap_or_else(|| DEFAULT_INIT_FILE.to_string());
        let repository_base = file
            .repository_base
            .unwrap_or_else(|| DEFAULT_REPOSITORY_BASE.to_string())
            .trim_end_matches('/')
            .to_string();

        Ok(Self {
            config_file: config_dir.join(init_file),
            plugin_root,
            repository_base,
        })
    }
}
