//! Platform detection and default Neovim locations.
use std::fmt;
use std::path::PathBuf;

use crate::error::PlatformError;

/// Detected operating system platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Os {
    /// Linux and other Unix-like systems.
    Unix,
    /// Microsoft Windows.
    Windows,
}

impl fmt::Display for Os {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unix => write!(f, "unix"),
            Self::Windows => write!(f, "windows"),
        }
    }
}

/// Environment variable lookup, injectable for tests.
pub type EnvLookup<'a> = &'a dyn Fn(&str) -> Option<String>;

/// Read a variable from the process environment, treating empty as unset.
#[must_use]
pub fn process_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.is_empty())
}

/// Platform information for the current system.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Platform {
    /// Operating system family.
    pub os: Os,
}

impl Platform {
    /// Detect the current platform.
    #[must_use]
    pub const fn detect() -> Self {
        if cfg!(target_os = "windows") {
            Self { os: Os::Windows }
        } else {
            Self { os: Os::Unix }
        }
    }

    /// Create a platform with an explicit OS.
    #[must_use]
    pub const fn new(os: Os) -> Self {
        Self { os }
    }

    /// Base directory for user configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if no candidate variable is set.
    pub fn config_home(&self, env: EnvLookup<'_>) -> Result<PathBuf, PlatformError> {
        self.base_dir(env, "XDG_CONFIG_HOME", ".config", "config home")
    }

    /// Base directory for user data.
    ///
    /// # Errors
    ///
    /// Returns an error if no candidate variable is set.
    pub fn data_home(&self, env: EnvLookup<'_>) -> Result<PathBuf, PlatformError> {
        self.base_dir(env, "XDG_DATA_HOME", ".local/share", "data home")
    }

    /// Neovim's configuration directory (`.../nvim`).
    ///
    /// # Errors
    ///
    /// Returns an error if the config home cannot be resolved.
    pub fn nvim_config_dir(&self, env: EnvLookup<'_>) -> Result<PathBuf, PlatformError> {
        Ok(self.config_home(env)?.join("nvim"))
    }

    /// Neovim's data directory (`.../nvim`, or `.../nvim-data` on Windows).
    ///
    /// # Errors
    ///
    /// Returns an error if the data home cannot be resolved.
    pub fn nvim_data_dir(&self, env: EnvLookup<'_>) -> Result<PathBuf, PlatformError> {
        let name = match self.os {
            Os::Unix => "nvim",
            Os::Windows => "nvim-data",
        };
        Ok(self.data_home(env)?.join(name))
    }

    /// Directory whose sub-directories are packages loaded at startup.
    ///
    /// # Errors
    ///
    /// Returns an error if the data home cannot be resolved.
    pub fn plugin_root(&self, env: EnvLookup<'_>) -> Result<PathBuf, PlatformError> {
        Ok(self
            .nvim_data_dir(env)?
            .join("site")
            .join("pack")
            .join("plugins")
            .join("start"))
    }

    /// Default location of the adapter's own TOML config.
    ///
    /// # Errors
    ///
    /// Returns an error if the config home cannot be resolved.
    pub fn adapter_config_file(&self, env: EnvLookup<'_>) -> Result<PathBuf, PlatformError> {
        Ok(self
            .config_home(env)?
            .join("nvim-adapter")
            .join("adapter.toml"))
    }

    fn base_dir(
        self,
        env: EnvLookup<'_>,
        xdg_var: &'static str,
        home_suffix: &str,
        what: &'static str,
    ) -> Result<PathBuf, PlatformError> {
        if let Some(dir) = env(xdg_var) {
            return Ok(PathBuf::from(dir));
        }
        match self.os {
            Os::Windows => env("LOCALAPPDATA").map(PathBuf::from).ok_or(
                PlatformError::MissingBaseDir {
                    what,
                    vars: if xdg_var == "XDG_CONFIG_HOME" {
                        "XDG_CONFIG_HOME, LOCALAPPDATA"
                    } else {
                        "XDG_DATA_HOME, LOCALAPPDATA"
                    },
                },
            ),
            Os::Unix => env("HOME")
                .map(|home| home_suffix.split('/').fold(PathBuf::from(home), |p, s| p.join(s)))
                .ok_or(PlatformError::MissingBaseDir {
                    what,
                    vars: if xdg_var == "XDG_CONFIG_HOME" {
                        "XDG_CONFIG_HOME, HOME"
                    } else {
                        "XDG_DATA_HOME, HOME"
                    },
                }),
        }
    }
}
