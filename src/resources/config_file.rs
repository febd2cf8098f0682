//! The managed Neovim config file.
use anyhow::{Context as _, Result};
use std::path::PathBuf;

use super::fs::{blocking_ancestor, ensure_parent_dir, read_if_exists};
use super::{Resource, ResourceState};

/// A file whose whole content is owned by the adapter.
#[derive(Debug, Clone)]
pub struct ConfigFileResource {
    /// Destination path.
    pub path: PathBuf,
    /// Exact desired content.
    pub content: String,
}

impl ConfigFileResource {
    /// Create a new config file resource.
    #[must_use]
    pub const fn new(path: PathBuf, content: String) -> Self {
        Self { path, content }
    }
}

impl Resource for ConfigFileResource {
    fn description(&self) -> String {
        format!("config {}", self.path.display())
    }

    fn current_state(&self) -> Result<ResourceState> {
        if let Some(blocker) = blocking_ancestor(&self.path) {
            return Ok(ResourceState::Invalid {
                reason: format!("{} is not a directory", blocker.display()),
            });
        }
        Ok(match read_if_exists(&self.path)? {
            None => ResourceState::Missing,
            Some(bytes) if bytes == self.content.as_bytes() => ResourceState::Correct,
            Some(bytes) => ResourceState::Incorrect {
                current: format!("{} bytes", bytes.len()),
            },
        })
    }

    fn apply(&self) -> Result<()> {
        ensure_parent_dir(&self.path)?;
        std::fs::write(&self.path, &self.content)
            .with_context(|| format!("write {}", self.path.display()))
    }
}
