//! A package checked out as a directory under the plugin root.
use anyhow::{Context as _, Result, bail};
use std::path::{Path, PathBuf};

use super::fs::{blocking_ancestor, ensure_parent_dir, is_absent};
use super::{Removable, Resource, ResourceState};
use crate::exec::Executor;
use crate::package::PackageId;

/// Classify whatever is at `path` as a package directory.
///
/// A directory is [`ResourceState::Correct`]; a regular file (or anything
/// else) is [`ResourceState::Invalid`]; nothing at all is
/// [`ResourceState::Missing`].  Symlinks are followed.
///
/// # Errors
///
/// Returns an error if the path cannot be inspected for any reason other
/// than absence.
pub fn dir_state(path: &Path) -> Result<ResourceState> {
    match std::fs::metadata(path) {
        Ok(meta) if meta.is_dir() => Ok(ResourceState::Correct),
        Ok(_) => Ok(ResourceState::Invalid {
            reason: format!("{} exists and is not a directory", path.display()),
        }),
        Err(e) if is_absent(e.kind()) => Ok(ResourceState::Missing),
        Err(e) => Err(e).with_context(|| format!("inspect {}", path.display())),
    }
}

/// A package directory, created by a shallow `git clone`.
#[derive(Debug)]
pub struct PluginDirResource<'a> {
    /// The package being managed.
    pub package: PackageId,
    /// Where the package lives on disk.
    pub dir: PathBuf,
    /// Repository to clone from.
    pub url: String,
    /// Branch or tag to check out, if pinned.
    pub version: Option<String>,
    executor: &'a dyn Executor,
}

impl<'a> PluginDirResource<'a> {
    /// Create a resource for `package` under `plugin_root`.
    #[must_use]
    pub fn new(
        package: PackageId,
        plugin_root: &Path,
        repository_base: &str,
        version: Option<String>,
        executor: &'a dyn Executor,
    ) -> Self {
        Self {
            dir: package.install_dir(plugin_root),
            url: package.clone_url(repository_base),
            package,
            version,
            executor,
        }
    }

    fn clone_args(&self) -> Vec<String> {
        let mut args = vec!["clone".to_string(), "--depth".to_string(), "1".to_string()];
        if let Some(version) = &self.version {
            args.push("--branch".to_string());
            args.push(version.clone());
        }
        args.push(self.url.clone());
        args.push(self.dir.to_string_lossy().into_owned());
        args
    }
}

impl Resource for PluginDirResource<'_> {
    fn description(&self) -> String {
        format!("package {} at {}", self.package, self.dir.display())
    }

    fn current_state(&self) -> Result<ResourceState> {
        let state = dir_state(&self.dir)?;
        if state == ResourceState::Missing
            && let Some(blocker) = blocking_ancestor(&self.dir)
        {
            return Ok(ResourceState::Invalid {
                reason: format!("{} is not a directory", blocker.display()),
            });
        }
        Ok(state)
    }

    fn apply(&self) -> Result<()> {
        if !self.executor.which("git") {
            bail!("git is required to install packages but was not found on PATH");
        }
        ensure_parent_dir(&self.dir)?;
        let args = self.clone_args();
        let args: Vec<&str> = args.iter().map(String::as_str).collect();
        self.executor
            .run("git", &args)
            .with_context(|| format!("clone {} from {}", self.package, self.url))?;
        Ok(())
    }
}

impl Removable for PluginDirResource<'_> {
    fn remove(&self) -> Result<()> {
        std::fs::remove_dir_all(&self.dir)
            .with_context(|| format!("remove {}", self.dir.display()))
    }
}
