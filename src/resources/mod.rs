//! Idempotent resource primitives (check + apply pattern).
pub mod config_file;
pub mod fs;
pub mod plugin_dir;

use anyhow::{Result, bail};

use crate::logging::DRY_RUN_TARGET;

/// State of a resource (file, package directory, ...).
///
/// # Examples
///
/// ```
/// use nvim_adapter::resources::ResourceState;
///
/// let missing = ResourceState::Missing;
/// let correct = ResourceState::Correct;
/// let wrong = ResourceState::Incorrect { current: "12 bytes".into() };
/// let blocked = ResourceState::Invalid { reason: "not a directory".into() };
///
/// assert_ne!(missing, correct);
/// assert_eq!(correct, ResourceState::Correct);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceState {
    /// Resource does not exist.
    Missing,
    /// Resource exists and matches the desired state.
    Correct,
    /// Resource exists but does not match the desired state.
    Incorrect {
        /// Short description of what is there now.
        current: String,
    },
    /// Something occupies the resource's place that cannot be managed.
    Invalid {
        /// Why the resource cannot be applied.
        reason: String,
    },
}

/// Unified interface for resources that can be checked and applied.
///
/// # Examples
///
/// ```ignore
/// // All resources follow the same check-then-apply pattern:
/// let changed = reconcile(&resource, dry_run)?;
/// ```
pub trait Resource {
    /// Human-readable description of this resource.
    fn description(&self) -> String;

    /// Check the current state of the resource.
    ///
    /// # Errors
    ///
    /// Returns an error if the state cannot be determined (I/O failure other
    /// than absence, permission denied, ...).
    fn current_state(&self) -> Result<ResourceState>;

    /// Bring the resource to its desired state, creating parent directories
    /// as needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the change cannot be made.
    fn apply(&self) -> Result<()>;
}

/// A resource that can also be taken away again.
pub trait Removable: Resource {
    /// Remove the resource, undoing a previous `apply()`.
    ///
    /// # Errors
    ///
    /// Returns an error if removal fails.
    fn remove(&self) -> Result<()>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    Apply,
    Remove,
}

impl Action {
    const fn verb(self) -> &'static str {
        match self {
            Self::Apply => "apply",
            Self::Remove => "remove",
        }
    }
}

/// Check a resource and apply it if needed.
///
/// Returns whether the resource changed; under `dry_run` it returns whether
/// it *would* change and touches nothing.
///
/// # Errors
///
/// Returns an error if the state cannot be determined, the resource is in an
/// invalid state, or applying fails.
pub fn reconcile<R: Resource + ?Sized>(resource: &R, dry_run: bool) -> Result<bool> {
    converge(resource, Action::Apply, dry_run, || resource.apply())
}

/// Check a resource and remove it if present.
///
/// Same contract as [`reconcile`], in the other direction.
///
/// # Errors
///
/// Returns an error if the state cannot be determined, the resource is in an
/// invalid state, or removal fails.
pub fn reconcile_removal<R: Removable + ?Sized>(resource: &R, dry_run: bool) -> Result<bool> {
    converge(resource, Action::Remove, dry_run, || resource.remove())
}

fn converge<R: Resource + ?Sized>(
    resource: &R,
    action: Action,
    dry_run: bool,
    change: impl FnOnce() -> Result<()>,
) -> Result<bool> {
    let desc = resource.description();
    let state = resource.current_state()?;
    tracing::debug!("{desc} state={state:?}");

    let pending = match (&state, action) {
        (ResourceState::Invalid { reason }, _) => {
            bail!("cannot {} {desc}: {reason}", action.verb())
        }
        (ResourceState::Correct, Action::Apply) | (ResourceState::Missing, Action::Remove) => false,
        (ResourceState::Missing | ResourceState::Incorrect { .. }, Action::Apply)
        | (ResourceState::Correct | ResourceState::Incorrect { .. }, Action::Remove) => true,
    };

    if !pending {
        tracing::debug!("ok: {desc}");
        return Ok(false);
    }

    if dry_run {
        match &state {
            ResourceState::Incorrect { current } => tracing::info!(
                target: DRY_RUN_TARGET,
                "would {} {desc} (currently {current})",
                action.verb()
            ),
            _ => tracing::info!(target: DRY_RUN_TARGET, "would {}: {desc}", action.verb()),
        }
        return Ok(true);
    }

    change()?;
    tracing::info!("{}: {desc}", action.verb());
    Ok(true)
}
