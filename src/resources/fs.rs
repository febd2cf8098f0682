//! File-system resource helpers.
use anyhow::{Context as _, Result};
use std::io::ErrorKind;
use std::path::Path;

/// Ensure the parent directory of `path` exists, creating it (and any
/// ancestors) if necessary.
///
/// # Errors
///
/// Returns an error if the directory cannot be created.
pub fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create parent: {}", parent.display()))?;
    }
    Ok(())
}

/// Read `path`, mapping absence to `None`.
///
/// A path whose parent is a regular file counts as absent.
///
/// # Errors
///
/// Returns an error for any failure other than absence.
pub fn read_if_exists(path: &Path) -> Result<Option<Vec<u8>>> {
    match std::fs::read(path) {
        Ok(bytes) => Ok(Some(bytes)),
        Err(e) if is_absent(e.kind()) => Ok(None),
        Err(e) => Err(e).with_context(|| format!("read {}", path.display())),
    }
}

/// The nearest existing ancestor of `path`, if it is not a directory.
///
/// Nothing can be created below such an ancestor, so a resource beneath it
/// can never be applied.
#[must_use]
pub fn blocking_ancestor(path: &Path) -> Option<&Path> {
    path.ancestors()
        .skip(1)
        .find_map(|ancestor| std::fs::metadata(ancestor).ok().map(|meta| (ancestor, meta)))
        .and_then(|(ancestor, meta)| (!meta.is_dir()).then_some(ancestor))
}

/// Whether an I/O error kind means "nothing is there".
#[must_use]
pub fn is_absent(kind: ErrorKind) -> bool {
    matches!(kind, ErrorKind::NotFound | ErrorKind::NotADirectory)
}
