//! Namespaced package identifiers (`author/name`).
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::error::PackageError;

/// A validated `author/name` package identifier.
///
/// # Examples
///
/// ```
/// use nvim_adapter::package::PackageId;
///
/// let id: PackageId = "tpope/vim-fugitive".parse().unwrap();
/// assert_eq!(id.author(), "tpope");
/// assert_eq!(id.name(), "vim-fugitive");
/// assert!("vim-fugitive".parse::<PackageId>().is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PackageId {
    author: String,
    name: String,
}

impl PackageId {
    /// The namespace segment.
    #[must_use]
    pub fn author(&self) -> &str {
        &self.author
    }

    /// The package segment; also the directory name on disk.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Directory this package occupies under `plugin_root`.
    #[must_use]
    pub fn install_dir(&self, plugin_root: &Path) -> PathBuf {
        plugin_root.join(&self.name)
    }

    /// Git URL for this package under `repository_base`.
    #[must_use]
    pub fn clone_url(&self, repository_base: &str) -> String {
        format!(
            "{}/{}/{}.git",
            repository_base.trim_end_matches('/'),
            self.author,
            self.name
        )
    }
}

/// A segment may only contain characters valid in a repository name, and
/// may not be `.` or `..`.
fn valid_segment(segment: &str) -> bool {
    !segment.is_empty()
        && segment != "."
        && segment != ".."
        && segment
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
}

impl FromStr for PackageId {
    type Err = PackageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once('/') {
            Some((author, name)) if valid_segment(author) && valid_segment(name) => Ok(Self {
                author: author.to_string(),
                name: name.to_string(),
            }),
            _ => Err(PackageError::InvalidId(s.to_string())),
        }
    }
}

impl fmt::Display for PackageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.author, self.name)
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn parses_author_and_name() {
        let id: PackageId = "nvim-lua/plenary.nvim".parse().unwrap();
        assert_eq!(id.author(), "nvim-lua");
        assert_eq!(id.name(), "plenary.nvim");
        assert_eq!(id.to_string(), "nvim-lua/plenary.nvim");
    }

    #[test]
    fn rejects_malformed_ids() {
        for bad in [
            "",
            "fugitive",
            "/fugitive",
            "tpope/",
            "a/b/c",
            "tpope/..",
            "../etc",
            "tpope\\fugitive",
            "tpope/vim fugitive",
            "tpope/C:",
        ] {
            assert_eq!(
                bad.parse::<PackageId>(),
                Err(PackageError::InvalidId(bad.to_string())),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn install_dir_uses_name_only() {
        let id: PackageId = "tpope/vim-fugitive".parse().unwrap();
        assert_eq!(
            id.install_dir(Path::new("/pack/start")),
            Path::new("/pack/start/vim-fugitive")
        );
    }

    #[test]
    fn clone_url_tolerates_trailing_slash() {
        let id: PackageId = "tpope/vim-fugitive".parse().unwrap();
        assert_eq!(
            id.clone_url("https://github.com/"),
            "https://github.com/tpope/vim-fugitive.git"
        );
    }
}
