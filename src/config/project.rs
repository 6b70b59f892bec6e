use std::path::{Path, PathBuf};

use tracing::debug;

/// Finds the project root by climbing from a starting directory.
///
/// The root is the nearest directory (starting directory included) that
/// contains one of the marker entries. Climbing stops before the filesystem
/// root and before the user's home directory, in which case the starting
/// directory itself is used.
#[derive(Debug, Clone)]
pub struct ProjectLocator {
    start: PathBuf,
    home: Option<PathBuf>,
}

impl ProjectLocator {
    /// Creates a locator starting at `start`, bounded by `home`.
    pub fn new(start: impl Into<PathBuf>, home: Option<PathBuf>) -> Self {
        Self {
            start: start.into(),
            home,
        }
    }

    /// Directory the search starts from.
    pub fn start(&self) -> &Path {
        &self.start
    }

    /// Home directory bounding the search, if known.
    pub fn home(&self) -> Option<&Path> {
        self.home.as_deref()
    }

    /// Climbs until a directory containing any of `markers` is found.
    pub fn locate(&self, markers: &[&str]) -> PathBuf {
        let mut directory = self.start.as_path();

        loop {
            if markers.iter().any(|marker| directory.join(marker).exists()) {
                debug!(root = %directory.display(), "Found project root");
                return directory.to_path_buf();
            }

            let Some(parent) = directory.parent() else {
                break;
            };

            let at_filesystem_root = parent.parent().is_none();
            let at_home = self.home.as_deref() == Some(parent);
            if at_filesystem_root || at_home {
                break;
            }

            directory = parent;
        }

        debug!(
            start = %self.start.display(),
            "No project markers found, using starting directory"
        );
        self.start.clone()
    }
}
