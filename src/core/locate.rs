use std::io;
use std::path::{Path, PathBuf};

use crate::config::settings::DEFAULT_MARKER;

pub trait MarkerProbe {
    fn has_marker(&self, dir: &Path) -> io::Result<bool>;
}

impl<P: MarkerProbe + ?Sized> MarkerProbe for &P {
    fn has_marker(&self, dir: &Path) -> io::Result<bool> {
        (**self).has_marker(dir)
    }
}

/// Looks for `<dir>/<marker>` on disk. A `.git` file (worktrees,
/// submodules) counts the same as a `.git` directory.
#[derive(Debug, Clone)]
pub struct FsMarkerProbe {
    marker: String,
}

impl FsMarkerProbe {
    pub fn new(marker: impl Into<String>) -> Self {
        Self {
            marker: marker.into(),
        }
    }
}

impl Default for FsMarkerProbe {
    fn default() -> Self {
        Self::new(DEFAULT_MARKER)
    }
}

impl MarkerProbe for FsMarkerProbe {
    fn has_marker(&self, dir: &Path) -> io::Result<bool> {
        match std::fs::metadata(dir.join(&self.marker)) {
            Ok(_) => Ok(true),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(err) => Err(err),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct RepoLocator<P> {
    probe: P,
}

impl<P: MarkerProbe> RepoLocator<P> {
    pub fn new(probe: P) -> Self {
        Self { probe }
    }

    /// Nearest directory at or above `start` that holds the marker.
    ///
    /// Probe errors count as "no marker here" and the walk moves on to the
    /// parent. A relative `start` ends its walk at `.`.
    pub fn locate(&self, start: &Path) -> Option<PathBuf> {
        let mut previous: Option<&Path> = None;
        for ancestor in start.ancestors() {
            let dir = if ancestor.as_os_str().is_empty() {
                Path::new(".")
            } else {
                ancestor
            };
            if previous == Some(dir) {
                break;
            }
            previous = Some(dir);

            match self.probe.has_marker(dir) {
                Ok(true) => {
                    log::debug!("repository marker found in {}", dir.display());
                    return Some(dir.to_path_buf());
                }
                Ok(false) => {}
                Err(err) => {
                    log::debug!("skipping {}: {err}", dir.display());
                }
            }
        }

        None
    }
}
