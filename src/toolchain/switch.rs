//! The "current toolchain" symlink
//!
//! The link is owned by the filesystem, not by this process: it is read again
//! at the start of every operation and never cached.
//!
//! Replacing the link removes the old one before creating the new one. A reader
//! running between those two steps sees no link at all. The tool assumes it is
//! the only writer and does not guard against that window.

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::toolchain::error::ToolchainError;

/// Result of a successful switch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwitchOutcome {
    pub link: PathBuf,
    pub target: PathBuf,
    /// Target before the switch, if a link existed
    pub previous: Option<PathBuf>,
}

/// Handle to the symlink designating the active toolchain
#[derive(Debug, Clone)]
pub struct CurrentLink {
    path: PathBuf,
}

impl CurrentLink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the raw link target.
    ///
    /// Returns `None` when nothing exists at the path, and
    /// `ToolchainError::SymlinkState` when something other than a symlink does.
    pub fn read(&self) -> Result<Option<PathBuf>, ToolchainError> {
        let metadata = match std::fs::symlink_metadata(&self.path) {
            Ok(metadata) => metadata,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(ToolchainError::io(
                    format!("check symlink {}", self.path.display()),
                    e,
                ));
            }
        };

        if !metadata.file_type().is_symlink() {
            return Err(ToolchainError::SymlinkState(self.path.clone()));
        }

        let target = std::fs::read_link(&self.path).map_err(|e| {
            ToolchainError::io(format!("read symlink {}", self.path.display()), e)
        })?;
        Ok(Some(target))
    }

    /// Points the link at `target`, replacing any previous link.
    ///
    /// Nothing is touched when the path holds a regular file or directory.
    pub fn switch_to(&self, target: &Path) -> Result<SwitchOutcome, ToolchainError> {
        let previous = self.read()?;

        if previous.is_some() {
            debug!("Removing previous symlink {}", self.path.display());
            std::fs::remove_file(&self.path).map_err(|e| {
                ToolchainError::io(format!("remove symlink {}", self.path.display()), e)
            })?;
        }

        create_link(target, &self.path)?;
        info!(
            "Symlink {} now points at {}",
            self.path.display(),
            target.display()
        );

        Ok(SwitchOutcome {
            link: self.path.clone(),
            target: target.to_path_buf(),
            previous,
        })
    }
}

fn create_link(target: &Path, link: &Path) -> Result<(), ToolchainError> {
    #[cfg(unix)]
    let result = std::os::unix::fs::symlink(target, link);

    #[cfg(windows)]
    let result = std::os::windows::fs::symlink_file(target, link);

    result.map_err(|e| {
        ToolchainError::io(
            format!("symlink {} -> {} failed", link.display(), target.display()),
            e,
        )
    })
}
