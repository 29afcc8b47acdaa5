//! Local toolchain inventory
//!
//! Two sources are scanned on every listing:
//! - the installer directory, holding golang.org/dl wrappers (`go1.21.5`, ...)
//!   whose GOROOT is found by asking the wrapper itself;
//! - the editor directory, holding SDKs downloaded by the IDE (`~/go/go1.21.5/`).

use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use crate::toolchain::error::ToolchainError;
use crate::toolchain::fetcher::{ToolchainFetcher, go_binary};
use crate::version::spec::VersionSpec;

/// `go` followed by a dotted version, e.g. go1.21.5 or go1.22rc1
static TOOLCHAIN_NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^go([0-9]+\..+)$").unwrap());

/// Which discovery directory produced a toolchain
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    /// Registered through `go install golang.org/dl/...`
    InstallerManaged,
    /// Downloaded by the IDE's SDK flow
    EditorManaged,
}

#[derive(Debug, Clone)]
pub struct InstalledToolchain {
    pub spec: VersionSpec,
    pub binary_path: PathBuf,
    pub source: Source,
}

/// Toolchains found on disk, each list sorted newest first
#[derive(Debug, Clone, Default)]
pub struct Inventory {
    pub installer_managed: Vec<InstalledToolchain>,
    pub editor_managed: Vec<InstalledToolchain>,
}

/// What the current symlink points at, relative to the inventory
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    /// No symlink exists
    Unset,
    /// Points at a scanned toolchain (first match, installer-managed first)
    Managed { source: Source, index: usize },
    /// Points somewhere the inventory does not know about
    Unmanaged(PathBuf),
}

impl Inventory {
    /// All toolchains, installer-managed first
    pub fn iter(&self) -> impl Iterator<Item = &InstalledToolchain> {
        self.installer_managed
            .iter()
            .chain(self.editor_managed.iter())
    }

    pub fn is_empty(&self) -> bool {
        self.installer_managed.is_empty() && self.editor_managed.is_empty()
    }

    /// Classifies the symlink target against the scanned toolchains
    pub fn selection(&self, current_target: Option<&Path>) -> Selection {
        let Some(target) = current_target else {
            return Selection::Unset;
        };

        let position = |list: &[InstalledToolchain]| {
            list.iter().position(|t| t.binary_path.as_path() == target)
        };
        if let Some(index) = position(&self.installer_managed) {
            return Selection::Managed {
                source: Source::InstallerManaged,
                index,
            };
        }
        if let Some(index) = position(&self.editor_managed) {
            return Selection::Managed {
                source: Source::EditorManaged,
                index,
            };
        }
        Selection::Unmanaged(target.to_path_buf())
    }
}

/// Scans both sources into a sorted inventory.
///
/// Installer wrappers that were registered but never downloaded are skipped;
/// every other failure aborts the scan.
pub fn scan_inventory<F: ToolchainFetcher + ?Sized>(
    installer_dir: &Path,
    editor_dir: &Path,
    fetcher: &F,
) -> Result<Inventory, ToolchainError> {
    let mut installer_managed = Vec::new();
    for (name, path) in candidates(installer_dir)? {
        let spec = VersionSpec::parse(&name)?;
        let go_root = match fetcher.go_root(&path) {
            Ok(go_root) => go_root,
            Err(ToolchainError::NotDownloaded(_)) => {
                debug!("Skipping {}: not downloaded", path.display());
                continue;
            }
            Err(e) => return Err(e),
        };
        installer_managed.push(InstalledToolchain {
            spec,
            binary_path: go_binary(&go_root),
            source: Source::InstallerManaged,
        });
    }

    let mut editor_managed = Vec::new();
    for (name, path) in candidates(editor_dir)? {
        if !path.is_dir() {
            continue;
        }
        editor_managed.push(InstalledToolchain {
            spec: VersionSpec::parse(&name)?,
            binary_path: go_binary(&path),
            source: Source::EditorManaged,
        });
    }

    sort_newest_first(&mut installer_managed);
    sort_newest_first(&mut editor_managed);
    debug!(
        "Found {} installer-managed and {} editor-managed toolchains",
        installer_managed.len(),
        editor_managed.len()
    );

    Ok(Inventory {
        installer_managed,
        editor_managed,
    })
}

/// Stable, so equal versions keep their enumeration order
fn sort_newest_first(toolchains: &mut [InstalledToolchain]) {
    toolchains.sort_by(|a, b| b.spec.cmp(&a.spec));
}

/// Entries of `dir` named like a toolchain, as (version, path), in name order.
/// A missing directory has no candidates.
fn candidates(dir: &Path) -> Result<Vec<(String, PathBuf)>, ToolchainError> {
    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            debug!("{} does not exist", dir.display());
            return Ok(Vec::new());
        }
        Err(e) => return Err(ToolchainError::io(format!("list of {}", dir.display()), e)),
    };

    let mut found = Vec::new();
    for entry in entries {
        let entry =
            entry.map_err(|e| ToolchainError::io(format!("list of {}", dir.display()), e))?;
        let file_name = entry.file_name();
        let Some(name) = file_name.to_str() else {
            continue;
        };
        if let Some(caps) = TOOLCHAIN_NAME_RE.captures(name) {
            found.push((caps[1].to_string(), entry.path()));
        }
    }
    found.sort_by(|a, b| a.1.cmp(&b.1));
    Ok(found)
}
