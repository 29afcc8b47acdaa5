//! Toolchain fetcher backed by the golang.org/dl wrapper binaries
//!
//! `go install golang.org/dl/go1.21.5@latest` registers a `go1.21.5` wrapper in
//! the installer directory; `go1.21.5 download` then fetches the SDK. Until the
//! download happens the wrapper answers every command with "not downloaded".

#[cfg(test)]
use mockall::automock;

use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::{debug, info};

use crate::process::{capture, run_inherited};
use crate::toolchain::error::ToolchainError;

/// Marker printed by golang.org/dl wrappers whose SDK was never fetched
const NOT_DOWNLOADED_MARKER: &str = "not downloaded.";

/// Fetches toolchains and answers environment queries about them
#[cfg_attr(test, automock)]
pub trait ToolchainFetcher {
    /// Installs the wrapper for `version` and downloads its SDK
    fn install(&self, version: &str) -> Result<(), ToolchainError>;

    /// Asks a toolchain binary for its installation root (GOROOT)
    ///
    /// Returns `ToolchainError::NotDownloaded` for registered but unfetched wrappers.
    fn go_root(&self, binary: &Path) -> Result<PathBuf, ToolchainError>;

    /// Path (or bare command name) of the wrapper binary for `version`
    fn version_binary(&self, version: &str) -> PathBuf;
}

#[derive(Debug, Deserialize)]
struct GoEnv {
    #[serde(rename = "GOROOT")]
    go_root: String,
}

/// Fetcher driving the `go` command and golang.org/dl wrappers
pub struct GoDlFetcher {
    go_command: PathBuf,
    installer_dir: PathBuf,
}

impl GoDlFetcher {
    pub fn new(go_command: impl Into<PathBuf>, installer_dir: impl Into<PathBuf>) -> Self {
        Self {
            go_command: go_command.into(),
            installer_dir: installer_dir.into(),
        }
    }
}

impl ToolchainFetcher for GoDlFetcher {
    fn install(&self, version: &str) -> Result<(), ToolchainError> {
        println!("Install helper tool for {version}...");
        let package = format!("golang.org/dl/go{version}@latest");
        run_inherited(&self.go_command, &["install", package.as_str()], None)?;

        println!("Download Go version {version}...");
        run_inherited(self.version_binary(version), &["download"], None)?;
        info!("Installed Go {}", version);
        Ok(())
    }

    fn go_root(&self, binary: &Path) -> Result<PathBuf, ToolchainError> {
        let output = capture(binary, &["env", "-json", "GOROOT"])?;
        let stderr = String::from_utf8_lossy(&output.stderr);

        if !output.status.success() {
            if stderr.contains(NOT_DOWNLOADED_MARKER) {
                debug!("{} is registered but not downloaded", binary.display());
                return Err(ToolchainError::NotDownloaded(binary.display().to_string()));
            }
            return Err(ToolchainError::ExternalCommand {
                command: format!("{} env -json GOROOT", binary.display()),
                detail: format!("{}: {}", output.status, stderr.trim()),
            });
        }

        parse_go_root(&output.stdout).map_err(|e| ToolchainError::ExternalCommand {
            command: format!("{} env -json GOROOT", binary.display()),
            detail: format!("unexpected output: {e}"),
        })
    }

    fn version_binary(&self, version: &str) -> PathBuf {
        let name = format!("go{version}");
        let installed = self.installer_dir.join(&name);
        if installed.exists() {
            installed
        } else {
            // Leave it to PATH lookup
            PathBuf::from(name)
        }
    }
}

/// Extract GOROOT from `go env -json GOROOT` output
fn parse_go_root(stdout: &[u8]) -> Result<PathBuf, serde_json::Error> {
    let env: GoEnv = serde_json::from_slice(stdout)?;
    Ok(PathBuf::from(env.go_root))
}

/// Path of the `go` binary inside an installation root
pub fn go_binary(go_root: &Path) -> PathBuf {
    go_root.join("bin").join("go")
}

/// Removes a previously downloaded SDK so that it is fetched again.
///
/// Returns whether anything was removed.
pub fn remove_sdk(sdk_dir: &Path, version: &str) -> Result<bool, ToolchainError> {
    let path = sdk_dir.join(format!("go{version}"));
    if !path.exists() {
        return Ok(false);
    }

    println!("Removing {}", path.display());
    std::fs::remove_dir_all(&path)
        .map_err(|e| ToolchainError::io(format!("remove {}", path.display()), e))?;
    Ok(true)
}
