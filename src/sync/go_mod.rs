//! go.mod synchronization
//!
//! Only the `go` directive is inspected:
//!
//! ```text
//! module example.com/myapp
//!
//! go 1.21
//! ```
//!
//! The file itself is never edited here; `go mod edit` and `go mod tidy` do the
//! rewriting so that the module stays consistent.

#[cfg(test)]
use mockall::automock;

use std::path::{Path, PathBuf};

use regex::Regex;
use tracing::debug;

use crate::process::run_inherited;
use crate::prompt::Confirm;
use crate::sync::{PatchOutcome, SyncError};
use crate::toolchain::error::ToolchainError;
use crate::version::spec::{VersionSpec, fix_version};

pub const GO_MOD_FILE: &str = "go.mod";

/// First minor release whose `go mod tidy` understands `-compat`
const TIDY_COMPAT_MINOR: u64 = 17;

/// External tool that rewrites and reconciles a module
#[cfg_attr(test, automock)]
pub trait ModuleTool {
    /// Sets the `go` directive (`go mod edit -go=<version>`)
    fn edit_go_version(&self, dir: &Path, version: &str) -> Result<(), ToolchainError>;

    /// Reconciles dependencies (`go mod tidy`), pinning the compatibility
    /// version when `pin_compat` is set
    fn tidy(&self, dir: &Path, version: &str, pin_compat: bool) -> Result<(), ToolchainError>;
}

/// `ModuleTool` running the `go` command
pub struct GoCommand {
    go_command: PathBuf,
}

impl GoCommand {
    pub fn new(go_command: impl Into<PathBuf>) -> Self {
        Self {
            go_command: go_command.into(),
        }
    }
}

impl ModuleTool for GoCommand {
    fn edit_go_version(&self, dir: &Path, version: &str) -> Result<(), ToolchainError> {
        let flag = format!("-go={version}");
        run_inherited(&self.go_command, &["mod", "edit", flag.as_str()], Some(dir))
    }

    fn tidy(&self, dir: &Path, version: &str, pin_compat: bool) -> Result<(), ToolchainError> {
        let mut args = vec!["mod".to_string(), "tidy".to_string()];
        if pin_compat {
            args.push(format!("-compat={version}"));
            args.push(format!("-go={version}"));
        }
        run_inherited(&self.go_command, args.as_slice(), Some(dir))
    }
}

/// Parser for the `go` directive of go.mod files
pub struct GoModParser {
    /// Regex for the directive: `go 1.21` [// comment]
    go_directive_re: Regex,
}

impl GoModParser {
    pub fn new() -> Self {
        Self {
            go_directive_re: Regex::new(r"^go\s+(\S+)\s*(?://.*)?$").unwrap(),
        }
    }

    /// Returns the declared Go version, if any
    pub fn go_version(&self, content: &str) -> Option<String> {
        content
            .lines()
            .map(str::trim)
            .find_map(|line| self.go_directive_re.captures(line))
            .map(|caps| caps[1].to_string())
    }
}

impl Default for GoModParser {
    fn default() -> Self {
        Self::new()
    }
}

/// Aligns the `go` directive of `<project_dir>/go.mod` with `version`.
///
/// Versions are compared on major.minor only.
pub fn patch_go_mod(
    project_dir: &Path,
    version: &str,
    confirm: &dyn Confirm,
    tool: &dyn ModuleTool,
) -> Result<PatchOutcome, SyncError> {
    let path = project_dir.join(GO_MOD_FILE);
    if !path.is_file() {
        return Ok(PatchOutcome::Absent);
    }

    let content = std::fs::read_to_string(&path).map_err(|source| SyncError::Read {
        path: path.clone(),
        source,
    })?;

    let target = VersionSpec::parse(&fix_version(version)?)?;
    let wanted = format!("{}.{}", target.major(), target.minor());

    let declared = GoModParser::new().go_version(&content);
    let up_to_date = declared
        .as_deref()
        .and_then(|v| VersionSpec::parse(v).ok())
        .is_some_and(|v| v.major() == target.major() && v.minor() == target.minor());
    if up_to_date {
        debug!("{} already declares go {}", path.display(), wanted);
        return Ok(PatchOutcome::UpToDate);
    }

    println!("\n{GO_MOD_FILE} is detected:");
    println!("  current value: {}", declared.as_deref().unwrap_or("(none)"));
    if !confirm.ask_yes_no(&format!("Do you want to set Go version = {wanted}"), false)? {
        return Ok(PatchOutcome::Declined);
    }

    tool.edit_go_version(project_dir, &wanted)?;
    tool.tidy(project_dir, &wanted, target.minor() >= TIDY_COMPAT_MINOR)?;
    Ok(PatchOutcome::Updated)
}
