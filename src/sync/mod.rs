//! Propagation of a toolchain switch into project files
//!
//! Two independent patchers run after the symlink has been switched:
//! - [`go_mod`]: the `go` directive of `go.mod` in the project directory
//! - [`workspace`]: the GOROOT recorded in the IDE's `.idea/workspace.xml`
//!
//! Both ask through [`Confirm`] before touching anything and do nothing when
//! their file is absent. A failing patcher never undoes the switch.

pub mod go_mod;
pub mod workspace;

use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::warn;

use crate::prompt::{Confirm, PromptError};
use crate::toolchain::error::ToolchainError;
use crate::version::error::ParseError;

pub use go_mod::{GoCommand, ModuleTool, patch_go_mod};
pub use workspace::patch_workspace;

#[derive(Debug, Error)]
pub enum SyncError {
    #[error("read of {} is failed", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("write of {} is failed", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed {}", path.display())]
    Xml {
        path: PathBuf,
        #[source]
        source: workspace::XmlError,
    },

    #[error(transparent)]
    Version(#[from] ParseError),

    #[error(transparent)]
    Prompt(#[from] PromptError),

    #[error(transparent)]
    Command(#[from] ToolchainError),
}

/// What a patcher did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatchOutcome {
    /// The file or marker directory does not exist
    Absent,
    /// Nothing to change, or nothing recognizable to change
    UpToDate,
    /// The user answered no
    Declined,
    /// The file was rewritten
    Updated,
}

/// Runs both patchers for one project directory
pub struct Synchronizer<'a> {
    project_dir: PathBuf,
    home_dir: Option<PathBuf>,
    confirm: &'a dyn Confirm,
    module_tool: &'a dyn ModuleTool,
}

impl<'a> Synchronizer<'a> {
    pub fn new(
        project_dir: impl Into<PathBuf>,
        home_dir: Option<PathBuf>,
        confirm: &'a dyn Confirm,
        module_tool: &'a dyn ModuleTool,
    ) -> Self {
        Self {
            project_dir: project_dir.into(),
            home_dir,
            confirm,
            module_tool,
        }
    }

    /// Patches `go.mod` for `version` and the workspace for `go_root`.
    ///
    /// Every failure is returned; one patcher failing does not stop the other.
    pub fn run(&self, version: &str, go_root: &Path) -> Vec<SyncError> {
        let mut failures = Vec::new();

        if let Err(e) = patch_go_mod(&self.project_dir, version, self.confirm, self.module_tool)
        {
            warn!("go.mod synchronization failed: {}", e);
            failures.push(e);
        }

        if let Err(e) = patch_workspace(
            &self.project_dir,
            go_root,
            self.home_dir.as_deref(),
            self.confirm,
        ) {
            warn!("workspace synchronization failed: {}", e);
            failures.push(e);
        }

        failures
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prompt::MockConfirm;
    use crate::sync::go_mod::MockModuleTool;
    use tempfile::TempDir;

    #[test]
    fn run_is_a_no_op_without_project_files() {
        let temp_dir = TempDir::new().unwrap();
        let confirm = MockConfirm::new();
        let tool = MockModuleTool::new();

        let sync = Synchronizer::new(temp_dir.path(), None, &confirm, &tool);
        let failures = sync.run("1.21.0", Path::new("/sdk/go1.21.0"));

        assert!(failures.is_empty());
    }

    #[test]
    fn run_continues_after_go_mod_failure() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::write(temp_dir.path().join("go.mod"), "module example.com/app\n\ngo 1.20\n")
            .unwrap();
        let idea = temp_dir.path().join(".idea");
        std::fs::create_dir(&idea).unwrap();
        std::fs::write(
            idea.join("workspace.xml"),
            r#"<project version="4"><component name="GOROOT" url="file:///sdk/go1.20.1" /></project>"#,
        )
        .unwrap();

        let mut confirm = MockConfirm::new();
        confirm.expect_ask_yes_no().times(2).returning(|_, _| Ok(true));
        let mut tool = MockModuleTool::new();
        tool.expect_edit_go_version().returning(|_, _| {
            Err(ToolchainError::ExternalCommand {
                command: "go mod edit -go=1.21".to_string(),
                detail: "exit status: 1".to_string(),
            })
        });

        let sync = Synchronizer::new(temp_dir.path(), None, &confirm, &tool);
        let failures = sync.run("1.21.0", Path::new("/sdk/go1.21.0"));

        assert_eq!(failures.len(), 1);
        assert!(matches!(failures[0], SyncError::Command(_)));
        let workspace = std::fs::read_to_string(idea.join("workspace.xml")).unwrap();
        assert!(workspace.contains(r#"url="file:///sdk/go1.21.0""#));
    }
}
