//! Subprocess helpers
//!
//! Commands run to completion without timeouts or retries. Failures to launch
//! and non-zero exits both surface as [`ToolchainError::ExternalCommand`].

use std::ffi::OsStr;
use std::path::Path;
use std::process::{Command, Output, Stdio};

use tracing::debug;

use crate::toolchain::error::ToolchainError;

/// Render a command line for diagnostics
pub fn command_line<S: AsRef<OsStr>>(program: &OsStr, args: &[S]) -> String {
    let mut parts = vec![program.to_string_lossy().into_owned()];
    parts.extend(
        args.iter()
            .map(|arg| arg.as_ref().to_string_lossy().into_owned()),
    );
    parts.join(" ")
}

/// Run a command with the terminal attached, failing on a non-zero exit.
pub fn run_inherited<S: AsRef<OsStr>>(
    program: impl AsRef<OsStr>,
    args: &[S],
    dir: Option<&Path>,
) -> Result<(), ToolchainError> {
    let program = program.as_ref();
    let line = command_line(program, args);
    debug!("Running {}", line);

    let mut cmd = Command::new(program);
    cmd.args(args)
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit());
    if let Some(dir) = dir {
        cmd.current_dir(dir);
    }

    let status = cmd.status().map_err(|e| ToolchainError::ExternalCommand {
        command: line.clone(),
        detail: e.to_string(),
    })?;
    if !status.success() {
        return Err(ToolchainError::ExternalCommand {
            command: line,
            detail: status.to_string(),
        });
    }
    Ok(())
}

/// Run a command and capture its output regardless of the exit status.
///
/// Only a failure to launch is an error here; callers inspect `status`.
pub fn capture<S: AsRef<OsStr>>(
    program: impl AsRef<OsStr>,
    args: &[S],
) -> Result<Output, ToolchainError> {
    let program = program.as_ref();
    let line = command_line(program, args);
    debug!("Running {}", line);

    Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .output()
        .map_err(|e| ToolchainError::ExternalCommand {
            command: line,
            detail: e.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_line_joins_program_and_args() {
        assert_eq!(
            command_line(OsStr::new("go"), &["mod", "tidy", "-go=1.21"]),
            "go mod tidy -go=1.21"
        );
    }

    #[test]
    fn capture_reports_missing_program_as_external_command_error() {
        let result = capture("golangver-no-such-program", &["--help"]);
        assert!(matches!(
            result,
            Err(ToolchainError::ExternalCommand { .. })
        ));
    }

    #[test]
    fn run_inherited_fails_on_missing_program() {
        let result = run_inherited("golangver-no-such-program", &["x"], None);
        assert!(result.is_err());
    }
}
