//! `use`: repoint the current toolchain symlink
//!
//! ```bash
//! golangver use 1.21.5              # toolchain installed through `get`
//! golangver use /usr/lib/go/bin/go  # any binary, no project synchronization
//! ```

use std::io::{self, Write};
use std::path::Path;

use anyhow::{Context, Result, bail};
use clap::Args;

use crate::commands::{is_binary_path, strip_version_prefix};
use crate::config::Config;
use crate::prompt::ConsolePrompt;
use crate::sync::{GoCommand, SyncError, Synchronizer};
use crate::toolchain::fetcher::{ToolchainFetcher, go_binary};
use crate::toolchain::switch::{CurrentLink, SwitchOutcome};
use crate::toolchain::GoDlFetcher;

#[derive(Debug, Clone, Args)]
pub struct UseArgs {
    /// Version to activate (e.g. 1.21.5), or the absolute path of a `go` binary
    pub version: String,
}

/// Result of switching to a managed version
#[derive(Debug)]
pub struct UseReport {
    pub outcome: SwitchOutcome,
    /// Project files that could not be synchronized; the switch stays in place
    pub sync_failures: Vec<SyncError>,
}

/// Executes the use command.
pub fn execute(args: &UseArgs, config: &Config) -> Result<()> {
    let link = CurrentLink::new(config.go_bin.clone());
    let stdout = io::stdout();

    if is_binary_path(&args.version) {
        switch_to_binary(&mut stdout.lock(), &link, Path::new(&args.version))?;
        return Ok(());
    }

    let version = strip_version_prefix(&args.version);
    let fetcher = GoDlFetcher::new(config.go_command.clone(), config.installer_dir.clone());
    let module_tool = GoCommand::new(config.go_command.clone());
    let project_dir = std::env::current_dir().context("Failed to resolve current directory")?;
    let synchronizer = Synchronizer::new(
        project_dir,
        config.home_dir.clone(),
        &ConsolePrompt,
        &module_tool,
    );

    let report = switch_to_version(&mut stdout.lock(), &link, version, &fetcher, &synchronizer)?;
    if report.sync_failures.is_empty() {
        return Ok(());
    }

    let count = report.sync_failures.len();
    for failure in report.sync_failures {
        eprintln!("ERROR: {:#}", anyhow::Error::new(failure));
    }
    bail!("switched to Go {version}, but {count} project file(s) were not synchronized")
}

/// Points the link at an arbitrary binary, without touching project files.
pub fn switch_to_binary<W: Write>(
    out: &mut W,
    link: &CurrentLink,
    binary: &Path,
) -> Result<SwitchOutcome> {
    let outcome = link.switch_to(binary)?;
    print_outcome(out, &outcome)?;
    Ok(outcome)
}

/// Points the link at the `go` binary of an installed `version`, then
/// synchronizes the project files.
///
/// Synchronization failures are collected into the report and never undo the
/// switch.
pub fn switch_to_version<W: Write>(
    out: &mut W,
    link: &CurrentLink,
    version: &str,
    fetcher: &dyn ToolchainFetcher,
    synchronizer: &Synchronizer<'_>,
) -> Result<UseReport> {
    let go_root = fetcher
        .go_root(&fetcher.version_binary(version))
        .with_context(|| format!("Go {version} is not available, try `golangver get {version}`"))?;

    let outcome = link.switch_to(&go_binary(&go_root))?;
    print_outcome(out, &outcome)?;
    out.flush()?;

    let sync_failures = synchronizer.run(version, &go_root);
    Ok(UseReport {
        outcome,
        sync_failures,
    })
}

fn print_outcome<W: Write>(out: &mut W, outcome: &SwitchOutcome) -> io::Result<()> {
    writeln!(
        out,
        "set symlink {} -> {}",
        outcome.link.display(),
        outcome.target.display()
    )?;
    let previous = outcome
        .previous
        .as_ref()
        .map(|previous| previous.display().to_string())
        .unwrap_or_default();
    writeln!(out, "(previous value was: {previous})")
}
