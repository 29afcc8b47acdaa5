//! `get`: install a toolchain through golang.org/dl
//!
//! ```bash
//! golangver get 1.21.5          # go install golang.org/dl/go1.21.5@latest && go1.21.5 download
//! golangver get --force 1.21.5  # drop ~/sdk/go1.21.5 first
//! ```

use std::io::{self, Write};
use std::path::Path;

use anyhow::Result;
use clap::Args;

use crate::commands::strip_version_prefix;
use crate::config::Config;
use crate::toolchain::GoDlFetcher;
use crate::toolchain::fetcher::{ToolchainFetcher, remove_sdk};

#[derive(Debug, Clone, Args)]
pub struct GetArgs {
    /// Version to fetch (e.g. 1.21.5)
    pub version: String,

    /// Remove the SDK if it exists locally before fetching
    #[arg(short, long)]
    pub force: bool,
}

/// Executes the get command.
pub fn execute(args: &GetArgs, config: &Config) -> Result<()> {
    let version = strip_version_prefix(&args.version);
    let fetcher = GoDlFetcher::new(config.go_command.clone(), config.installer_dir.clone());

    let stdout = io::stdout();
    run(&mut stdout.lock(), version, args.force, &config.sdk_dir, &fetcher)
}

/// Installs `version` and prints how to start using it.
pub fn run<W: Write>(
    out: &mut W,
    version: &str,
    force: bool,
    sdk_dir: &Path,
    fetcher: &dyn ToolchainFetcher,
) -> Result<()> {
    if force {
        remove_sdk(sdk_dir, version)?;
    }
    fetcher.install(version)?;

    let go_root = fetcher.go_root(&fetcher.version_binary(version))?;
    writeln!(out)?;
    writeln!(out, "Now you can use Go {version}:")?;
    writeln!(out, "* with command: golangver use {version}")?;
    writeln!(out, " OR")?;
    writeln!(
        out,
        "* set Go path: export PATH={}:$PATH",
        go_root.join("bin").display()
    )?;
    Ok(())
}
