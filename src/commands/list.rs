//! `list`: installed toolchains and remote releases
//!
//! ```text
//!  downloaded by `go install`:
//! * 1.21.5      /home/gopher/sdk/go1.21.5/bin/go
//!   1.20.12     /home/gopher/sdk/go1.20.12/bin/go
//!
//!  downloaded by IDEA:
//!   1.19.5      /home/gopher/go/go1.19.5/bin/go
//! ```

use std::io::{self, Write};
use std::path::Path;

use anyhow::{Context, Result};
use clap::Args;

use crate::config::Config;
use crate::toolchain::fetcher::ToolchainFetcher;
use crate::toolchain::inventory::{InstalledToolchain, Inventory, Selection, Source, scan_inventory};
use crate::toolchain::remote::{CatalogOptions, GitTagLister, RemoteEntry, TagLister, list_remote};
use crate::toolchain::GoDlFetcher;
use crate::toolchain::switch::CurrentLink;
use crate::version::spec::VersionSpec;

#[derive(Debug, Clone, Default, Args)]
pub struct ListArgs {
    /// Also show Go releases available remotely (newest patch of each minor)
    #[arg(short, long)]
    pub remotes: bool,

    /// Show every remote patch release
    #[arg(short, long)]
    pub all: bool,

    /// Include remote releases older than the configured floor (1.13 by default)
    #[arg(short, long)]
    pub outdated: bool,
}

/// Executes the list command.
pub fn execute(args: &ListArgs, config: &Config) -> Result<()> {
    let fetcher = GoDlFetcher::new(config.go_command.clone(), config.installer_dir.clone());
    let lister = GitTagLister::new(config.remote.repository.clone());
    let options = if args.remotes {
        let floor = VersionSpec::parse(&config.remote.floor_version)
            .with_context(|| format!("invalid floor version {}", config.remote.floor_version))?;
        Some(CatalogOptions {
            show_all: args.all,
            show_outdated: args.outdated,
            floor,
        })
    } else {
        None
    };

    let stdout = io::stdout();
    run(
        &mut stdout.lock(),
        &CurrentLink::new(config.go_bin.clone()),
        &config.installer_dir,
        &config.editor_dir,
        &fetcher,
        options
            .as_ref()
            .map(|options| (&lister as &dyn TagLister, options)),
    )
}

/// Scans and fetches first, then prints the inventory and, when a lister is
/// given, the remote catalog.
pub fn run<W: Write>(
    out: &mut W,
    link: &CurrentLink,
    installer_dir: &Path,
    editor_dir: &Path,
    fetcher: &dyn ToolchainFetcher,
    remote: Option<(&dyn TagLister, &CatalogOptions)>,
) -> Result<()> {
    let current = link
        .read()
        .with_context(|| format!("check symlink {} is failed", link.path().display()))?;
    let inventory = scan_inventory(installer_dir, editor_dir, fetcher)?;
    // Nothing is printed until every source has been read
    let entries = remote
        .map(|(lister, options)| list_remote(lister, options))
        .transpose()?;

    render_inventory(out, &inventory, current.as_deref())?;
    if let Some(entries) = entries {
        render_remote(out, &entries)?;
    }
    Ok(())
}

/// Prints both inventory sections, marking the current toolchain with `*`.
pub fn render_inventory<W: Write>(
    out: &mut W,
    inventory: &Inventory,
    current_target: Option<&Path>,
) -> io::Result<()> {
    let selection = inventory.selection(current_target);

    writeln!(out, " downloaded by `go install`:")?;
    write_toolchains(out, &inventory.installer_managed, Source::InstallerManaged, &selection)?;

    if !inventory.editor_managed.is_empty() {
        write!(out, "\n downloaded by IDEA:\n")?;
        write_toolchains(out, &inventory.editor_managed, Source::EditorManaged, &selection)?;
    }

    if !matches!(selection, Selection::Managed { .. }) {
        let target = current_target
            .map(|target| target.display().to_string())
            .unwrap_or_default();
        writeln!(out, "currentTarget: {target}")?;
    }
    Ok(())
}

fn write_toolchains<W: Write>(
    out: &mut W,
    toolchains: &[InstalledToolchain],
    source: Source,
    selection: &Selection,
) -> io::Result<()> {
    for (index, toolchain) in toolchains.iter().enumerate() {
        let current = *selection == Selection::Managed { source, index };
        let mark = if current { "*" } else { " " };
        writeln!(
            out,
            "{mark} {:<10}  {}",
            toolchain.spec.original(),
            toolchain.binary_path.display()
        )?;
    }
    Ok(())
}

/// Prints the remote catalog, one release per line with its link if any.
pub fn render_remote<W: Write>(out: &mut W, entries: &[RemoteEntry]) -> io::Result<()> {
    write!(out, "\n# remote Go versions:\n")?;
    for entry in entries {
        match &entry.reference {
            Some(reference) => writeln!(out, "  {}\t{}", entry.spec.original(), reference)?,
            None => writeln!(out, "  {}", entry.spec.original())?,
        }
    }
    Ok(())
}
