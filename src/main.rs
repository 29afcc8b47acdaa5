use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::debug;

use golangver::commands::{get, list, use_version};
use golangver::config::{Config, Env, config_path};
use golangver::logging;

#[derive(Parser)]
#[command(name = "golangver")]
#[command(version, about = "Manage locally installed Go toolchains")]
struct Cli {
    /// Symlink selecting the active toolchain [default: /usr/local/bin/go]
    #[arg(long, global = true, value_name = "PATH")]
    go_bin: Option<PathBuf>,

    /// Configuration file [default: $XDG_CONFIG_HOME/golangver/config.json]
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Also write JSON logs to this file
    #[arg(long, global = true, value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// Enable debug logging on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Fetch a Go version through golang.org/dl
    Get(get::GetArgs),

    /// Show installed Go versions, and remote ones with --remotes
    List(list::ListArgs),

    /// Point the go symlink at an installed version or a binary path
    Use(use_version::UseArgs),
}

fn main() {
    if let Err(err) = run(Cli::parse()) {
        eprintln!("ERROR: {err:#}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let env = Env::from_process();
    let path = cli.config.unwrap_or_else(|| config_path(&env));
    let mut config = Config::load(&path, &env)?;
    if let Some(go_bin) = cli.go_bin {
        config.go_bin = go_bin;
    }
    if let Some(log_file) = cli.log_file {
        config.log_file = Some(log_file);
    }

    let _guard = logging::init(cli.verbose, config.log_file.as_deref())?;
    debug!("Using configuration {:?} from {}", config, path.display());

    match cli.command {
        Command::Get(args) => get::execute(&args, &config),
        Command::List(args) => list::execute(&args, &config),
        Command::Use(args) => use_version::execute(&args, &config),
    }
}
