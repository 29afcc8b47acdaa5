//! Command implementations for the golangver CLI
//!
//! - [`get`]: install a toolchain through golang.org/dl
//! - [`list`]: show local toolchains and, optionally, remote releases
//! - [`use_version`]: repoint the current toolchain symlink

pub mod get;
pub mod list;
pub mod use_version;

use std::path::Path;

/// Accepts `v1.21.5` as well as `1.21.5`
pub fn strip_version_prefix(version: &str) -> &str {
    version.strip_prefix('v').unwrap_or(version)
}

/// `use` takes either a version or the absolute path of a `go` binary
pub fn is_binary_path(argument: &str) -> bool {
    Path::new(argument).is_absolute()
}
