//! GoDlFetcher against stand-in golang.org/dl wrappers
//!
//! The wrappers are shell scripts that answer `env -json GOROOT` the way the
//! real ones do. Everything runs in one test so that no other thread of this
//! binary forks while a script is still open for writing.
#![cfg(unix)]

use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

use golangver::toolchain::error::ToolchainError;
use golangver::toolchain::fetcher::{GoDlFetcher, ToolchainFetcher};
use golangver::toolchain::inventory::scan_inventory;
use tempfile::TempDir;

fn write_wrapper(dir: &Path, name: &str, body: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
    path
}

#[test]
fn wrappers_are_resolved_through_their_environment() {
    let installer = TempDir::new().unwrap();
    let editor = TempDir::new().unwrap();

    let downloaded = write_wrapper(
        installer.path(),
        "go1.21.0",
        r#"echo '{"GOROOT": "/home/gopher/sdk/go1.21.0"}'"#,
    );
    let pending = write_wrapper(
        installer.path(),
        "go1.22.0",
        "echo 'go1.22.0: not downloaded. Run '\\''go1.22.0 download'\\'' to install to /home/gopher/sdk/go1.22.0' >&2\nexit 1",
    );
    write_wrapper(installer.path(), "go1.20.3", "echo 'go1.20.3: broken' >&2\nexit 2");

    let fetcher = GoDlFetcher::new("go", installer.path());

    assert_eq!(
        fetcher.go_root(&downloaded).unwrap(),
        PathBuf::from("/home/gopher/sdk/go1.21.0")
    );
    assert!(matches!(
        fetcher.go_root(&pending),
        Err(ToolchainError::NotDownloaded(_))
    ));
    assert_eq!(fetcher.version_binary("1.21.0"), downloaded);
    assert_eq!(fetcher.version_binary("1.23.0"), PathBuf::from("go1.23.0"));

    // A failing wrapper other than "not downloaded" aborts the whole scan.
    let result = scan_inventory(installer.path(), editor.path(), &fetcher);
    assert!(matches!(
        result,
        Err(ToolchainError::ExternalCommand { .. })
    ));

    std::fs::remove_file(installer.path().join("go1.20.3")).unwrap();
    let inventory = scan_inventory(installer.path(), editor.path(), &fetcher).unwrap();
    assert_eq!(inventory.installer_managed.len(), 1);
    assert_eq!(
        inventory.installer_managed[0].binary_path,
        PathBuf::from("/home/gopher/sdk/go1.21.0/bin/go")
    );
}
