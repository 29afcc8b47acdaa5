use std::path::{Path, PathBuf};

use golangver::toolchain::error::ToolchainError;
use golangver::toolchain::fetcher::ToolchainFetcher;
use golangver::toolchain::inventory::{Selection, Source, scan_inventory};
use tempfile::TempDir;

/// Fetcher for inventories without installer-managed toolchains
struct NoWrappers;

impl ToolchainFetcher for NoWrappers {
    fn install(&self, version: &str) -> Result<(), ToolchainError> {
        panic!("unexpected install of {version}");
    }

    fn go_root(&self, binary: &Path) -> Result<PathBuf, ToolchainError> {
        panic!("unexpected GOROOT query for {}", binary.display());
    }

    fn version_binary(&self, version: &str) -> PathBuf {
        PathBuf::from(format!("go{version}"))
    }
}

fn editor_dir(names: &[&str]) -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    for name in names {
        std::fs::create_dir_all(temp_dir.path().join(name).join("bin")).unwrap();
    }
    temp_dir
}

#[test]
fn editor_sdks_are_listed_newest_first() {
    let editor = editor_dir(&["go1.18.10", "go1.20.1", "go1.19.5"]);
    let missing = editor.path().join("no-installer-dir");

    let inventory = scan_inventory(&missing, editor.path(), &NoWrappers).unwrap();

    let versions: Vec<&str> = inventory
        .editor_managed
        .iter()
        .map(|t| t.spec.original())
        .collect();
    assert_eq!(versions, vec!["1.20.1", "1.19.5", "1.18.10"]);
    assert!(inventory.installer_managed.is_empty());
    assert!(
        inventory
            .editor_managed
            .iter()
            .all(|t| t.source == Source::EditorManaged)
    );
}

#[test]
fn editor_sdk_binary_is_joined_directly() {
    let editor = editor_dir(&["go1.21rc2"]);

    let missing = editor.path().join("none");
    let inventory = scan_inventory(&missing, editor.path(), &NoWrappers).unwrap();

    let sdk = &inventory.editor_managed[0];
    assert_eq!(sdk.spec.original(), "1.21rc2");
    assert_eq!(sdk.spec.pre_release(), "rc2");
    assert_eq!(sdk.binary_path, editor.path().join("go1.21rc2").join("bin").join("go"));
}

#[test]
fn selection_follows_symlink_target() {
    let editor = editor_dir(&["go1.20.1", "go1.19.5"]);
    let missing = editor.path().join("none");
    let inventory = scan_inventory(&missing, editor.path(), &NoWrappers).unwrap();

    let target = editor.path().join("go1.19.5").join("bin").join("go");
    assert_eq!(
        inventory.selection(Some(target.as_path())),
        Selection::Managed {
            source: Source::EditorManaged,
            index: 1
        }
    );
    assert_eq!(inventory.selection(None), Selection::Unset);
}
