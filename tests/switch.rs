#![cfg(unix)]

use std::path::{Path, PathBuf};

use golangver::toolchain::error::ToolchainError;
use golangver::toolchain::switch::CurrentLink;
use tempfile::TempDir;

#[test]
fn switching_twice_to_same_target_is_stable() {
    let temp_dir = TempDir::new().unwrap();
    let link = CurrentLink::new(temp_dir.path().join("go"));
    let target = Path::new("/home/gopher/sdk/go1.21.0/bin/go");

    link.switch_to(target).unwrap();
    link.switch_to(target).unwrap();

    assert_eq!(
        std::fs::read_link(temp_dir.path().join("go")).unwrap(),
        target
    );
}

#[test]
fn switching_replaces_link_to_unmanaged_binary() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("go");
    std::os::unix::fs::symlink("/usr/lib/go/bin/go", &path).unwrap();

    let outcome = CurrentLink::new(&path)
        .switch_to(Path::new("/home/gopher/go/go1.20.1/bin/go"))
        .unwrap();

    assert_eq!(outcome.previous, Some(PathBuf::from("/usr/lib/go/bin/go")));
    assert_eq!(
        std::fs::read_link(&path).unwrap(),
        PathBuf::from("/home/gopher/go/go1.20.1/bin/go")
    );
}

#[test]
fn regular_file_at_link_path_is_an_error() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("go");
    std::fs::write(&path, "go binary").unwrap();

    let result = CurrentLink::new(&path).switch_to(Path::new("/sdk/go1.21.0/bin/go"));

    match result {
        Err(err @ ToolchainError::SymlinkState(_)) => {
            assert_eq!(err.to_string(), format!("{} is not symlink", path.display()));
        }
        other => panic!("expected SymlinkState, got {other:?}"),
    }
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "go binary");
}
