//! Manager for locally installed Go toolchains
//!
//! Toolchains come from two places: golang.org/dl wrappers registered with
//! `go install`, and SDKs downloaded by the IDE. The active one is selected by
//! pointing a `go` symlink at its binary; switching also offers to update the
//! project's `go.mod` and `.idea/workspace.xml`.

pub mod commands;
pub mod config;
pub mod logging;
pub mod process;
pub mod prompt;
pub mod sync;
pub mod toolchain;
pub mod version;
