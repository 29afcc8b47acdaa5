//! Version parsing layer
//!
//! Every version string the tool touches (local directory names, remote tag
//! names, command-line arguments) goes through [`spec::VersionSpec`] before it is
//! compared or sorted.
//!
//! # Modules
//!
//! - [`spec`]: `VersionSpec` parsing, ordering, and `fix_version` normalization
//! - [`error`]: Error type for malformed version strings

pub mod error;
pub mod spec;

pub use error::ParseError;
pub use spec::{VersionSpec, fix_version};
