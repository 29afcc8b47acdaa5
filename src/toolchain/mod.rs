//! Toolchain discovery and switching layer
//!
//! # Modules
//!
//! - [`fetcher`]: Installing toolchains and querying their GOROOT
//! - [`inventory`]: Scanning local installation directories
//! - [`remote`]: Building the remote release catalog from repository tags
//! - [`switch`]: Reading and replacing the current toolchain symlink
//! - [`error`]: Error type shared by the layer

pub mod error;
pub mod fetcher;
pub mod inventory;
pub mod remote;
pub mod switch;

pub use error::ToolchainError;
pub use fetcher::{GoDlFetcher, ToolchainFetcher};
pub use inventory::{InstalledToolchain, Inventory, Selection, Source, scan_inventory};
pub use remote::{CatalogOptions, GitTagLister, RemoteEntry, TagLister, list_remote};
pub use switch::{CurrentLink, SwitchOutcome};
