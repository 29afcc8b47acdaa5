//! Remote release catalog built from the Go repository's tags
//!
//! Tags are read from `git ls-remote -t`, one `hash<TAB>refs/tags/<name>` line
//! per tag. Only `refs/tags/go*` release tags are kept.

#[cfg(test)]
use mockall::automock;

use tracing::{debug, warn};

use crate::process::capture;
use crate::toolchain::error::ToolchainError;
use crate::version::spec::VersionSpec;

/// Ref prefix of Go release tags
const TAG_PREFIX: &str = "refs/tags/go";

/// Suffix git appends to peeled annotated tags
const PEELED_SUFFIX: &str = "^{}";

const RELEASE_NOTES_URL: &str = "https://golang.org/doc/devel/release";

const BLOG_URL: &str = "https://go.dev/blog/go";

/// Source of the raw tag listing
#[cfg_attr(test, automock)]
pub trait TagLister {
    /// Returns `hash<TAB>refname` lines
    fn list_tags(&self) -> Result<String, ToolchainError>;
}

/// Lists tags of a git repository with `git ls-remote -t`
pub struct GitTagLister {
    repository: String,
}

impl GitTagLister {
    pub fn new(repository: impl Into<String>) -> Self {
        Self {
            repository: repository.into(),
        }
    }
}

impl TagLister for GitTagLister {
    fn list_tags(&self) -> Result<String, ToolchainError> {
        let args = ["ls-remote", "-t", self.repository.as_str()];
        let output = capture("git", &args)?;
        if !output.status.success() {
            return Err(ToolchainError::ExternalCommand {
                command: format!("git {}", args.join(" ")),
                detail: format!(
                    "{}: {}",
                    output.status,
                    String::from_utf8_lossy(&output.stderr).trim()
                ),
            });
        }

        String::from_utf8(output.stdout).map_err(|e| ToolchainError::ExternalCommand {
            command: format!("git {}", args.join(" ")),
            detail: format!("output is not UTF-8: {e}"),
        })
    }
}

/// Filtering switches for the catalog
#[derive(Debug, Clone)]
pub struct CatalogOptions {
    /// Show every patch release, not only the newest of each minor
    pub show_all: bool,
    /// Keep releases older than `floor`
    pub show_outdated: bool,
    /// Oldest release shown by default
    pub floor: VersionSpec,
}

/// A release selected for display
#[derive(Debug, Clone)]
pub struct RemoteEntry {
    pub spec: VersionSpec,
    /// Release notes or announcement link
    pub reference: Option<String>,
}

/// Fetches the tag listing and builds the display catalog.
pub fn list_remote<L: TagLister + ?Sized>(
    lister: &L,
    options: &CatalogOptions,
) -> Result<Vec<RemoteEntry>, ToolchainError> {
    let raw = lister.list_tags()?;
    let tags = parse_tags(&raw);
    debug!("Parsed {} release tags", tags.len());
    Ok(build_catalog(tags, options))
}

/// Parses release tags out of `ls-remote` output.
///
/// Lines that are not release tags are ignored; tags whose name does not parse
/// are skipped with a warning.
pub fn parse_tags(raw: &str) -> Vec<VersionSpec> {
    raw.lines()
        .filter_map(|line| {
            let mut fields = line.split('\t');
            let (Some(_hash), Some(refname), None) = (fields.next(), fields.next(), fields.next())
            else {
                return None;
            };
            let name = refname.strip_prefix(TAG_PREFIX)?;
            if name.ends_with(PEELED_SUFFIX) {
                return None;
            }
            VersionSpec::parse(name)
                .inspect_err(|e| warn!("Skipping tag {}: {}", refname, e))
                .ok()
        })
        .collect()
}

/// Filters, sorts, groups and annotates release tags for display.
pub fn build_catalog(tags: Vec<VersionSpec>, options: &CatalogOptions) -> Vec<RemoteEntry> {
    let mut versions: Vec<VersionSpec> = tags
        .into_iter()
        .filter(|v| options.show_outdated || *v >= options.floor)
        .collect();

    let Some(newest_minor) = versions.iter().max().map(VersionSpec::minor) else {
        return Vec::new();
    };

    // Stable: equal cores keep their listing order
    versions.sort_by(|a, b| b.cmp(a));

    let mut entries = Vec::new();
    let mut last_minor = None;
    for spec in versions {
        // Pre-releases are only interesting for the upcoming minor
        if spec.is_pre_release() && spec.minor() != newest_minor {
            continue;
        }

        let mut reference = None;
        if last_minor == Some(spec.minor()) {
            if !options.show_all {
                continue;
            }
        } else {
            last_minor = Some(spec.minor());
            if !spec.is_pre_release() {
                reference = Some(release_notes_url(&spec));
            }
        }
        if spec.is_pre_release() && spec.minor() == 18 {
            reference = Some(format!("{BLOG_URL}{}", spec.original()));
        }

        entries.push(RemoteEntry { spec, reference });
    }
    entries
}

fn release_notes_url(spec: &VersionSpec) -> String {
    if spec.minor() == 0 {
        format!("{RELEASE_NOTES_URL}#go{}", spec.major())
    } else {
        format!("{RELEASE_NOTES_URL}#go{}.{}", spec.major(), spec.minor())
    }
}
