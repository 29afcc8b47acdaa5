//! Go release version parsing
//!
//! Go release names are partial versions with the pre-release marker glued to
//! the last number:
//! - "1" -> 1.0.0
//! - "1.17" -> 1.17.0
//! - "1.21rc2" -> 1.21.0 with pre-release "rc2"
//! - "1.9beta1" -> 1.9.0 with pre-release "beta1"

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use semver::Version;

use crate::version::error::ParseError;

/// Leading digit run and trailing free text of the last component
static LAST_COMPONENT_RE: LazyLock<regex::Regex> =
    LazyLock::new(|| regex::Regex::new(r"^([0-9]*)(.*)$").unwrap());

/// A parsed release version.
///
/// Equality and ordering look at the numeric core only, so "1.21rc1" and
/// "1.21.0" compare equal. The pre-release text is kept for display and grouping.
#[derive(Debug, Clone)]
pub struct VersionSpec {
    original: String,
    core: Version,
    pre_release: String,
}

impl VersionSpec {
    /// Parse a version string, padding missing components with zeros.
    pub fn parse(text: &str) -> Result<Self, ParseError> {
        let (components, pre_release) = split_components(text)?;
        let cleaned = components.join(".");
        let core = Version::parse(&cleaned).map_err(|e| ParseError::InvalidNumber {
            original: text.to_string(),
            cleaned: cleaned.clone(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            original: text.to_string(),
            core,
            pre_release: pre_release.to_string(),
        })
    }

    /// The exact input string
    pub fn original(&self) -> &str {
        &self.original
    }

    /// The numeric major.minor.patch triple
    pub fn core(&self) -> &Version {
        &self.core
    }

    pub fn major(&self) -> u64 {
        self.core.major
    }

    pub fn minor(&self) -> u64 {
        self.core.minor
    }

    pub fn patch(&self) -> u64 {
        self.core.patch
    }

    /// Pre-release marker such as "rc1", empty for final releases
    pub fn pre_release(&self) -> &str {
        &self.pre_release
    }

    pub fn is_pre_release(&self) -> bool {
        !self.pre_release.is_empty()
    }
}

impl FromStr for VersionSpec {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for VersionSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.original)
    }
}

impl PartialEq for VersionSpec {
    fn eq(&self, other: &Self) -> bool {
        self.core == other.core
    }
}

impl Eq for VersionSpec {}

impl PartialOrd for VersionSpec {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for VersionSpec {
    fn cmp(&self, other: &Self) -> Ordering {
        self.core.cmp(&other.core)
    }
}

/// Normalize a version to a plain "major.minor.patch" string.
///
/// The pre-release marker is dropped: "1.17" -> "1.17.0", "1.7rc1" -> "1.7.0".
pub fn fix_version(version: &str) -> Result<String, ParseError> {
    let (components, _) = split_components(version)?;
    Ok(components.join("."))
}

/// Split a version into exactly three (not yet validated) numeric components
/// plus the pre-release text found after the last one.
///
/// Inputs with more than three components are passed through unpadded so that
/// the numeric parse rejects them.
fn split_components(version: &str) -> Result<(Vec<&str>, &str), ParseError> {
    let mut components: Vec<&str> = version.split('.').collect();
    let last = components.pop().unwrap_or_default();

    let (digits, suffix) = match LAST_COMPONENT_RE.captures(last) {
        Some(caps) => (
            caps.get(1).map_or("", |m| m.as_str()),
            caps.get(2).map_or("", |m| m.as_str()),
        ),
        None => ("", last),
    };
    if digits.is_empty() {
        return Err(ParseError::MissingDigits(version.to_string()));
    }

    components.push(digits);
    while components.len() < 3 {
        components.push("0");
    }
    Ok((components, suffix))
}
