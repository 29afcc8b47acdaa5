//! IDE workspace synchronization
//!
//! The IDE records the project SDK in `.idea/workspace.xml`:
//!
//! ```text
//! <project version="4">
//!   <component name="GOROOT" url="file://$USER_HOME$/sdk/go1.21.5" />
//! </project>
//! ```
//!
//! The document is processed as a stream of XML events. Every event is copied
//! back unchanged except the `url` attribute of that one component.

use std::path::Path;

use quick_xml::escape::escape;
use quick_xml::events::attributes::AttrError;
use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;
use quick_xml::writer::Writer;
use thiserror::Error;
use tracing::debug;

use crate::prompt::Confirm;
use crate::sync::{PatchOutcome, SyncError};

pub const IDEA_DIR: &str = ".idea";
pub const WORKSPACE_FILE: &str = "workspace.xml";

/// Placeholder the IDE writes instead of the user's home directory
pub const USER_HOME_MACRO: &str = "$USER_HOME$";

#[derive(Debug, Error)]
pub enum XmlError {
    #[error(transparent)]
    Xml(#[from] quick_xml::Error),

    #[error(transparent)]
    Attribute(#[from] AttrError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("document is not valid UTF-8")]
    Encoding,
}

/// Points the workspace GOROOT at `go_root` after confirmation.
pub fn patch_workspace(
    project_dir: &Path,
    go_root: &Path,
    home_dir: Option<&Path>,
    confirm: &dyn Confirm,
) -> Result<PatchOutcome, SyncError> {
    let idea_dir = project_dir.join(IDEA_DIR);
    if !idea_dir.is_dir() {
        return Ok(PatchOutcome::Absent);
    }

    let path = idea_dir.join(WORKSPACE_FILE);
    let content = match std::fs::read_to_string(&path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(PatchOutcome::Absent),
        Err(source) => return Err(SyncError::Read { path, source }),
    };

    let xml_error = |source| SyncError::Xml {
        path: path.clone(),
        source,
    };

    let Some(current) = find_goroot_url(&content).map_err(xml_error)? else {
        debug!("{} has no GOROOT component", path.display());
        return Ok(PatchOutcome::UpToDate);
    };
    let wanted = format!("file://{}", substitute_home(go_root, home_dir));
    if current == wanted {
        return Ok(PatchOutcome::UpToDate);
    }

    println!("\n{} is detected", path.display());
    println!("  current value: {current}");
    if !confirm.ask_yes_no(
        &format!("Do you want to set Go SDK = {}?", go_root.display()),
        false,
    )? {
        return Ok(PatchOutcome::Declined);
    }

    let updated = replace_goroot_url(&content, &wanted).map_err(xml_error)?;
    std::fs::write(&path, updated).map_err(|source| SyncError::Write {
        path: path.clone(),
        source,
    })?;

    println!("overwrite {}", path.display());
    println!("INFO: project reopening in IDEA is required");
    Ok(PatchOutcome::Updated)
}

/// Rewrites a path the way the IDE stores it, with the home directory replaced
/// by `$USER_HOME$`.
pub fn substitute_home(path: &Path, home_dir: Option<&Path>) -> String {
    let Some(rest) = home_dir.and_then(|home| path.strip_prefix(home).ok()) else {
        return path.display().to_string();
    };
    if rest.as_os_str().is_empty() {
        USER_HOME_MACRO.to_string()
    } else {
        format!("{USER_HOME_MACRO}/{}", rest.display())
    }
}

/// `url` of the first `component name="GOROOT"` element, if any.
///
/// The whole document is read so that malformed files are rejected.
pub fn find_goroot_url(content: &str) -> Result<Option<String>, XmlError> {
    let mut reader = Reader::from_str(content);
    let mut found = None;
    loop {
        match reader.read_event()? {
            Event::Eof => return Ok(found),
            Event::Start(start) | Event::Empty(start) if found.is_none() => {
                found = goroot_url(&start)?;
            }
            _ => {}
        }
    }
}

/// Copies the document event by event, replacing the `url` attribute of the
/// first GOROOT component with `url`.
pub fn replace_goroot_url(content: &str, url: &str) -> Result<String, XmlError> {
    let mut reader = Reader::from_str(content);
    let mut writer = Writer::new(Vec::with_capacity(content.len()));
    let mut replaced = false;

    loop {
        match reader.read_event()? {
            Event::Eof => break,
            Event::Start(start) if !replaced && goroot_url(&start)?.is_some() => {
                writer.write_event(Event::Start(with_url(&start, url)?))?;
                replaced = true;
            }
            Event::Empty(start) if !replaced && goroot_url(&start)?.is_some() => {
                writer.write_event(Event::Empty(with_url(&start, url)?))?;
                replaced = true;
            }
            event => writer.write_event(event)?,
        }
    }

    String::from_utf8(writer.into_inner()).map_err(|_| XmlError::Encoding)
}

fn goroot_url(start: &BytesStart<'_>) -> Result<Option<String>, XmlError> {
    if start.local_name().as_ref() != b"component" {
        return Ok(None);
    }

    let mut is_goroot = false;
    let mut url = None;
    for attr in start.attributes() {
        let attr = attr?;
        match attr.key.local_name().as_ref() {
            b"name" => is_goroot = attr.unescape_value()? == "GOROOT",
            b"url" => url = Some(attr.unescape_value()?.into_owned()),
            _ => {}
        }
    }
    Ok(if is_goroot { url } else { None })
}

/// Same element with its `url` attribute value replaced.
///
/// The raw attribute text is swapped in place so spacing and quoting of the
/// element survive; attributes are re-serialized only if that text is not found.
fn with_url(start: &BytesStart<'_>, url: &str) -> Result<BytesStart<'static>, XmlError> {
    let raw = std::str::from_utf8(start).map_err(|_| XmlError::Encoding)?;
    let name_len = start.name().as_ref().len();
    let escaped = escape(url);

    for attr in start.attributes() {
        let attr = attr?;
        if attr.key.local_name().as_ref() != b"url" {
            continue;
        }
        let key = std::str::from_utf8(attr.key.as_ref()).map_err(|_| XmlError::Encoding)?;
        let value = std::str::from_utf8(&attr.value).map_err(|_| XmlError::Encoding)?;

        for quote in ['"', '\''] {
            let written = format!("{key}={quote}{value}{quote}");
            let position = raw
                .match_indices(&written)
                .map(|(pos, _)| pos)
                .find(|&pos| raw[..pos].ends_with(char::is_whitespace));
            if let Some(pos) = position {
                let content = format!(
                    "{}{key}={quote}{escaped}{quote}{}",
                    &raw[..pos],
                    &raw[pos + written.len()..]
                );
                return Ok(BytesStart::from_content(content, name_len));
            }
        }
    }

    let name = String::from_utf8_lossy(start.name().as_ref()).into_owned();
    let mut updated = BytesStart::new(name);
    for attr in start.attributes() {
        let attr = attr?;
        if attr.key.local_name().as_ref() == b"url" {
            let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
            updated.push_attribute((key.as_str(), url));
        } else {
            updated.push_attribute(attr);
        }
    }
    Ok(updated)
}
