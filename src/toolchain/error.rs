use std::path::PathBuf;

use thiserror::Error;

use crate::version::error::ParseError;

#[derive(Debug, Error)]
pub enum ToolchainError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("{0} is not downloaded")]
    NotDownloaded(String),

    #[error("{} is not symlink", .0.display())]
    SymlinkState(PathBuf),

    #[error("command {command} failed: {detail}")]
    ExternalCommand { command: String, detail: String },

    #[error("{context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },
}

impl ToolchainError {
    pub(crate) fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }
}
