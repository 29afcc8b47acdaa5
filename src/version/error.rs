use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("Version '{0}' has no leading digits in its last component")]
    MissingDigits(String),

    #[error("Failed to parse {cleaned} (from '{original}'): {reason}")]
    InvalidNumber {
        original: String,
        cleaned: String,
        reason: String,
    },
}
