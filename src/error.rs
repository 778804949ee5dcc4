//! Error taxonomy for the feedback pipeline.
//!
//! Callers need to tell three failure conditions apart: persistence being
//! unavailable, the external generation call failing, and user input that
//! must be rejected before any side effect. Extraction failures get their
//! own variant so a bad document surfaces without taking the session down.

use std::fmt;

#[derive(Debug)]
pub enum Error {
    /// Cache or comment persistence is unavailable or unwritable.
    Storage(String),
    /// The text-generation call failed, timed out, or returned a response
    /// that could not be parsed.
    Generation(String),
    /// User input rejected up front (empty comment, no document selected).
    Input(String),
    /// A source document could not be converted to plain text.
    Extract(String),
}

impl Error {
    /// Storage failures are worth a single retry; everything else is
    /// surfaced immediately.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Error::Storage(_))
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Storage(e) => write!(f, "storage error: {}", e),
            Error::Generation(e) => write!(f, "generation error: {}", e),
            Error::Input(e) => write!(f, "invalid input: {}", e),
            Error::Extract(e) => write!(f, "extraction error: {}", e),
        }
    }
}

impl std::error::Error for Error {}

impl From<sqlx::Error> for Error {
    fn from(e: sqlx::Error) -> Self {
        Error::Storage(e.to_string())
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::Storage(e.to_string())
    }
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        Error::Generation(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_storage_errors_are_retryable() {
        assert!(Error::Storage("db gone".into()).is_retryable());
        assert!(!Error::Generation("quota".into()).is_retryable());
        assert!(!Error::Input("empty".into()).is_retryable());
        assert!(!Error::Extract("bad pdf".into()).is_retryable());
    }
}
