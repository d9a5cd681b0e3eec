//! Error types for recache

use std::fmt;

/// Result type alias for recache operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for cache-internal index operations.
///
/// Public cache operations never surface these for well-formed input:
/// they arise only when the hash index and the recency chain fall out
/// of sync, which is a programming error, not a caller condition.
#[derive(Debug, PartialEq, Eq)]
pub enum Error {
    /// Index removal targeted a key that is not present
    NotFound,

    /// Index insertion targeted a key that is already present
    DuplicateKey,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::NotFound => write!(f, "key not present in cache index"),
            Error::DuplicateKey => write!(f, "key already present in cache index"),
        }
    }
}

impl std::error::Error for Error {}
