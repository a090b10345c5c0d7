//! Error types returned by the ordered map and the interval index.

use thiserror::Error;

/// Errors that can occur when querying a tree or building an interval.
///
/// Both variants are recoverable: a failed query never changes the tree, and
/// an invalid interval is rejected before it can reach one.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The query found no matching entry.
    ///
    /// Returned by exact lookups, `min`/`max`/`root` on an empty tree,
    /// `successor` when the key is absent or is the largest key, and the
    /// overlap queries when nothing overlaps.
    #[error("no matching entry found")]
    NotFound,

    /// The high endpoint of an interval is before its low endpoint.
    #[error("invalid interval: high endpoint is before low endpoint")]
    InvalidInterval,
}

/// A Result type alias using our custom Error type.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn error_messages_are_readable() {
        assert_eq!(Error::NotFound.to_string(), "no matching entry found");
        assert!(Error::InvalidInterval.to_string().starts_with("invalid interval"));
    }
}
