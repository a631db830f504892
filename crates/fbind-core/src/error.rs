#![forbid(unsafe_code)]

//! Error types for path parsing.

use thiserror::Error;

/// Failure to parse a dotted path expression.
///
/// Surfaced synchronously at the point of misuse; resolution misses are not
/// errors (see [`crate::resolve`]).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PathError {
    /// The path expression was empty.
    #[error("path expression is empty")]
    Empty,

    /// The path expression contains an empty segment (`"a..b"`, or a leading
    /// or trailing dot).
    #[error("path expression contains an empty segment")]
    EmptySegment,

    /// A segment is not a valid identifier.
    #[error("path segment `{segment}` is not a valid identifier")]
    BadSegment {
        /// The offending segment.
        segment: String,
    },
}
