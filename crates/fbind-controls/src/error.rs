#![forbid(unsafe_code)]

//! Error types for binding construction.

use fbind_core::PathError;
use thiserror::Error;

/// Failure to construct a binding or option group.
///
/// All validation happens eagerly at construction, before any UI
/// interaction; nothing is deferred into a later render cycle.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BindingError {
    /// A required constructor parameter was absent or blank.
    #[error("missing required parameter `{0}`")]
    MissingParameter(&'static str),

    /// The supplied path expression failed to parse.
    #[error(transparent)]
    Path(#[from] PathError),
}
