#![forbid(unsafe_code)]

//! Dotted path expressions and tree access.
//!
//! A [`PathExpr`] names a field inside a nested [`Value`] tree by a sequence
//! of property-access segments (`"a.b.c"`). Validation happens at parse time;
//! every `PathExpr` in circulation has at least one segment and every segment
//! is a non-empty identifier.
//!
//! # Invariants
//!
//! 1. [`resolve`] never mutates and returns `None` the first time a segment
//!    is missing or the intermediate is not an object.
//! 2. [`assign`] for a parsed path never fails: missing (or non-object)
//!    intermediates are replaced with empty objects, and sibling fields are
//!    preserved.
//! 3. Round trip: `assign(root, p, v)` followed by `resolve(root, p)` yields
//!    `Some(&v)` for any starting `root`, including `{}`.
//!
//! # Failure Modes
//!
//! - Parse: empty path, empty segment, or non-identifier segment each fail
//!   with the corresponding [`PathError`] — synchronously, at the call site.
//! - Resolution miss: `None`, by design not an error.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::PathError;

/// An immutable, validated dotted path into a [`Value`] tree.
///
/// # Example
///
/// ```
/// use fbind_core::PathExpr;
///
/// let path = PathExpr::parse("user.address.city").unwrap();
/// assert_eq!(path.segments().len(), 3);
/// assert_eq!(path.to_string(), "user.address.city");
///
/// assert!(PathExpr::parse("").is_err());
/// assert!(PathExpr::parse("a..b").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PathExpr {
    segments: Vec<String>,
}

impl PathExpr {
    /// Parse a dotted path, validating every segment.
    pub fn parse(path: &str) -> Result<Self, PathError> {
        if path.is_empty() {
            return Err(PathError::Empty);
        }
        let mut segments = Vec::new();
        for segment in path.split('.') {
            if segment.is_empty() {
                return Err(PathError::EmptySegment);
            }
            if !is_identifier(segment) {
                return Err(PathError::BadSegment {
                    segment: segment.to_string(),
                });
            }
            segments.push(segment.to_string());
        }
        Ok(Self { segments })
    }

    /// The property-access segments, in order. Never empty.
    #[must_use]
    pub fn segments(&self) -> &[String] {
        &self.segments
    }
}

fn is_identifier(segment: &str) -> bool {
    let mut chars = segment.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

impl fmt::Display for PathExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.segments.join("."))
    }
}

impl FromStr for PathExpr {
    type Err = PathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for PathExpr {
    type Error = PathError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}

impl From<PathExpr> for String {
    fn from(path: PathExpr) -> Self {
        path.to_string()
    }
}

/// Walk `root` along `path`, returning the addressed value.
///
/// Returns `None` the first time a segment is missing or an intermediate is
/// not an object — a lookup-miss signal, not a fault, so callers can probe
/// speculative paths safely.
#[must_use]
pub fn resolve<'a>(root: &'a Value, path: &PathExpr) -> Option<&'a Value> {
    let mut current = root;
    for segment in path.segments() {
        current = current.as_object()?.get(segment)?;
    }
    Some(current)
}

/// Mutable variant of [`resolve`] with the same miss policy.
#[must_use]
pub fn resolve_mut<'a>(root: &'a mut Value, path: &PathExpr) -> Option<&'a mut Value> {
    let mut current = root;
    for segment in path.segments() {
        current = current.as_object_mut()?.get_mut(segment)?;
    }
    Some(current)
}

/// Assign `value` at `path`, mutating `root` in place.
///
/// Walks all segments but the last, inserting an empty object wherever an
/// intermediate is missing, then writes the final segment. A non-object
/// intermediate (including `root` itself) is replaced with an empty object:
/// the write side is permissive and never fails for a parsed path.
pub fn assign(root: &mut Value, path: &PathExpr, value: Value) {
    let (last, prefix) = path
        .segments()
        .split_last()
        .expect("PathExpr segments are never empty");
    let mut current = root;
    for segment in prefix {
        current = ensure_object(current)
            .entry(segment.as_str())
            .or_insert_with(|| Value::Object(Map::new()));
    }
    ensure_object(current).insert(last.clone(), value);
}

fn ensure_object(slot: &mut Value) -> &mut Map<String, Value> {
    if !slot.is_object() {
        *slot = Value::Object(Map::new());
    }
    slot.as_object_mut().expect("slot was just coerced to an object")
}

/// Parse `path` and resolve it in one step.
///
/// The only error is a malformed path; an unreachable path is `Ok(None)`.
pub fn get<'a>(root: &'a Value, path: &str) -> Result<Option<&'a Value>, PathError> {
    let expr = PathExpr::parse(path)?;
    Ok(resolve(root, &expr))
}

/// Parse `path` and assign in one step.
pub fn set(root: &mut Value, path: &str, value: impl Into<Value>) -> Result<(), PathError> {
    let expr = PathExpr::parse(path)?;
    assign(root, &expr, value.into());
    Ok(())
}
