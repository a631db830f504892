#![forbid(unsafe_code)]

//! Core path/value plumbing for formbind.
//!
//! This crate provides:
//! - [`PathExpr`] — a validated dotted path (`"user.address.city"`) into a
//!   [`serde_json::Value`] tree.
//! - [`resolve`] / [`resolve_mut`] — miss-tolerant reads along a path.
//! - [`assign`] — permissive writes that create missing intermediates.
//!
//! Reads and writes deliberately have asymmetric failure policy: a read that
//! runs off the tree returns `None` (a lookup miss, not a fault), while a
//! write for a parsed path always succeeds, so a controller's `reset()` or
//! `set_value()` can never fail after the binding was legitimately
//! constructed.

pub mod error;
pub mod path;

pub use error::PathError;
pub use path::{PathExpr, assign, get, resolve, resolve_mut, set};
