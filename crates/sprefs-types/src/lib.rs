//! Foundation types for stylesheet preference layers.
//!
//! Every other `sprefs` crate depends on this one for its error type and the
//! [`Slot`] index that ties attribute names to positional storage.
//!
//! # Key Types
//!
//! - [`PrefsError`] — The shared error taxonomy (unknown attribute, unknown
//!   scope, duplicate registration, ...)
//! - [`Slot`] — Stable positional index assigned to an attribute

pub mod error;
pub mod slot;

pub use error::{PrefsError, PrefsResult};
pub use slot::Slot;
