//! Scoped attribute store for stylesheet preferences.
//!
//! A [`ScopedAttributeStore`] owns an
//! [`AttributeRegistry`](sprefs_registry::AttributeRegistry) and, for each
//! scope (a folder, a channel), a sparse sequence of overrides indexed by
//! slot. Reads resolve through the registry's defaults; a scope that never
//! overrode an attribute sees the default.
//!
//! # Modules
//!
//! - [`scoped`] — The [`ScopedAttributeStore`]
//! - [`cache_key`] — Canonical cache-key encoding and its fixed-length digest

pub mod cache_key;
pub mod scoped;

pub use cache_key::{cache_digest, CacheKeyBuilder};
pub use scoped::ScopedAttributeStore;
