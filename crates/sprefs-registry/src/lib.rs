//! Attribute registry for stylesheet preferences.
//!
//! The registry maps attribute names to stable [`Slot`](sprefs_types::Slot)
//! numbers and holds one default value per slot. Slots are assigned in
//! registration order and are append-only: removing an attribute drops its
//! name but leaves the slot (and its default) in place, so positional storage
//! keyed by slot never shifts underneath a caller.
//!
//! # Modules
//!
//! - [`registry`] — The [`AttributeRegistry`] itself

pub mod registry;

pub use registry::AttributeRegistry;
