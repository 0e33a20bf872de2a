//! Error types shared by all preference crates.

use thiserror::Error;

/// Errors that can occur while reading or writing preferences.
///
/// Most public operations never surface these directly: the lenient API logs
/// the error and degrades to "no value" or a no-op. The `try_*` variants
/// return them so callers (and tests) can tell the branches apart.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PrefsError {
    /// The attribute name was never registered, or has since been removed.
    #[error("unknown attribute: {name}")]
    UnknownAttribute { name: String },

    /// The scope (folder, channel) does not exist.
    #[error("unknown scope: {scope}")]
    UnknownScope { scope: String },

    /// An attribute with this name is already registered.
    #[error("attribute already registered: {name}")]
    DuplicateAttribute { name: String },

    /// A registered slot has no default entry. Indicates a broken registry.
    #[error("attribute {name} is registered at slot {slot} but has no default value")]
    MissingDefault { name: String, slot: usize },

    /// A layer-specific structure was never initialized for this instance.
    #[error("{layer} preferences are not present on this layer")]
    LayerAbsent { layer: &'static str },

    /// The preference schema could not be parsed.
    #[error("config error: {0}")]
    Config(String),
}

/// Convenience type alias for preference operations.
pub type PrefsResult<T> = std::result::Result<T, PrefsError>;
