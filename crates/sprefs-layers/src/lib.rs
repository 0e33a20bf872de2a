//! Preference layers for stylesheet transformations.
//!
//! Three layers, each embedding the one below it:
//!
//! - [`StylesheetPreferences`] — profile/stylesheet ids and stylesheet
//!   parameters with defaults
//! - [`ThemePreferences`] — adds per-channel attributes
//! - [`StructurePreferences`] — adds per-folder attributes, which may be
//!   absent when the layer was built from a theme layer alone
//!
//! Every layer implements [`PreferenceLayer`], so a rendering pipeline can
//! hold a `Box<dyn PreferenceLayer>`, derive cache keys from it and clone it
//! without losing the richer layer's state.
//!
//! # Modules
//!
//! - [`layer`] — The [`PreferenceLayer`] trait and [`LayerKind`]
//! - [`stylesheet`] — Base layer
//! - [`theme`] — Theme layer
//! - [`structure`] — Structure layer
//! - [`config`] — [`PreferenceSchema`], a TOML-loadable layer declaration

pub mod config;
pub mod layer;
pub mod structure;
pub mod stylesheet;
pub mod theme;

pub use config::{AttributeDecl, PreferenceSchema};
pub use layer::{LayerKind, PreferenceLayer};
pub use structure::StructurePreferences;
pub use stylesheet::StylesheetPreferences;
pub use theme::ThemePreferences;

pub use sprefs_types::{PrefsError, PrefsResult, Slot};
