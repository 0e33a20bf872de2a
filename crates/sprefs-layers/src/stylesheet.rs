//! Base layer: stylesheet identity and stylesheet parameters.

use sprefs_store::{CacheKeyBuilder, ScopedAttributeStore};
use sprefs_types::PrefsResult;

use crate::layer::{LayerKind, PreferenceLayer};

/// Parameters are stored as a single unnamed scope.
const PARAMETER_SCOPE: &str = "";

/// Preferences for one stylesheet of one user profile.
///
/// Stylesheet parameters follow the same defaulted model as scoped
/// attributes, with exactly one scope.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StylesheetPreferences {
    profile_id: i32,
    stylesheet_id: i32,
    parameters: ScopedAttributeStore,
}

impl StylesheetPreferences {
    /// Create preferences with no parameters registered.
    pub fn new(profile_id: i32, stylesheet_id: i32) -> Self {
        Self {
            profile_id,
            stylesheet_id,
            parameters: ScopedAttributeStore::new("parameter"),
        }
    }

    /// The owning user profile.
    pub fn profile_id(&self) -> i32 {
        self.profile_id
    }

    /// Reassign the owning user profile.
    pub fn set_profile_id(&mut self, profile_id: i32) {
        self.profile_id = profile_id;
    }

    /// The stylesheet these preferences apply to.
    pub fn stylesheet_id(&self) -> i32 {
        self.stylesheet_id
    }

    /// Reassign the stylesheet.
    pub fn set_stylesheet_id(&mut self, stylesheet_id: i32) {
        self.stylesheet_id = stylesheet_id;
    }

    /// Register a stylesheet parameter. Duplicates are logged and ignored.
    pub fn add_parameter(&mut self, name: impl Into<String>, default: impl Into<String>) -> bool {
        self.parameters.add_attribute(name, default).is_some()
    }

    /// Drop a parameter's name. Returns `true` if it was registered.
    pub fn remove_parameter(&mut self, name: &str) -> bool {
        self.parameters.remove_attribute(name)
    }

    /// Overwrite a parameter's default. Unknown names are an error.
    pub fn set_parameter_default(
        &mut self,
        name: &str,
        value: impl Into<String>,
    ) -> PrefsResult<()> {
        self.parameters.set_default_value(name, value)
    }

    /// Set a parameter's value. Unknown parameters are logged and ignored.
    pub fn set_parameter_value(&mut self, name: &str, value: impl Into<String>) -> bool {
        self.parameters.set_value(PARAMETER_SCOPE, name, value)
    }

    /// The parameter's value, falling back to its default.
    pub fn parameter_value(&self, name: &str) -> Option<&str> {
        self.parameters.effective_value(PARAMETER_SCOPE, name)
    }

    /// The parameter's value only if it was set explicitly.
    pub fn defined_parameter_value(&self, name: &str) -> Option<&str> {
        self.parameters.defined_value(PARAMETER_SCOPE, name)
    }

    /// Strict form of [`Self::parameter_value`].
    pub fn try_parameter_value(&self, name: &str) -> PrefsResult<&str> {
        self.parameters.try_effective_value(PARAMETER_SCOPE, name)
    }

    /// Parameter names in registration order.
    pub fn parameter_names(&self) -> Vec<&str> {
        self.parameters.attribute_names()
    }

    /// `(name, value)` for every parameter in registration order.
    pub fn parameter_values(&self) -> Vec<(&str, &str)> {
        self.parameters.effective_values(PARAMETER_SCOPE)
    }

    /// Start a cache key with this layer's fragment:
    /// `<profile>:<stylesheet>:<p0>,<p1>,...,`.
    pub(crate) fn cache_key_builder(&self) -> CacheKeyBuilder {
        let mut key = CacheKeyBuilder::new();
        key.field(&self.profile_id.to_string())
            .field(&self.stylesheet_id.to_string())
            .values(self.parameter_values().into_iter().map(|(_, v)| v));
        key
    }
}

impl PreferenceLayer for StylesheetPreferences {
    fn kind(&self) -> LayerKind {
        LayerKind::Stylesheet
    }

    fn stylesheet(&self) -> &StylesheetPreferences {
        self
    }

    fn cache_key(&self) -> String {
        self.cache_key_builder().finish()
    }

    fn new_instance(&self) -> Box<dyn PreferenceLayer> {
        Box::new(self.clone())
    }
}
