//! Theme layer: stylesheet preferences plus per-channel attributes.

use sprefs_store::{CacheKeyBuilder, ScopedAttributeStore};
use sprefs_types::PrefsResult;

use crate::layer::{LayerKind, PreferenceLayer};
use crate::stylesheet::StylesheetPreferences;

/// Preferences for a theme transformation.
///
/// Embeds a [`StylesheetPreferences`] and adds channel attributes, each
/// overridable per channel id.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ThemePreferences {
    stylesheet: StylesheetPreferences,
    channels: ScopedAttributeStore,
}

impl ThemePreferences {
    /// Create a theme layer with no parameters and no channel attributes.
    pub fn new(profile_id: i32, stylesheet_id: i32) -> Self {
        Self::from_stylesheet(StylesheetPreferences::new(profile_id, stylesheet_id))
    }

    /// Wrap existing stylesheet preferences with an empty channel store.
    pub fn from_stylesheet(stylesheet: StylesheetPreferences) -> Self {
        Self {
            stylesheet,
            channels: ScopedAttributeStore::new("channel"),
        }
    }

    /// Mutable access to the embedded stylesheet layer.
    pub fn stylesheet_mut(&mut self) -> &mut StylesheetPreferences {
        &mut self.stylesheet
    }

    /// The channel attribute store.
    pub fn channels(&self) -> &ScopedAttributeStore {
        &self.channels
    }

    // ---------------------------------------------------------------
    // Channel attributes
    // ---------------------------------------------------------------

    /// Register a channel attribute. Duplicates are logged and ignored.
    pub fn add_channel_attribute(
        &mut self,
        name: impl Into<String>,
        default: impl Into<String>,
    ) -> bool {
        self.channels.add_attribute(name, default).is_some()
    }

    /// Drop a channel attribute's name. Returns `true` if it was registered.
    pub fn remove_channel_attribute(&mut self, name: &str) -> bool {
        self.channels.remove_attribute(name)
    }

    /// Overwrite a channel attribute's default. Unknown names are an error.
    pub fn set_channel_attribute_default(
        &mut self,
        name: &str,
        value: impl Into<String>,
    ) -> PrefsResult<()> {
        self.channels.set_default_value(name, value)
    }

    /// Channel attribute names in registration order.
    pub fn channel_attribute_names(&self) -> Vec<&str> {
        self.channels.attribute_names()
    }

    // ---------------------------------------------------------------
    // Channels
    // ---------------------------------------------------------------

    /// Add a channel with every attribute at its default. Re-adding resets it.
    pub fn add_channel(&mut self, channel_id: &str) {
        self.channels.create_scope(channel_id);
    }

    /// Remove a channel and its overrides. Returns `true` if it existed.
    pub fn remove_channel(&mut self, channel_id: &str) -> bool {
        self.channels.remove_scope(channel_id)
    }

    /// Returns `true` if the channel exists.
    pub fn has_channel(&self, channel_id: &str) -> bool {
        self.channels.has_scope(channel_id)
    }

    /// Channel ids, sorted.
    pub fn channel_ids(&self) -> Vec<&str> {
        self.channels.scope_ids()
    }

    /// The channel's value for `name`, falling back to the attribute default.
    pub fn channel_attribute_value(&self, channel_id: &str, name: &str) -> Option<&str> {
        self.channels.effective_value(channel_id, name)
    }

    /// The channel's value for `name` only if it was set explicitly.
    pub fn defined_channel_attribute_value(&self, channel_id: &str, name: &str) -> Option<&str> {
        self.channels.defined_value(channel_id, name)
    }

    /// Override `name` for a channel, creating the channel if needed.
    pub fn set_channel_attribute_value(
        &mut self,
        channel_id: &str,
        name: &str,
        value: impl Into<String>,
    ) -> bool {
        self.channels.set_value(channel_id, name, value)
    }

    pub(crate) fn cache_key_builder(&self) -> CacheKeyBuilder {
        let mut key = self.stylesheet.cache_key_builder();
        self.channels.write_cache_sections(&mut key);
        key
    }
}

impl PreferenceLayer for ThemePreferences {
    fn kind(&self) -> LayerKind {
        LayerKind::Theme
    }

    fn stylesheet(&self) -> &StylesheetPreferences {
        &self.stylesheet
    }

    fn cache_key(&self) -> String {
        self.cache_key_builder().finish()
    }

    fn new_instance(&self) -> Box<dyn PreferenceLayer> {
        Box::new(self.clone())
    }

    fn as_theme(&self) -> Option<&ThemePreferences> {
        Some(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn theme() -> ThemePreferences {
        let mut theme = ThemePreferences::new(1, 2);
        theme.stylesheet_mut().add_parameter("skin", "default");
        theme.add_channel_attribute("minimized", "false");
        theme.add_channel_attribute("width", "100%");
        theme
    }

    #[test]
    fn channel_attributes_resolve_like_scopes() {
        let mut theme = theme();
        theme.add_channel("ch1");
        assert!(theme.has_channel("ch1"));
        assert!(theme.set_channel_attribute_value("ch1", "minimized", "true"));

        assert_eq!(theme.channel_attribute_value("ch1", "minimized"), Some("true"));
        assert_eq!(theme.channel_attribute_value("ch1", "width"), Some("100%"));
        assert_eq!(theme.defined_channel_attribute_value("ch1", "width"), None);
        assert_eq!(theme.channel_attribute_value("ch2", "minimized"), Some("false"));
        assert_eq!(theme.channel_attribute_value("ch1", "nope"), None);
    }

    #[test]
    fn channel_lifecycle() {
        let mut theme = theme();
        theme.add_channel("b");
        theme.add_channel("a");
        assert_eq!(theme.channel_ids(), vec!["a", "b"]);
        assert!(theme.remove_channel("a"));
        assert!(!theme.remove_channel("a"));
        assert_eq!(theme.channel_ids(), vec!["b"]);
    }

    #[test]
    fn channel_attribute_registry() {
        let mut theme = theme();
        assert!(!theme.add_channel_attribute("width", "50%"));
        theme.set_channel_attribute_default("width", "75%").unwrap();
        assert_eq!(theme.channel_attribute_value("any", "width"), Some("75%"));
        assert!(theme.remove_channel_attribute("minimized"));
        assert_eq!(theme.channel_attribute_names(), vec!["width"]);
    }

    #[test]
    fn cache_key_appends_channel_sections_to_base_key() {
        let mut theme = theme();
        theme.set_channel_attribute_value("ch1", "minimized", "true");
        let base = theme.stylesheet().cache_key();
        assert_eq!(base, "1:2:default,");
        assert_eq!(theme.cache_key(), format!("{base}(channel:ch1:true,100%,)"));
    }

    #[test]
    fn clone_is_independent() {
        let original = theme();
        let mut copy = original.clone();
        copy.set_channel_attribute_value("ch1", "width", "10%");
        copy.stylesheet_mut().set_parameter_value("skin", "dark");

        assert!(!original.has_channel("ch1"));
        assert_eq!(original.stylesheet().parameter_value("skin"), Some("default"));
    }
}
