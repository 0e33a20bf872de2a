//! The [`PreferenceLayer`] trait shared by every preference layer.

use std::fmt;

use sprefs_store::cache_digest;

use crate::structure::StructurePreferences;
use crate::stylesheet::StylesheetPreferences;
use crate::theme::ThemePreferences;

/// Which concrete layer a [`PreferenceLayer`] is.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum LayerKind {
    Stylesheet,
    Theme,
    Structure,
}

impl fmt::Display for LayerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Stylesheet => "stylesheet",
            Self::Theme => "theme",
            Self::Structure => "structure",
        };
        f.write_str(name)
    }
}

/// A set of user preferences for one stylesheet transformation.
///
/// Layers compose: a theme layer embeds a stylesheet layer and a structure
/// layer embeds a theme layer. Each layer's cache key is the key of the
/// layer it embeds followed by its own sections.
pub trait PreferenceLayer: fmt::Debug {
    /// The concrete layer type.
    fn kind(&self) -> LayerKind;

    /// The base stylesheet layer every layer carries.
    fn stylesheet(&self) -> &StylesheetPreferences;

    /// Canonical cache key of the effective state.
    fn cache_key(&self) -> String;

    /// Fixed-length digest of [`Self::cache_key`].
    fn cache_digest(&self) -> String {
        cache_digest(&self.cache_key())
    }

    /// A deep copy with the same concrete type as `self`.
    ///
    /// Never downgrades: a structure layer copies into a structure layer,
    /// keeping its folder store (or its absence) as is.
    fn new_instance(&self) -> Box<dyn PreferenceLayer>;

    /// The theme layer, if this layer has one.
    fn as_theme(&self) -> Option<&ThemePreferences> {
        None
    }

    /// The structure layer, if this is one.
    fn as_structure(&self) -> Option<&StructurePreferences> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layers() -> Vec<Box<dyn PreferenceLayer>> {
        let mut structure = StructurePreferences::new(1, 2);
        structure.add_folder_attribute("width", "100px");
        structure.set_folder_attribute_value("f1", "width", "250px");

        let mut theme = ThemePreferences::new(1, 3);
        theme.add_channel_attribute("minimized", "false");

        vec![
            Box::new(StylesheetPreferences::new(1, 4)),
            Box::new(theme),
            Box::new(structure),
        ]
    }

    #[test]
    fn kind_display() {
        assert_eq!(LayerKind::Stylesheet.to_string(), "stylesheet");
        assert_eq!(LayerKind::Theme.to_string(), "theme");
        assert_eq!(LayerKind::Structure.to_string(), "structure");
    }

    #[test]
    fn new_instance_keeps_the_concrete_layer() {
        for layer in layers() {
            let copy = layer.new_instance();
            assert_eq!(copy.kind(), layer.kind());
            assert_eq!(copy.cache_key(), layer.cache_key());
            assert_eq!(copy.cache_digest(), layer.cache_digest());
        }
    }

    #[test]
    fn downcasts_follow_the_hierarchy() {
        let all = layers();
        assert!(all[0].as_theme().is_none());
        assert!(all[0].as_structure().is_none());
        assert!(all[1].as_theme().is_some());
        assert!(all[1].as_structure().is_none());
        assert!(all[2].as_theme().is_some());
        assert!(all[2].as_structure().is_some());
    }

    #[test]
    fn structure_copy_through_trait_object_keeps_folders() {
        let all = layers();
        let copy = all[2].new_instance();
        let structure = copy.as_structure().unwrap();
        assert_eq!(
            structure.folder_attribute_value("f1", "width"),
            Some("250px")
        );
    }
}
