//! Declarative layer schemas loaded from TOML.
//!
//! ```toml
//! profile_id = 1
//! stylesheet_id = 4
//!
//! [[parameters]]
//! name = "skin"
//! default = "default"
//!
//! [[folder_attributes]]
//! name = "width"
//! default = "100px"
//! ```
//!
//! Attributes are registered in declaration order, so slot numbers follow
//! the order of the file.

use serde::{Deserialize, Serialize};
use sprefs_types::{PrefsError, PrefsResult};

use crate::structure::StructurePreferences;
use crate::stylesheet::StylesheetPreferences;
use crate::theme::ThemePreferences;

/// One attribute or parameter declaration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeDecl {
    pub name: String,
    #[serde(default)]
    pub default: String,
}

impl AttributeDecl {
    /// Declare an attribute with its default.
    pub fn new(name: impl Into<String>, default: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            default: default.into(),
        }
    }
}

/// The attribute layout of a set of preference layers.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PreferenceSchema {
    pub profile_id: i32,
    pub stylesheet_id: i32,
    pub parameters: Vec<AttributeDecl>,
    pub channel_attributes: Vec<AttributeDecl>,
    pub folder_attributes: Vec<AttributeDecl>,
}

impl PreferenceSchema {
    /// Parse a schema from TOML. Missing tables default to empty.
    pub fn from_toml_str(input: &str) -> PrefsResult<Self> {
        toml::from_str(input).map_err(|e| PrefsError::Config(e.to_string()))
    }

    /// Serialize the schema back to TOML.
    pub fn to_toml_string(&self) -> PrefsResult<String> {
        toml::to_string(self).map_err(|e| PrefsError::Config(e.to_string()))
    }

    /// Base layer with every declared parameter registered.
    ///
    /// Duplicate declarations are logged and the first one wins.
    pub fn build_stylesheet(&self) -> StylesheetPreferences {
        let mut prefs = StylesheetPreferences::new(self.profile_id, self.stylesheet_id);
        for decl in &self.parameters {
            prefs.add_parameter(decl.name.as_str(), decl.default.as_str());
        }
        prefs
    }

    /// Theme layer with parameters and channel attributes registered.
    pub fn build_theme(&self) -> ThemePreferences {
        let mut theme = ThemePreferences::from_stylesheet(self.build_stylesheet());
        for decl in &self.channel_attributes {
            theme.add_channel_attribute(decl.name.as_str(), decl.default.as_str());
        }
        theme
    }

    /// Structure layer with every declaration registered.
    pub fn build_structure(&self) -> StructurePreferences {
        let mut prefs = StructurePreferences::from_theme(&self.build_theme());
        let folders = prefs.ensure_folder_store();
        for decl in &self.folder_attributes {
            folders.add_attribute(decl.name.as_str(), decl.default.as_str());
        }
        prefs
    }
}
