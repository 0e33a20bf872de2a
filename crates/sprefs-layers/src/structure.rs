//! Structure layer: theme preferences plus per-folder attributes.
//!
//! A structure layer can be built three ways:
//!
//! - [`StructurePreferences::new`] — everything fresh, with an empty folder
//!   store
//! - `clone()` — a deep copy of another structure layer, folder store (or its
//!   absence) included
//! - [`StructurePreferences::from_theme`] — wraps a theme layer only; the
//!   folder store is absent, and every folder operation logs and degrades
//!   until [`StructurePreferences::ensure_folder_store`] is called

use sprefs_store::ScopedAttributeStore;
use sprefs_types::{PrefsError, PrefsResult, Slot};
use tracing::error;

use crate::layer::{LayerKind, PreferenceLayer};
use crate::stylesheet::StylesheetPreferences;
use crate::theme::ThemePreferences;

const FOLDER_KIND: &str = "folder";

/// Preferences for a structure transformation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StructurePreferences {
    theme: ThemePreferences,
    folders: Option<ScopedAttributeStore>,
}

impl StructurePreferences {
    /// Create a layer with fresh theme state and an empty folder store.
    pub fn new(profile_id: i32, stylesheet_id: i32) -> Self {
        Self {
            theme: ThemePreferences::new(profile_id, stylesheet_id),
            folders: Some(ScopedAttributeStore::new(FOLDER_KIND)),
        }
    }

    /// Deep-copy a theme layer into a structure layer without folder state.
    ///
    /// Used when a theme transformation is run through structure-typed
    /// plumbing: the theme state is preserved and folder preferences are
    /// explicitly absent rather than empty.
    pub fn from_theme(theme: &ThemePreferences) -> Self {
        Self {
            theme: theme.clone(),
            folders: None,
        }
    }

    /// The embedded theme layer.
    pub fn theme(&self) -> &ThemePreferences {
        &self.theme
    }

    /// Mutable access to the embedded theme layer.
    pub fn theme_mut(&mut self) -> &mut ThemePreferences {
        &mut self.theme
    }

    /// Returns `true` if this layer carries folder preferences.
    pub fn has_folder_store(&self) -> bool {
        self.folders.is_some()
    }

    /// Give a degraded layer an empty folder store. No-op if one exists.
    pub fn ensure_folder_store(&mut self) -> &mut ScopedAttributeStore {
        self.folders
            .get_or_insert_with(|| ScopedAttributeStore::new(FOLDER_KIND))
    }

    /// The folder store, or [`PrefsError::LayerAbsent`].
    pub fn folders(&self) -> PrefsResult<&ScopedAttributeStore> {
        self.folders
            .as_ref()
            .ok_or(PrefsError::LayerAbsent { layer: FOLDER_KIND })
    }

    /// Mutable folder store, or [`PrefsError::LayerAbsent`].
    pub fn folders_mut(&mut self) -> PrefsResult<&mut ScopedAttributeStore> {
        self.folders
            .as_mut()
            .ok_or(PrefsError::LayerAbsent { layer: FOLDER_KIND })
    }

    fn with_folders<'a, T>(
        &'a self,
        op: &str,
        f: impl FnOnce(&'a ScopedAttributeStore) -> Option<T>,
    ) -> Option<T> {
        match self.folders() {
            Ok(store) => f(store),
            Err(e) => {
                error!(op, error = %e, "folder operation on a layer without folder preferences");
                None
            }
        }
    }

    fn with_folders_mut<T>(
        &mut self,
        op: &str,
        f: impl FnOnce(&mut ScopedAttributeStore) -> T,
    ) -> Option<T> {
        match self.folders_mut() {
            Ok(store) => Some(f(store)),
            Err(e) => {
                error!(op, error = %e, "folder operation on a layer without folder preferences");
                None
            }
        }
    }

    // ---------------------------------------------------------------
    // Folder attributes
    // ---------------------------------------------------------------

    /// Register a folder attribute. Duplicates are logged and ignored.
    pub fn add_folder_attribute(
        &mut self,
        name: impl Into<String>,
        default: impl Into<String>,
    ) -> Option<Slot> {
        self.with_folders_mut("add_folder_attribute", |store| store.add_attribute(name, default))
            .flatten()
    }

    /// Drop a folder attribute's name. Returns `true` if it was registered.
    pub fn remove_folder_attribute(&mut self, name: &str) -> bool {
        self.with_folders_mut("remove_folder_attribute", |store| store.remove_attribute(name))
            .unwrap_or(false)
    }

    /// Overwrite a folder attribute's default.
    ///
    /// Fails on an unknown attribute or an absent folder store.
    pub fn set_folder_attribute_default(
        &mut self,
        name: &str,
        value: impl Into<String>,
    ) -> PrefsResult<()> {
        self.folders_mut()?.set_default_value(name, value)
    }

    /// Folder attribute names in registration order.
    pub fn folder_attribute_names(&self) -> Vec<&str> {
        self.with_folders("folder_attribute_names", |store| Some(store.attribute_names()))
            .unwrap_or_default()
    }

    // ---------------------------------------------------------------
    // Folders
    // ---------------------------------------------------------------

    /// Add a folder with every attribute at its default. Re-adding resets it.
    pub fn add_folder(&mut self, folder_id: &str) {
        self.with_folders_mut("add_folder", |store| store.create_scope(folder_id));
    }

    /// Remove a folder and its overrides. Returns `true` if it existed.
    pub fn remove_folder(&mut self, folder_id: &str) -> bool {
        self.with_folders_mut("remove_folder", |store| store.remove_scope(folder_id))
            .unwrap_or(false)
    }

    /// Returns `true` if the folder exists. Always `false` without a folder
    /// store.
    pub fn has_folder(&self, folder_id: &str) -> bool {
        self.with_folders("has_folder", |store| Some(store.has_scope(folder_id)))
            .unwrap_or(false)
    }

    /// Folder ids, sorted.
    pub fn folder_ids(&self) -> Vec<&str> {
        self.with_folders("folder_ids", |store| Some(store.scope_ids()))
            .unwrap_or_default()
    }

    /// The folder's value for `name`, falling back to the attribute default.
    pub fn folder_attribute_value(&self, folder_id: &str, name: &str) -> Option<&str> {
        self.with_folders("folder_attribute_value", |store| {
            store.effective_value(folder_id, name)
        })
    }

    /// The folder's value for `name` only if it was set explicitly.
    pub fn defined_folder_attribute_value(&self, folder_id: &str, name: &str) -> Option<&str> {
        self.with_folders("defined_folder_attribute_value", |store| {
            store.defined_value(folder_id, name)
        })
    }

    /// Override `name` for a folder, creating the folder if needed.
    ///
    /// Returns `false` for an unknown attribute or an absent folder store.
    pub fn set_folder_attribute_value(
        &mut self,
        folder_id: &str,
        name: &str,
        value: impl Into<String>,
    ) -> bool {
        self.with_folders_mut("set_folder_attribute_value", |store| {
            store.set_value(folder_id, name, value)
        })
        .unwrap_or(false)
    }
}

impl From<&ThemePreferences> for StructurePreferences {
    fn from(theme: &ThemePreferences) -> Self {
        Self::from_theme(theme)
    }
}

impl PreferenceLayer for StructurePreferences {
    fn kind(&self) -> LayerKind {
        LayerKind::Structure
    }

    fn stylesheet(&self) -> &StylesheetPreferences {
        self.theme.stylesheet()
    }

    /// The theme key followed by one section per folder. A layer without a
    /// folder store contributes nothing beyond the theme key.
    fn cache_key(&self) -> String {
        let mut key = self.theme.cache_key_builder();
        if let Some(folders) = &self.folders {
            folders.write_cache_sections(&mut key);
        }
        key.finish()
    }

    fn new_instance(&self) -> Box<dyn PreferenceLayer> {
        Box::new(self.clone())
    }

    fn as_theme(&self) -> Option<&ThemePreferences> {
        Some(&self.theme)
    }

    fn as_structure(&self) -> Option<&StructurePreferences> {
        Some(self)
    }
}
