//! The [`ScopedAttributeStore`]: per-scope sparse overrides over a registry.
//!
//! Each scope holds a `Vec<Option<String>>` indexed by slot. The vector may
//! be shorter than the registry's slot count; anything past its end, or a
//! `None` inside it, means "not overridden". Writes grow the vector with
//! `None` placeholders so every position stays aligned with its slot.

use std::collections::BTreeMap;

use sprefs_registry::AttributeRegistry;
use sprefs_types::{PrefsError, PrefsResult, Slot};
use tracing::{debug, error, warn};

use crate::cache_key::{cache_digest, CacheKeyBuilder};

type Overrides = Vec<Option<String>>;

/// Attribute values overridable per scope, with registry defaults.
///
/// `kind` names what the scopes are ("folder", "channel") and tags both log
/// events and cache-key sections. Cloning deep-copies the registry and every
/// scope; the copy shares nothing with its source.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScopedAttributeStore {
    kind: &'static str,
    registry: AttributeRegistry,
    scopes: BTreeMap<String, Overrides>,
}

impl ScopedAttributeStore {
    /// Create an empty store whose scopes are of the given kind.
    pub fn new(kind: &'static str) -> Self {
        Self::with_registry(kind, AttributeRegistry::new())
    }

    /// Create an empty store over an existing registry.
    pub fn with_registry(kind: &'static str, registry: AttributeRegistry) -> Self {
        Self {
            kind,
            registry,
            scopes: BTreeMap::new(),
        }
    }

    /// What the scopes of this store are ("folder", "channel", ...).
    pub fn kind(&self) -> &'static str {
        self.kind
    }

    /// The attribute registry backing this store.
    pub fn registry(&self) -> &AttributeRegistry {
        &self.registry
    }

    // ---------------------------------------------------------------
    // Attribute registration
    // ---------------------------------------------------------------

    /// Register an attribute. See [`AttributeRegistry::try_add_attribute`].
    pub fn try_add_attribute(
        &mut self,
        name: impl Into<String>,
        default: impl Into<String>,
    ) -> PrefsResult<Slot> {
        self.registry.try_add_attribute(name, default)
    }

    /// Register an attribute, logging and ignoring duplicates.
    pub fn add_attribute(
        &mut self,
        name: impl Into<String>,
        default: impl Into<String>,
    ) -> Option<Slot> {
        match self.try_add_attribute(name, default) {
            Ok(slot) => Some(slot),
            Err(e) => {
                error!(kind = self.kind, error = %e, "ignoring attribute re-registration");
                None
            }
        }
    }

    /// Overwrite an attribute's default. Unknown names are a hard error.
    pub fn set_default_value(&mut self, name: &str, value: impl Into<String>) -> PrefsResult<()> {
        self.registry.set_default_value(name, value)
    }

    /// Drop an attribute's name. Stored overrides at its slot stay in place.
    pub fn try_remove_attribute(&mut self, name: &str) -> PrefsResult<Slot> {
        self.registry.try_remove_attribute(name)
    }

    /// Drop an attribute's name, logging if it was not registered.
    pub fn remove_attribute(&mut self, name: &str) -> bool {
        match self.try_remove_attribute(name) {
            Ok(_) => true,
            Err(e) => {
                error!(kind = self.kind, error = %e, "cannot remove attribute");
                false
            }
        }
    }

    /// Registered attribute names in slot order.
    pub fn attribute_names(&self) -> Vec<&str> {
        self.registry.names()
    }

    // ---------------------------------------------------------------
    // Reads
    // ---------------------------------------------------------------

    /// Resolve `attribute` for `scope`: the override if set, else the default.
    ///
    /// An unknown scope resolves every attribute to its default.
    pub fn try_effective_value(&self, scope: &str, attribute: &str) -> PrefsResult<&str> {
        let slot = self.registry.try_slot_of(attribute)?;
        if let Some(value) = self.stored_at(scope, slot) {
            return Ok(value);
        }
        self.default_for(attribute, slot)
    }

    /// Lenient form of [`Self::try_effective_value`]; logs and returns `None`
    /// for unknown attributes.
    pub fn effective_value(&self, scope: &str, attribute: &str) -> Option<&str> {
        match self.try_effective_value(scope, attribute) {
            Ok(value) => Some(value),
            Err(e) => {
                error!(kind = self.kind, scope, error = %e, "cannot resolve attribute value");
                None
            }
        }
    }

    /// The override for `attribute` in `scope`, ignoring defaults.
    ///
    /// `Ok(None)` when the scope is unknown or the attribute is not
    /// overridden there.
    pub fn try_defined_value(&self, scope: &str, attribute: &str) -> PrefsResult<Option<&str>> {
        let slot = self.registry.try_slot_of(attribute)?;
        Ok(self.stored_at(scope, slot))
    }

    /// Lenient form of [`Self::try_defined_value`]; logs unknown attributes.
    pub fn defined_value(&self, scope: &str, attribute: &str) -> Option<&str> {
        match self.try_defined_value(scope, attribute) {
            Ok(value) => value,
            Err(e) => {
                error!(kind = self.kind, scope, error = %e, "cannot read attribute override");
                None
            }
        }
    }

    /// `(name, effective value)` for every registered attribute of `scope`,
    /// in slot order.
    pub fn effective_values(&self, scope: &str) -> Vec<(&str, &str)> {
        self.registry
            .entries()
            .into_iter()
            .filter_map(|(name, slot)| {
                let value = self
                    .stored_at(scope, slot)
                    .or_else(|| self.registry.default_at(slot))?;
                Some((name, value))
            })
            .collect()
    }

    /// Raw positional read, bypassing the name mapping.
    ///
    /// Still returns data at orphaned slots of removed attributes.
    pub fn stored_at(&self, scope: &str, slot: Slot) -> Option<&str> {
        self.scopes
            .get(scope)
            .and_then(|values| values.get(slot.index()))
            .and_then(|value| value.as_deref())
    }

    fn default_for(&self, attribute: &str, slot: Slot) -> PrefsResult<&str> {
        debug_assert!(
            slot.index() < self.registry.slot_count(),
            "attribute {attribute} registered at {slot} without a default"
        );
        self.registry
            .default_at(slot)
            .ok_or_else(|| PrefsError::MissingDefault {
                name: attribute.to_string(),
                slot: slot.index(),
            })
    }

    // ---------------------------------------------------------------
    // Writes
    // ---------------------------------------------------------------

    /// Override `attribute` in `scope`, creating the scope if needed.
    pub fn try_set_value(
        &mut self,
        scope: &str,
        attribute: &str,
        value: impl Into<String>,
    ) -> PrefsResult<()> {
        let slot = self.registry.try_slot_of(attribute)?;
        let values = self.scopes.entry(scope.to_string()).or_default();
        let index = slot.index();
        if index >= values.len() {
            values.resize(index + 1, None);
        }
        values[index] = Some(value.into());
        Ok(())
    }

    /// Lenient form of [`Self::try_set_value`]; logs and ignores unknown
    /// attributes. Returns `true` if the value was written.
    pub fn set_value(&mut self, scope: &str, attribute: &str, value: impl Into<String>) -> bool {
        match self.try_set_value(scope, attribute, value) {
            Ok(()) => true,
            Err(e) => {
                error!(kind = self.kind, scope, error = %e, "cannot set attribute value");
                false
            }
        }
    }

    // ---------------------------------------------------------------
    // Scope lifecycle
    // ---------------------------------------------------------------

    /// Create `scope` with no overrides.
    ///
    /// Re-creating an existing scope resets it, discarding every override it
    /// held. Returns `true` if an existing scope was reset.
    pub fn create_scope(&mut self, scope: &str) -> bool {
        let fresh = Vec::with_capacity(self.registry.slot_count());
        let reset = self.scopes.insert(scope.to_string(), fresh).is_some();
        if reset {
            warn!(
                kind = self.kind,
                scope,
                "re-creating existing scope; all values reset to defaults"
            );
        } else {
            debug!(kind = self.kind, scope, "scope created");
        }
        reset
    }

    /// Remove `scope` and all of its overrides.
    pub fn try_remove_scope(&mut self, scope: &str) -> PrefsResult<()> {
        self.scopes
            .remove(scope)
            .map(|_| ())
            .ok_or_else(|| PrefsError::UnknownScope {
                scope: scope.to_string(),
            })
    }

    /// Lenient form of [`Self::try_remove_scope`]. Returns `true` if removed.
    pub fn remove_scope(&mut self, scope: &str) -> bool {
        match self.try_remove_scope(scope) {
            Ok(()) => true,
            Err(e) => {
                error!(kind = self.kind, error = %e, "cannot remove scope");
                false
            }
        }
    }

    /// Returns `true` if `scope` exists.
    pub fn has_scope(&self, scope: &str) -> bool {
        self.scopes.contains_key(scope)
    }

    /// All scope ids, sorted.
    pub fn scope_ids(&self) -> Vec<&str> {
        self.scopes.keys().map(String::as_str).collect()
    }

    /// Number of scopes.
    pub fn scope_count(&self) -> usize {
        self.scopes.len()
    }

    // ---------------------------------------------------------------
    // Cache key
    // ---------------------------------------------------------------

    /// Append one section per scope (sorted by id) to `key`, each listing
    /// the effective value of every live slot in slot order.
    pub fn write_cache_sections(&self, key: &mut CacheKeyBuilder) {
        let slots = self.registry.live_slots();
        for (scope, values) in &self.scopes {
            let effective = slots.iter().map(|slot| {
                values
                    .get(slot.index())
                    .and_then(|v| v.as_deref())
                    .or_else(|| self.registry.default_at(*slot))
                    .unwrap_or_default()
            });
            key.section(self.kind, scope, effective);
        }
    }

    /// The canonical cache key of this store's effective state.
    pub fn derive_cache_key(&self) -> String {
        let mut key = CacheKeyBuilder::new();
        self.write_cache_sections(&mut key);
        key.finish()
    }

    /// Fixed-length digest of [`Self::derive_cache_key`].
    pub fn cache_digest(&self) -> String {
        cache_digest(&self.derive_cache_key())
    }
}
