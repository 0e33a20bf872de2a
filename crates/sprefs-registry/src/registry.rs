//! The [`AttributeRegistry`]: name to slot mapping plus per-slot defaults.

use std::collections::HashMap;

use sprefs_types::{PrefsError, PrefsResult, Slot};
use tracing::error;

/// Maps attribute names to stable slots and stores one default per slot.
///
/// `defaults` grows by exactly one entry per successful registration, so
/// every slot held in `slots` is a valid index into `defaults`. Removal only
/// drops the name; the default stays behind as an orphan and its slot is
/// never handed out again.
///
/// Cloning produces a fully independent copy.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AttributeRegistry {
    slots: HashMap<String, Slot>,
    defaults: Vec<String>,
}

impl AttributeRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live (not removed) attributes.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Returns `true` if no attribute is currently registered.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Number of slots ever assigned, orphans included.
    pub fn slot_count(&self) -> usize {
        self.defaults.len()
    }

    /// Returns `true` if `name` is currently registered.
    pub fn contains(&self, name: &str) -> bool {
        self.slots.contains_key(name)
    }

    // ---------------------------------------------------------------
    // Registration
    // ---------------------------------------------------------------

    /// Register `name` with `default`, returning its newly assigned slot.
    ///
    /// Fails with [`PrefsError::DuplicateAttribute`] if the name is already
    /// registered; the first registration is kept untouched.
    pub fn try_add_attribute(
        &mut self,
        name: impl Into<String>,
        default: impl Into<String>,
    ) -> PrefsResult<Slot> {
        let name = name.into();
        if self.slots.contains_key(&name) {
            return Err(PrefsError::DuplicateAttribute { name });
        }

        let slot = Slot::new(self.defaults.len());
        self.defaults.push(default.into());
        self.slots.insert(name, slot);
        Ok(slot)
    }

    /// Register `name` with `default`, logging and ignoring duplicates.
    pub fn add_attribute(
        &mut self,
        name: impl Into<String>,
        default: impl Into<String>,
    ) -> Option<Slot> {
        match self.try_add_attribute(name, default) {
            Ok(slot) => Some(slot),
            Err(e) => {
                error!(error = %e, "ignoring attribute re-registration");
                None
            }
        }
    }

    /// Overwrite the default of a registered attribute.
    ///
    /// Calling this for an unregistered name is a programming error and is
    /// reported as [`PrefsError::UnknownAttribute`] rather than ignored.
    pub fn set_default_value(&mut self, name: &str, value: impl Into<String>) -> PrefsResult<()> {
        let slot = self.try_slot_of(name)?;
        let entry = self
            .defaults
            .get_mut(slot.index())
            .ok_or_else(|| PrefsError::MissingDefault {
                name: name.to_string(),
                slot: slot.index(),
            })?;
        *entry = value.into();
        Ok(())
    }

    /// Drop the name mapping for `name`, returning the slot it occupied.
    ///
    /// The default and any scope data at that slot are left in place.
    pub fn try_remove_attribute(&mut self, name: &str) -> PrefsResult<Slot> {
        self.slots
            .remove(name)
            .ok_or_else(|| PrefsError::UnknownAttribute {
                name: name.to_string(),
            })
    }

    /// Drop the name mapping for `name`, logging if it was not registered.
    ///
    /// Returns `true` if an attribute was removed.
    pub fn remove_attribute(&mut self, name: &str) -> bool {
        match self.try_remove_attribute(name) {
            Ok(_) => true,
            Err(e) => {
                error!(error = %e, "cannot remove attribute");
                false
            }
        }
    }

    // ---------------------------------------------------------------
    // Lookup
    // ---------------------------------------------------------------

    /// The slot assigned to `name`, if it is registered.
    pub fn slot_of(&self, name: &str) -> Option<Slot> {
        self.slots.get(name).copied()
    }

    /// The slot assigned to `name`, or [`PrefsError::UnknownAttribute`].
    pub fn try_slot_of(&self, name: &str) -> PrefsResult<Slot> {
        self.slot_of(name).ok_or_else(|| PrefsError::UnknownAttribute {
            name: name.to_string(),
        })
    }

    /// The default stored at `slot`, orphaned slots included.
    pub fn default_at(&self, slot: Slot) -> Option<&str> {
        self.defaults.get(slot.index()).map(String::as_str)
    }

    /// The default value of a registered attribute.
    pub fn try_default_of(&self, name: &str) -> PrefsResult<&str> {
        let slot = self.try_slot_of(name)?;
        debug_assert!(
            slot.index() < self.defaults.len(),
            "slot {slot} for {name} has no default"
        );
        self.default_at(slot).ok_or_else(|| PrefsError::MissingDefault {
            name: name.to_string(),
            slot: slot.index(),
        })
    }

    /// The default value of a registered attribute, logging on failure.
    pub fn default_of(&self, name: &str) -> Option<&str> {
        match self.try_default_of(name) {
            Ok(value) => Some(value),
            Err(e) => {
                error!(error = %e, "cannot resolve attribute default");
                None
            }
        }
    }

    /// Registered attribute names in slot (registration) order.
    pub fn names(&self) -> Vec<&str> {
        self.entries().into_iter().map(|(name, _)| name).collect()
    }

    /// Live `(name, slot)` pairs in slot order.
    pub fn entries(&self) -> Vec<(&str, Slot)> {
        let mut entries: Vec<(&str, Slot)> = self
            .slots
            .iter()
            .map(|(name, slot)| (name.as_str(), *slot))
            .collect();
        entries.sort_by_key(|(_, slot)| *slot);
        entries
    }

    /// Live slots in ascending order.
    pub fn live_slots(&self) -> Vec<Slot> {
        self.entries().into_iter().map(|(_, slot)| slot).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn width_and_color() -> AttributeRegistry {
        let mut reg = AttributeRegistry::new();
        reg.add_attribute("width", "100px");
        reg.add_attribute("color", "blue");
        reg
    }

    #[test]
    fn new_registry_is_empty() {
        let reg = AttributeRegistry::new();
        assert!(reg.is_empty());
        assert_eq!(reg.len(), 0);
        assert_eq!(reg.slot_count(), 0);
        assert!(reg.names().is_empty());
    }

    #[test]
    fn slots_follow_registration_order() {
        let reg = width_and_color();
        assert_eq!(reg.slot_of("width"), Some(Slot::new(0)));
        assert_eq!(reg.slot_of("color"), Some(Slot::new(1)));
        assert_eq!(reg.default_of("width"), Some("100px"));
        assert_eq!(reg.default_of("color"), Some("blue"));
    }

    #[test]
    fn duplicate_registration_keeps_first() {
        let mut reg = width_and_color();
        let err = reg.try_add_attribute("width", "999px").unwrap_err();
        assert!(matches!(err, PrefsError::DuplicateAttribute { .. }));

        assert_eq!(reg.add_attribute("width", "999px"), None);
        assert_eq!(reg.default_of("width"), Some("100px"));
        assert_eq!(reg.slot_count(), 2);
    }

    #[test]
    fn set_default_overwrites_slot() {
        let mut reg = width_and_color();
        reg.set_default_value("color", "red").unwrap();
        assert_eq!(reg.default_of("color"), Some("red"));
        assert_eq!(reg.default_at(Slot::new(1)), Some("red"));
    }

    #[test]
    fn set_default_on_unknown_name_fails_loudly() {
        let mut reg = width_and_color();
        let err = reg.set_default_value("height", "1em").unwrap_err();
        assert_eq!(
            err,
            PrefsError::UnknownAttribute {
                name: "height".into()
            }
        );
    }

    #[test]
    fn removal_does_not_compact_slots() {
        let mut reg = width_and_color();
        assert!(reg.remove_attribute("width"));

        assert!(!reg.contains("width"));
        assert_eq!(reg.slot_count(), 2);
        assert_eq!(reg.default_at(Slot::new(0)), Some("100px"));
        assert_eq!(reg.slot_of("color"), Some(Slot::new(1)));

        // New registrations never reuse the orphaned slot.
        let slot = reg.add_attribute("height", "2em").unwrap();
        assert_eq!(slot, Slot::new(2));
    }

    #[test]
    fn remove_unknown_attribute_is_a_noop() {
        let mut reg = width_and_color();
        assert!(!reg.remove_attribute("height"));
        assert!(matches!(
            reg.try_remove_attribute("height"),
            Err(PrefsError::UnknownAttribute { .. })
        ));
        assert_eq!(reg.len(), 2);
    }

    #[test]
    fn re_adding_a_removed_name_gets_a_fresh_slot() {
        let mut reg = width_and_color();
        reg.remove_attribute("width");
        let slot = reg.add_attribute("width", "50px").unwrap();
        assert_eq!(slot, Slot::new(2));
        assert_eq!(reg.default_of("width"), Some("50px"));
        assert_eq!(reg.default_at(Slot::new(0)), Some("100px"));
    }

    #[test]
    fn names_are_listed_in_slot_order() {
        let mut reg = AttributeRegistry::new();
        for name in ["zeta", "alpha", "mid", "beta"] {
            reg.add_attribute(name, "");
        }
        reg.remove_attribute("mid");
        assert_eq!(reg.names(), vec!["zeta", "alpha", "beta"]);
        assert_eq!(
            reg.live_slots(),
            vec![Slot::new(0), Slot::new(1), Slot::new(3)]
        );
    }

    #[test]
    fn clone_is_independent() {
        let original = width_and_color();
        let mut copy = original.clone();
        copy.set_default_value("width", "1px").unwrap();
        copy.add_attribute("height", "2em");

        assert_eq!(original.default_of("width"), Some("100px"));
        assert!(!original.contains("height"));
    }

    proptest! {
        #[test]
        fn every_live_slot_has_a_default(
            ops in proptest::collection::vec((0u8..3, 0usize..6), 0..40)
        ) {
            let names = ["a", "b", "c", "d", "e", "f"];
            let mut reg = AttributeRegistry::new();
            for (op, idx) in ops {
                let name = names[idx];
                match op {
                    0 => { reg.add_attribute(name, format!("d{idx}")); }
                    1 => { reg.remove_attribute(name); }
                    _ => { let _ = reg.set_default_value(name, "x"); }
                }
            }
            for (name, slot) in reg.entries() {
                prop_assert!(slot.index() < reg.slot_count());
                prop_assert!(reg.try_default_of(name).is_ok());
            }
        }
    }
}
