use std::fmt;

/// Stable positional index of a registered attribute.
///
/// Slots are handed out in registration order and are never reused, so a
/// slot stays valid for the lifetime of the registry that issued it even
/// after its attribute name has been removed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Slot(usize);

impl Slot {
    /// Wrap a raw index.
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    /// The raw index into positional storage.
    pub const fn index(self) -> usize {
        self.0
    }
}

impl From<usize> for Slot {
    fn from(index: usize) -> Self {
        Self(index)
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}
