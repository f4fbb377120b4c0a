//! Progress of the property description emulation
//!
//! Devices without a description service are described by reading one
//! property id after the other. The cursor remembers how far the last
//! query got, so that queries for increasing property indices of the same
//! object continue where the previous one stopped.

/// Position of the last successful description probe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DescriptionCursor {
    object_index: Option<u16>,
    property_index: Option<u16>,
    pid: u8,
}

impl DescriptionCursor {
    /// Create a cursor in its initial position
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if a query can continue from the current position
    ///
    /// Only positional queries (`pid == 0`) on the same object with a
    /// property index not below the last one continue.
    pub fn continues(&self, object_index: u16, pid: u8, property_index: u16) -> bool {
        pid == 0
            && self.object_index == Some(object_index)
            && self.property_index.is_none_or(|last| property_index >= last)
    }

    /// Move the cursor back to its initial position
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Persist the position of a successful probe
    pub fn advance(&mut self, object_index: u16, property_index: u16, pid: u8) {
        self.object_index = Some(object_index);
        self.property_index = Some(property_index);
        self.pid = pid;
    }

    /// Property index of the last probe, `None` before the first property
    pub fn property_index(&self) -> Option<u16> {
        self.property_index
    }

    /// Property id of the last probe, 0 before the first property
    pub fn pid(&self) -> u8 {
        self.pid
    }
}
