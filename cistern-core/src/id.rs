use std::fmt;

/// An opaque handle identifying a container inside a [`Network`](crate::Network).
///
/// Handles are issued in creation order by the network that owns the
/// container and are never reused. A handle is only meaningful for the
/// network that issued it.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct ContainerId(u32);

impl ContainerId {
    /// Creates a handle from its raw index.
    pub fn from_index(index: u32) -> Self {
        ContainerId(index)
    }

    /// Returns the slot this handle addresses in the owning network.
    pub fn index(&self) -> usize {
        self.0 as usize
    }
}

impl fmt::Debug for ContainerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ContainerId({})", self)
    }
}

impl fmt::Display for ContainerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "C{}", self.0)
    }
}
