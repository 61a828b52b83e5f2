use std::fmt;

use indexmap::IndexSet;

use crate::id::ContainerId;

/// A single container: the quantity it holds and the handles of the
/// containers it is directly piped to.
///
/// Containers live inside a [`Network`](crate::Network) and are only mutated
/// through it. Neighbor sets hold handles, never owning references, and are
/// kept symmetric by the network.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Container {
    amount: f64,
    neighbors: IndexSet<ContainerId>,
}

impl Container {
    /// Creates an unconnected container holding `amount`.
    pub fn new(amount: f64) -> Self {
        Container {
            amount,
            neighbors: IndexSet::new(),
        }
    }

    /// Returns the quantity currently held.
    pub fn amount(&self) -> f64 {
        self.amount
    }

    /// Returns the number of direct neighbors.
    pub fn neighbor_count(&self) -> usize {
        self.neighbors.len()
    }

    /// Iterates over direct neighbors in the order they were connected.
    pub fn neighbors(&self) -> impl Iterator<Item = ContainerId> + '_ {
        self.neighbors.iter().copied()
    }

    /// Returns true if `other` is a direct neighbor.
    pub fn is_adjacent(&self, other: ContainerId) -> bool {
        self.neighbors.contains(&other)
    }

    /// Returns true if this container has no neighbors.
    pub fn is_isolated(&self) -> bool {
        self.neighbors.is_empty()
    }

    pub(crate) fn set_amount(&mut self, amount: f64) {
        self.amount = amount;
    }

    pub(crate) fn add_neighbor(&mut self, other: ContainerId) -> bool {
        self.neighbors.insert(other)
    }

    pub(crate) fn remove_neighbor(&mut self, other: ContainerId) -> bool {
        // shift_remove keeps the remaining neighbors in connection order
        self.neighbors.shift_remove(&other)
    }
}

impl fmt::Display for Container {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Container(amount={}, neighbors={})",
            self.amount,
            self.neighbors.len()
        )
    }
}
