use log::{debug, trace};

use crate::container::Container;
use crate::id::ContainerId;
use crate::traverse::{collect_component, is_reachable};

/// Error type for network operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NetworkError {
    #[error("container not found: {0}")]
    UnknownContainer(ContainerId),
    #[error("inconsistent pipe between {0} and {1}")]
    BrokenPipe(ContainerId, ContainerId),
}

/// Convenience alias for `Result<T, NetworkError>`.
pub type NetworkResult<T> = Result<T, NetworkError>;

/// Network owns a set of containers and the pipes between them.
///
/// Responsibilities:
/// - Registry: containers live in an arena addressed by [`ContainerId`]
/// - Adjacency: pipes are undirected, with no self-loops or duplicates
/// - Equalization: connected containers always hold the same amount
///
/// `connect` and `add_water` re-equalize the affected group before they
/// return. `disconnect` only removes the pipe; both halves keep the amount
/// they held and evolve independently from then on.
///
/// Every operation validates its handles up front, so a call that fails
/// leaves the network unchanged.
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawNetwork"))]
pub struct Network {
    containers: Vec<Container>,
}

/// Unchecked form of [`Network`] as it appears in serialized data.
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawNetwork {
    containers: Vec<Container>,
}

#[cfg(feature = "serde")]
impl TryFrom<RawNetwork> for Network {
    type Error = NetworkError;

    fn try_from(raw: RawNetwork) -> NetworkResult<Self> {
        let mut network = Network {
            containers: raw.containers,
        };
        network.check_pipes()?;
        network.equalize_uneven_groups();
        Ok(network)
    }
}

impl Network {
    /// Creates a new empty network.
    pub fn new() -> Self {
        Network {
            containers: Vec::new(),
        }
    }

    /// Adds an unconnected container holding `initial_amount`.
    pub fn add_container(&mut self, initial_amount: f64) -> ContainerId {
        let id = ContainerId::from_index(self.containers.len() as u32);
        self.containers.push(Container::new(initial_amount));
        id
    }

    /// Adds an unconnected, empty container.
    pub fn add_empty_container(&mut self) -> ContainerId {
        self.add_container(0.0)
    }

    /// Pipes `a` and `b` together and equalizes the merged group.
    ///
    /// Connecting a container to itself, or to a container it can already
    /// reach, changes nothing: no pipe is added and no amount moves.
    pub fn connect(&mut self, a: ContainerId, b: ContainerId) -> NetworkResult<()> {
        self.check(a)?;
        self.check(b)?;

        if a == b {
            debug!("connect {a} to itself ignored");
            return Ok(());
        }
        if is_reachable(&self.containers, a, b) {
            debug!("connect {a}-{b} ignored: already in the same group");
            return Ok(());
        }

        self.containers[a.index()].add_neighbor(b);
        self.containers[b.index()].add_neighbor(a);
        debug!("connected {a}-{b}");

        self.equalize(a);
        Ok(())
    }

    /// Removes the pipe between `a` and `b`, if there is one.
    ///
    /// Amounts are left exactly as they are.
    pub fn disconnect(&mut self, a: ContainerId, b: ContainerId) -> NetworkResult<()> {
        self.check(a)?;
        self.check(b)?;

        let removed = self.containers[a.index()].remove_neighbor(b);
        self.containers[b.index()].remove_neighbor(a);
        if removed {
            debug!("disconnected {a}-{b}");
        }
        Ok(())
    }

    /// Pours `amount` into `id` and equalizes its group.
    ///
    /// Negative amounts drain the group the same way.
    pub fn add_water(&mut self, id: ContainerId, amount: f64) -> NetworkResult<()> {
        self.check(id)?;

        let container = &mut self.containers[id.index()];
        container.set_amount(container.amount() + amount);
        self.equalize(id);
        Ok(())
    }

    /// Recomputes the mean of the group containing `root` and writes it to
    /// every member.
    ///
    /// On a group that is already equalized this rewrites the same value.
    pub fn redistribute(&mut self, root: ContainerId) -> NetworkResult<()> {
        self.check(root)?;
        self.equalize(root);
        Ok(())
    }

    /// Returns true if `b` can be reached from `a` through pipes.
    ///
    /// Every container is connected to itself.
    pub fn is_connected(&self, a: ContainerId, b: ContainerId) -> NetworkResult<bool> {
        self.check(a)?;
        self.check(b)?;
        Ok(is_reachable(&self.containers, a, b))
    }

    /// Returns the amount held by `id`.
    pub fn amount(&self, id: ContainerId) -> NetworkResult<f64> {
        self.container(id).map(Container::amount)
    }

    /// Returns the number of containers directly piped to `id`.
    pub fn neighbor_count(&self, id: ContainerId) -> NetworkResult<usize> {
        self.container(id).map(Container::neighbor_count)
    }

    /// Gets a container by handle.
    pub fn container(&self, id: ContainerId) -> NetworkResult<&Container> {
        self.containers
            .get(id.index())
            .ok_or(NetworkError::UnknownContainer(id))
    }

    /// Returns every container in the group of `id`, starting with `id`.
    pub fn component(&self, id: ContainerId) -> NetworkResult<Vec<ContainerId>> {
        self.check(id)?;
        Ok(collect_component(&self.containers, id))
    }

    /// Splits the network into its groups.
    ///
    /// Groups are ordered by their oldest container, and each group starts
    /// with that container.
    pub fn groups(&self) -> Vec<Vec<ContainerId>> {
        let mut seen = vec![false; self.containers.len()];
        let mut groups = Vec::new();
        for id in self.ids() {
            if seen[id.index()] {
                continue;
            }
            let group = collect_component(&self.containers, id);
            for member in &group {
                seen[member.index()] = true;
            }
            groups.push(group);
        }
        groups
    }

    /// Returns the number of separate groups in the network.
    pub fn group_count(&self) -> usize {
        self.groups().len()
    }

    /// Returns the sum of the amounts held by all containers.
    pub fn total_amount(&self) -> f64 {
        self.containers.iter().map(Container::amount).sum()
    }

    /// Iterates over all container handles in creation order.
    pub fn ids(&self) -> impl Iterator<Item = ContainerId> + use<> {
        (0..self.containers.len() as u32).map(ContainerId::from_index)
    }

    /// Returns the number of containers in the network.
    pub fn len(&self) -> usize {
        self.containers.len()
    }

    /// Returns true if the network has no containers.
    pub fn is_empty(&self) -> bool {
        self.containers.is_empty()
    }

    /// Equalizes every group whose members disagree on the amount held.
    ///
    /// Groups that are already level are left untouched, so their amounts do
    /// not pick up rounding from a needless recomputation.
    #[cfg(any(feature = "serde", test))]
    fn equalize_uneven_groups(&mut self) {
        for group in self.groups() {
            let first = self.containers[group[0].index()].amount();
            let uneven = group
                .iter()
                .any(|member| self.containers[member.index()].amount() != first);
            if uneven {
                self.equalize(group[0]);
            }
        }
    }

    /// Verifies that every pipe points at a container of this network, is
    /// not a self-loop and is recorded on both ends.
    #[cfg(any(feature = "serde", test))]
    fn check_pipes(&self) -> NetworkResult<()> {
        for id in self.ids() {
            for neighbor in self.containers[id.index()].neighbors() {
                let symmetric = self
                    .containers
                    .get(neighbor.index())
                    .is_some_and(|other| other.is_adjacent(id));
                if neighbor == id || !symmetric {
                    return Err(NetworkError::BrokenPipe(id, neighbor));
                }
            }
        }
        Ok(())
    }

    fn check(&self, id: ContainerId) -> NetworkResult<()> {
        self.container(id).map(|_| ())
    }

    /// Writes the group mean of `root` to every member. `root` must be valid.
    fn equalize(&mut self, root: ContainerId) {
        let group = collect_component(&self.containers, root);
        let total: f64 = group
            .iter()
            .map(|id| self.containers[id.index()].amount())
            .sum();
        let mean = total / group.len() as f64;

        for id in &group {
            self.containers[id.index()].set_amount(mean);
        }
        trace!("equalized group of {root}: {} containers at {mean}", group.len());
    }
}
