//! Group resolution over container adjacency.
//!
//! Provides a depth-first walk from a root container and the two queries
//! built on it: reachability and full component collection.

use std::collections::HashSet;

use crate::container::Container;
use crate::id::ContainerId;

/// Depth-first walk over the containers reachable from a root.
///
/// Yields every reachable container exactly once, root first. The visited
/// set makes the walk terminate on any finite graph, cyclic or not.
///
/// Every handle stored in a neighbor set must address a slot of
/// `containers`; the network maintains this.
pub struct Walk<'a> {
    containers: &'a [Container],
    stack: Vec<ContainerId>,
    visited: HashSet<ContainerId>,
}

impl<'a> Walk<'a> {
    /// Starts a walk at `root`.
    pub fn new(containers: &'a [Container], root: ContainerId) -> Self {
        Walk {
            containers,
            stack: vec![root],
            visited: HashSet::new(),
        }
    }
}

impl Iterator for Walk<'_> {
    type Item = ContainerId;

    fn next(&mut self) -> Option<ContainerId> {
        while let Some(current) = self.stack.pop() {
            if !self.visited.insert(current) {
                continue;
            }
            let containers = self.containers;
            let visited = &self.visited;
            self.stack.extend(
                containers[current.index()]
                    .neighbors()
                    .filter(|n| !visited.contains(n)),
            );
            return Some(current);
        }
        None
    }
}

/// Returns true if `to` can be reached from `from` over zero or more edges.
///
/// Stops as soon as `to` is found.
pub fn is_reachable(containers: &[Container], from: ContainerId, to: ContainerId) -> bool {
    Walk::new(containers, from).any(|id| id == to)
}

/// Collects the connected component containing `root`, in visit order.
///
/// The result is never empty: `root` is always its first element.
pub fn collect_component(containers: &[Container], root: ContainerId) -> Vec<ContainerId> {
    Walk::new(containers, root).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(i: u32) -> ContainerId {
        ContainerId::from_index(i)
    }

    /// Builds containers with symmetric edges between the given index pairs.
    fn graph(n: usize, edges: &[(u32, u32)]) -> Vec<Container> {
        let mut containers = vec![Container::new(0.0); n];
        for &(a, b) in edges {
            containers[a as usize].add_neighbor(id(b));
            containers[b as usize].add_neighbor(id(a));
        }
        containers
    }

    #[test]
    fn singleton_component() {
        let containers = graph(3, &[]);
        assert_eq!(collect_component(&containers, id(1)), vec![id(1)]);
    }

    #[test]
    fn node_reaches_itself() {
        let containers = graph(1, &[]);
        assert!(is_reachable(&containers, id(0), id(0)));
    }

    #[test]
    fn chain_component() {
        let containers = graph(4, &[(0, 1), (1, 2)]);
        let mut component = collect_component(&containers, id(2));
        assert_eq!(component[0], id(2));
        component.sort();
        assert_eq!(component, vec![id(0), id(1), id(2)]);
        assert!(!is_reachable(&containers, id(0), id(3)));
    }

    #[test]
    fn cycle_visits_each_node_once() {
        let containers = graph(3, &[(0, 1), (1, 2), (2, 0)]);
        let component = collect_component(&containers, id(0));
        assert_eq!(component.len(), 3);
        let unique: HashSet<_> = component.iter().copied().collect();
        assert_eq!(unique.len(), 3);
    }

    #[test]
    fn reachability_is_symmetric() {
        let containers = graph(5, &[(0, 1), (1, 2), (3, 4)]);
        for a in 0..5 {
            for b in 0..5 {
                assert_eq!(
                    is_reachable(&containers, id(a), id(b)),
                    is_reachable(&containers, id(b), id(a)),
                    "asymmetric reachability between {} and {}",
                    a,
                    b
                );
            }
        }
    }

    #[test]
    fn walk_is_lazy() {
        let containers = graph(4, &[(0, 1), (1, 2), (2, 3)]);
        let mut walk = Walk::new(&containers, id(0));
        assert_eq!(walk.next(), Some(id(0)));
        assert_eq!(walk.next(), Some(id(1)));
        // the rest of the chain is still pending
        assert_eq!(walk.count(), 2);
    }
}
