//! Cistern models a network of containers joined by pipes.
//!
//! Core concepts:
//! - **Container**: Holds a quantity of water and the set of containers it is piped to
//! - **ContainerId**: An opaque handle naming a container within its network
//! - **Group**: The containers reachable from one another through pipes
//! - **Network**: Owns every container and keeps each group level
//!
//! Connecting two containers merges their groups and spreads the water
//! evenly across the result. Pouring water into a container spreads it over
//! the container's whole group. Disconnecting only removes the pipe: both
//! sides keep what they hold.
//!
//! # Example
//!
//! ```
//! use cistern_core::Network;
//!
//! let mut network = Network::new();
//! let a = network.add_container(10.0);
//! let b = network.add_container(30.0);
//!
//! network.connect(a, b)?;
//! assert_eq!(network.amount(a)?, 20.0);
//!
//! network.disconnect(a, b)?;
//! network.add_water(a, 10.0)?;
//! assert_eq!(network.amount(a)?, 30.0);
//! assert_eq!(network.amount(b)?, 20.0);
//! # Ok::<(), cistern_core::NetworkError>(())
//! ```
//!
//! # Features
//!
//! - `serde` (default): `Serialize`/`Deserialize` for [`Network`], [`Container`]
//!   and [`ContainerId`]. Deserializing a network rejects one-sided or dangling
//!   pipes and levels any group whose members disagree.

mod container;
mod id;
mod network;
mod traverse;

pub use container::Container;
pub use id::ContainerId;
pub use network::{Network, NetworkError, NetworkResult};
