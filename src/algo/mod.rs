//! Module containing all algorithms implementations.

pub mod graph;
pub use graph::{DistanceOracle, Graph, GraphError};

pub mod modulator;
pub use modulator::{modulator_to_disjoint_paths, Modulator};

pub mod set_cover;

pub mod mesp;

/// Traits used to interact with the implemented algorithms.
pub mod traits {
    pub use super::graph::DistanceOracle;
}
