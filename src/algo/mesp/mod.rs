//! Minimum eccentricity shortest paths.
//!
//! The eccentricity of a path is the maximum distance of a node of the graph
//! from the path. [`mesp_search`] finds a shortest path of minimum
//! eccentricity exactly, exploiting a [modulator to disjoint
//! paths](crate::algo::modulator): the nodes of the modulator on the path
//! are guessed, and the pieces of the path between them, which lie in a
//! disjoint union of paths, are chosen by a set cover.

mod driver;
pub use driver::*;

mod inner;
pub use inner::InnerSolver;

mod segments;
pub use segments::shortest_segments;

mod simple_path;
pub use simple_path::simple_path;

mod status;
