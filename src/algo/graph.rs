/*
 * SPDX-FileCopyrightText: 2024 Matteo Dell'Acqua
 * SPDX-FileCopyrightText: 2025 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! Undirected graphs with precomputed all-pairs distances.
//!
//! The searches in this crate only need a handful of queries on the input
//! graph: its adjacency, the distance between two nodes, and the eccentricity
//! of a set of nodes (the maximum distance of a node of the graph from the
//! set). These are abstracted by the [`DistanceOracle`] trait, which is
//! implemented by [`Graph`].

use dsi_progress_logger::ProgressLog;
use nonmax::NonMaxUsize;
use std::collections::VecDeque;
use sux::bits::BitVec;
use thiserror::Error;
use webgraph::traits::RandomAccessGraph;

/// Errors arising when building a [`Graph`] or a
/// [`Modulator`](crate::algo::Modulator) from user-provided data.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    #[error("The graph has no nodes")]
    Empty,
    #[error("Node {node} is out of range for a graph with {num_nodes} nodes")]
    NodeOutOfRange { node: usize, num_nodes: usize },
    #[error("Self-loop on node {0}")]
    SelfLoop(usize),
    #[error("The graph is not connected: node {0} is unreachable from node 0")]
    Disconnected(usize),
}

/// The queries the exact searches perform on a graph.
///
/// Implementations must describe a connected undirected graph: `distance`
/// must be symmetric and finite.
pub trait DistanceOracle: Sync {
    /// Returns the number of nodes; nodes are `0..num_nodes()`.
    fn num_nodes(&self) -> usize;

    /// Returns the neighbors of `node`.
    fn neighbors(&self, node: usize) -> &[usize];

    /// Returns the degree of `node`.
    #[inline(always)]
    fn degree(&self, node: usize) -> usize {
        self.neighbors(node).len()
    }

    /// Returns the length of a shortest path between `u` and `v`.
    fn distance(&self, u: usize, v: usize) -> usize;

    /// Returns the minimum distance of `node` from the nodes in `set`, or
    /// `usize::MAX` if `set` is empty.
    fn distance_to_set(&self, node: usize, set: &[usize]) -> usize {
        set.iter()
            .map(|&v| self.distance(node, v))
            .min()
            .unwrap_or(usize::MAX)
    }

    /// Returns the eccentricity of `set`, that is, the maximum over all nodes
    /// of the distance from `set`.
    ///
    /// The eccentricity of an empty set is zero.
    fn eccentricity(&self, set: &[usize]) -> usize;
}

/// An immutable undirected graph with precomputed distances.
///
/// Distances are stored in a dense `n × n` table, so this structure is meant
/// for the small graphs exact searches can handle.
#[derive(Debug, Clone)]
pub struct Graph {
    num_nodes: usize,
    neighbors: Box<[Box<[usize]>]>,
    distances: Box<[usize]>,
}

impl Graph {
    /// Builds a graph from a list of undirected edges and computes all
    /// distances.
    ///
    /// Duplicate edges (in either direction) are ignored.
    ///
    /// # Arguments
    /// * `num_nodes`: the number of nodes.
    /// * `edges`: the edges of the graph.
    /// * `pl`: a progress logger for the distance computation.
    pub fn from_edges(
        num_nodes: usize,
        edges: impl IntoIterator<Item = (usize, usize)>,
        pl: &mut impl ProgressLog,
    ) -> Result<Self, GraphError> {
        if num_nodes == 0 {
            return Err(GraphError::Empty);
        }
        let mut adjacency = vec![Vec::new(); num_nodes];
        for (u, v) in edges {
            for node in [u, v] {
                if node >= num_nodes {
                    return Err(GraphError::NodeOutOfRange { node, num_nodes });
                }
            }
            if u == v {
                return Err(GraphError::SelfLoop(u));
            }
            adjacency[u].push(v);
            adjacency[v].push(u);
        }
        Self::from_adjacency(adjacency, pl)
    }

    /// Builds a graph from a webgraph graph, symmetrizing its arcs, and
    /// computes all distances.
    pub fn from_graph(
        graph: impl RandomAccessGraph,
        pl: &mut impl ProgressLog,
    ) -> Result<Self, GraphError> {
        let num_nodes = graph.num_nodes();
        let mut edges = Vec::new();
        for node in 0..num_nodes {
            for succ in graph.successors(node) {
                // Each edge is seen from both sides in a symmetric graph
                if node < succ {
                    edges.push((node, succ));
                } else if succ < node {
                    edges.push((succ, node));
                }
            }
        }
        Self::from_edges(num_nodes, edges, pl)
    }

    fn from_adjacency(
        mut adjacency: Vec<Vec<usize>>,
        pl: &mut impl ProgressLog,
    ) -> Result<Self, GraphError> {
        for list in adjacency.iter_mut() {
            list.sort_unstable();
            list.dedup();
        }
        let num_nodes = adjacency.len();
        let neighbors: Box<[Box<[usize]>]> = adjacency
            .into_iter()
            .map(|list| list.into_boxed_slice())
            .collect();

        let mut graph = Self {
            num_nodes,
            neighbors,
            distances: vec![usize::MAX; num_nodes * num_nodes].into_boxed_slice(),
        };
        graph.compute_distances(pl)?;
        Ok(graph)
    }

    /// Runs a breadth-first visit from each node.
    fn compute_distances(&mut self, pl: &mut impl ProgressLog) -> Result<(), GraphError> {
        let num_nodes = self.num_nodes;
        pl.item_name("node");
        pl.expected_updates(Some(num_nodes));
        pl.start("Computing all-pairs distances...");

        let mut visited = BitVec::new(num_nodes);
        // To avoid storing distances in the queue, we use `None` as a
        // separator between levels.
        let mut queue: VecDeque<Option<NonMaxUsize>> = VecDeque::new();

        for root in 0..num_nodes {
            visited.fill(false);
            queue.clear();
            let row = &mut self.distances[root * num_nodes..(root + 1) * num_nodes];

            visited.set(root, true);
            row[root] = 0;
            queue.push_back(NonMaxUsize::new(root));
            queue.push_back(None);
            let mut distance = 1;

            while let Some(current) = queue.pop_front() {
                match current {
                    Some(node) => {
                        for &succ in self.neighbors[node.get()].iter() {
                            if !visited[succ] {
                                visited.set(succ, true);
                                row[succ] = distance;
                                queue.push_back(NonMaxUsize::new(succ));
                            }
                        }
                    }
                    None => {
                        if !queue.is_empty() {
                            distance += 1;
                            queue.push_back(None);
                        }
                    }
                }
            }

            if root == 0 {
                if let Some(unreachable) = row.iter().position(|&d| d == usize::MAX) {
                    pl.done();
                    return Err(GraphError::Disconnected(unreachable));
                }
            }
            pl.light_update();
        }

        pl.done();
        Ok(())
    }
}

impl DistanceOracle for Graph {
    #[inline(always)]
    fn num_nodes(&self) -> usize {
        self.num_nodes
    }

    #[inline(always)]
    fn neighbors(&self, node: usize) -> &[usize] {
        &self.neighbors[node]
    }

    #[inline(always)]
    fn distance(&self, u: usize, v: usize) -> usize {
        self.distances[u * self.num_nodes + v]
    }

    fn eccentricity(&self, set: &[usize]) -> usize {
        let mut distances = vec![usize::MAX; self.num_nodes];
        let mut queue = VecDeque::with_capacity(self.num_nodes);
        for &node in set {
            if distances[node] == usize::MAX {
                distances[node] = 0;
                queue.push_back(node);
            }
        }

        let mut eccentricity = 0;
        while let Some(node) = queue.pop_front() {
            eccentricity = eccentricity.max(distances[node]);
            for &succ in self.neighbors(node) {
                if distances[succ] == usize::MAX {
                    distances[succ] = distances[node] + 1;
                    queue.push_back(succ);
                }
            }
        }
        eccentricity
    }
}
