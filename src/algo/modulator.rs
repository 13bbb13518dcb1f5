/*
 * SPDX-FileCopyrightText: 2024 Matteo Dell'Acqua
 * SPDX-FileCopyrightText: 2025 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! Minimum modulators to disjoint paths.
//!
//! A *modulator to disjoint paths* of a graph is a set of nodes whose removal
//! leaves a disjoint union of simple paths, that is, a graph of maximum degree
//! two without cycles.
//!
//! [`modulator_to_disjoint_paths`] finds a modulator of minimum size by
//! trying budgets 0, 1, 2, … with a branch-and-bound search: while some
//! node `b` of the residual graph has degree greater than two, either `b` is
//! removed or exactly two of its neighbors are kept and the other ones are
//! removed. Once all degrees are at most two, one node per residual cycle
//! is removed.

use super::graph::{DistanceOracle, GraphError};
use crate::utils::math::filtered_argmax;
use dsi_progress_logger::ProgressLog;
use std::ops::{Deref, DerefMut};
use sux::bits::BitVec;

/// An immutable set of nodes of a graph.
///
/// Nodes are kept sorted, and membership can be tested in constant time.
#[derive(Debug, Clone)]
pub struct Modulator {
    nodes: Box<[usize]>,
    members: BitVec,
}

impl Modulator {
    /// Creates a modulator for a graph with `num_nodes` nodes.
    ///
    /// Duplicates in `nodes` are ignored.
    pub fn new(
        num_nodes: usize,
        nodes: impl IntoIterator<Item = usize>,
    ) -> Result<Self, GraphError> {
        let mut members = BitVec::new(num_nodes);
        for node in nodes {
            if node >= num_nodes {
                return Err(GraphError::NodeOutOfRange { node, num_nodes });
            }
            members.set(node, true);
        }
        let nodes = (0..num_nodes).filter(|&node| members[node]).collect();
        Ok(Self { nodes, members })
    }

    /// Returns the size of the modulator.
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Returns true if `node` belongs to the modulator.
    #[inline(always)]
    pub fn contains(&self, node: usize) -> bool {
        self.members[node]
    }

    /// Returns the nodes of the modulator in increasing order.
    #[inline(always)]
    pub fn nodes(&self) -> &[usize] {
        &self.nodes
    }

    /// Returns true if removing the modulator from `graph` leaves a disjoint
    /// union of simple paths.
    pub fn is_disjoint_paths_modulator(&self, graph: &impl DistanceOracle) -> bool {
        let num_nodes = graph.num_nodes();
        let degree = |node: usize| {
            graph
                .neighbors(node)
                .iter()
                .filter(|&&succ| !self.contains(succ))
                .count()
        };
        let mut visited = BitVec::new(num_nodes);
        for root in 0..num_nodes {
            if self.contains(root) || visited[root] {
                continue;
            }
            let mut stack = vec![root];
            visited.set(root, true);
            let (mut num_component_nodes, mut sum_degrees) = (0, 0);
            while let Some(node) = stack.pop() {
                let d = degree(node);
                if d > 2 {
                    return false;
                }
                num_component_nodes += 1;
                sum_degrees += d;
                for &succ in graph.neighbors(node) {
                    if !self.contains(succ) && !visited[succ] {
                        visited.set(succ, true);
                        stack.push(succ);
                    }
                }
            }
            // A connected component is a tree iff it has one edge less
            // than its nodes
            if sum_degrees / 2 != num_component_nodes - 1 {
                return false;
            }
        }
        true
    }
}

/// The state of the search: the removed nodes and, for each node, the number
/// of neighbors that have not been removed.
struct Residual<'a, G: DistanceOracle> {
    graph: &'a G,
    degree: Box<[usize]>,
    removed: BitVec,
}

/// Nodes removed from a [`Residual`]; they are restored when the removal is
/// dropped, in reverse order, so sibling branches always start from the same
/// state.
struct Removal<'b, 'a, G: DistanceOracle> {
    residual: &'b mut Residual<'a, G>,
    nodes: Vec<usize>,
}

impl<'a, G: DistanceOracle> Deref for Removal<'_, 'a, G> {
    type Target = Residual<'a, G>;

    fn deref(&self) -> &Self::Target {
        &*self.residual
    }
}

impl<G: DistanceOracle> DerefMut for Removal<'_, '_, G> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut *self.residual
    }
}

impl<G: DistanceOracle> Drop for Removal<'_, '_, G> {
    fn drop(&mut self) {
        for &node in self.nodes.iter().rev() {
            self.residual.removed.set(node, false);
            for &succ in self.residual.graph.neighbors(node) {
                self.residual.degree[succ] += 1;
            }
        }
    }
}

impl<'a, G: DistanceOracle> Residual<'a, G> {
    fn new(graph: &'a G) -> Self {
        let num_nodes = graph.num_nodes();
        Self {
            graph,
            degree: (0..num_nodes).map(|node| graph.degree(node)).collect(),
            removed: BitVec::new(num_nodes),
        }
    }

    /// Removes `nodes`, which must not be removed already.
    fn remove(&mut self, nodes: Vec<usize>) -> Removal<'_, 'a, G> {
        for &node in &nodes {
            debug_assert!(!self.removed[node]);
            self.removed.set(node, true);
            for &succ in self.graph.neighbors(node) {
                self.degree[succ] -= 1;
            }
        }
        Removal {
            residual: self,
            nodes,
        }
    }

    /// Looks for at most `budget` further nodes whose removal leaves a
    /// disjoint union of paths; returns all removed nodes on success.
    fn search(&mut self, budget: usize) -> Option<Vec<usize>> {
        let removed = &self.removed;
        let branch_node = filtered_argmax(&self.degree, |node, degree| {
            degree > 2 && !removed[node]
        });

        let Some(branch_node) = branch_node else {
            return self.break_cycles(budget);
        };
        if budget == 0 {
            return None;
        }

        let neighbors: Vec<usize> = self
            .graph
            .neighbors(branch_node)
            .iter()
            .copied()
            .filter(|&succ| !self.removed[succ])
            .collect();
        // Keeping two neighbors removes all the others
        let cost = neighbors.len() - 2;
        if cost <= budget {
            for i in 0..neighbors.len() {
                for j in i + 1..neighbors.len() {
                    let dropped = neighbors
                        .iter()
                        .enumerate()
                        .filter(|&(pos, _)| pos != i && pos != j)
                        .map(|(_, &node)| node)
                        .collect();
                    let mut removal = self.remove(dropped);
                    if let Some(solution) = removal.search(budget - cost) {
                        return Some(solution);
                    }
                }
            }
        }

        let mut removal = self.remove(vec![branch_node]);
        removal.search(budget - 1)
    }

    /// Removes one node per cycle of a residual graph of maximum degree two,
    /// if the budget allows it.
    fn break_cycles(&self, budget: usize) -> Option<Vec<usize>> {
        let num_nodes = self.graph.num_nodes();
        let mut visited = BitVec::new(num_nodes);
        let mut solution: Vec<usize> = (0..num_nodes).filter(|&node| self.removed[node]).collect();
        let mut num_cycles = 0;

        for root in 0..num_nodes {
            if self.removed[root] || visited[root] {
                continue;
            }
            let mut stack = vec![root];
            visited.set(root, true);
            let mut is_cycle = true;
            while let Some(node) = stack.pop() {
                if self.degree[node] != 2 {
                    is_cycle = false;
                }
                for &succ in self.graph.neighbors(node) {
                    if !self.removed[succ] && !visited[succ] {
                        visited.set(succ, true);
                        stack.push(succ);
                    }
                }
            }
            if is_cycle {
                num_cycles += 1;
                if num_cycles > budget {
                    return None;
                }
                // root is the smallest node of its component
                solution.push(root);
            }
        }

        Some(solution)
    }
}

/// Returns a minimum modulator to disjoint paths of `graph`.
///
/// See [`modulator_to_disjoint_paths_with_progress`].
pub fn modulator_to_disjoint_paths(
    graph: &impl DistanceOracle,
    pl: &mut impl ProgressLog,
) -> Modulator {
    modulator_to_disjoint_paths_with_progress(graph, |_, _| {}, pl)
}

/// Returns a minimum modulator to disjoint paths of `graph`.
///
/// # Arguments
/// * `graph`: the graph.
/// * `progress`: called once per budget attempted, with the budget and the
///   percentage of the budget range `0..num_nodes` already excluded.
/// * `pl`: a progress logger, updated once per budget attempted.
///
/// # Panics
///
/// If no modulator with less than `num_nodes` nodes is found, which would be
/// a bug, as removing all nodes but one always works.
pub fn modulator_to_disjoint_paths_with_progress(
    graph: &impl DistanceOracle,
    mut progress: impl FnMut(usize, f64),
    pl: &mut impl ProgressLog,
) -> Modulator {
    let num_nodes = graph.num_nodes();
    pl.item_name("budget");
    pl.expected_updates(Some(num_nodes));
    pl.start("Searching for a minimum modulator to disjoint paths...");

    let mut residual = Residual::new(graph);
    for budget in 0..num_nodes {
        progress(budget, 100.0 * budget as f64 / num_nodes as f64);
        if let Some(solution) = residual.search(budget) {
            pl.done();
            pl.info(format_args!(
                "Found a modulator to disjoint paths of size {}",
                solution.len()
            ));
            return Modulator::new(num_nodes, solution)
                .expect("Removed nodes should be nodes of the graph");
        }
        pl.update();
    }

    panic!(
        "No modulator to disjoint paths with less than {} nodes",
        num_nodes
    );
}
