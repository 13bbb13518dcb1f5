/*
 * SPDX-FileCopyrightText: 2024 Matteo Dell'Acqua
 * SPDX-FileCopyrightText: 2025 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use super::segments::shortest_segments;
use crate::algo::{set_cover::ConstrainedSetCover, DistanceOracle, Modulator};
use crate::utils::RequirementMask;
use sux::bits::BitVec;

/// Decides whether there is a shortest path of eccentricity at most `k` with
/// given endpoints whose nodes in the modulator are *landmarks*.
///
/// The search enumerates, in this order of nesting:
/// 1. the set of landmarks, a subset of the modulator (plus the fixed
///    endpoints, if any) with at least two elements;
/// 2. the permutations of the landmarks (fixed endpoints stay at the ends)
///    along which the distances add up, that is, the orders in which a
///    shortest path could visit them;
/// 3. for each non-landmark node `c` of the modulator, a slack in `[1..k]`,
///    which is the guessed distance of `c` from the path.
///
/// For each such configuration, the segments between consecutive landmarks
/// (shortest paths avoiding the modulator) are chosen by a
/// [`ConstrainedSetCover`] in which the requirements are the nodes that must
/// be brought close enough to the path.
///
/// An instance is meant to be used for a single call to
/// [`solve`](InnerSolver::solve).
pub struct InnerSolver<'a, G: DistanceOracle> {
    graph: &'a G,
    modulator: &'a Modulator,
    k: usize,
    first: Option<usize>,
    last: Option<usize>,
    /// Whether each node of the modulator (by position in
    /// [`Modulator::nodes`]) is a landmark.
    landmarks: Vec<bool>,
    /// The current order of the landmarks, including fixed endpoints.
    pi: Vec<usize>,
    /// The slack of each node of the modulator; zero for landmarks.
    slack: Vec<usize>,
}

impl<'a, G: DistanceOracle> InnerSolver<'a, G> {
    /// Creates a new solver.
    ///
    /// # Arguments
    /// * `graph`: the graph.
    /// * `modulator`: a modulator to disjoint paths of `graph`.
    /// * `k`: the target eccentricity; it must be positive.
    /// * `first`: the first node of the path, if fixed; it must not be in the
    ///   modulator.
    /// * `last`: the last node of the path, if fixed; it must not be in the
    ///   modulator and it requires `first`, with `first < last`.
    ///
    /// # Panics
    ///
    /// If the arguments do not satisfy the requirements above, or if the
    /// modulator has not enough nodes to complete the endpoints (two if no
    /// endpoint is fixed, one if only `first` is).
    pub fn new(
        graph: &'a G,
        modulator: &'a Modulator,
        k: usize,
        first: Option<usize>,
        last: Option<usize>,
    ) -> Self {
        assert!(k > 0, "The target eccentricity must be positive");
        for endpoint in first.iter().chain(last.iter()) {
            assert!(
                !modulator.contains(*endpoint),
                "Endpoint {} is in the modulator",
                endpoint
            );
        }
        let num_fixed = match (first, last) {
            (Some(first), Some(last)) => {
                assert!(first < last, "Endpoints must be increasing");
                2
            }
            (Some(_), None) => 1,
            (None, None) => 0,
            (None, Some(_)) => panic!("The last endpoint can be fixed only with the first one"),
        };
        assert!(
            modulator.len() + num_fixed >= 2,
            "Not enough landmarks for a path"
        );

        let num_modulator_nodes = modulator.len();
        Self {
            graph,
            modulator,
            k,
            first,
            last,
            landmarks: vec![false; num_modulator_nodes],
            pi: Vec::with_capacity(num_modulator_nodes + 2),
            slack: vec![0; num_modulator_nodes],
        }
    }

    /// Returns a shortest path of eccentricity at most `k` compatible with the
    /// configuration of this solver, or [`None`] if there is no such path.
    pub fn solve(mut self) -> Option<Box<[usize]>> {
        self.init_landmarks();
        loop {
            self.init_pi();
            loop {
                if self.can_pi() {
                    self.init_slack();
                    loop {
                        if let Some(path) = self.solve_inner() {
                            return Some(path);
                        }
                        if !self.next_slack() {
                            break;
                        }
                    }
                }
                if !self.next_pi() {
                    break;
                }
            }
            if !self.next_landmarks() {
                return None;
            }
        }
    }

    fn num_fixed(&self) -> usize {
        self.first.is_some() as usize + self.last.is_some() as usize
    }

    fn init_landmarks(&mut self) {
        self.landmarks.fill(false);
        let mut next = 0;
        if self.first.is_none() {
            self.landmarks[next] = true;
            next += 1;
        }
        if self.last.is_none() {
            self.landmarks[next] = true;
        }
    }

    /// Moves to the next subset of landmarks with at least two elements,
    /// counting endpoints, in binary order.
    fn next_landmarks(&mut self) -> bool {
        if self.landmarks.iter().all(|&landmark| landmark) {
            return false;
        }
        loop {
            for landmark in self.landmarks.iter_mut() {
                *landmark = !*landmark;
                if *landmark {
                    break;
                }
            }
            let size = self.landmarks.iter().filter(|&&landmark| landmark).count();
            if size + self.num_fixed() >= 2 {
                return true;
            }
        }
    }

    fn init_pi(&mut self) {
        self.pi.clear();
        self.pi.extend(self.first);
        self.pi.extend(
            self.modulator
                .nodes()
                .iter()
                .zip(self.landmarks.iter())
                .filter(|&(_, &landmark)| landmark)
                .map(|(&node, _)| node),
        );
        self.pi.extend(self.last);
    }

    /// Returns true if the distances between consecutive landmarks add up to
    /// the distance between the endpoints.
    fn can_pi(&self) -> bool {
        let length: usize = self
            .pi
            .windows(2)
            .map(|pair| self.graph.distance(pair[0], pair[1]))
            .sum();
        length == self.graph.distance(self.pi[0], self.pi[self.pi.len() - 1])
    }

    /// Moves to the next permutation of the landmarks, keeping fixed
    /// endpoints in place.
    fn next_pi(&mut self) -> bool {
        let start = self.first.is_some() as usize;
        let end = self.pi.len() - self.last.is_some() as usize;
        next_permutation(&mut self.pi[start..end])
    }

    fn init_slack(&mut self) {
        for (slack, &landmark) in self.slack.iter_mut().zip(self.landmarks.iter()) {
            *slack = if landmark { 0 } else { 1 };
        }
    }

    /// Increments the slacks as an odometer with digits in `[1..k]`; returns
    /// false when all combinations have been seen.
    fn next_slack(&mut self) -> bool {
        for (slack, &landmark) in self.slack.iter_mut().zip(self.landmarks.iter()) {
            if landmark {
                continue;
            }
            if *slack < self.k {
                *slack += 1;
                return true;
            }
            *slack = 1;
        }
        false
    }

    /// Returns an upper bound on the distance of `node` from any path
    /// compatible with the current configuration, assuming every
    /// non-landmark node of the modulator is within its slack from the path.
    fn estimate_distance(&self, node: usize) -> usize {
        let endpoints = self
            .first
            .iter()
            .chain(self.last.iter())
            .map(|&endpoint| self.graph.distance(node, endpoint));
        let modulator = self
            .modulator
            .nodes()
            .iter()
            .zip(self.slack.iter())
            .map(|(&c, &slack)| self.graph.distance(node, c) + slack);
        endpoints.chain(modulator).min().unwrap_or(usize::MAX)
    }

    /// Checks the current configuration.
    fn solve_inner(&self) -> Option<Box<[usize]>> {
        let num_nodes = self.graph.num_nodes();
        let k = self.k;

        let mut candidates = Vec::with_capacity(self.pi.len() - 1);
        for pair in self.pi.windows(2) {
            candidates.push(shortest_segments(
                self.graph,
                self.modulator,
                pair[0],
                pair[1],
            )?);
        }

        // Nodes that will be on the path for sure: the landmarks and the
        // segments without alternatives
        let mut anchored = self.pi.clone();
        let mut in_anchored = BitVec::new(num_nodes);
        // Nodes that might be on the path
        let mut in_candidates = BitVec::new(num_nodes);
        let mut groups: Vec<Vec<Box<[usize]>>> = Vec::new();
        // For each position, the index of its group, if any
        let mut group_of = Vec::with_capacity(candidates.len());
        for &node in &self.pi {
            in_anchored.set(node, true);
        }
        for segments in candidates.iter_mut() {
            if segments.len() == 1 {
                for &node in segments[0].iter() {
                    in_anchored.set(node, true);
                    anchored.push(node);
                }
                group_of.push(None);
            } else {
                for &node in segments.iter().flat_map(|segment| segment.iter()) {
                    in_candidates.set(node, true);
                }
                group_of.push(Some(groups.len()));
                groups.push(std::mem::take(segments));
            }
        }

        // Pairs (node, maximum distance from the path)
        let mut requirements: Vec<(usize, usize)> = Vec::new();
        let mut num_urgent = 0;
        for node in 0..num_nodes {
            if self.modulator.contains(node) || in_anchored[node] {
                continue;
            }
            let estimate = self.estimate_distance(node);
            if in_candidates[node] {
                // The node might be on the path, so it cannot rule the
                // configuration out
                if estimate > k {
                    requirements.push((node, k));
                }
                continue;
            }
            match estimate.cmp(&(k + 1)) {
                std::cmp::Ordering::Greater => return None,
                std::cmp::Ordering::Equal => {
                    num_urgent += 1;
                    requirements.push((node, k));
                }
                std::cmp::Ordering::Less => {}
            }
        }
        // Each segment can leave at most one urgent node beyond each end
        if num_urgent > 2 * (self.pi.len() - 1) {
            return None;
        }
        for ((&c, &slack), &landmark) in self
            .modulator
            .nodes()
            .iter()
            .zip(self.slack.iter())
            .zip(self.landmarks.iter())
        {
            if !landmark {
                requirements.push((c, slack));
            }
        }
        requirements.retain(|&(node, bound)| self.graph.distance_to_set(node, &anchored) > bound);

        let set_cover = ConstrainedSetCover::new(requirements.len(), &groups, |segment| {
            let mut covered = RequirementMask::new(requirements.len());
            for (i, &(node, bound)) in requirements.iter().enumerate() {
                if self.graph.distance_to_set(node, segment) <= bound {
                    covered.set(i, true);
                }
            }
            covered
        });
        let choices = set_cover.solve()?;

        let mut path = Vec::with_capacity(num_nodes);
        for (pos, &landmark) in self.pi[..self.pi.len() - 1].iter().enumerate() {
            path.push(landmark);
            let segment = match group_of[pos] {
                Some(group) => &groups[group][choices[group]],
                None => &candidates[pos][0],
            };
            path.extend_from_slice(segment);
        }
        path.push(self.pi[self.pi.len() - 1]);

        if self.graph.eccentricity(&path) <= k {
            Some(path.into_boxed_slice())
        } else {
            None
        }
    }
}

/// Rearranges `s` into the lexicographically next permutation; returns false
/// (leaving `s` unchanged) if `s` is the last one.
pub(crate) fn next_permutation(s: &mut [usize]) -> bool {
    if s.len() < 2 {
        return false;
    }
    let Some(i) = (0..s.len() - 1).rev().find(|&i| s[i] < s[i + 1]) else {
        return false;
    };
    let pivot = s[i];
    // Elements after i are non-increasing and s[i + 1] > pivot
    let Some(j) = s.iter().rposition(|&x| x > pivot) else {
        return false;
    };
    s.swap(i, j);
    s[i + 1..].reverse();
    true
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::algo::Graph;
    use dsi_progress_logger::no_logging;

    #[test]
    fn test_next_permutation() {
        let mut s = [1, 2, 3];
        let mut seen = vec![s];
        while next_permutation(&mut s) {
            seen.push(s);
        }
        assert_eq!(
            seen,
            vec![
                [1, 2, 3],
                [1, 3, 2],
                [2, 1, 3],
                [2, 3, 1],
                [3, 1, 2],
                [3, 2, 1]
            ]
        );
        assert_eq!(s, [3, 2, 1]);
        assert!(!next_permutation(&mut [7]));
        assert!(!next_permutation(&mut []));
    }

    #[test]
    fn test_landmark_subsets() -> anyhow::Result<()> {
        let graph = Graph::from_edges(4, [(0, 1), (1, 2), (2, 3), (3, 0)], no_logging![])?;
        let modulator = Modulator::new(4, [0, 1, 2])?;

        // No fixed endpoint: all subsets of size at least two
        let mut solver = InnerSolver::new(&graph, &modulator, 1, None, None);
        solver.init_landmarks();
        let mut subsets = vec![solver.landmarks.clone()];
        while solver.next_landmarks() {
            subsets.push(solver.landmarks.clone());
        }
        assert_eq!(
            subsets,
            vec![
                vec![true, true, false],
                vec![true, false, true],
                vec![false, true, true],
                vec![true, true, true],
            ]
        );

        // Two fixed endpoints: all subsets, starting from the empty one
        let modulator = Modulator::new(4, [1, 2])?;
        let mut solver = InnerSolver::new(&graph, &modulator, 1, Some(0), Some(3));
        solver.init_landmarks();
        let mut count = 1;
        assert!(solver.landmarks.iter().all(|&l| !l));
        while solver.next_landmarks() {
            count += 1;
        }
        assert_eq!(count, 4);
        Ok(())
    }

    #[test]
    fn test_slack_odometer() -> anyhow::Result<()> {
        let graph = Graph::from_edges(3, [(0, 1), (1, 2)], no_logging![])?;
        let modulator = Modulator::new(3, [0, 1, 2])?;
        let mut solver = InnerSolver::new(&graph, &modulator, 3, None, None);
        solver.init_landmarks();
        solver.init_slack();
        // Only node 2 is not a landmark
        let mut slacks = vec![solver.slack.clone()];
        while solver.next_slack() {
            slacks.push(solver.slack.clone());
        }
        assert_eq!(slacks, vec![vec![0, 0, 1], vec![0, 0, 2], vec![0, 0, 3]]);
        Ok(())
    }

    #[test]
    fn test_star() -> anyhow::Result<()> {
        let graph = Graph::from_edges(5, [(0, 1), (0, 2), (0, 3), (0, 4)], no_logging![])?;
        let modulator = Modulator::new(5, [0])?;
        let path = InnerSolver::new(&graph, &modulator, 1, Some(1), Some(4))
            .solve()
            .unwrap();
        assert_eq!(&*path, &[1, 0, 4]);
        let path = InnerSolver::new(&graph, &modulator, 1, Some(2), None)
            .solve()
            .unwrap();
        assert_eq!(&*path, &[2, 0]);
        Ok(())
    }

    #[test]
    fn test_infeasible() -> anyhow::Result<()> {
        // A cycle of length 8 with a modulator node: every shortest path has
        // eccentricity at least 2
        let graph = Graph::from_edges(8, (0..8).map(|i| (i, (i + 1) % 8)), no_logging![])?;
        let modulator = Modulator::new(8, [0])?;
        for first in 1..8 {
            assert!(InnerSolver::new(&graph, &modulator, 1, Some(first), None)
                .solve()
                .is_none());
            for last in first + 1..8 {
                assert!(InnerSolver::new(&graph, &modulator, 1, Some(first), Some(last))
                    .solve()
                    .is_none());
            }
        }
        Ok(())
    }

    #[test]
    #[should_panic]
    fn test_endpoint_in_modulator() {
        let graph = Graph::from_edges(2, [(0, 1)], no_logging![]).unwrap();
        let modulator = Modulator::new(2, [0]).unwrap();
        InnerSolver::new(&graph, &modulator, 1, Some(0), None);
    }
}
