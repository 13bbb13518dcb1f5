//! Set cover with one candidate per group.
//!
//! Given `m` requirements and a sequence of groups of candidates, each
//! candidate covering a subset of the requirements, [`ConstrainedSetCover`]
//! chooses exactly one candidate per group so that every requirement is
//! covered by at least one chosen candidate.
//!
//! # Complexity
//!
//! The solver is a forward dynamic programming over the groups whose states
//! are the subsets of requirements covered so far. Each layer contains at most
//! `min(2^m, ∏ group sizes)` states, so the cost is exponential in the number
//! of requirements: callers must keep `m` small.

use crate::utils::RequirementMask;
use std::collections::HashMap;

/// How a state of a layer was reached: the candidate chosen in the previous
/// group and the state it was chosen from.
#[derive(Debug, Clone)]
struct Step {
    candidate: usize,
    pred: RequirementMask,
}

/// A set-cover instance in which exactly one candidate per group must be
/// chosen.
pub struct ConstrainedSetCover<'a, C> {
    num_requirements: usize,
    groups: &'a [Vec<C>],
    /// The coverage of each candidate, computed once.
    coverage: Vec<Vec<RequirementMask>>,
}

impl<'a, C> ConstrainedSetCover<'a, C> {
    /// Creates a new instance.
    ///
    /// # Arguments
    /// * `num_requirements`: the number of requirements.
    /// * `groups`: the groups of candidates, in the order they will be
    ///   processed.
    /// * `coverage`: returns the requirements covered by a candidate; the
    ///   returned masks must have length `num_requirements`.
    pub fn new(
        num_requirements: usize,
        groups: &'a [Vec<C>],
        coverage: impl Fn(&C) -> RequirementMask,
    ) -> Self {
        let coverage = groups
            .iter()
            .map(|group| {
                group
                    .iter()
                    .map(|candidate| {
                        let mask = coverage(candidate);
                        assert_eq!(mask.len(), num_requirements);
                        mask
                    })
                    .collect()
            })
            .collect();
        Self {
            num_requirements,
            groups,
            coverage,
        }
    }

    /// Returns the number of groups.
    pub fn num_groups(&self) -> usize {
        self.groups.len()
    }

    /// Chooses one candidate per group so that all requirements are covered.
    ///
    /// Returns the index of the chosen candidate within each group, or
    /// [`None`] if no choice covers all requirements.
    pub fn solve(&self) -> Option<Box<[usize]>> {
        self.solve_from(&vec![None; self.num_groups()])
    }

    /// Like [`solve`](Self::solve), but some choices are already made.
    ///
    /// `partial[i]` is either the index of the candidate already chosen for
    /// group `i` or [`None`]. The leading groups with a choice are folded into
    /// the initial state and the dynamic programming starts from the first
    /// group without one; later groups with a choice contribute a single
    /// transition. Chosen candidates are returned unchanged.
    ///
    /// # Panics
    ///
    /// If `partial` does not have one entry per group, or if a choice is out of
    /// range for its group.
    pub fn solve_from(&self, partial: &[Option<usize>]) -> Option<Box<[usize]>> {
        assert_eq!(partial.len(), self.groups.len());
        for (group, choice) in partial.iter().enumerate() {
            if let Some(choice) = *choice {
                assert!(
                    choice < self.groups[group].len(),
                    "Choice {} is out of range for group {} of size {}",
                    choice,
                    group,
                    self.groups[group].len()
                );
            } else if self.groups[group].is_empty() {
                return None;
            }
        }

        let start = partial
            .iter()
            .position(Option::is_none)
            .unwrap_or(partial.len());
        let mut initial = RequirementMask::new(self.num_requirements);
        for (group, choice) in partial[..start].iter().enumerate() {
            if let Some(choice) = *choice {
                initial.union_with(&self.coverage[group][choice]);
            }
        }

        // layers[i] holds the states reached after group start + i
        let mut layers: Vec<HashMap<RequirementMask, Step>> =
            Vec::with_capacity(self.groups.len() - start);
        let mut frontier = vec![initial.clone()];

        for group in start..self.groups.len() {
            let mut layer = HashMap::new();
            let choices = match partial[group] {
                Some(choice) => choice..choice + 1,
                None => 0..self.groups[group].len(),
            };
            for state in &frontier {
                for candidate in choices.clone() {
                    layer
                        .entry(state.union(&self.coverage[group][candidate]))
                        .or_insert_with(|| Step {
                            candidate,
                            pred: state.clone(),
                        });
                }
            }
            frontier = layer.keys().cloned().collect();
            layers.push(layer);
        }

        let full = RequirementMask::full(self.num_requirements);
        if layers.is_empty() {
            return if initial.is_full() {
                Some(partial.iter().map(|choice| choice.unwrap_or(0)).collect())
            } else {
                None
            };
        }

        let mut solution: Vec<usize> = partial.iter().map(|choice| choice.unwrap_or(0)).collect();
        let mut state = full;
        for (offset, layer) in layers.iter().enumerate().rev() {
            let step = layer.get(&state)?;
            solution[start + offset] = step.candidate;
            state = step.pred.clone();
        }
        debug_assert_eq!(state, initial);

        Some(solution.into_boxed_slice())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn mask(len: usize, bits: &[usize]) -> RequirementMask {
        let mut mask = RequirementMask::new(len);
        for &bit in bits {
            mask.set(bit, true);
        }
        mask
    }

    #[test]
    fn test_no_groups() {
        let groups: Vec<Vec<usize>> = vec![];
        let cover = ConstrainedSetCover::new(0, &groups, |_| mask(0, &[]));
        assert_eq!(cover.solve(), Some(vec![].into_boxed_slice()));

        let cover = ConstrainedSetCover::new(1, &groups, |_| mask(1, &[]));
        assert_eq!(cover.solve(), None);
    }

    #[test]
    fn test_empty_group() {
        let groups: Vec<Vec<usize>> = vec![vec![0], vec![]];
        let cover = ConstrainedSetCover::new(1, &groups, |_| mask(1, &[0]));
        assert_eq!(cover.solve(), None);
    }

    #[test]
    fn test_first_choice_kept() {
        // Both candidates cover everything: the first one reaching a state is
        // recorded
        let groups = vec![vec![0, 1]];
        let cover = ConstrainedSetCover::new(2, &groups, |_| mask(2, &[0, 1]));
        assert_eq!(cover.solve(), Some(vec![0].into_boxed_slice()));
    }

    #[test]
    fn test_fixed_prefix_and_middle() {
        // Candidates are the requirements they cover
        let groups = vec![vec![vec![0], vec![1]], vec![vec![2], vec![]], vec![vec![1], vec![3]]];
        let cover = ConstrainedSetCover::new(4, &groups, |c: &Vec<usize>| mask(4, c));
        assert_eq!(cover.solve(), None);

        let groups = vec![
            vec![vec![0], vec![1]],
            vec![vec![2], vec![1, 3]],
            vec![vec![1], vec![0, 3]],
        ];
        let cover = ConstrainedSetCover::new(4, &groups, |c: &Vec<usize>| mask(4, c));
        // {1}, {2}, {0, 3} is the only cover
        assert_eq!(cover.solve(), Some(vec![1, 0, 1].into_boxed_slice()));

        assert_eq!(
            cover.solve_from(&[Some(1), None, None]),
            Some(vec![1, 0, 1].into_boxed_slice())
        );
        assert_eq!(cover.solve_from(&[Some(0), None, None]), None);
        assert_eq!(cover.solve_from(&[None, Some(1), None]), None);
        assert_eq!(
            cover.solve_from(&[None, None, Some(1)]),
            Some(vec![1, 0, 1].into_boxed_slice())
        );
        assert_eq!(
            cover.solve_from(&[Some(1), Some(0), Some(1)]),
            Some(vec![1, 0, 1].into_boxed_slice())
        );
        assert_eq!(cover.solve_from(&[Some(1), Some(0), Some(0)]), None);
    }

    #[test]
    #[should_panic]
    fn test_choice_out_of_range() {
        let groups = vec![vec![0]];
        let cover = ConstrainedSetCover::new(1, &groups, |_| mask(1, &[0]));
        cover.solve_from(&[Some(1)]);
    }
}
