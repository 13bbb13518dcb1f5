/*
 * SPDX-FileCopyrightText: 2024 Matteo Dell'Acqua
 * SPDX-FileCopyrightText: 2025 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use super::{inner::InnerSolver, simple_path::simple_path, status::RoundStatus};
use crate::algo::{DistanceOracle, Modulator};
use dsi_progress_logger::ProgressLog;
use rayon::ThreadPool;
use std::sync::Arc;
use std::time::Duration;

/// How often progress is reported while waiting for a round to conclude.
const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// A minimum eccentricity shortest path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MespSolution {
    /// The eccentricity of [`path`](Self::path).
    pub k: usize,
    /// The nodes of the path, in order.
    pub path: Box<[usize]>,
}

/// Returns the endpoint configurations `(first, last)` of the inner
/// solvers: no endpoint fixed, only the first one fixed, or both fixed.
///
/// Configurations with only the first endpoint fixed are generated as soon
/// as the modulator is nonempty, not only when it has two or more nodes: a
/// path with one end outside the modulator needs a single modulator node as
/// its other end.
fn configurations(num_nodes: usize, modulator: &Modulator) -> Vec<(Option<usize>, Option<usize>)> {
    let mut configurations = Vec::new();
    if modulator.len() >= 2 {
        configurations.push((None, None));
    }
    for first in (0..num_nodes).filter(|&node| !modulator.contains(node)) {
        if !modulator.is_empty() {
            configurations.push((Some(first), None));
        }
        for last in (first + 1..num_nodes).filter(|&node| !modulator.contains(node)) {
            configurations.push((Some(first), Some(last)));
        }
    }
    configurations
}

/// Returns a minimum eccentricity shortest path of `graph`.
///
/// See [`mesp_search_with_progress`].
pub fn mesp_search<G: DistanceOracle + Send + 'static>(
    graph: &Arc<G>,
    modulator: &Arc<Modulator>,
    thread_pool: &ThreadPool,
    pl: &mut impl ProgressLog,
) -> MespSolution {
    mesp_search_with_progress(graph, modulator, thread_pool, |_, _| {}, pl)
}

/// Returns a minimum eccentricity shortest path of `graph`.
///
/// If `graph` is a path, it is returned with eccentricity zero. Otherwise,
/// for `k` = 1, 2, … an [`InnerSolver`] for each endpoint configuration is
/// spawned on `thread_pool`, and the first path found is returned. Since
/// rounds are run in order, `k` is minimum.
///
/// When a solution is found the remaining tasks of the round are not waited
/// for: tasks that have not started yet return immediately, but tasks
/// already running complete their search, and their result is discarded.
///
/// # Arguments
/// * `graph`: the graph.
/// * `modulator`: a modulator to disjoint paths of `graph`.
/// * `thread_pool`: the pool running the inner solvers.
/// * `progress`: called periodically from the calling thread with the current
///   `k` and the percentage of tasks of the round that have finished.
/// * `pl`: a progress logger, with one task per configuration.
///
/// # Panics
///
/// If no path is found for `k` up to the number of nodes, which would be a
/// bug.
pub fn mesp_search_with_progress<G: DistanceOracle + Send + 'static>(
    graph: &Arc<G>,
    modulator: &Arc<Modulator>,
    thread_pool: &ThreadPool,
    mut progress: impl FnMut(usize, f64),
    pl: &mut impl ProgressLog,
) -> MespSolution {
    if let Some(path) = simple_path(graph.as_ref()) {
        pl.info(format_args!("The graph is a path"));
        return MespSolution { k: 0, path };
    }

    let num_nodes = graph.num_nodes();
    let configurations = configurations(num_nodes, modulator);
    let num_tasks = configurations.len();
    pl.item_name("configuration");

    for k in 1..=num_nodes {
        pl.expected_updates(Some(num_tasks));
        pl.start(format!("Searching for a path of eccentricity {}...", k));

        let status = Arc::new(RoundStatus::new(num_tasks));
        for &(first, last) in &configurations {
            let graph = Arc::clone(graph);
            let modulator = Arc::clone(modulator);
            let status = Arc::clone(&status);
            thread_pool.spawn(move || {
                status.run(|| {
                    InnerSolver::new(graph.as_ref(), &modulator, k, first, last).solve()
                })
            });
        }

        let mut reported = 0;
        let solution = status.wait(POLL_INTERVAL, |finished| {
            progress(k, 100.0 * finished as f64 / num_tasks as f64);
            pl.update_with_count(finished - reported);
            reported = finished;
        });
        pl.done();

        if let Some(path) = solution {
            pl.info(format_args!(
                "Found a shortest path of eccentricity {} with {} nodes",
                k,
                path.len()
            ));
            return MespSolution { k, path };
        }
    }

    panic!(
        "No shortest path of eccentricity at most {} found",
        num_nodes
    );
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_configurations() -> anyhow::Result<()> {
        let modulator = Modulator::new(4, [1])?;
        assert_eq!(
            configurations(4, &modulator),
            vec![
                (Some(0), None),
                (Some(0), Some(2)),
                (Some(0), Some(3)),
                (Some(2), None),
                (Some(2), Some(3)),
                (Some(3), None),
            ]
        );

        let modulator = Modulator::new(3, [])?;
        assert_eq!(
            configurations(3, &modulator),
            vec![(Some(0), Some(1)), (Some(0), Some(2)), (Some(1), Some(2))]
        );

        let modulator = Modulator::new(3, [0, 2])?;
        assert_eq!(configurations(3, &modulator), vec![(None, None), (Some(1), None)]);
        Ok(())
    }
}
