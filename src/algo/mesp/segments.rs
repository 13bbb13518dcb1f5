use crate::algo::{DistanceOracle, Modulator};
use std::collections::VecDeque;

/// Returns all the shortest paths between `from` and `to` whose internal
/// nodes are not in the modulator, or [`None`] if the shortest such paths are
/// longer than the distance between `from` and `to`.
///
/// Paths are returned without their endpoints, so nodes adjacent in the graph
/// yield a single empty segment.
pub fn shortest_segments(
    graph: &impl DistanceOracle,
    modulator: &Modulator,
    from: usize,
    to: usize,
) -> Option<Vec<Box<[usize]>>> {
    debug_assert_ne!(from, to);
    let mut dist = vec![usize::MAX; graph.num_nodes()];
    let mut queue = VecDeque::new();
    dist[to] = 0;
    queue.push_back(to);

    // Stop as soon as `from` leaves the queue: all nodes closer to `to` have
    // been assigned their distance by then
    while let Some(node) = queue.pop_front() {
        if node == from {
            break;
        }
        for &succ in graph.neighbors(node) {
            if dist[succ] != usize::MAX || (succ != from && modulator.contains(succ)) {
                continue;
            }
            dist[succ] = dist[node] + 1;
            queue.push_back(succ);
        }
    }

    if dist[from] != graph.distance(from, to) {
        return None;
    }

    let mut segments = Vec::new();
    let mut current = Vec::with_capacity(dist[from]);
    collect(graph, &dist, from, to, &mut current, &mut segments);
    Some(segments)
}

/// Extends `current` in all possible ways by going down one level of `dist`
/// at a time, until `to` is reached.
fn collect(
    graph: &impl DistanceOracle,
    dist: &[usize],
    node: usize,
    to: usize,
    current: &mut Vec<usize>,
    segments: &mut Vec<Box<[usize]>>,
) {
    for &succ in graph.neighbors(node) {
        if dist[succ] == usize::MAX || dist[succ] + 1 != dist[node] {
            continue;
        }
        if succ == to {
            segments.push(current.clone().into_boxed_slice());
            continue;
        }
        current.push(succ);
        collect(graph, dist, succ, to, current, segments);
        current.pop();
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::algo::Graph;
    use dsi_progress_logger::no_logging;

    #[test]
    fn test_ties() -> anyhow::Result<()> {
        // Three routes of length 3 from 0 to 5
        let graph = Graph::from_edges(
            6,
            [(0, 1), (1, 2), (2, 5), (0, 3), (3, 4), (4, 5), (1, 4)],
            no_logging![],
        )?;
        let empty = Modulator::new(6, [])?;
        let mut segments = shortest_segments(&graph, &empty, 0, 5).unwrap();
        segments.sort();
        assert_eq!(
            segments,
            vec![
                vec![1, 2].into_boxed_slice(),
                vec![1, 4].into_boxed_slice(),
                vec![3, 4].into_boxed_slice(),
            ]
        );

        // Forbidding 4 leaves a single route
        let modulator = Modulator::new(6, [4])?;
        let segments = shortest_segments(&graph, &modulator, 0, 5).unwrap();
        assert_eq!(segments, vec![vec![1, 2].into_boxed_slice()]);

        // Forbidding 1 and 4 disconnects 0 from 5
        let modulator = Modulator::new(6, [1, 4])?;
        assert_eq!(shortest_segments(&graph, &modulator, 0, 5), None);
        Ok(())
    }

    #[test]
    fn test_endpoints_in_modulator() -> anyhow::Result<()> {
        let graph = Graph::from_edges(4, [(0, 1), (1, 2), (2, 3)], no_logging![])?;
        let modulator = Modulator::new(4, [0, 1, 3])?;
        assert_eq!(
            shortest_segments(&graph, &modulator, 0, 1),
            Some(vec![vec![].into_boxed_slice()])
        );
        assert_eq!(
            shortest_segments(&graph, &modulator, 1, 3),
            Some(vec![vec![2].into_boxed_slice()])
        );
        // 1 is in the way
        assert_eq!(shortest_segments(&graph, &modulator, 0, 3), None);
        Ok(())
    }
}
