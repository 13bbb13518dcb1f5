use crate::algo::DistanceOracle;

/// Returns the nodes of `graph` in path order, starting from the smallest
/// end, if `graph` is a simple path; [`None`] otherwise.
///
/// Runs in linear time.
pub fn simple_path(graph: &impl DistanceOracle) -> Option<Box<[usize]>> {
    let num_nodes = graph.num_nodes();
    if (0..num_nodes).any(|node| graph.degree(node) > 2) {
        return None;
    }
    // A connected graph of maximum degree two is a path iff it has an end
    let start = (0..num_nodes).find(|&node| graph.degree(node) <= 1)?;

    let mut path = Vec::with_capacity(num_nodes);
    let mut pred = None;
    let mut curr = start;
    loop {
        path.push(curr);
        if path.len() > num_nodes {
            return None;
        }
        let next = graph
            .neighbors(curr)
            .iter()
            .copied()
            .find(|&succ| Some(succ) != pred);
        match next {
            Some(succ) => {
                pred = Some(curr);
                curr = succ;
            }
            None => break,
        }
    }

    (path.len() == num_nodes).then(|| path.into_boxed_slice())
}
