use anyhow::Result;
use dsi_progress_logger::prelude::*;
use mesp_algo::prelude::*;
use rand::{rngs::StdRng, Rng, SeedableRng};

/// A connected graph made of a random spanning tree plus `extra` random edges.
fn random_graph(rng: &mut StdRng, num_nodes: usize, extra: usize) -> Result<Graph> {
    let mut edges = Vec::new();
    for node in 1..num_nodes {
        edges.push((rng.random_range(0..node), node));
    }
    for _ in 0..extra {
        let u = rng.random_range(0..num_nodes);
        let v = rng.random_range(0..num_nodes);
        if u != v {
            edges.push((u, v));
        }
    }
    Ok(Graph::from_edges(num_nodes, edges, no_logging![])?)
}

fn brute_force_size(graph: &Graph) -> Result<usize> {
    let num_nodes = graph.num_nodes();
    let mut best = num_nodes;
    for subset in 0_usize..1 << num_nodes {
        let size = subset.count_ones() as usize;
        if size >= best {
            continue;
        }
        let nodes = (0..num_nodes).filter(|&node| subset & (1 << node) != 0);
        if Modulator::new(num_nodes, nodes)?.is_disjoint_paths_modulator(graph) {
            best = size;
        }
    }
    Ok(best)
}

#[test]
fn test_path() -> Result<()> {
    let graph = Graph::from_edges(5, [(0, 1), (1, 2), (2, 3), (3, 4)], no_logging![])?;
    let modulator = modulator_to_disjoint_paths(&graph, no_logging![]);
    assert!(modulator.is_empty());
    Ok(())
}

#[test]
fn test_star() -> Result<()> {
    let graph = Graph::from_edges(5, [(0, 1), (0, 2), (0, 3), (0, 4)], no_logging![])?;
    let modulator = modulator_to_disjoint_paths(&graph, no_logging![]);
    assert_eq!(modulator.nodes(), &[0]);
    Ok(())
}

#[test]
fn test_cycle() -> Result<()> {
    let graph = Graph::from_edges(5, [(0, 1), (1, 2), (2, 3), (3, 4), (4, 0)], no_logging![])?;
    let modulator = modulator_to_disjoint_paths(&graph, no_logging![]);
    assert_eq!(modulator.len(), 1);
    assert!(modulator.is_disjoint_paths_modulator(&graph));
    Ok(())
}

#[test]
fn test_complete() -> Result<()> {
    let mut edges = vec![];
    for u in 0..5 {
        for v in u + 1..5 {
            edges.push((u, v));
        }
    }
    let graph = Graph::from_edges(5, edges, no_logging![])?;
    let modulator = modulator_to_disjoint_paths(&graph, no_logging![]);
    // Any three nodes of a clique induce a triangle
    assert_eq!(modulator.len(), 3);
    assert!(modulator.is_disjoint_paths_modulator(&graph));
    Ok(())
}

#[test]
fn test_progress() -> Result<()> {
    // Two disjoint triangles joined by an edge need two removals
    let graph = Graph::from_edges(
        6,
        [(0, 1), (1, 2), (2, 0), (3, 4), (4, 5), (5, 3), (2, 3)],
        no_logging![],
    )?;
    let mut budgets = vec![];
    let modulator = modulator_to_disjoint_paths_with_progress(
        &graph,
        |budget, percentage| {
            assert!((0.0..=100.0).contains(&percentage));
            budgets.push(budget);
        },
        no_logging![],
    );
    assert_eq!(modulator.len(), 2);
    assert!(modulator.is_disjoint_paths_modulator(&graph));
    assert_eq!(budgets.first(), Some(&0));
    assert!(budgets.windows(2).all(|w| w[0] < w[1]));
    Ok(())
}

#[test]
fn test_random_graphs() -> Result<()> {
    let mut rng = StdRng::seed_from_u64(0);
    for _ in 0..40 {
        let num_nodes = rng.random_range(1..=9);
        let extra = rng.random_range(0..=num_nodes);
        let graph = random_graph(&mut rng, num_nodes, extra)?;
        let modulator = modulator_to_disjoint_paths(&graph, no_logging![]);
        assert!(modulator.is_disjoint_paths_modulator(&graph));
        assert_eq!(modulator.len(), brute_force_size(&graph)?);
    }
    Ok(())
}
