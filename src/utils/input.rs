//! Plain-text formats for graphs, modulators and solutions.
//!
//! A graph is described by `<vertex-count> <edge-count>` followed by
//! `<edge-count>` pairs of endpoints; a modulator by its size followed by its
//! nodes. Tokens are separated by arbitrary whitespace.

use crate::algo::{mesp::MespSolution, DistanceOracle, Graph, Modulator};
use anyhow::{anyhow, Context, Result};
use dsi_progress_logger::ProgressLog;
use std::io::{Read, Write};

/// Whitespace-separated unsigned integers.
struct Tokens<'a> {
    iter: std::str::SplitWhitespace<'a>,
}

impl<'a> Tokens<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            iter: text.split_whitespace(),
        }
    }

    fn next(&mut self, what: &str) -> Result<usize> {
        let token = self
            .iter
            .next()
            .ok_or_else(|| anyhow!("Unexpected end of input while reading {}", what))?;
        token
            .parse()
            .with_context(|| format!("Invalid {} `{}`", what, token))
    }
}

fn read_text(mut reader: impl Read, what: &str) -> Result<String> {
    let mut text = String::new();
    reader
        .read_to_string(&mut text)
        .with_context(|| format!("Could not read {}", what))?;
    Ok(text)
}

fn parse_graph(tokens: &mut Tokens<'_>, pl: &mut impl ProgressLog) -> Result<Graph> {
    let num_nodes = tokens.next("vertex count")?;
    let num_edges = tokens.next("edge count")?;
    let mut edges = Vec::with_capacity(num_edges);
    for i in 0..num_edges {
        let u = tokens.next("edge endpoint")?;
        let v = tokens
            .next("edge endpoint")
            .with_context(|| format!("Reading edge {}", i))?;
        edges.push((u, v));
    }
    Graph::from_edges(num_nodes, edges, pl).context("Invalid graph input")
}

fn parse_modulator(tokens: &mut Tokens<'_>, num_nodes: usize) -> Result<Modulator> {
    let size = tokens.next("modulator size")?;
    let nodes = (0..size)
        .map(|_| tokens.next("modulator node"))
        .collect::<Result<Vec<_>>>()?;
    Modulator::new(num_nodes, nodes).context("Invalid modulator input")
}

/// Reads a graph and computes its distances.
pub fn read_graph(reader: impl Read, pl: &mut impl ProgressLog) -> Result<Graph> {
    let text = read_text(reader, "graph")?;
    parse_graph(&mut Tokens::new(&text), pl)
}

/// Reads a modulator for a graph with `num_nodes` nodes.
pub fn read_modulator(reader: impl Read, num_nodes: usize) -> Result<Modulator> {
    let text = read_text(reader, "modulator")?;
    parse_modulator(&mut Tokens::new(&text), num_nodes)
}

/// Reads a graph followed by a modulator from the same input, as happens
/// when both come from standard input.
pub fn read_graph_and_modulator(
    reader: impl Read,
    pl: &mut impl ProgressLog,
) -> Result<(Graph, Modulator)> {
    let text = read_text(reader, "graph and modulator")?;
    let mut tokens = Tokens::new(&text);
    let graph = parse_graph(&mut tokens, pl)?;
    let modulator = parse_modulator(&mut tokens, graph.num_nodes())?;
    Ok((graph, modulator))
}

/// Reads an expected eccentricity, that is, a single unsigned integer.
pub fn read_eccentricity(reader: impl Read) -> Result<usize> {
    let text = read_text(reader, "eccentricity")?;
    Tokens::new(&text).next("eccentricity")
}

/// Writes a modulator in the format accepted by [`read_modulator`].
pub fn write_modulator(mut writer: impl Write, modulator: &Modulator) -> Result<()> {
    writeln!(writer, "{}", modulator.len())?;
    write_nodes(&mut writer, modulator.nodes())
}

/// Writes a solution as `<path-length> <k>` followed by the path.
pub fn write_solution(mut writer: impl Write, solution: &MespSolution) -> Result<()> {
    writeln!(writer, "{} {}", solution.path.len(), solution.k)?;
    write_nodes(&mut writer, &solution.path)
}

fn write_nodes(writer: &mut impl Write, nodes: &[usize]) -> Result<()> {
    let line = nodes
        .iter()
        .map(|node| node.to_string())
        .collect::<Vec<_>>()
        .join(" ");
    writeln!(writer, "{}", line)?;
    Ok(())
}
