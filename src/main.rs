use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use dsi_progress_logger::prelude::*;
use mesp_algo::prelude::*;
use mesp_algo::threads;
use mesp_algo::utils::input::*;
use mesp_algo::utils::regression::run_regression;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use webgraph::prelude::BvGraph;

#[derive(Parser, Debug)]
#[clap(author, version, about = "Exact minimum eccentricity shortest paths.", long_about = None)]
struct Cli {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Finds a minimum modulator to disjoint paths of a graph.
    Modulator {
        /// The graph file; standard input if missing.
        graph: Option<PathBuf>,
        /// Writes the modulator to this file instead of standard output.
        #[clap(short, long)]
        output: Option<PathBuf>,
    },
    /// Finds a minimum modulator to disjoint paths of a symmetric BvGraph.
    BvgraphModulator {
        /// The basename of the graph.
        basename: PathBuf,
        #[clap(short, long)]
        output: Option<PathBuf>,
    },
    /// Finds a minimum eccentricity shortest path using a modulator.
    ///
    /// If no files are given, the graph and then the modulator are read from
    /// standard input.
    Mesp {
        graph: Option<PathBuf>,
        #[clap(requires = "graph")]
        modulator: Option<PathBuf>,
        /// The number of threads; rayon's default if missing.
        #[clap(short = 'j', long = "parallel")]
        threads: Option<NonZeroUsize>,
        #[clap(short, long)]
        output: Option<PathBuf>,
    },
    /// Checks the solvers against the `.in` graphs (and `.ecc` expected
    /// eccentricities) found in the given directories.
    Test {
        #[clap(required = true)]
        dirs: Vec<PathBuf>,
        #[clap(short = 'j', long = "parallel")]
        threads: Option<NonZeroUsize>,
    },
}

fn open(path: &Path) -> Result<BufReader<File>> {
    Ok(BufReader::new(File::open(path).with_context(|| {
        format!("Failed to open file `{}`", path.display())
    })?))
}

fn output(path: Option<&Path>) -> Result<Box<dyn Write>> {
    Ok(match path {
        Some(path) => Box::new(BufWriter::new(File::create(path).with_context(|| {
            format!("Failed to create file `{}`", path.display())
        })?)),
        None => Box::new(std::io::stdout().lock()),
    })
}

fn thread_pool(threads: Option<NonZeroUsize>) -> rayon::ThreadPool {
    match threads {
        Some(num_threads) => threads![num_threads.get()],
        None => threads![],
    }
}

fn main() -> Result<()> {
    stderrlog::new()
        .verbosity(2)
        .timestamp(stderrlog::Timestamp::Second)
        .init()?;
    let mut main_pl = progress_logger![display_memory = true];

    match Cli::parse().command {
        Command::Modulator { graph, output: out } => {
            let graph = match graph {
                Some(path) => read_graph(open(&path)?, &mut main_pl)?,
                None => read_graph(std::io::stdin().lock(), &mut main_pl)?,
            };
            let modulator = modulator_to_disjoint_paths(&graph, &mut main_pl);
            let mut writer = output(out.as_deref())?;
            write_modulator(&mut writer, &modulator)?;
            writer.flush()?;
        }
        Command::BvgraphModulator {
            basename,
            output: out,
        } => {
            let bvgraph = BvGraph::with_basename(&basename).load()?;
            let graph = Graph::from_graph(bvgraph, &mut main_pl)
                .with_context(|| format!("Invalid graph `{}`", basename.display()))?;
            let modulator = modulator_to_disjoint_paths(&graph, &mut main_pl);
            let mut writer = output(out.as_deref())?;
            write_modulator(&mut writer, &modulator)?;
            writer.flush()?;
        }
        Command::Mesp {
            graph,
            modulator,
            threads,
            output: out,
        } => {
            let (graph, modulator) = match (graph, modulator) {
                (Some(graph), Some(modulator)) => {
                    let graph = read_graph(open(&graph)?, &mut main_pl)?;
                    let modulator = read_modulator(open(&modulator)?, graph.num_nodes())?;
                    (graph, modulator)
                }
                (None, None) => read_graph_and_modulator(std::io::stdin().lock(), &mut main_pl)?,
                _ => bail!("Either both the graph and the modulator files or none must be given"),
            };
            if !modulator.is_disjoint_paths_modulator(&graph) {
                bail!("The modulator does not leave a disjoint union of paths");
            }

            let solution = mesp_search(
                &Arc::new(graph),
                &Arc::new(modulator),
                &thread_pool(threads),
                &mut main_pl,
            );
            let mut writer = output(out.as_deref())?;
            write_solution(&mut writer, &solution)?;
            writer.flush()?;
        }
        Command::Test { dirs, threads } => {
            let report = run_regression(
                &dirs,
                &thread_pool(threads),
                std::io::stdout().lock(),
                &mut main_pl,
            )?;
            if !report.is_success() {
                bail!(
                    "{} of {} test cases failed",
                    report.num_failures,
                    report.num_tests
                );
            }
        }
    }

    Ok(())
}
