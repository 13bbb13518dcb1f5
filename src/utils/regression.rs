//! Regression runs over directories of sample graphs.
//!
//! Every file with extension `.in` found (recursively) in the given
//! directories is a test case: the minimum modulator and a MESP of the graph
//! are computed, and the solution is checked to be a shortest path whose
//! eccentricity is the reported one. If a sibling `<name>.ecc` file exists,
//! the reported eccentricity must also match the one it contains.

use super::input::{read_eccentricity, read_graph};
use crate::algo::{mesp::mesp_search, modulator_to_disjoint_paths, DistanceOracle};
use anyhow::{Context, Result};
use dsi_progress_logger::prelude::*;
use rayon::ThreadPool;
use std::fs::File;
use std::io::{BufReader, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

/// The outcome of a regression run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegressionReport {
    /// The number of test cases run.
    pub num_tests: usize,
    /// The number of failed test cases.
    pub num_failures: usize,
    /// One line per failed check, prefixed by the path of the test case.
    pub errors: Vec<String>,
}

impl RegressionReport {
    pub fn is_success(&self) -> bool {
        self.num_failures == 0
    }
}

/// Returns the `.in` files under `dir`, sorted, following symbolic links.
pub fn find_test_cases(dir: impl AsRef<Path>) -> Result<Vec<PathBuf>> {
    let mut cases = vec![];
    let mut stack = vec![dir.as_ref().to_path_buf()];
    while let Some(dir) = stack.pop() {
        let entries = std::fs::read_dir(&dir)
            .with_context(|| format!("Could not read directory {}", dir.display()))?;
        for entry in entries {
            let path = entry?.path();
            // `metadata` follows symbolic links
            let metadata = std::fs::metadata(&path)
                .with_context(|| format!("Could not stat {}", path.display()))?;
            if metadata.is_dir() {
                stack.push(path);
            } else if metadata.is_file() && path.extension().is_some_and(|ext| ext == "in") {
                cases.push(path);
            }
        }
    }
    cases.sort();
    Ok(cases)
}

/// Runs a single test case and returns the failed checks.
pub fn check_test_case(path: &Path, thread_pool: &ThreadPool) -> Result<Vec<String>> {
    let file = File::open(path).with_context(|| format!("Could not open {}", path.display()))?;
    let graph = Arc::new(
        read_graph(BufReader::new(file), no_logging![])
            .with_context(|| format!("Could not load test case {}", path.display()))?,
    );
    let modulator = Arc::new(modulator_to_disjoint_paths(graph.as_ref(), no_logging![]));
    let solution = mesp_search(&graph, &modulator, thread_pool, no_logging![]);
    let path_name = path.display();

    let mut errors = vec![];
    let actual = graph.eccentricity(&solution.path);
    if solution.k != actual {
        errors.push(format!(
            "{}\t\t(reported eccentricity) {} != {} (actual eccentricity)",
            path_name, solution.k, actual
        ));
    }
    let (first, last) = (solution.path[0], solution.path[solution.path.len() - 1]);
    if solution.path.len() - 1 != graph.distance(first, last) {
        errors.push(format!("{}\t\tnot a shortest path", path_name));
    }

    let ecc_path = path.with_extension("ecc");
    if ecc_path.is_file() {
        let file = File::open(&ecc_path)
            .with_context(|| format!("Could not open {}", ecc_path.display()))?;
        let expected = read_eccentricity(BufReader::new(file))
            .with_context(|| format!("Invalid eccentricity file {}", ecc_path.display()))?;
        if solution.k != expected {
            errors.push(format!(
                "{}\t\t(reported eccentricity) {} != {} (expected eccentricity)",
                path_name, solution.k, expected
            ));
        }
    }
    Ok(errors)
}

/// Runs all test cases found in `dirs`.
///
/// A `.` (success) or `F` (failure) is written to `out` for each test case,
/// followed by the failed checks and a summary line.
///
/// # Arguments
/// * `dirs`: the directories to search for test cases.
/// * `thread_pool`: the pool running the MESP searches.
/// * `out`: where the results are written.
/// * `pl`: a progress logger, with one item per test case.
pub fn run_regression(
    dirs: &[impl AsRef<Path>],
    thread_pool: &ThreadPool,
    mut out: impl Write,
    pl: &mut impl ProgressLog,
) -> Result<RegressionReport> {
    let mut cases = vec![];
    for dir in dirs {
        cases.extend(find_test_cases(dir)?);
    }

    pl.item_name("test case");
    pl.expected_updates(Some(cases.len()));
    pl.start("Running test cases...");
    let start = Instant::now();

    let mut report = RegressionReport::default();
    for case in &cases {
        let errors = check_test_case(case, thread_pool)?;
        report.num_tests += 1;
        if errors.is_empty() {
            write!(out, ".")?;
        } else {
            write!(out, "F")?;
            report.num_failures += 1;
            report.errors.extend(errors);
        }
        out.flush()?;
        pl.update();
    }
    pl.done();

    let seconds = start.elapsed().as_secs_f64();
    write!(out, "\n\n")?;
    if report.is_success() {
        writeln!(out, "OK ({} tests, {:.2} seconds)", report.num_tests, seconds)?;
    } else {
        for error in &report.errors {
            writeln!(out, "{}", error)?;
        }
        writeln!(
            out,
            "\nFAILURES! ({} tests, {} failures, {:.2} seconds)",
            report.num_tests, report.num_failures, seconds
        )?;
    }
    Ok(report)
}
