/*
 * SPDX-FileCopyrightText: 2024 Matteo Dell'Acqua
 * SPDX-FileCopyrightText: 2025 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

pub mod algo;
pub mod utils;

/// Module exposing all traits in a single level.
pub mod traits {
    use super::*;
    pub use algo::traits::*;
}

/// Use `use mesp_algo::prelude::*;` to import common utilities, modules and
/// all traits.
pub mod prelude {
    use super::*;
    pub use algo::mesp::{mesp_search, mesp_search_with_progress, MespSolution};
    pub use algo::modulator::{
        modulator_to_disjoint_paths, modulator_to_disjoint_paths_with_progress,
    };
    pub use algo::set_cover::ConstrainedSetCover;
    pub use algo::{Graph, GraphError, Modulator};
    pub use traits::*;
    pub use utils::Threads;
}
