mod argmax;

/// Module containing mathematical utilities.
pub mod math {
    pub use super::argmax::*;
}

mod bit_mask;
pub use bit_mask::RequirementMask;

mod threadpool;
pub use threadpool::Threads;

pub mod input;

pub mod regression;
