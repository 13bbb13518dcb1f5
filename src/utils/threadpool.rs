/// The size of a [`rayon::ThreadPool`] for the parallel searches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Threads {
    /// As many threads as rayon's default (usually the number of logical CPUs).
    #[default]
    Default,
    NumThreads(usize),
}

impl Threads {
    pub fn build(self) -> rayon::ThreadPool {
        match self {
            Self::Default => rayon::ThreadPoolBuilder::new()
                .build()
                .expect("Should be able to build default threadpool"),
            Self::NumThreads(num_threads) => rayon::ThreadPoolBuilder::new()
                .num_threads(num_threads)
                .build()
                .unwrap_or_else(|_| {
                    panic!(
                        "Should be able to build custom threadpool with {} threads",
                        num_threads
                    )
                }),
        }
    }
}

/// Builds a [`rayon::ThreadPool`].
///
/// With no argument the pool has the default size; otherwise, the argument
/// is the number of threads.
///
/// # Examples
/// ```
/// # use mesp_algo::threads;
/// let pool = threads![2];
/// assert_eq!(pool.current_num_threads(), 2);
/// ```
#[macro_export]
macro_rules! threads {
    () => {
        $crate::utils::Threads::Default.build()
    };
    ($num_threads:expr) => {
        $crate::utils::Threads::NumThreads($num_threads).build()
    };
}
