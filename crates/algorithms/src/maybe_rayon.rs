/// Compatibility layer for rayon/sequential execution.
///
/// With the `parallel` feature this re-exports rayon's parallel iterators;
/// without it (minimal or single-threaded builds) the same call sites
/// resolve to plain `Iterator` chains through the stand-ins below.
#[cfg(feature = "parallel")]
pub use rayon::prelude::*;

/// Number of workers the row partitioner should plan for.
#[cfg(feature = "parallel")]
pub fn worker_count() -> usize {
    rayon::current_num_threads()
}

#[cfg(not(feature = "parallel"))]
mod sequential {
    /// Sequential stand-in for `rayon::prelude::IntoParallelIterator`.
    ///
    /// `into_par_iter()` becomes `into_iter()`, so the rest of the chain
    /// (`.zip()`, `.for_each()`, ...) resolves to the standard `Iterator`
    /// methods.
    pub trait IntoParallelIterator {
        type Iter;
        type Item;
        fn into_par_iter(self) -> Self::Iter;
    }

    impl<I: IntoIterator> IntoParallelIterator for I {
        type Iter = I::IntoIter;
        type Item = I::Item;
        fn into_par_iter(self) -> Self::Iter {
            self.into_iter()
        }
    }

    /// Single worker when running sequentially.
    pub fn worker_count() -> usize {
        1
    }
}

#[cfg(not(feature = "parallel"))]
pub use sequential::*;
