//! Work partitioning for per-axis passes.
//!
//! Rows along the pass axis are independent, so a pass is parallelized by
//! splitting the volume along some *other* axis and handing each worker a
//! slab of rows.

/// Choose the axis to split a pass over.
///
/// Picks the highest-indexed axis with extent > 1 that is not the pass
/// axis. Returns `None` when no such axis exists, in which case the pass
/// runs on a single worker.
pub(crate) fn split_axis(shape: &[usize], pass_axis: usize) -> Option<usize> {
    (0..shape.len())
        .rev()
        .find(|&d| d != pass_axis && shape[d] > 1)
}

/// Slab thickness along the split axis for the requested worker count.
///
/// `⌈extent / workers⌉`, so chunking by this length yields
/// `⌈extent / ⌈extent / workers⌉⌉` pieces with the last piece absorbing
/// the remainder.
pub(crate) fn piece_len(extent: usize, workers: usize) -> usize {
    extent.div_ceil(workers.max(1)).max(1)
}
