use std::ops::Range;

use tracing::trace;

use crate::{Dataset, Matrix};

/// Sums the traces of the matrices in `range` and publishes the subtotal into `slot`.
///
/// The slot is borrowed exclusively, so no other worker can write it and nobody can read it
/// until this worker has returned.
///
/// # Errors
///
/// Returns [`Error::RangeOutOfBounds`][crate::Error::RangeOutOfBounds] if `range` is reversed
/// or extends past the end of `dataset`. The slot is left untouched in that case.
///
/// # Examples
///
/// ```
/// use parallel_trace::{Dataset, Matrix, trace_worker};
///
/// let dataset = Dataset::from_matrices(vec![Matrix::identity(3); 4]).unwrap();
///
/// let mut subtotal = 0;
/// trace_worker(&dataset, 1..3, &mut subtotal).unwrap();
///
/// assert_eq!(subtotal, 6);
/// ```
pub fn trace_worker(dataset: &Dataset, range: Range<usize>, slot: &mut i64) -> crate::Result<()> {
    let matrices = dataset.slice(range.clone())?;

    let subtotal = sum_traces(matrices);

    trace!(start = range.start, end = range.end, subtotal, "worker finished");

    *slot = subtotal;
    Ok(())
}

/// Sums the traces of every matrix in `matrices`.
#[must_use]
pub fn sum_traces(matrices: &[Matrix]) -> i64 {
    matrices.iter().map(Matrix::trace).sum()
}
