use std::io;

use thiserror::Error;

/// Errors that can occur when preparing or executing a trace benchmark.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// The generator was asked to draw values from a range that contains no values.
    #[error("invalid value range: {lo}..={hi} is empty")]
    InvalidValueRange {
        /// Inclusive lower bound that was requested.
        lo: i32,

        /// Inclusive upper bound that was requested.
        hi: i32,
    },

    /// A matrix was constructed from rows that do not form a square.
    #[error("matrix with {rows} rows is not square: row {row} has {len} entries")]
    NonSquareMatrix {
        /// Number of rows provided.
        rows: usize,

        /// Index of the first offending row.
        row: usize,

        /// Length of the offending row.
        len: usize,
    },

    /// A dataset was assembled from matrices that do not share one dimension.
    #[error("matrix {index} has dimension {actual} but the dataset uses dimension {expected}")]
    MixedDimensions {
        /// Dimension of the first matrix in the dataset.
        expected: usize,

        /// Index of the first matrix with a different dimension.
        index: usize,

        /// Dimension of that matrix.
        actual: usize,
    },

    /// A worker was handed a range that is reversed or reaches past the end of the dataset.
    #[error("range {start}..{end} is not valid for a dataset of {len} matrices")]
    RangeOutOfBounds {
        /// Inclusive start of the range.
        start: usize,

        /// Exclusive end of the range.
        end: usize,

        /// Number of matrices in the dataset.
        len: usize,
    },

    /// The benchmark configuration does not name any thread counts to measure.
    #[error("no thread counts configured - at least one candidate is required")]
    NoThreadCounts,

    /// The operating system refused to start a worker thread.
    #[error("failed to spawn worker thread {worker_index}")]
    WorkerSpawn {
        /// Index of the worker that could not be started.
        worker_index: usize,

        /// The underlying failure reported by the operating system.
        #[source]
        source: io::Error,
    },

    /// A worker thread panicked before publishing its partial result.
    #[error("worker thread {worker_index} panicked")]
    WorkerPanicked {
        /// Index of the worker that panicked.
        worker_index: usize,
    },

    /// Writing the benchmark report failed.
    #[error("failed to write report")]
    Io(#[from] io::Error),
}

/// A specialized `Result` type for benchmark operations, returning the crate's
/// [`Error`] type as the error value.
pub type Result<T> = std::result::Result<T, Error>;
