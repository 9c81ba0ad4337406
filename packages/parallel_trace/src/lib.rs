#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Measures how summing the traces of a fixed set of square matrices scales with the number
//! of worker threads.
//!
//! A dataset of random matrices is generated once, before any timing starts. Then, for each
//! configured thread count, the matrices are split into contiguous ranges (one per worker),
//! a fresh thread is spawned for every range, the threads are joined and their subtotals are
//! summed. The time from dispatch to join is reported alongside the total.
//!
//! The building blocks are public so they can be combined and verified independently:
//!
//! * [`Matrix`] and [`Matrix::trace()`] - the unit of work.
//! * [`Dataset`] - the immutable, optionally seeded, set of matrices shared by all workers.
//! * [`Partition`] - the static split of matrix indexes into per-worker ranges.
//! * [`trace_worker()`] - the work performed by one thread.
//! * [`Harness`] - spawns, joins and times the workers for each thread count.
//!
//! # Example
//!
//! ```
//! use std::num::NonZero;
//!
//! use parallel_trace::{BenchConfig, run_benchmark};
//!
//! let config = BenchConfig::default()
//!     .with_matrix_count(40)
//!     .with_matrix_size(8)
//!     .with_thread_counts(vec![NonZero::new(1).unwrap(), NonZero::new(4).unwrap()])
//!     .with_seed(2024);
//!
//! let mut console = Vec::new();
//! let reports = run_benchmark(&config, &mut console).unwrap();
//!
//! assert_eq!(reports.len(), 2);
//! assert_eq!(reports[0].total_trace(), reports[1].total_trace());
//! ```
//!
//! # Partitioning more workers than matrices
//!
//! Each worker receives `matrices / workers` matrices and the last worker also receives the
//! remainder. When there are more workers than matrices, every worker but the last receives
//! an empty range, and all matrices are still processed exactly once.

use std::io::Write;

use tracing::debug;

mod config;
mod dataset;
mod error;
mod harness;
mod matrix;
mod partition;
mod report;
mod worker;

pub use config::*;
pub use dataset::*;
pub use error::*;
pub use harness::*;
pub use matrix::*;
pub use partition::*;
pub use report::RunReport;
pub use worker::*;

/// Runs the complete benchmark described by `config`, writing the console report to `out`.
///
/// The dataset is generated once, outside of any measurement, and then every configured
/// thread count is measured in order.
///
/// # Errors
///
/// Returns an error if the configuration is invalid, if a worker thread cannot be spawned or
/// panics, or if writing to `out` fails.
pub fn run_benchmark(config: &BenchConfig, out: &mut impl Write) -> Result<Vec<RunReport>> {
    config.validate()?;

    report::write_preamble(out, config.matrix_count(), config.matrix_size())?;

    let dataset = Dataset::generate(
        config.matrix_count(),
        config.matrix_size(),
        config.value_range(),
        config.seed(),
    )?;

    report::write_data_ready(out)?;

    debug!(
        matrices = dataset.len(),
        candidates = config.thread_counts().len(),
        "dataset ready, starting measurements"
    );

    Harness::new(&dataset).run_all(config.thread_counts(), out)
}
