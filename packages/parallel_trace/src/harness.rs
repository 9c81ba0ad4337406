use std::io::Write;
use std::num::NonZero;
use std::thread::{self, ScopedJoinHandle};
use std::time::Instant;

use derive_more::Display;
use tracing::debug;

use crate::{Dataset, Error, Partition, RunReport, report, trace_worker};

/// Stages that every measured thread count goes through, in order.
#[derive(Clone, Copy, Debug, Display, Eq, PartialEq)]
enum Phase {
    #[display("idle")]
    Idle,
    #[display("dispatching")]
    Dispatching,
    #[display("joining")]
    Joining,
    #[display("aggregating")]
    Aggregating,
    #[display("reporting")]
    Reporting,
}

/// Measures how long it takes to sum the traces of a dataset with a given number of
/// freshly spawned worker threads.
///
/// Every measurement spawns new threads and joins them before returning, so the measured
/// time covers thread creation, the work itself and the join. Nothing carries over between
/// measurements except the dataset.
///
/// # Examples
///
/// ```
/// use std::num::NonZero;
///
/// use parallel_trace::{Dataset, Harness};
///
/// let dataset = Dataset::generate(100, 10, -100..=100, Some(1)).unwrap();
/// let harness = Harness::new(&dataset);
///
/// let report = harness.measure(NonZero::new(4).unwrap()).unwrap();
///
/// assert_eq!(report.total_trace(), dataset.serial_trace_sum());
/// ```
#[derive(Clone, Copy, Debug)]
pub struct Harness<'d> {
    dataset: &'d Dataset,
}

impl<'d> Harness<'d> {
    /// Creates a harness that measures work over `dataset`.
    #[must_use]
    pub fn new(dataset: &'d Dataset) -> Self {
        Self { dataset }
    }

    /// Measures every thread count in order, writing a header before each measurement and
    /// the report after it.
    ///
    /// # Errors
    ///
    /// Returns the first error from [`measure()`][Self::measure] or from writing to `out`.
    /// Thread counts after a failed one are not measured.
    pub fn run_all(
        &self,
        thread_counts: &[NonZero<usize>],
        out: &mut impl Write,
    ) -> crate::Result<Vec<RunReport>> {
        let mut reports = Vec::with_capacity(thread_counts.len());

        for &thread_count in thread_counts {
            report::write_run_header(out, thread_count)?;

            let run_report = self.measure(thread_count)?;

            debug!(
                phase = %Phase::Reporting,
                threads = thread_count.get(),
                total_trace = run_report.total_trace(),
                "writing report"
            );
            report::write_run_report(out, &run_report)?;

            debug!(phase = %Phase::Idle, threads = thread_count.get(), "measurement complete");
            reports.push(run_report);
        }

        Ok(reports)
    }

    /// Splits the dataset across `thread_count` new threads, waits for all of them and sums
    /// their subtotals.
    ///
    /// The timer starts before the work is partitioned and stops once every worker has been
    /// joined. Summing the subtotals is not measured.
    ///
    /// # Errors
    ///
    /// Returns [`Error::WorkerSpawn`] if a thread cannot be started and
    /// [`Error::WorkerPanicked`] if a worker panics. Workers that were started are always
    /// joined before the error is returned.
    pub fn measure(&self, thread_count: NonZero<usize>) -> crate::Result<RunReport> {
        let mut slots = vec![0_i64; thread_count.get()];

        debug!(phase = %Phase::Dispatching, threads = thread_count.get(), "starting workers");

        let start = Instant::now();

        let partition = Partition::new(self.dataset.len(), thread_count);
        let outcome = dispatch_and_join(self.dataset, partition, &mut slots);

        let elapsed = start.elapsed();
        outcome?;

        debug!(
            phase = %Phase::Aggregating,
            threads = thread_count.get(),
            ?elapsed,
            "all workers joined"
        );

        Ok(RunReport::new(slots.into_boxed_slice(), elapsed))
    }
}

/// Starts one scoped worker thread per partition range, each publishing into its own slot,
/// and joins all of them.
fn dispatch_and_join(
    dataset: &Dataset,
    partition: Partition,
    slots: &mut [i64],
) -> crate::Result<()> {
    thread::scope(|scope| {
        let mut handles = Vec::with_capacity(slots.len());
        let mut spawn_error = None;

        for (worker_index, (range, slot)) in partition.ranges().zip(slots.iter_mut()).enumerate() {
            let spawned = thread::Builder::new()
                .name(format!("trace-worker-{worker_index}"))
                .spawn_scoped(scope, move || trace_worker(dataset, range, slot));

            match spawned {
                Ok(handle) => handles.push(handle),
                Err(source) => {
                    spawn_error = Some(Error::WorkerSpawn {
                        worker_index,
                        source,
                    });
                    break;
                }
            }
        }

        debug!(phase = %Phase::Joining, workers = handles.len(), "waiting for workers");

        let joined = join_all(handles);

        spawn_error.map_or(joined, Err)
    })
}

/// Joins every handle, returning the first failure in worker order.
fn join_all(handles: Vec<ScopedJoinHandle<'_, crate::Result<()>>>) -> crate::Result<()> {
    let mut outcome = Ok(());

    for (worker_index, handle) in handles.into_iter().enumerate() {
        let result = handle
            .join()
            .unwrap_or(Err(Error::WorkerPanicked { worker_index }));

        if outcome.is_ok() {
            outcome = result;
        }
    }

    outcome
}
