use std::fmt;
use std::io::{self, Write};
use std::num::NonZero;
use std::time::Duration;

const SEPARATOR: &str = "------------------------------------------";

/// Outcome of measuring one thread count.
///
/// The `Display` form is the console block that follows the run header.
///
/// # Examples
///
/// ```
/// use std::io;
///
/// use parallel_trace::{BenchConfig, run_benchmark};
///
/// let config = BenchConfig::default().with_matrix_count(8).with_seed(3);
/// let reports = run_benchmark(&config, &mut io::sink()).unwrap();
///
/// for report in &reports {
///     println!(
///         "{} threads: {} in {:.3} ms",
///         report.thread_count(),
///         report.total_trace(),
///         report.elapsed_millis()
///     );
/// }
/// ```
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RunReport {
    thread_count: NonZero<usize>,
    total_trace: i64,
    partial_traces: Box<[i64]>,
    elapsed: Duration,
}

impl RunReport {
    pub(crate) fn new(partial_traces: Box<[i64]>, elapsed: Duration) -> Self {
        let thread_count = NonZero::new(partial_traces.len())
            .expect("one partial result is published per worker and there is at least one worker");

        Self {
            thread_count,
            total_trace: partial_traces.iter().sum(),
            partial_traces,
            elapsed,
        }
    }

    /// Number of worker threads that took part in the run.
    #[must_use]
    pub fn thread_count(&self) -> NonZero<usize> {
        self.thread_count
    }

    /// Sum of the traces of every matrix in the dataset.
    #[must_use]
    pub fn total_trace(&self) -> i64 {
        self.total_trace
    }

    /// The subtotal published by each worker, in worker order.
    #[must_use]
    pub fn partial_traces(&self) -> &[i64] {
        &self.partial_traces
    }

    /// Wall-clock time from dispatching the first worker until every worker was joined.
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// [`elapsed()`][Self::elapsed] as fractional milliseconds.
    #[must_use]
    #[cfg_attr(test, mutants::skip)] // Real timing logic in tests is not desirable.
    pub fn elapsed_millis(&self) -> f64 {
        self.elapsed.as_secs_f64() * 1000.0
    }
}

impl fmt::Display for RunReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Общий след всех матриц: {}", self.total_trace)?;
        writeln!(f, "Время выполнения: {:.3} мс", self.elapsed_millis())?;
        writeln!(f, "{SEPARATOR}")
    }
}

pub(crate) fn write_preamble(
    out: &mut impl Write,
    matrix_count: usize,
    matrix_size: usize,
) -> io::Result<()> {
    writeln!(
        out,
        "Подготовка данных: создание {matrix_count} матриц размером {matrix_size}x{matrix_size}..."
    )
}

pub(crate) fn write_data_ready(out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "Данные подготовлены.")?;
    writeln!(out)
}

pub(crate) fn write_run_header(
    out: &mut impl Write,
    thread_count: NonZero<usize>,
) -> io::Result<()> {
    writeln!(out, "--- Запуск вычислений с {thread_count} потоком(-ами) ---")
}

pub(crate) fn write_run_report(out: &mut impl Write, report: &RunReport) -> io::Result<()> {
    write!(out, "{report}")?;
    writeln!(out)
}
