use std::num::NonZero;
use std::ops::RangeInclusive;

const DEFAULT_MATRIX_COUNT: usize = 1000;
const DEFAULT_MATRIX_SIZE: usize = 50;
const DEFAULT_VALUE_RANGE: RangeInclusive<i32> = -100..=100;

const DEFAULT_THREAD_COUNTS: [NonZero<usize>; 4] = [
    NonZero::new(1).expect("literal is non-zero"),
    NonZero::new(2).expect("literal is non-zero"),
    NonZero::new(4).expect("literal is non-zero"),
    NonZero::new(8).expect("literal is non-zero"),
];

/// Describes the dataset to generate and the thread counts to measure.
///
/// The default value describes the standard benchmark: 1000 matrices of 50x50 values drawn
/// from `-100..=100`, measured with 1, 2, 4 and 8 worker threads, seeded from operating
/// system entropy.
///
/// # Examples
///
/// ```
/// use std::num::NonZero;
///
/// use parallel_trace::BenchConfig;
///
/// let config = BenchConfig::default()
///     .with_matrix_count(16)
///     .with_thread_counts(vec![NonZero::new(3).unwrap()])
///     .with_seed(7);
///
/// assert_eq!(config.matrix_count(), 16);
/// assert_eq!(config.matrix_size(), 50);
/// config.validate().unwrap();
/// ```
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BenchConfig {
    matrix_count: usize,
    matrix_size: usize,
    value_range: RangeInclusive<i32>,
    thread_counts: Vec<NonZero<usize>>,
    seed: Option<u64>,
}

impl BenchConfig {
    /// Number of matrices in the generated dataset.
    #[must_use]
    pub fn matrix_count(&self) -> usize {
        self.matrix_count
    }

    /// Dimension of every generated matrix.
    #[must_use]
    pub fn matrix_size(&self) -> usize {
        self.matrix_size
    }

    /// Inclusive range that generated values are drawn from.
    #[must_use]
    pub fn value_range(&self) -> RangeInclusive<i32> {
        self.value_range.clone()
    }

    /// Thread counts to measure, in the order they are measured.
    #[must_use]
    pub fn thread_counts(&self) -> &[NonZero<usize>] {
        &self.thread_counts
    }

    /// Seed for the dataset generator, if generation is to be reproducible.
    #[must_use]
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Sets the number of matrices in the generated dataset.
    #[must_use]
    pub fn with_matrix_count(mut self, matrix_count: usize) -> Self {
        self.matrix_count = matrix_count;
        self
    }

    /// Sets the dimension of every generated matrix.
    #[must_use]
    pub fn with_matrix_size(mut self, matrix_size: usize) -> Self {
        self.matrix_size = matrix_size;
        self
    }

    /// Sets the inclusive range that generated values are drawn from.
    #[must_use]
    pub fn with_value_range(mut self, value_range: RangeInclusive<i32>) -> Self {
        self.value_range = value_range;
        self
    }

    /// Sets the thread counts to measure.
    #[must_use]
    pub fn with_thread_counts(mut self, thread_counts: Vec<NonZero<usize>>) -> Self {
        self.thread_counts = thread_counts;
        self
    }

    /// Makes dataset generation reproducible by seeding it with `seed`.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Checks that the configuration describes a benchmark that can be executed.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoThreadCounts`][crate::Error::NoThreadCounts] if no thread counts are
    /// configured, or [`Error::InvalidValueRange`][crate::Error::InvalidValueRange] if the
    /// value range is empty.
    pub fn validate(&self) -> crate::Result<()> {
        if self.thread_counts.is_empty() {
            return Err(crate::Error::NoThreadCounts);
        }

        if self.value_range.is_empty() {
            return Err(crate::Error::InvalidValueRange {
                lo: *self.value_range.start(),
                hi: *self.value_range.end(),
            });
        }

        Ok(())
    }
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            matrix_count: DEFAULT_MATRIX_COUNT,
            matrix_size: DEFAULT_MATRIX_SIZE,
            value_range: DEFAULT_VALUE_RANGE,
            thread_counts: DEFAULT_THREAD_COUNTS.to_vec(),
            seed: None,
        }
    }
}
