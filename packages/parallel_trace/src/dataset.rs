use std::iter;
use std::ops::{Range, RangeInclusive};

use rand::distr::{Distribution, Uniform};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

use crate::Matrix;

/// The ordered, immutable set of matrices that every benchmark iteration works on.
///
/// All matrices in a dataset share the same dimension. The dataset is shared read-only
/// by all worker threads of an iteration.
///
/// # Examples
///
/// ```
/// use parallel_trace::Dataset;
///
/// let dataset = Dataset::generate(10, 4, -100..=100, Some(42)).unwrap();
///
/// assert_eq!(dataset.len(), 10);
/// assert_eq!(dataset.dimension(), 4);
/// ```
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Dataset {
    dimension: usize,
    matrices: Box<[Matrix]>,
}

impl Dataset {
    /// Generates `count` matrices of `dimension x dimension` cells, each cell drawn
    /// independently and uniformly from `values`.
    ///
    /// With a `seed`, the same arguments always produce the same dataset. Without one,
    /// the random source is seeded from operating system entropy.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidValueRange`][crate::Error::InvalidValueRange] if `values`
    /// is empty.
    pub fn generate(
        count: usize,
        dimension: usize,
        values: RangeInclusive<i32>,
        seed: Option<u64>,
    ) -> crate::Result<Self> {
        let mut rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };

        Self::generate_with_rng(count, dimension, values, &mut rng)
    }

    /// Generates a dataset like [`generate()`][Self::generate] but draws values from a
    /// caller-supplied random source.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidValueRange`][crate::Error::InvalidValueRange] if `values`
    /// is empty.
    pub fn generate_with_rng<R: Rng>(
        count: usize,
        dimension: usize,
        values: RangeInclusive<i32>,
        rng: &mut R,
    ) -> crate::Result<Self> {
        let (lo, hi) = values.into_inner();

        if lo > hi {
            return Err(crate::Error::InvalidValueRange { lo, hi });
        }

        let distribution =
            Uniform::new_inclusive(lo, hi).expect("range was validated as non-empty above");

        let mut cells = distribution.sample_iter(rng);

        let matrices = iter::repeat_with(|| Matrix::from_row_major(dimension, cells.by_ref()))
            .take(count)
            .collect();

        debug!(count, dimension, lo, hi, "generated dataset");

        Ok(Self {
            dimension,
            matrices,
        })
    }

    /// Assembles a dataset from existing matrices.
    ///
    /// An empty list produces an empty dataset of dimension 0.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MixedDimensions`][crate::Error::MixedDimensions] if the matrices
    /// do not all have the same dimension.
    pub fn from_matrices(matrices: Vec<Matrix>) -> crate::Result<Self> {
        let dimension = matrices.first().map_or(0, Matrix::dimension);

        if let Some((index, matrix)) = matrices
            .iter()
            .enumerate()
            .find(|(_, matrix)| matrix.dimension() != dimension)
        {
            return Err(crate::Error::MixedDimensions {
                expected: dimension,
                index,
                actual: matrix.dimension(),
            });
        }

        Ok(Self {
            dimension,
            matrices: matrices.into_boxed_slice(),
        })
    }

    /// Number of matrices in the dataset.
    #[must_use]
    pub fn len(&self) -> usize {
        self.matrices.len()
    }

    /// Whether the dataset contains no matrices.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.matrices.is_empty()
    }

    /// The dimension shared by every matrix in the dataset.
    #[must_use]
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// All matrices, in index order.
    #[must_use]
    pub fn matrices(&self) -> &[Matrix] {
        &self.matrices
    }

    /// The matrices in the half-open index range `range`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::RangeOutOfBounds`][crate::Error::RangeOutOfBounds] if the range is
    /// reversed or extends past the end of the dataset.
    pub fn slice(&self, range: Range<usize>) -> crate::Result<&[Matrix]> {
        self.matrices
            .get(range.clone())
            .ok_or(crate::Error::RangeOutOfBounds {
                start: range.start,
                end: range.end,
                len: self.matrices.len(),
            })
    }

    /// Sums the traces of all matrices on the calling thread.
    ///
    /// This is the reference value that every parallel partition must reproduce.
    #[must_use]
    pub fn serial_trace_sum(&self) -> i64 {
        self.matrices.iter().map(Matrix::trace).sum()
    }
}
