/// A square matrix of signed integers, immutable after construction.
///
/// Cells are stored row-major in a single contiguous buffer.
///
/// # Examples
///
/// ```
/// use parallel_trace::Matrix;
///
/// let matrix = Matrix::from_rows(vec![vec![5, 2], vec![3, 5]]).unwrap();
///
/// assert_eq!(matrix.dimension(), 2);
/// assert_eq!(matrix.trace(), 10);
/// ```
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Matrix {
    dimension: usize,
    cells: Box<[i32]>,
}

impl Matrix {
    /// Creates a matrix from a list of rows.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NonSquareMatrix`][crate::Error::NonSquareMatrix] if any row length
    /// differs from the number of rows.
    pub fn from_rows(rows: Vec<Vec<i32>>) -> crate::Result<Self> {
        let dimension = rows.len();

        if let Some((row, len)) = rows
            .iter()
            .map(Vec::len)
            .enumerate()
            .find(|&(_, len)| len != dimension)
        {
            return Err(crate::Error::NonSquareMatrix {
                rows: dimension,
                row,
                len,
            });
        }

        Ok(Self {
            dimension,
            cells: rows.into_iter().flatten().collect(),
        })
    }

    /// Creates a `dimension x dimension` matrix with ones on the main diagonal and
    /// zeroes everywhere else.
    #[must_use]
    pub fn identity(dimension: usize) -> Self {
        let cell_count = cell_count(dimension);

        let cells = (0..cell_count)
            .map(|index| i32::from(is_diagonal(dimension, index)))
            .collect();

        Self { dimension, cells }
    }

    /// Creates a matrix by taking `dimension * dimension` values from the iterator in
    /// row-major order.
    pub(crate) fn from_row_major(dimension: usize, values: impl Iterator<Item = i32>) -> Self {
        let cell_count = cell_count(dimension);
        let cells: Box<[i32]> = values.take(cell_count).collect();

        assert_eq!(
            cells.len(),
            cell_count,
            "value source ended before the matrix was filled"
        );

        Self { dimension, cells }
    }

    /// The number of rows (equal to the number of columns).
    #[must_use]
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// The value at row `row`, column `column`, if both are in bounds.
    #[must_use]
    pub fn get(&self, row: usize, column: usize) -> Option<i32> {
        if row >= self.dimension || column >= self.dimension {
            return None;
        }

        let index = row
            .checked_mul(self.dimension)
            .and_then(|offset| offset.checked_add(column))?;

        self.cells.get(index).copied()
    }

    /// All cells in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = i32> + '_ {
        self.cells.iter().copied()
    }

    /// Sums the entries on the main diagonal.
    ///
    /// The sum is widened to `i64` so that no realistic dimension can overflow it.
    #[must_use]
    pub fn trace(&self) -> i64 {
        // In a row-major square buffer, consecutive diagonal cells are `dimension + 1` apart.
        let stride = self
            .dimension
            .checked_add(1)
            .expect("a matrix whose dimension is usize::MAX cannot exist in memory");

        self.cells.iter().step_by(stride).copied().map(i64::from).sum()
    }
}

fn cell_count(dimension: usize) -> usize {
    dimension
        .checked_mul(dimension)
        .expect("matrix cell count overflowing usize cannot fit in memory anyway")
}

fn is_diagonal(dimension: usize, index: usize) -> bool {
    let (row, column) = num_integer::div_rem(index, dimension);
    row == column
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn identity_trace_is_dimension() {
        for dimension in [1, 2, 7, 50] {
            let matrix = Matrix::identity(dimension);

            assert_eq!(matrix.trace(), i64::try_from(dimension).unwrap());
        }
    }

    #[test]
    fn identity_off_diagonal_is_zero() {
        let matrix = Matrix::identity(3);

        assert_eq!(matrix.get(0, 0), Some(1));
        assert_eq!(matrix.get(1, 1), Some(1));
        assert_eq!(matrix.get(0, 1), Some(0));
        assert_eq!(matrix.get(2, 0), Some(0));
        assert_eq!(matrix.get(3, 0), None);
    }

    #[test]
    fn empty_matrix_has_zero_trace() {
        let matrix = Matrix::from_rows(vec![]).unwrap();

        assert_eq!(matrix.dimension(), 0);
        assert_eq!(matrix.trace(), 0);
        assert_eq!(Matrix::identity(0).trace(), 0);
    }

    #[test]
    fn trace_reads_only_diagonal() {
        let matrix = Matrix::from_rows(vec![vec![10, -10], vec![-5, 7]]).unwrap();
        assert_eq!(matrix.trace(), 17);

        let matrix =
            Matrix::from_rows(vec![vec![1, 2, 3], vec![4, 5, 6], vec![7, 8, 9]]).unwrap();
        assert_eq!(matrix.trace(), 15);
    }

    #[test]
    fn off_diagonal_permutation_keeps_trace() {
        let original =
            Matrix::from_rows(vec![vec![1, 2, 3], vec![4, 5, 6], vec![7, 8, 9]]).unwrap();

        // Off-diagonal values rotated into each other's positions.
        let permuted =
            Matrix::from_rows(vec![vec![1, 8, 4], vec![7, 5, 2], vec![6, 3, 9]]).unwrap();

        assert_ne!(original, permuted);
        assert_eq!(original.trace(), permuted.trace());
    }

    #[test]
    fn trace_widens_to_avoid_overflow() {
        let matrix = Matrix::from_rows(vec![vec![i32::MAX, 0], vec![0, i32::MAX]]).unwrap();

        assert_eq!(matrix.trace(), 2 * i64::from(i32::MAX));
    }

    #[test]
    fn non_square_is_error() {
        let error = Matrix::from_rows(vec![vec![1, 2], vec![3]]).unwrap_err();

        assert!(matches!(
            error,
            crate::Error::NonSquareMatrix {
                rows: 2,
                row: 1,
                len: 1
            }
        ));

        Matrix::from_rows(vec![vec![1, 2, 3], vec![4, 5, 6]]).unwrap_err();
    }

    #[test]
    fn from_row_major_fills_in_order() {
        let matrix = Matrix::from_row_major(2, [1, 2, 3, 4, 99].into_iter());

        assert_eq!(matrix.cells().collect::<Vec<_>>(), vec![1, 2, 3, 4]);
        assert_eq!(matrix.get(1, 0), Some(3));
    }

    #[test]
    #[should_panic]
    fn from_row_major_short_source_panics() {
        _ = Matrix::from_row_major(2, [1, 2, 3].into_iter());
    }
}
