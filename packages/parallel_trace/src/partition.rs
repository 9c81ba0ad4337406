use std::num::NonZero;
use std::ops::Range;

use num_integer::Integer;

/// Static division of `items` consecutive indexes into one contiguous range per worker.
///
/// Every worker except the last receives exactly `items / workers` indexes. The last worker
/// additionally absorbs the remainder, so no index is lost to integer division.
///
/// If there are more workers than items, the base share is zero: all workers but the last
/// receive an empty range and the last one receives every index. The ranges still cover
/// `0..items` exactly once.
///
/// # Examples
///
/// ```
/// use std::num::NonZero;
///
/// use parallel_trace::Partition;
///
/// let partition = Partition::new(10, NonZero::new(3).unwrap());
///
/// assert_eq!(partition.ranges().collect::<Vec<_>>(), vec![0..3, 3..6, 6..10]);
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Partition {
    items: usize,
    workers: NonZero<usize>,
    base: usize,
}

impl Partition {
    /// Partitions `items` indexes across `workers` workers.
    #[must_use]
    pub fn new(items: usize, workers: NonZero<usize>) -> Self {
        let (base, _) = items.div_rem(&workers.get());

        Self {
            items,
            workers,
            base,
        }
    }

    /// Total number of indexes covered by the partition.
    #[must_use]
    pub fn items(&self) -> usize {
        self.items
    }

    /// Number of ranges in the partition, one per worker.
    #[must_use]
    pub fn workers(&self) -> NonZero<usize> {
        self.workers
    }

    /// Number of indexes assigned to every worker except the last.
    #[must_use]
    pub fn base(&self) -> usize {
        self.base
    }

    /// The range assigned to worker `worker_index`, or `None` if there is no such worker.
    #[must_use]
    pub fn range(&self, worker_index: usize) -> Option<Range<usize>> {
        (worker_index < self.workers.get()).then(|| self.range_of(worker_index))
    }

    /// The ranges of all workers, in worker order.
    pub fn ranges(&self) -> impl ExactSizeIterator<Item = Range<usize>> + use<> {
        let partition = *self;
        (0..self.workers.get()).map(move |worker_index| partition.range_of(worker_index))
    }

    fn range_of(&self, worker_index: usize) -> Range<usize> {
        let start = worker_index
            .checked_mul(self.base)
            .expect("start index never exceeds the item count, which fits in usize");

        let end = if worker_index == self.last_worker_index() {
            self.items
        } else {
            start
                .checked_add(self.base)
                .expect("end index never exceeds the item count, which fits in usize")
        };

        start..end
    }

    fn last_worker_index(&self) -> usize {
        self.workers
            .get()
            .checked_sub(1)
            .expect("guarded by NonZero worker count")
    }
}
