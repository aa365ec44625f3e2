//! Parallel summation of payment amounts
//!
//! The payment collection is cut into contiguous partitions, one per worker.
//! Every worker but the last takes `len / workers` payments; the last worker
//! takes everything that remains, absorbing the division remainder. Zero
//! workers is treated as a single worker over the whole collection.
//!
//! Only partitions holding at least one payment get a thread; an empty
//! partition contributes zero. At most [`THREAD_LIMIT`] threads are spawned,
//! so busy partitions beyond that share a thread.
//!
//! Amounts are accumulated in `i128`. Each partial sum and the grand total
//! must fit in [`Money`], otherwise the summation fails with
//! `ArithmeticOverflow`.

use super::Ledger;
use crate::types::{LedgerError, Money, Payment};
use std::ops::Range;
use std::thread;

/// Upper bound on OS threads spawned by one blocking summation
pub const THREAD_LIMIT: usize = 256;

/// Split `len` items into contiguous ranges for `workers` workers
///
/// Yields exactly `workers.max(1)` ranges lazily, in index order. They cover
/// `0..len` exactly and never overlap. Front ranges are empty when
/// `workers > len`.
pub fn partition(
    len: usize,
    workers: usize,
) -> impl ExactSizeIterator<Item = Range<usize>> + DoubleEndedIterator {
    let workers = workers.max(1);
    let size = len / workers;

    (0..workers).map(move |index| {
        if index + 1 == workers {
            index * size..len
        } else {
            index * size..(index + 1) * size
        }
    })
}

/// Partitions holding at least one item, paired with their worker index
///
/// Never longer than `len`: when `workers > len` every front range is empty
/// and only the last worker has anything to sum.
pub fn busy_partitions(len: usize, workers: usize) -> Vec<(usize, Range<usize>)> {
    let workers = workers.max(1);
    if len == 0 {
        return Vec::new();
    }
    if len / workers == 0 {
        return vec![(workers - 1, 0..len)];
    }

    partition(len, workers).enumerate().collect()
}

/// Add up amounts, failing if the result does not fit in `Money`
pub fn checked_sum<I>(amounts: I) -> Result<Money, LedgerError>
where
    I: IntoIterator<Item = Money>,
{
    let total: i128 = amounts.into_iter().map(i128::from).sum();
    Money::try_from(total).map_err(|_| LedgerError::total_overflow("payment sum"))
}

/// Sum the amounts of a slice of payments
pub fn sum_amounts(payments: &[Payment]) -> Result<Money, LedgerError> {
    checked_sum(payments.iter().map(|payment| payment.amount))
}

impl Ledger {
    /// Sum every payment amount using up to `workers` threads
    ///
    /// Blocks until all workers have finished. Rejected payments are still
    /// counted; rejection does not remove a payment from the ledger.
    ///
    /// # Errors
    ///
    /// Returns `ArithmeticOverflow` if a partial sum or the total exceeds
    /// the range of `Money`.
    pub fn sum_payments(&self, workers: usize) -> Result<Money, LedgerError> {
        let payments = self.payments.as_slice();
        let partitions = busy_partitions(payments.len(), workers);
        if partitions.is_empty() {
            return Ok(0);
        }
        let per_thread = partitions.len().div_ceil(THREAD_LIMIT);

        let partials = thread::scope(|scope| {
            let handles: Vec<_> = partitions
                .chunks(per_thread)
                .map(|group| {
                    scope.spawn(move || {
                        group
                            .iter()
                            .map(|(_, range)| sum_amounts(&payments[range.clone()]))
                            .collect::<Result<Vec<Money>, LedgerError>>()
                    })
                })
                .collect();

            handles
                .into_iter()
                .map(|handle| {
                    handle
                        .join()
                        .unwrap_or_else(|payload| std::panic::resume_unwind(payload))
                })
                .collect::<Result<Vec<_>, LedgerError>>()
        })?;

        checked_sum(partials.into_iter().flatten())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn ledger_with_payments(amounts: &[Money]) -> Ledger {
        let mut ledger = Ledger::new();
        let account = ledger.register("900000001").unwrap();
        let total: Money = amounts.iter().sum();
        if total > 0 {
            ledger.deposit(account.id, total).unwrap();
        }
        for amount in amounts {
            ledger.pay(account.id, *amount, "test").unwrap();
        }
        ledger
    }

    /// Two payments of `Money::MAX`: pay, reject to get the funds back, pay again
    fn ledger_with_oversized_total() -> Ledger {
        let mut ledger = Ledger::new();
        let account = ledger.register("900000001").unwrap();
        ledger.deposit(account.id, Money::MAX).unwrap();
        let first = ledger.pay(account.id, Money::MAX, "big").unwrap();
        ledger.reject(&first.id).unwrap();
        ledger.pay(account.id, Money::MAX, "big").unwrap();
        ledger
    }

    #[rstest]
    #[case::even(10, 2, vec![0..5, 5..10])]
    #[case::remainder_to_last(10, 3, vec![0..3, 3..6, 6..10])]
    #[case::single_worker(7, 1, vec![0..7])]
    #[case::zero_workers(7, 0, vec![0..7])]
    #[case::more_workers_than_items(2, 4, vec![0..0, 0..0, 0..0, 0..2])]
    #[case::empty(0, 3, vec![0..0, 0..0, 0..0])]
    fn test_partition(
        #[case] len: usize,
        #[case] workers: usize,
        #[case] expected: Vec<Range<usize>>,
    ) {
        assert_eq!(partition(len, workers).collect::<Vec<_>>(), expected);
    }

    #[rstest]
    fn test_partition_covers_every_index(
        #[values(0, 1, 5, 17, 100)] len: usize,
        #[values(0, 1, 2, 3, 8, 200)] workers: usize,
    ) {
        let ranges: Vec<_> = partition(len, workers).collect();

        assert_eq!(ranges.len(), workers.max(1));
        let mut next = 0;
        for range in &ranges {
            assert_eq!(range.start, next);
            next = range.end;
        }
        assert_eq!(next, len);
    }

    #[test]
    fn test_partition_with_max_workers_is_lazy() {
        let mut ranges = partition(2, usize::MAX);

        assert_eq!(ranges.len(), usize::MAX);
        assert_eq!(ranges.next(), Some(0..0));
        assert_eq!(ranges.next_back(), Some(0..2));
    }

    #[rstest]
    #[case::empty(0, 4, vec![])]
    #[case::zero_workers(7, 0, vec![(0, 0..7)])]
    #[case::remainder_to_last(10, 3, vec![(0, 0..3), (1, 3..6), (2, 6..10)])]
    #[case::more_workers_than_items(2, 4, vec![(3, 0..2)])]
    #[case::max_workers(2, usize::MAX, vec![(usize::MAX - 1, 0..2)])]
    fn test_busy_partitions(
        #[case] len: usize,
        #[case] workers: usize,
        #[case] expected: Vec<(usize, Range<usize>)>,
    ) {
        assert_eq!(busy_partitions(len, workers), expected);
    }

    #[rstest]
    #[case::fits(vec![Money::MAX, -1, 1], Ok(Money::MAX))]
    #[case::intermediate_overflow_recovers(vec![Money::MAX, 1, -1], Ok(Money::MAX))]
    #[case::overflow(vec![Money::MAX, 1], Err(LedgerError::total_overflow("payment sum")))]
    #[case::underflow(vec![Money::MIN, -1], Err(LedgerError::total_overflow("payment sum")))]
    fn test_checked_sum(#[case] amounts: Vec<Money>, #[case] expected: Result<Money, LedgerError>) {
        assert_eq!(checked_sum(amounts), expected);
    }

    #[rstest]
    fn test_sum_matches_sequential_sum(#[values(0, 1, 2, 3, 7, 50)] workers: usize) {
        let amounts: Vec<Money> = (1..=23).map(|n| n * 10).collect();
        let ledger = ledger_with_payments(&amounts);

        assert_eq!(ledger.sum_payments(workers), Ok(amounts.iter().sum::<Money>()));
    }

    #[rstest]
    fn test_sum_with_far_more_workers_than_payments(
        #[values(100_000, usize::MAX)] workers: usize,
    ) {
        let ledger = ledger_with_payments(&[40]);
        assert_eq!(ledger.sum_payments(workers), Ok(40));
    }

    #[test]
    fn test_sum_with_more_busy_partitions_than_threads() {
        let amounts: Vec<Money> = (1..=(THREAD_LIMIT as Money * 3)).collect();
        let ledger = ledger_with_payments(&amounts);

        assert_eq!(
            ledger.sum_payments(amounts.len()),
            Ok(amounts.iter().sum::<Money>())
        );
    }

    #[rstest]
    fn test_sum_overflow_is_an_error(#[values(1, 2, 100_000)] workers: usize) {
        let ledger = ledger_with_oversized_total();

        assert_eq!(
            ledger.sum_payments(workers),
            Err(LedgerError::total_overflow("payment sum"))
        );
    }

    #[test]
    fn test_sum_of_empty_ledger() {
        let ledger = Ledger::new();
        assert_eq!(ledger.sum_payments(4), Ok(0));
    }

    #[test]
    fn test_sum_counts_rejected_payments() {
        let mut ledger = ledger_with_payments(&[50, 25]);
        let first = ledger.payments()[0].id.clone();
        ledger.reject(&first).unwrap();

        assert_eq!(ledger.sum_payments(1), Ok(75));
    }
}
