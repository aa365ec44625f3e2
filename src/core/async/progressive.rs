//! Progressive summation of payment amounts
//!
//! This module provides `ProgressiveSum`, a stream that reports the partial
//! sum of every worker as soon as that worker finishes, followed by the grand
//! total. Workers run as tokio tasks over a snapshot of the payment amounts.
//! Partitions are laid out as in [`partition`](crate::core::partition); empty
//! partitions get no task and produce no partial sum.
//!
//! # Ordering
//!
//! Partial sums arrive in completion order, which is not deterministic. The
//! final total does not depend on that order.
//!
//! # Overflow
//!
//! A partial sum or a total outside the range of `Money` ends the stream with
//! `ArithmeticOverflow`.

use std::ops::Range;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use futures::stream::{FuturesUnordered, Stream, StreamExt};
use tokio::runtime::Handle;
use tokio::task::JoinHandle;

use crate::core::summation::{busy_partitions, checked_sum};
use crate::core::Ledger;
use crate::types::{LedgerError, Money};

/// Sum computed by one worker over one partition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartialSum {
    /// Worker index, in partition order
    pub worker: usize,

    /// Payment indices this worker covered
    pub range: Range<usize>,

    /// Sum of the amounts in `range`
    pub amount: Money,
}

/// One item of a progressive summation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SumProgress {
    /// A worker finished
    Partial(PartialSum),

    /// All workers finished; always the last item
    Total(Money),
}

/// Stream of partial sums followed by the grand total
///
/// Yields one `Partial` per busy worker in completion order, then one
/// `Total`, then ends. An overflowing sum ends the stream with
/// `ArithmeticOverflow`; a panicked worker ends it with `WorkerFailed`.
/// The stream is consumed once and cannot be restarted.
#[derive(Debug)]
pub struct ProgressiveSum {
    workers: FuturesUnordered<JoinHandle<Result<PartialSum, LedgerError>>>,
    total: i128,
    finished: bool,
}

impl ProgressiveSum {
    /// Spawn one summation task per non-empty partition of `amounts`
    ///
    /// # Errors
    ///
    /// Returns `WorkerFailed` if called outside a tokio runtime.
    pub fn spawn(amounts: Arc<[Money]>, workers: usize) -> Result<Self, LedgerError> {
        let handle = Handle::try_current().map_err(|e| LedgerError::WorkerFailed {
            message: e.to_string(),
        })?;

        let tasks = busy_partitions(amounts.len(), workers)
            .into_iter()
            .map(|(worker, range)| {
                let amounts = Arc::clone(&amounts);
                handle.spawn(async move {
                    checked_sum(amounts[range.clone()].iter().copied()).map(|amount| PartialSum {
                        worker,
                        range,
                        amount,
                    })
                })
            })
            .collect();

        Ok(Self {
            workers: tasks,
            total: 0,
            finished: false,
        })
    }

    /// Drain the stream and return the grand total
    pub async fn total(self) -> Result<Money, LedgerError> {
        self.total_with(false).await
    }

    /// Drain the stream, logging each partial sum, and return the grand total
    ///
    /// Partial sums are logged at info level when `report_progress` is set
    /// and at debug level otherwise.
    pub async fn total_with(mut self, report_progress: bool) -> Result<Money, LedgerError> {
        let level = if report_progress {
            log::Level::Info
        } else {
            log::Level::Debug
        };

        let mut total = 0;
        while let Some(item) = self.next().await {
            match item? {
                SumProgress::Partial(partial) => log::log!(
                    level,
                    "Partial sum from worker {} over payments {:?}: {}",
                    partial.worker,
                    partial.range,
                    partial.amount
                ),
                SumProgress::Total(amount) => total = amount,
            }
        }
        Ok(total)
    }
}

impl Stream for ProgressiveSum {
    type Item = Result<SumProgress, LedgerError>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        if self.finished {
            return Poll::Ready(None);
        }

        match self.workers.poll_next_unpin(cx) {
            Poll::Pending => Poll::Pending,
            Poll::Ready(Some(Ok(Ok(partial)))) => {
                self.total += i128::from(partial.amount);
                Poll::Ready(Some(Ok(SumProgress::Partial(partial))))
            }
            Poll::Ready(Some(Ok(Err(e)))) => {
                self.finished = true;
                self.workers = FuturesUnordered::new();
                Poll::Ready(Some(Err(e)))
            }
            Poll::Ready(Some(Err(e))) => {
                self.finished = true;
                self.workers = FuturesUnordered::new();
                Poll::Ready(Some(Err(LedgerError::WorkerFailed {
                    message: e.to_string(),
                })))
            }
            Poll::Ready(None) => {
                self.finished = true;
                let total = Money::try_from(self.total)
                    .map_err(|_| LedgerError::total_overflow("payment sum"));
                Poll::Ready(Some(total.map(SumProgress::Total)))
            }
        }
    }
}

impl Ledger {
    /// Sum every payment amount, reporting each worker's result as it lands
    ///
    /// Takes a snapshot of the amounts, so the ledger may be used again as soon
    /// as this returns. Must be called from within a tokio runtime.
    pub fn sum_payments_progressive(&self, workers: usize) -> Result<ProgressiveSum, LedgerError> {
        let amounts: Arc<[Money]> = self.payments.iter().map(|payment| payment.amount).collect();
        ProgressiveSum::spawn(amounts, workers)
    }
}
