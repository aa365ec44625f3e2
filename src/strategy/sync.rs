//! Synchronous summation strategy
//!
//! Runs the blocking [`Ledger::sum_payments`]: scoped OS threads over the
//! non-empty partitions, joined before the total is returned.

use crate::core::Ledger;
use crate::strategy::SumStrategy;
use crate::types::{LedgerError, Money};

/// Blocking summation on scoped threads
///
/// # Examples
///
/// ```
/// use wallet_ledger::core::Ledger;
/// use wallet_ledger::strategy::{SumStrategy, SyncSumStrategy};
///
/// let mut ledger = Ledger::new();
/// let account = ledger.register("900000001").unwrap();
/// ledger.deposit(account.id, 100).unwrap();
/// ledger.pay(account.id, 40, "food").unwrap();
///
/// assert_eq!(SyncSumStrategy::new(4).sum(&ledger), Ok(40));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct SyncSumStrategy {
    workers: usize,
}

impl SyncSumStrategy {
    /// Create a strategy splitting the payments into `workers` partitions
    pub fn new(workers: usize) -> Self {
        Self { workers }
    }
}

impl SumStrategy for SyncSumStrategy {
    fn sum(&self, ledger: &Ledger) -> Result<Money, LedgerError> {
        let total = ledger.sum_payments(self.workers)?;
        log::debug!(
            "Summed {} payments over {} partitions: {}",
            ledger.payments().len(),
            self.workers.max(1),
            total
        );
        Ok(total)
    }
}
