//! Asynchronous summation strategy
//!
//! This module sums payments on a dedicated tokio multi-threaded runtime,
//! consuming the progressive summation stream.
//!
//! # Architecture
//!
//! ```text
//! AsyncSumStrategy
//!     ├── SumConfig (workers, runtime_threads, report_progress)
//!     └── ProgressiveSum (one tokio task per non-empty partition)
//!         ├── Partial sums in completion order
//!         └── Grand total
//! ```

use crate::core::Ledger;
use crate::strategy::{SumConfig, SumStrategy};
use crate::types::{LedgerError, Money};

/// Summation on tokio tasks with progressive reporting
#[derive(Debug, Clone)]
pub struct AsyncSumStrategy {
    config: SumConfig,
}

impl AsyncSumStrategy {
    /// Create a new AsyncSumStrategy with the specified configuration
    pub fn new(config: SumConfig) -> Self {
        Self { config }
    }
}

impl SumStrategy for AsyncSumStrategy {
    /// Sum payments on a fresh tokio runtime
    ///
    /// Each partial sum is logged as it arrives: at info level when
    /// `report_progress` is set, at debug level otherwise. Blocks until the
    /// stream has produced the grand total.
    fn sum(&self, ledger: &Ledger) -> Result<Money, LedgerError> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(self.config.runtime_threads.max(1))
            .build()
            .map_err(|e| LedgerError::WorkerFailed {
                message: format!("Failed to create tokio runtime: {}", e),
            })?;

        let stream = {
            let _guard = runtime.enter();
            ledger.sum_payments_progressive(self.config.workers)?
        };
        runtime.block_on(stream.total_with(self.config.report_progress))
    }
}
