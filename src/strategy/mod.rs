//! Summation strategy module
//!
//! This module defines the Strategy pattern for summing the ledger's payment
//! amounts. A strategy can be selected at runtime: blocking OS threads, or
//! tokio tasks that report partial sums as they complete.

use crate::cli::StrategyType;
use crate::core::Ledger;
use crate::types::{LedgerError, Money};

pub mod r#async;
pub mod sync;

pub use self::r#async::AsyncSumStrategy;
pub use sync::SyncSumStrategy;

/// Summation strategy trait
///
/// Each strategy partitions the payments across workers and returns the
/// grand total. The result never depends on the strategy or worker count.
pub trait SumStrategy: Send + Sync {
    /// Sum every payment amount in the ledger
    ///
    /// # Errors
    ///
    /// Returns an error if the workers could not be started or one of them
    /// failed before reporting.
    fn sum(&self, ledger: &Ledger) -> Result<Money, LedgerError>;
}

/// Configuration for summation
#[derive(Clone, Debug)]
pub struct SumConfig {
    /// Number of partitions / workers; zero means a single worker
    pub workers: usize,
    /// Tokio runtime worker threads (async strategy only)
    pub runtime_threads: usize,
    /// Log every partial sum at info level (async strategy only)
    pub report_progress: bool,
}

impl Default for SumConfig {
    fn default() -> Self {
        Self {
            workers: num_cpus::get(),
            runtime_threads: num_cpus::get(),
            report_progress: false,
        }
    }
}

impl SumConfig {
    /// Create a new SumConfig with custom values
    ///
    /// A zero `runtime_threads` falls back to the default. A zero `workers` is
    /// kept as given.
    pub fn new(workers: usize, runtime_threads: usize, report_progress: bool) -> Self {
        let default = Self::default();

        let runtime_threads = if runtime_threads == 0 {
            log::warn!(
                "Invalid runtime_threads ({}), using default ({})",
                runtime_threads,
                default.runtime_threads
            );
            default.runtime_threads
        } else {
            runtime_threads
        };

        Self {
            workers,
            runtime_threads,
            report_progress,
        }
    }
}

/// Create a summation strategy based on the specified strategy type
///
/// # Arguments
///
/// * `strategy_type` - The type of summation strategy to create (Sync or Async)
/// * `config` - Optional configuration; defaults are used when `None`
pub fn create_strategy(
    strategy_type: StrategyType,
    config: Option<SumConfig>,
) -> Box<dyn SumStrategy> {
    let config = config.unwrap_or_default();
    match strategy_type {
        StrategyType::Sync => Box::new(SyncSumStrategy::new(config.workers)),
        StrategyType::Async => Box::new(AsyncSumStrategy::new(config)),
    }
}
