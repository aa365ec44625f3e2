//! Core business logic module
//!
//! This module contains the wallet ledger components:
//! - `ledger` - The `Ledger` store: accounts, payments, favorites and their operations
//! - `summation` - Partitioning rule and blocking parallel summation
//! - `async` - Progressive summation over tokio tasks

pub mod r#async;
pub mod ledger;
pub mod summation;

pub use ledger::Ledger;
pub use r#async::{PartialSum, ProgressiveSum, SumProgress};
pub use summation::{busy_partitions, checked_sum, partition};
