//! Asynchronous implementations of core components
//!
//! This module provides the progressive summation, which runs one tokio task
//! per non-empty payment partition and reports each partial sum as it
//! completes.
//!
//! # Thread Safety
//!
//! Workers never touch the ledger. They read an `Arc` snapshot of the payment
//! amounts, so the ledger is free again as soon as the workers are spawned.

pub mod progressive;

pub use progressive::{PartialSum, ProgressiveSum, SumProgress};
