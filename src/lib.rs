//! Wallet Ledger Library
//! # Overview
//!
//! This library provides an in-memory personal-finance ledger: accounts,
//! payments and favorite payment templates, with flat-file persistence and
//! parallel summation of payment amounts.
//!
//! # Architecture
//!
//! The system is organized into several key components:
//!
//! - [`types`] - Core data types (Account, Payment, Favorite, LedgerError)
//! - [`cli`] - CLI arguments parsing
//! - [`core`] - Business logic components:
//!   - [`core::ledger`] - The ledger store and all account/payment/favorite operations
//!   - [`core::summation`] - Partitioning rule and blocking parallel summation
//!   - [`core::async`] - Progressive summation stream over tokio tasks
//! - [`io`] - Dump formats, history pages and the account report
//! - [`strategy`] - Selectable summation strategies (sync threads, async tasks)
//! - [`driver`] - The example driver behind the binary
//!
//! # Payment Lifecycle
//!
//! - **Pay**: Take funds from an account; the payment starts `INPROGRESS`
//! - **Reject**: Mark the payment `FAIL` and refund its amount
//! - **Repeat**: Take a new payment with the same account, amount and category
//! - **Favorite**: Save a payment as a template and pay from it later
//!
//! # Money
//!
//! All amounts and balances are integers in minor currency units (cents).

// Module declarations
pub mod cli;
pub mod core;
pub mod driver;
pub mod io;
pub mod strategy;
pub mod types;

pub use crate::core::{Ledger, PartialSum, ProgressiveSum, SumProgress};
pub use io::{write_accounts_csv, ImportReport};
pub use types::{
    Account, AccountId, Favorite, FavoriteId, LedgerError, Money, Payment, PaymentId,
    PaymentStatus,
};
