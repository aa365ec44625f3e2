//! Types module
//!
//! Contains core data structures used throughout the application.
//! This module organizes types into logical submodules:
//! - `account`: Account-related types
//! - `payment`: Payment records, statuses and identifiers
//! - `favorite`: Saved payment templates
//! - `error`: Error types for the wallet ledger

pub mod account;
pub mod error;
pub mod favorite;
pub mod payment;

pub use account::{Account, AccountId};
pub use error::LedgerError;
pub use favorite::{Favorite, FavoriteId};
pub use payment::{Payment, PaymentId, PaymentStatus};

/// Amount of money in minor currency units (cents, kopecks, dirams, ...)
pub type Money = i64;
