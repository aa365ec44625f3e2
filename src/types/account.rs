//! Account-related types for the wallet ledger

use super::Money;
use serde::Serialize;

/// Account identifier
///
/// Assigned sequentially by the ledger starting at 1 and never reused.
/// Zero is never assigned and marks "no account" in fixed-size buffers.
pub type AccountId = i64;

/// Wallet account state
///
/// Serializes as `id, phone, balance` in that order, which is the record
/// layout of every account file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Account {
    /// Sequential account ID
    pub id: AccountId,

    /// Phone number, unique across all accounts
    pub phone: String,

    /// Current balance in minor units
    ///
    /// Only ever decreased by a successful payment, which checks the
    /// balance first, so it never goes negative through ledger operations.
    pub balance: Money,
}

impl Account {
    /// Create a new account with a zero balance
    pub fn new(id: AccountId, phone: impl Into<String>) -> Self {
        Account {
            id,
            phone: phone.into(),
            balance: 0,
        }
    }
}
