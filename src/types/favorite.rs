//! Favorite payment templates

use super::{AccountId, Money};

/// Favorite identifier, an opaque unique token
pub type FavoriteId = String;

/// A saved payment template
///
/// Account, amount and category are copied from the source payment when the
/// favorite is created and never change afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Favorite {
    /// Unique favorite ID
    pub id: FavoriteId,

    /// Account new payments are taken from
    pub account_id: AccountId,

    /// Amount of each new payment
    pub amount: Money,

    /// User-chosen label
    pub name: String,

    /// Category of each new payment
    pub category: String,
}
