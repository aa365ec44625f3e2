//! Payment-related types for the wallet ledger
//!
//! This module defines payment records and the three-valued payment status.

use super::{AccountId, Money};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Payment identifier
///
/// An opaque, globally unique token (a UUID rendered as a string).
pub type PaymentId = String;

/// Lifecycle status of a payment
///
/// Payments start `InProgress` and can only move to `Fail` (via reject).
/// The text forms are part of the dump file contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PaymentStatus {
    /// Payment completed
    Ok,

    /// Payment was rejected and its amount refunded
    Fail,

    /// Payment was accepted and funds were taken from the account
    InProgress,
}

impl PaymentStatus {
    /// Text form used in dump files
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Ok => "OK",
            PaymentStatus::Fail => "FAIL",
            PaymentStatus::InProgress => "INPROGRESS",
        }
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "OK" => Ok(PaymentStatus::Ok),
            "FAIL" => Ok(PaymentStatus::Fail),
            "INPROGRESS" => Ok(PaymentStatus::InProgress),
            other => Err(format!("Unknown payment status '{}'", other)),
        }
    }
}

/// A payment taken from an account
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Payment {
    /// Unique payment ID
    pub id: PaymentId,

    /// Account the funds were taken from
    pub account_id: AccountId,

    /// Amount in minor units, always positive for ledger-created payments
    pub amount: Money,

    /// Free-form category label (auto, pharmacy, restaurants, ...)
    pub category: String,

    /// Current lifecycle status
    pub status: PaymentStatus,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::ok("OK", PaymentStatus::Ok)]
    #[case::fail("FAIL", PaymentStatus::Fail)]
    #[case::in_progress("INPROGRESS", PaymentStatus::InProgress)]
    fn test_status_text_form(#[case] text: &str, #[case] status: PaymentStatus) {
        assert_eq!(text.parse::<PaymentStatus>(), Ok(status));
        assert_eq!(status.to_string(), text);
    }

    #[rstest]
    #[case::lowercase("fail")]
    #[case::empty("")]
    #[case::unknown("PENDING")]
    fn test_status_rejects_unknown_text(#[case] text: &str) {
        assert!(text.parse::<PaymentStatus>().is_err());
    }
}
