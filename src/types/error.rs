//! Error types for the wallet ledger
//!
//! This module defines all error types that can occur while operating the ledger
//! or moving its state to and from disk.
//!
//! # Error Categories
//!
//! - **Ledger Errors**: Duplicate phone, unknown account/payment/favorite, insufficient balance, etc.
//! - **Arithmetic Errors**: Overflow in balance calculations
//! - **File I/O Errors**: File not found, permission denied, etc.
//! - **Parse Errors**: Malformed dump records
//! - **Summation Errors**: A worker failed before reporting its partial sum

use super::{AccountId, Money};
use thiserror::Error;

/// Main error type for the wallet ledger
///
/// Every fallible ledger operation returns this enum. Each variant carries
/// enough context to explain the failure without looking at the ledger.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LedgerError {
    /// Another account already holds this phone number
    #[error("Phone {phone} is already registered")]
    DuplicatePhone {
        /// The phone that was requested
        phone: String,
    },

    /// Deposit or payment amount was zero or negative
    #[error("Amount must be greater than zero, got {amount}")]
    AmountMustBePositive {
        /// The rejected amount
        amount: Money,
    },

    /// No account with this ID exists
    #[error("Account {account_id} not found")]
    AccountNotFound {
        /// The ID that was looked up
        account_id: AccountId,
    },

    /// The account cannot cover the requested payment
    ///
    /// The account state remains unchanged.
    #[error("Insufficient balance on account {account_id}: balance {balance}, requested {requested}")]
    InsufficientBalance {
        /// Account ID
        account_id: AccountId,
        /// Balance at the time of the request
        balance: Money,
        /// Requested payment amount
        requested: Money,
    },

    /// No payment with this ID exists
    #[error("Payment {payment_id} not found")]
    PaymentNotFound {
        /// The ID that was looked up
        payment_id: String,
    },

    /// No favorite with this ID exists
    #[error("Favorite {favorite_id} not found")]
    FavoriteNotFound {
        /// The ID that was looked up
        favorite_id: String,
    },

    /// The payment has already been rejected
    ///
    /// Rejecting it again would refund the amount twice.
    #[error("Payment {payment_id} is already rejected")]
    PaymentAlreadyFailed {
        /// The payment ID
        payment_id: String,
    },

    /// Arithmetic overflow would occur
    #[error("Arithmetic overflow in {operation}{}", .account_id.map(|id| format!(" for account {}", id)).unwrap_or_default())]
    ArithmeticOverflow {
        /// Operation that would overflow
        operation: String,
        /// Account whose balance would overflow, if the overflow is tied to one
        account_id: Option<AccountId>,
    },

    /// History pages must hold at least one record
    #[error("Invalid page size {records}: pages must hold at least one payment")]
    InvalidPageSize {
        /// The requested page size
        records: usize,
    },

    /// A summation worker panicked or was cancelled
    #[error("Summation worker failed: {message}")]
    WorkerFailed {
        /// Description of the failure
        message: String,
    },

    /// File not found at the specified path
    #[error("File not found: {path}")]
    FileNotFound {
        /// The path that was not found
        path: String,
    },

    /// I/O error occurred while reading or writing files
    #[error("I/O error: {message}")]
    IoError {
        /// Description of the I/O error
        message: String,
    },

    /// Dump record could not be read
    #[error("Parse error{}: {message}", .line.map(|l| format!(" at line {}", l)).unwrap_or_default())]
    ParseError {
        /// Line number where the error occurred (if available)
        line: Option<u64>,
        /// Description of the parsing error
        message: String,
    },
}

// Conversion from io::Error to LedgerError
impl From<std::io::Error> for LedgerError {
    fn from(error: std::io::Error) -> Self {
        LedgerError::IoError {
            message: error.to_string(),
        }
    }
}

// Conversion from csv::Error to LedgerError
impl From<csv::Error> for LedgerError {
    fn from(error: csv::Error) -> Self {
        if let csv::ErrorKind::Io(io_error) = error.kind() {
            return LedgerError::IoError {
                message: io_error.to_string(),
            };
        }

        let line = error.position().map(|pos| pos.line());

        LedgerError::ParseError {
            line,
            message: error.to_string(),
        }
    }
}

// Helper functions for creating common errors

impl LedgerError {
    /// Create a DuplicatePhone error
    pub fn duplicate_phone(phone: &str) -> Self {
        LedgerError::DuplicatePhone {
            phone: phone.to_string(),
        }
    }

    /// Create an AmountMustBePositive error
    pub fn amount_must_be_positive(amount: Money) -> Self {
        LedgerError::AmountMustBePositive { amount }
    }

    /// Create an AccountNotFound error
    pub fn account_not_found(account_id: AccountId) -> Self {
        LedgerError::AccountNotFound { account_id }
    }

    /// Create an InsufficientBalance error
    pub fn insufficient_balance(account_id: AccountId, balance: Money, requested: Money) -> Self {
        LedgerError::InsufficientBalance {
            account_id,
            balance,
            requested,
        }
    }

    /// Create a PaymentNotFound error
    pub fn payment_not_found(payment_id: &str) -> Self {
        LedgerError::PaymentNotFound {
            payment_id: payment_id.to_string(),
        }
    }

    /// Create a FavoriteNotFound error
    pub fn favorite_not_found(favorite_id: &str) -> Self {
        LedgerError::FavoriteNotFound {
            favorite_id: favorite_id.to_string(),
        }
    }

    /// Create a PaymentAlreadyFailed error
    pub fn payment_already_failed(payment_id: &str) -> Self {
        LedgerError::PaymentAlreadyFailed {
            payment_id: payment_id.to_string(),
        }
    }

    /// Create an ArithmeticOverflow error for an account balance
    pub fn arithmetic_overflow(operation: &str, account_id: AccountId) -> Self {
        LedgerError::ArithmeticOverflow {
            operation: operation.to_string(),
            account_id: Some(account_id),
        }
    }

    /// Create an ArithmeticOverflow error for a payment total
    pub fn total_overflow(operation: &str) -> Self {
        LedgerError::ArithmeticOverflow {
            operation: operation.to_string(),
            account_id: None,
        }
    }

    /// Create a FileNotFound error
    pub fn file_not_found(path: &std::path::Path) -> Self {
        LedgerError::FileNotFound {
            path: path.display().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::duplicate_phone(
        LedgerError::DuplicatePhone { phone: "900000001".to_string() },
        "Phone 900000001 is already registered"
    )]
    #[case::amount_must_be_positive(
        LedgerError::AmountMustBePositive { amount: -5 },
        "Amount must be greater than zero, got -5"
    )]
    #[case::account_not_found(
        LedgerError::AccountNotFound { account_id: 7 },
        "Account 7 not found"
    )]
    #[case::insufficient_balance(
        LedgerError::InsufficientBalance { account_id: 1, balance: 50, requested: 100 },
        "Insufficient balance on account 1: balance 50, requested 100"
    )]
    #[case::payment_already_failed(
        LedgerError::PaymentAlreadyFailed { payment_id: "abc".to_string() },
        "Payment abc is already rejected"
    )]
    #[case::parse_error_with_line(
        LedgerError::ParseError { line: Some(42), message: "Invalid field".to_string() },
        "Parse error at line 42: Invalid field"
    )]
    #[case::parse_error_without_line(
        LedgerError::ParseError { line: None, message: "Invalid field".to_string() },
        "Parse error: Invalid field"
    )]
    #[case::balance_overflow(
        LedgerError::ArithmeticOverflow { operation: "deposit".to_string(), account_id: Some(3) },
        "Arithmetic overflow in deposit for account 3"
    )]
    #[case::total_overflow(
        LedgerError::ArithmeticOverflow { operation: "payment sum".to_string(), account_id: None },
        "Arithmetic overflow in payment sum"
    )]
    #[case::file_not_found(
        LedgerError::FileNotFound { path: "data/accounts.dump".to_string() },
        "File not found: data/accounts.dump"
    )]
    fn test_error_display(#[case] error: LedgerError, #[case] expected: &str) {
        assert_eq!(error.to_string(), expected);
    }

    #[rstest]
    #[case::duplicate_phone(
        LedgerError::duplicate_phone("900000001"),
        LedgerError::DuplicatePhone { phone: "900000001".to_string() }
    )]
    #[case::insufficient_balance(
        LedgerError::insufficient_balance(1, 50, 100),
        LedgerError::InsufficientBalance { account_id: 1, balance: 50, requested: 100 }
    )]
    #[case::payment_not_found(
        LedgerError::payment_not_found("missing"),
        LedgerError::PaymentNotFound { payment_id: "missing".to_string() }
    )]
    #[case::arithmetic_overflow(
        LedgerError::arithmetic_overflow("deposit", 3),
        LedgerError::ArithmeticOverflow { operation: "deposit".to_string(), account_id: Some(3) }
    )]
    #[case::total_overflow(
        LedgerError::total_overflow("payment sum"),
        LedgerError::ArithmeticOverflow { operation: "payment sum".to_string(), account_id: None }
    )]
    fn test_helper_functions(#[case] result: LedgerError, #[case] expected: LedgerError) {
        assert_eq!(result, expected);
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error =
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "Permission denied");
        let error: LedgerError = io_error.into();
        assert!(matches!(error, LedgerError::IoError { .. }));
        assert_eq!(error.to_string(), "I/O error: Permission denied");
    }
}
