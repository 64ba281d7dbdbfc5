//! Error types for the bank ledger
//!
//! This module defines every error that can surface from a ledger operation,
//! the storage and pricing collaborators, and the login page.
//!
//! # Error Categories
//!
//! - **Validation Errors**: Invalid amount, insufficient funds, self transfer, etc.
//!   The operation is rejected before any state changes and nothing is saved.
//! - **Lookup Errors**: Unknown customer id or account number
//! - **Session Errors**: No active customer, missing permission
//! - **Fatal Errors**: Missing configuration, unreachable storage, I/O failures.
//!   These end the process.

use rust_decimal::Decimal;
use thiserror::Error;

/// Main error type for the bank ledger
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LedgerError {
    /// Non-positive or non-numeric amount supplied to a monetary operation
    #[error("Invalid amount '{amount}'")]
    InvalidAmount {
        /// The rejected amount as the user supplied it
        amount: String,
    },

    /// A debit would push the balance below the credit floor
    #[error("Insufficient funds on account {account_number}: balance {balance}, credit line {credit_line}, requested {requested}")]
    InsufficientFunds {
        account_number: String,
        balance: Decimal,
        credit_line: Decimal,
        /// Total debit including fees
        requested: Decimal,
    },

    /// Decimal arithmetic overflow
    #[error("Arithmetic overflow in {operation} on account {account_number}")]
    ArithmeticOverflow {
        operation: String,
        account_number: String,
    },

    #[error("Customer '{id}' not found")]
    CustomerNotFound { id: String },

    #[error("Account '{account_number}' not found")]
    AccountNotFound { account_number: String },

    /// Source and target of a transfer are the same account
    #[error("Cannot transfer from account {account_number} to itself")]
    SelfTransfer { account_number: String },

    /// Repayment requested while no personal loan is outstanding
    #[error("Account {account_number} has no outstanding personal loan")]
    NoOutstandingLoan { account_number: String },

    /// A credit line proportional to a non-positive balance would be empty
    #[error("Account {account_number} needs a positive balance for a credit line (balance {balance})")]
    CreditLineUnavailable {
        account_number: String,
        balance: Decimal,
    },

    #[error("No customer selected")]
    NoActiveCustomer,

    #[error("User '{username}' is not allowed to {action}")]
    PermissionDenied { username: String, action: String },

    /// A required pricing rate is not configured
    #[error("Missing configuration: rate '{name}'")]
    ConfigurationMissing { name: String },

    /// A configured rate cannot be used as a fraction
    #[error("Invalid rate '{rate}' for '{name}'")]
    InvalidRate { name: String, rate: String },

    /// The storage collaborator cannot provide the snapshot
    #[error("Storage unavailable at {path}: {message}")]
    PersistenceUnavailable { path: String, message: String },

    #[error("I/O error: {message}")]
    Io { message: String },

    #[error("Serialization error: {message}")]
    Serialization { message: String },

    /// The login page could not be served
    #[error("Login failed: {message}")]
    Login { message: String },
}

impl From<std::io::Error> for LedgerError {
    fn from(error: std::io::Error) -> Self {
        LedgerError::Io {
            message: error.to_string(),
        }
    }
}

impl From<serde_json::Error> for LedgerError {
    fn from(error: serde_json::Error) -> Self {
        LedgerError::Serialization {
            message: error.to_string(),
        }
    }
}

// Helper functions for creating common errors

impl LedgerError {
    /// Create an InvalidAmount error
    pub fn invalid_amount(amount: impl ToString) -> Self {
        LedgerError::InvalidAmount {
            amount: amount.to_string(),
        }
    }

    /// Create an InsufficientFunds error
    pub fn insufficient_funds(
        account_number: &str,
        balance: Decimal,
        credit_line: Decimal,
        requested: Decimal,
    ) -> Self {
        LedgerError::InsufficientFunds {
            account_number: account_number.to_string(),
            balance,
            credit_line,
            requested,
        }
    }

    /// Create an ArithmeticOverflow error
    pub fn arithmetic_overflow(operation: &str, account_number: &str) -> Self {
        LedgerError::ArithmeticOverflow {
            operation: operation.to_string(),
            account_number: account_number.to_string(),
        }
    }

    /// Create a CustomerNotFound error
    pub fn customer_not_found(id: &str) -> Self {
        LedgerError::CustomerNotFound { id: id.to_string() }
    }

    /// Create an AccountNotFound error
    pub fn account_not_found(account_number: &str) -> Self {
        LedgerError::AccountNotFound {
            account_number: account_number.to_string(),
        }
    }

    /// Create a ConfigurationMissing error
    pub fn configuration_missing(name: &str) -> Self {
        LedgerError::ConfigurationMissing {
            name: name.to_string(),
        }
    }

    /// Create a PersistenceUnavailable error
    pub fn persistence_unavailable(path: impl ToString, message: impl ToString) -> Self {
        LedgerError::PersistenceUnavailable {
            path: path.to_string(),
            message: message.to_string(),
        }
    }

    /// Create a PermissionDenied error
    pub fn permission_denied(username: &str, action: &str) -> Self {
        LedgerError::PermissionDenied {
            username: username.to_string(),
            action: action.to_string(),
        }
    }

    /// Whether the process cannot continue after this error
    ///
    /// Validation, lookup and session errors are reported to the operator and
    /// the console keeps running. Configuration, storage and I/O errors end it.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            LedgerError::ConfigurationMissing { .. }
                | LedgerError::InvalidRate { .. }
                | LedgerError::PersistenceUnavailable { .. }
                | LedgerError::Io { .. }
                | LedgerError::Serialization { .. }
                | LedgerError::Login { .. }
        )
    }
}
