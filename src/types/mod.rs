//! Types module
//!
//! Contains core data structures used throughout the application.
//! This module organizes types into logical submodules:
//! - `account`: Customer account and its monetary operations
//! - `transaction`: Transaction log records and kinds
//! - `user`: Console operators
//! - `snapshot`: Persisted ledger state
//! - `error`: Error types for the ledger
//! - `timestamp`: Stored timestamp format

pub mod account;
pub mod error;
pub mod snapshot;
pub mod timestamp;
pub mod transaction;
pub mod user;

pub use account::{generate_account_number, generate_customer_id, Account, CustomerId, LoanDecision};
pub use error::LedgerError;
pub use snapshot::Snapshot;
pub use transaction::{TransactionKind, TransactionRecord};
pub use user::User;
