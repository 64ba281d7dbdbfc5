//! Bank Ledger Library
//! # Overview
//!
//! This library provides a single-operator banking ledger: customer accounts
//! with balances, a one-off credit line, personal loans and an append-only
//! transaction log, driven from a menu console behind a browser login.
//!
//! # Architecture
//!
//! The system is organized into several key components:
//!
//! - [`types`] - Core data types (Account, TransactionRecord, User, Snapshot, errors)
//! - [`core`] - Business logic components:
//!   - [`core::ledger`] - Account directory, operation orchestration and persistence trigger
//!   - [`core::pricing`] - Named fee and interest rates
//!   - [`core::session`] - Authenticated operator and active customer
//!   - [`core::traits`] - Storage and pricing seams
//! - [`io`] - Snapshot storage (JSON file, in-memory)
//! - [`cli`] - CLI argument parsing and console menus
//! - [`web`] - One-shot login page
//! - [`settings`] - Layered configuration
//!
//! # Monetary Operations
//!
//! - **Deposit**: Credit funds to an account
//! - **Withdraw**: Debit funds plus a fee; may use the credit line
//! - **Transfer**: Debit funds plus a fee from one account, credit another; the fee is credited nowhere
//! - **Credit line**: Granted once at 1.5 times the balance; lowers the floor to `-credit_line`
//! - **Personal loan**: Paid into the balance; repayments are clamped to what is owed
//!
//! # Invariants
//!
//! - `balance >= -credit_line` after every debit
//! - The credit line is granted at most once
//! - The outstanding personal loan never goes below zero
//! - Transaction records are never changed or removed

// Module declarations
pub mod cli;
pub mod core;
pub mod io;
pub mod settings;
pub mod types;
pub mod web;

pub use core::{Ledger, PriceList, Pricing, Session, SnapshotStore};
pub use io::{JsonFileStore, MemoryStore};
pub use types::{
    Account, CustomerId, LedgerError, LoanDecision, Snapshot, TransactionKind, TransactionRecord,
    User,
};
