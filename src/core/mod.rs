//! Core business logic module
//!
//! This module contains the ledger components:
//! - `traits` - Storage and pricing seams, operation outcomes
//! - `ledger` - Account directory, operation orchestration, persistence trigger
//! - `pricing` - Configured fee and interest rates
//! - `session` - Operator session replacing global "current user/customer" state

pub mod ledger;
pub mod pricing;
pub mod session;
pub mod traits;

pub use ledger::Ledger;
pub use pricing::PriceList;
pub use session::Session;
pub use traits::{
    Outcome, Pricing, SnapshotStore, PERSONAL_LOAN_INTEREST, TRANSFER_RATE, WITHDRAW_RATE,
};
