//! Collaborator traits for storage and pricing
//!
//! The ledger only talks to the outside world through these seams, so the
//! backing store (JSON file, in-memory) and the rate source can be swapped
//! without touching the account logic.

use crate::types::{LedgerError, LoanDecision, Snapshot};
use rust_decimal::Decimal;

/// Rate name looked up for withdrawals
pub const WITHDRAW_RATE: &str = "withdraw";

/// Rate name looked up for transfers
pub const TRANSFER_RATE: &str = "transaction";

/// Interest name looked up for personal loans
pub const PERSONAL_LOAN_INTEREST: &str = "personal_loan";

/// Trait for loading and saving whole-ledger snapshots
pub trait SnapshotStore {
    /// Load the persisted snapshot
    ///
    /// An unreachable or missing store is `PersistenceUnavailable`.
    fn load(&mut self) -> Result<Snapshot, LedgerError>;

    /// Replace the persisted snapshot with `snapshot`
    fn save(&mut self, snapshot: &Snapshot) -> Result<(), LedgerError>;
}

/// Trait for named fee and interest rates
pub trait Pricing {
    /// Fee rate (a fraction) for the named operation
    fn rate(&self, name: &str) -> Result<Decimal, LedgerError>;

    /// Interest rate (a fraction) for the named product
    fn interest(&self, name: &str) -> Result<Decimal, LedgerError>;
}

/// Result of an account operation that may or may not have changed state
///
/// Used by the ledger to decide whether a snapshot write is needed.
pub trait Outcome {
    fn changed_state(&self) -> bool {
        true
    }
}

impl Outcome for () {}

impl Outcome for Decimal {}

impl Outcome for LoanDecision {
    fn changed_state(&self) -> bool {
        matches!(self, LoanDecision::Granted(_))
    }
}
