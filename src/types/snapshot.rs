//! Whole-ledger snapshot exchanged with the storage collaborator

use super::account::Account;
use super::user::User;
use serde::{Deserialize, Serialize};

/// Everything the ledger persists: `{ customers: [...], users: [...] }`
///
/// Saving always replaces the previous snapshot in full.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub customers: Vec<Account>,
    #[serde(default)]
    pub users: Vec<User>,
}
