//! Operator (bank clerk) records
//!
//! Users are only read by the ledger: they authenticate on the login page and
//! their role decides which menu entries the console offers.

use super::timestamp;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Role granting customer registration
pub const ADMIN_ROLE: &str = "admin";

/// Console operator as stored in the snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub name: String,
    pub email: String,
    pub username: String,
    pub password: String,
    pub role: String,
    #[serde(rename = "createdAt", default = "timestamp::now", with = "timestamp")]
    pub created_at: NaiveDateTime,
}

impl User {
    /// Exact, case-sensitive credential match
    pub fn matches(&self, username: &str, password: &str) -> bool {
        self.username == username && self.password == password
    }

    pub fn is_admin(&self) -> bool {
        self.role == ADMIN_ROLE
    }
}
