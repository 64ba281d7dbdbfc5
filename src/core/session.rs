//! Interactive session context
//!
//! Holds the authenticated operator and the customer currently being served.
//! A session lives for one console run and is passed to every menu action
//! instead of being kept in global state.

use crate::core::ledger::Ledger;
use crate::core::traits::{Pricing, SnapshotStore};
use crate::types::{CustomerId, LedgerError, User};

#[derive(Debug, Clone)]
pub struct Session {
    user: User,
    active_customer: Option<CustomerId>,
}

impl Session {
    /// Start a session for an authenticated operator
    pub fn new(user: User) -> Self {
        Session {
            user,
            active_customer: None,
        }
    }

    pub fn user(&self) -> &User {
        &self.user
    }

    /// Make `id` the active customer if the ledger knows it
    ///
    /// On failure the previously active customer (if any) stays selected.
    pub fn select_customer<S, P>(&mut self, ledger: &Ledger<S, P>, id: &str) -> Result<(), LedgerError>
    where
        S: SnapshotStore,
        P: Pricing,
    {
        let account = ledger.customer(id)?;
        self.active_customer = Some(account.id().to_string());
        Ok(())
    }

    /// Identifier of the active customer
    pub fn active_customer(&self) -> Result<&str, LedgerError> {
        self.active_customer
            .as_deref()
            .ok_or(LedgerError::NoActiveCustomer)
    }

    pub fn clear_customer(&mut self) {
        self.active_customer = None;
    }

    /// Only administrators may register customers
    pub fn ensure_can_register(&self) -> Result<(), LedgerError> {
        if self.user.is_admin() {
            Ok(())
        } else {
            Err(LedgerError::permission_denied(
                &self.user.username,
                "register customers",
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::pricing::PriceList;
    use crate::io::MemoryStore;
    use crate::types::timestamp;

    fn user(role: &str) -> User {
        User {
            name: "Ada Clerk".to_string(),
            email: "ada@example.com".to_string(),
            username: "ada".to_string(),
            password: "secret".to_string(),
            role: role.to_string(),
            created_at: timestamp::now(),
        }
    }

    #[test]
    fn test_select_customer() {
        let mut ledger = Ledger::open(MemoryStore::default(), PriceList::new()).unwrap();
        let id = ledger.register_customer("Jane", "jane@example.com").unwrap();
        let mut session = Session::new(user("clerk"));

        assert_eq!(session.active_customer(), Err(LedgerError::NoActiveCustomer));

        session.select_customer(&ledger, &id).unwrap();
        assert_eq!(session.active_customer(), Ok(id.as_str()));

        assert!(session.select_customer(&ledger, "none").is_err());
        assert_eq!(session.active_customer(), Ok(id.as_str()));

        session.clear_customer();
        assert!(session.active_customer().is_err());
    }

    #[test]
    fn test_registration_requires_admin() {
        assert!(Session::new(user("admin")).ensure_can_register().is_ok());
        assert_eq!(
            Session::new(user("clerk")).ensure_can_register(),
            Err(LedgerError::permission_denied("ada", "register customers"))
        );
    }

    #[test]
    fn test_session_starts_without_customer() {
        let session = Session::new(user("admin"));
        assert_eq!(session.user().username, "ada");
        assert!(session.active_customer().is_err());
    }
}
