//! Ledger: the account directory and operation orchestration
//!
//! The `Ledger` owns every account and user, resolves customer ids and
//! account numbers, runs the monetary operations on the right account(s) and
//! writes a full snapshot to the storage collaborator after every operation
//! that changed state.
//!
//! Rejected operations (invalid amount, insufficient funds, loan already
//! granted, unknown account) never reach the store: accounts validate before
//! they mutate, so there is nothing to save.

use crate::core::traits::{Outcome, Pricing, SnapshotStore, TRANSFER_RATE, WITHDRAW_RATE};
use crate::types::{
    generate_account_number, generate_customer_id, Account, CustomerId, LedgerError,
    LoanDecision, Snapshot, User,
};
use rust_decimal::Decimal;
use tracing::{debug, info, warn};

/// In-memory ledger backed by a snapshot store and a pricing source
pub struct Ledger<S, P> {
    state: Snapshot,
    store: S,
    pricing: P,
}

impl<S: SnapshotStore, P: Pricing> Ledger<S, P> {
    /// Load the ledger from `store`
    ///
    /// # Errors
    ///
    /// Propagates the store's load error (`PersistenceUnavailable` when the
    /// backing store is missing). Callers treat it as fatal.
    pub fn open(mut store: S, pricing: P) -> Result<Self, LedgerError> {
        let state = store.load()?;
        info!(
            customers = state.customers.len(),
            users = state.users.len(),
            "ledger loaded"
        );

        Ok(Ledger {
            state,
            store,
            pricing,
        })
    }

    pub fn customers(&self) -> &[Account] {
        &self.state.customers
    }

    pub fn users(&self) -> &[User] {
        &self.state.users
    }

    /// The current in-memory snapshot
    pub fn snapshot(&self) -> &Snapshot {
        &self.state
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn pricing(&self) -> &P {
        &self.pricing
    }

    /// Look up an account by its customer id
    pub fn find_by_id(&self, id: &str) -> Option<&Account> {
        let found = self.state.customers.iter().find(|c| c.id() == id);
        debug!(id, found = found.is_some(), "lookup by id");
        found
    }

    /// Look up an account by its account number
    pub fn find_by_account_number(&self, account_number: &str) -> Option<&Account> {
        let found = self
            .state
            .customers
            .iter()
            .find(|c| c.account_number() == account_number);
        debug!(account_number, found = found.is_some(), "lookup by account number");
        found
    }

    /// Like `find_by_id`, reporting a missing customer as `CustomerNotFound`
    pub fn customer(&self, id: &str) -> Result<&Account, LedgerError> {
        self.find_by_id(id)
            .ok_or_else(|| LedgerError::customer_not_found(id))
    }

    /// Find the user with exactly these credentials
    pub fn find_user(&self, username: &str, password: &str) -> Option<&User> {
        self.state
            .users
            .iter()
            .find(|u| u.matches(username, password))
    }

    /// Sum of all account balances
    pub fn total_balance(&self) -> Decimal {
        self.state.customers.iter().map(Account::balance).sum()
    }

    /// Register a new customer with zero balances and persist the ledger
    ///
    /// Both the identifier and the account number are regenerated until they
    /// are unique within the ledger.
    ///
    /// # Returns
    ///
    /// The new customer's identifier
    pub fn register_customer(&mut self, name: &str, email: &str) -> Result<CustomerId, LedgerError> {
        let mut id = generate_customer_id();
        while self.find_by_id(&id).is_some() {
            id = generate_customer_id();
        }

        let mut account_number = generate_account_number();
        while self.find_by_account_number(&account_number).is_some() {
            account_number = generate_account_number();
        }

        self.state
            .customers
            .push(Account::new(id.as_str(), name.trim(), email.trim(), account_number.as_str()));
        info!(id = %id, account_number = %account_number, "customer registered");

        self.persist()?;
        Ok(id)
    }

    /// Deposit `amount` into the customer's account
    pub fn deposit(&mut self, id: &str, amount: Decimal) -> Result<(), LedgerError> {
        self.apply_and_persist(id, "deposit", |account| account.deposit(amount))
    }

    /// Withdraw `amount` from the customer's account, charging the `withdraw` rate
    ///
    /// # Errors
    ///
    /// A missing `withdraw` rate is `ConfigurationMissing` and nothing is applied.
    pub fn withdraw(&mut self, id: &str, amount: Decimal) -> Result<(), LedgerError> {
        let fee_rate = self.pricing.rate(WITHDRAW_RATE)?;
        self.apply_and_persist(id, "withdrawal", |account| {
            account.withdraw(amount, fee_rate)
        })
    }

    /// Transfer `amount` from the customer's account to `target_account_number`
    ///
    /// The source pays the `transaction` rate on top of the amount; the fee is
    /// not credited anywhere. Both accounts are borrowed mutably for the whole
    /// operation, so no caller ever observes one side applied without the other.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The `transaction` rate is missing
    /// - The source id or the target account number is unknown
    /// - Source and target are the same account
    /// - The account-level transfer is rejected (amount, funds)
    pub fn transfer(
        &mut self,
        source_id: &str,
        target_account_number: &str,
        amount: Decimal,
    ) -> Result<(), LedgerError> {
        let fee_rate = self.pricing.rate(TRANSFER_RATE)?;

        let source = self.index_of_id(source_id)?;
        let target = self
            .state
            .customers
            .iter()
            .position(|c| c.account_number() == target_account_number)
            .ok_or_else(|| LedgerError::account_not_found(target_account_number))?;

        if source == target {
            return Err(LedgerError::SelfTransfer {
                account_number: target_account_number.to_string(),
            });
        }

        let (source_account, target_account) = pair_mut(&mut self.state.customers, source, target);
        if let Err(e) = source_account.transfer_to(target_account, amount, fee_rate) {
            warn!(source = source_id, target = target_account_number, error = %e, "transfer rejected");
            return Err(e);
        }
        info!(source = source_id, target = target_account_number, %amount, %fee_rate, "transfer applied");

        self.persist()
    }

    /// Grant the customer a credit line of 1.5 times the current balance
    pub fn request_account_loan(&mut self, id: &str) -> Result<LoanDecision, LedgerError> {
        self.apply_and_persist(id, "credit line", Account::request_account_loan)
    }

    /// Pay out a personal loan of `amount`
    pub fn request_personal_loan(
        &mut self,
        id: &str,
        amount: Decimal,
    ) -> Result<LoanDecision, LedgerError> {
        self.apply_and_persist(id, "personal loan", |account| {
            account.request_personal_loan(amount)
        })
    }

    /// Repay up to `amount` of the personal loan, returning what was repaid
    pub fn repay_personal_loan(&mut self, id: &str, amount: Decimal) -> Result<Decimal, LedgerError> {
        self.apply_and_persist(id, "repayment", |account| {
            account.repay_personal_loan(amount)
        })
    }

    /// Run `operation` on the customer's account and persist on change
    ///
    /// A rejected operation is logged and returned without touching the store.
    /// An accepted operation whose outcome reports no state change (a loan that
    /// was already granted) is not persisted either.
    pub fn apply_and_persist<T, F>(
        &mut self,
        id: &str,
        operation: &str,
        f: F,
    ) -> Result<T, LedgerError>
    where
        T: Outcome + std::fmt::Debug,
        F: FnOnce(&mut Account) -> Result<T, LedgerError>,
    {
        let index = self.index_of_id(id)?;
        let account = &mut self.state.customers[index];

        let outcome = match f(account) {
            Ok(outcome) => outcome,
            Err(e) => {
                warn!(id, operation, error = %e, "operation rejected");
                return Err(e);
            }
        };

        if !outcome.changed_state() {
            info!(id, operation, ?outcome, "operation left account unchanged");
            return Ok(outcome);
        }

        info!(id, operation, ?outcome, balance = %account.balance(), "operation applied");
        self.persist()?;
        Ok(outcome)
    }

    fn index_of_id(&self, id: &str) -> Result<usize, LedgerError> {
        self.state
            .customers
            .iter()
            .position(|c| c.id() == id)
            .ok_or_else(|| LedgerError::customer_not_found(id))
    }

    fn persist(&mut self) -> Result<(), LedgerError> {
        self.store.save(&self.state)?;
        debug!(customers = self.state.customers.len(), "snapshot saved");
        Ok(())
    }
}

/// Mutable references to two distinct elements of a slice
fn pair_mut<T>(items: &mut [T], first: usize, second: usize) -> (&mut T, &mut T) {
    debug_assert_ne!(first, second);
    if first < second {
        let (left, right) = items.split_at_mut(second);
        (&mut left[first], &mut right[0])
    } else {
        let (left, right) = items.split_at_mut(first);
        (&mut right[0], &mut left[second])
    }
}
