//! Account-related types for the bank ledger
//!
//! This module defines the customer `Account` and its monetary operations.
//! These operations are the only legal mutators of an account's balances and
//! transaction log. Every operation validates before it mutates, so a rejected
//! call leaves the account untouched.

use super::error::LedgerError;
use super::timestamp;
use super::transaction::{TransactionKind, TransactionRecord};
use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Customer identifier (four hex digits)
pub type CustomerId = String;

/// Fixed routing prefix of every account number
pub const ACCOUNT_NUMBER_PREFIX: &str = "1177";

/// Credit line granted per unit of balance
const CREDIT_LINE_FACTOR: Decimal = Decimal::from_parts(15, 0, 0, false, 1);

/// Outcome of a loan request that passed validation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoanDecision {
    /// The loan was granted for the given amount
    Granted(Decimal),

    /// The account already holds this kind of loan; nothing changed
    AlreadyGranted,
}

/// Customer account state
///
/// `balance` may go negative, but never below `-loan_amount` (the credit
/// floor) as a result of a debit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    id: CustomerId,
    name: String,
    email: String,
    #[serde(default = "generate_account_number")]
    account_number: String,
    #[serde(default, with = "rust_decimal::serde::float")]
    balance: Decimal,
    /// Credit line ceiling; zero until granted, set at most once
    #[serde(default, with = "rust_decimal::serde::float")]
    loan_amount: Decimal,
    /// Outstanding personal loan
    #[serde(default, with = "rust_decimal::serde::float")]
    personal_loan_amount: Decimal,
    #[serde(default)]
    transactions: Vec<TransactionRecord>,
    #[serde(rename = "createdAt", default = "timestamp::now", with = "timestamp")]
    created_at: NaiveDateTime,
}

impl Account {
    /// Create an account with zero balances and an empty log
    pub fn new(
        id: impl Into<CustomerId>,
        name: impl Into<String>,
        email: impl Into<String>,
        account_number: impl Into<String>,
    ) -> Self {
        Account {
            id: id.into(),
            name: name.into(),
            email: email.into(),
            account_number: account_number.into(),
            balance: Decimal::ZERO,
            loan_amount: Decimal::ZERO,
            personal_loan_amount: Decimal::ZERO,
            transactions: Vec::new(),
            created_at: timestamp::now(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn account_number(&self) -> &str {
        &self.account_number
    }

    pub fn balance(&self) -> Decimal {
        self.balance
    }

    /// The credit line ceiling (`loan_amount` in stored records)
    pub fn credit_line(&self) -> Decimal {
        self.loan_amount
    }

    pub fn personal_loan(&self) -> Decimal {
        self.personal_loan_amount
    }

    /// Transaction log in the order the records were appended
    pub fn transactions(&self) -> &[TransactionRecord] {
        &self.transactions
    }

    pub fn created_at(&self) -> NaiveDateTime {
        self.created_at
    }

    /// Deposit funds into the account
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `amount` is not positive
    /// - Adding the amount to the balance would overflow
    pub fn deposit(&mut self, amount: Decimal) -> Result<(), LedgerError> {
        ensure_positive(amount)?;

        let new_balance = self
            .balance
            .checked_add(amount)
            .ok_or_else(|| LedgerError::arithmetic_overflow("deposit", &self.account_number))?;

        self.balance = new_balance;
        self.record_own(TransactionKind::Deposit, amount);

        Ok(())
    }

    /// Withdraw funds, charging `amount * fee_rate` on top
    ///
    /// Appends a withdrawal record and, when `fee_rate` is positive, a separate
    /// fee record. The full `amount + amount * fee_rate` is debited; only the
    /// fee record's amount is rounded to two decimals.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `amount` is not positive
    /// - The balance after `amount + fee` would fall below the credit floor
    pub fn withdraw(&mut self, amount: Decimal, fee_rate: Decimal) -> Result<(), LedgerError> {
        ensure_positive(amount)?;

        let (fee, total) = self.with_fee(amount, fee_rate, "withdrawal")?;
        let new_balance = self.covered_balance(total, "withdrawal")?;

        self.balance = new_balance;
        self.record_own(TransactionKind::Withdrawal, amount);
        if fee_rate > Decimal::ZERO {
            self.record_own(TransactionKind::WithdrawalFee, fee.round_dp(2));
        }

        Ok(())
    }

    /// Transfer `amount` to `target`, charging `amount * fee_rate` to this account
    ///
    /// The fee is debited from this account and credited nowhere. Both sides
    /// are validated before either is mutated. The target receives a
    /// credit-in record naming this account.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `amount` is not positive
    /// - Source and target have the same account number
    /// - The source balance after `amount + fee` would fall below the credit floor
    /// - Crediting the target would overflow
    pub fn transfer_to(
        &mut self,
        target: &mut Account,
        amount: Decimal,
        fee_rate: Decimal,
    ) -> Result<(), LedgerError> {
        ensure_positive(amount)?;

        if self.account_number == target.account_number {
            return Err(LedgerError::SelfTransfer {
                account_number: self.account_number.clone(),
            });
        }

        let (fee, total) = self.with_fee(amount, fee_rate, "transfer")?;
        let new_source_balance = self.covered_balance(total, "transfer")?;
        let new_target_balance = target
            .balance
            .checked_add(amount)
            .ok_or_else(|| LedgerError::arithmetic_overflow("transfer", &target.account_number))?;

        // Debit side
        self.balance = new_source_balance;
        self.transactions.push(TransactionRecord::new(
            target.name.as_str(),
            target.account_number.as_str(),
            TransactionKind::TransferOut,
            amount,
        ));
        if fee_rate > Decimal::ZERO {
            self.record_own(TransactionKind::TransferFee, fee.round_dp(2));
        }

        // Credit side
        target.balance = new_target_balance;
        target.transactions.push(TransactionRecord::new(
            self.name.as_str(),
            self.account_number.as_str(),
            TransactionKind::CreditIn,
            amount,
        ));

        Ok(())
    }

    /// Grant a credit line of 1.5 times the current balance
    ///
    /// Only the first successful call changes anything; later calls report
    /// `LoanDecision::AlreadyGranted`.
    ///
    /// # Errors
    ///
    /// Returns `CreditLineUnavailable` if no credit line exists yet and the
    /// balance is not positive.
    pub fn request_account_loan(&mut self) -> Result<LoanDecision, LedgerError> {
        if self.loan_amount != Decimal::ZERO {
            return Ok(LoanDecision::AlreadyGranted);
        }

        if self.balance <= Decimal::ZERO {
            return Err(LedgerError::CreditLineUnavailable {
                account_number: self.account_number.clone(),
                balance: self.balance,
            });
        }

        let credit_line = self
            .balance
            .checked_mul(CREDIT_LINE_FACTOR)
            .ok_or_else(|| LedgerError::arithmetic_overflow("credit line", &self.account_number))?;

        self.loan_amount = credit_line;
        self.record_own(TransactionKind::CreditLineGrant, credit_line);

        Ok(LoanDecision::Granted(credit_line))
    }

    /// Pay out a personal loan into the balance
    ///
    /// # Errors
    ///
    /// Returns an error if `amount` is not positive or the balance would overflow.
    /// An outstanding loan is not an error: it is reported as `AlreadyGranted`.
    pub fn request_personal_loan(&mut self, amount: Decimal) -> Result<LoanDecision, LedgerError> {
        ensure_positive(amount)?;

        if self.personal_loan_amount != Decimal::ZERO {
            return Ok(LoanDecision::AlreadyGranted);
        }

        let new_balance = self.balance.checked_add(amount).ok_or_else(|| {
            LedgerError::arithmetic_overflow("personal loan", &self.account_number)
        })?;

        self.personal_loan_amount = amount;
        self.balance = new_balance;
        self.record_own(TransactionKind::PersonalLoanGrant, amount);

        Ok(LoanDecision::Granted(amount))
    }

    /// Repay the personal loan, returning the amount actually repaid
    ///
    /// Repaying more than is owed repays exactly the outstanding amount.
    ///
    /// # Errors
    ///
    /// The repayment is not a debit against the credit floor: it always
    /// clears up to the outstanding amount, even if the balance goes below
    /// `-credit_line` as a result.
    ///
    /// Returns an error if:
    /// - `amount` is not positive
    /// - No personal loan is outstanding
    /// - Subtracting the repayment from the balance would overflow
    pub fn repay_personal_loan(&mut self, amount: Decimal) -> Result<Decimal, LedgerError> {
        ensure_positive(amount)?;

        if self.personal_loan_amount <= Decimal::ZERO {
            return Err(LedgerError::NoOutstandingLoan {
                account_number: self.account_number.clone(),
            });
        }

        let repaid = amount.min(self.personal_loan_amount);
        let new_balance = self
            .balance
            .checked_sub(repaid)
            .ok_or_else(|| LedgerError::arithmetic_overflow("repayment", &self.account_number))?;

        self.personal_loan_amount -= repaid;
        self.balance = new_balance;
        self.record_own(TransactionKind::PersonalLoanRepayment, repaid);

        Ok(repaid)
    }

    /// Split a debit into its fee and the total to take from the balance
    fn with_fee(
        &self,
        amount: Decimal,
        fee_rate: Decimal,
        operation: &str,
    ) -> Result<(Decimal, Decimal), LedgerError> {
        let fee = amount
            .checked_mul(fee_rate)
            .ok_or_else(|| LedgerError::arithmetic_overflow(operation, &self.account_number))?;

        let total = amount
            .checked_add(fee)
            .ok_or_else(|| LedgerError::arithmetic_overflow(operation, &self.account_number))?;

        Ok((fee, total))
    }

    /// Balance after debiting `total`, if it stays at or above the credit floor
    fn covered_balance(&self, total: Decimal, operation: &str) -> Result<Decimal, LedgerError> {
        let new_balance = self
            .balance
            .checked_sub(total)
            .ok_or_else(|| LedgerError::arithmetic_overflow(operation, &self.account_number))?;

        if new_balance < -self.loan_amount {
            return Err(LedgerError::insufficient_funds(
                &self.account_number,
                self.balance,
                self.loan_amount,
                total,
            ));
        }

        Ok(new_balance)
    }

    fn record_own(&mut self, kind: TransactionKind, amount: Decimal) {
        self.transactions.push(TransactionRecord::new(
            self.name.as_str(),
            self.account_number.as_str(),
            kind,
            amount,
        ));
    }
}

fn ensure_positive(amount: Decimal) -> Result<(), LedgerError> {
    if amount <= Decimal::ZERO {
        return Err(LedgerError::invalid_amount(amount));
    }
    Ok(())
}

/// Generate a routing number of the form `1177DDDD-DDDDDDDD-DDDDDDDD`
///
/// No checksum is involved; the number is only a human-facing key.
pub fn generate_account_number() -> String {
    let bits = Uuid::new_v4().as_u128();
    let first = 1_000 + (bits % 9_000) as u32;
    let second = 10_000_000 + ((bits >> 32) % 90_000_000) as u32;
    let third = 10_000_000 + ((bits >> 64) % 90_000_000) as u32;
    format!("{ACCOUNT_NUMBER_PREFIX}{first}-{second}-{third}")
}

/// Generate a short customer identifier (four hex digits)
pub fn generate_customer_id() -> CustomerId {
    Uuid::new_v4().simple().to_string()[..4].to_string()
}
