//! Transaction-related types for the bank ledger
//!
//! This module defines the immutable transaction log entry appended to an
//! account every time one of its balances changes.

use super::timestamp;
use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Kinds of ledger-affecting events
///
/// A single operation may produce several records, e.g. a withdrawal with a
/// positive fee rate produces a `Withdrawal` and a `WithdrawalFee` record.
///
/// Kinds are written in snake_case. Databases written by the earlier
/// Hungarian-labelled console (`"Befizetés"`, `"Kifizetés költsége"`, ...)
/// are still readable through the aliases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionKind {
    /// Cash paid into the account
    #[serde(alias = "Befizetés")]
    Deposit,

    /// Cash paid out of the account
    #[serde(alias = "Kifizetés")]
    Withdrawal,

    /// Fee charged on top of a withdrawal
    #[serde(alias = "Kifizetés költsége")]
    WithdrawalFee,

    /// Money sent to another account (counterparty is the receiver)
    #[serde(alias = "Átutalás bankszámlára")]
    TransferOut,

    /// Fee charged on top of an outgoing transfer
    #[serde(alias = "Átutalás költsége")]
    TransferFee,

    /// Money received from another account (counterparty is the sender)
    #[serde(alias = "Jóváírás")]
    CreditIn,

    /// One-off credit line grant; the amount is the granted ceiling
    #[serde(alias = "Számlahitel igénylés")]
    CreditLineGrant,

    /// Personal loan paid out into the balance
    #[serde(alias = "Személyi hitel igénylés")]
    PersonalLoanGrant,

    /// Repayment of the outstanding personal loan
    #[serde(alias = "Személyi hiteltörlesztés")]
    PersonalLoanRepayment,
}

impl TransactionKind {
    /// Human-facing label used by the console
    pub fn label(self) -> &'static str {
        match self {
            TransactionKind::Deposit => "Deposit",
            TransactionKind::Withdrawal => "Withdrawal",
            TransactionKind::WithdrawalFee => "Withdrawal fee",
            TransactionKind::TransferOut => "Transfer",
            TransactionKind::TransferFee => "Transfer fee",
            TransactionKind::CreditIn => "Incoming transfer",
            TransactionKind::CreditLineGrant => "Credit line granted",
            TransactionKind::PersonalLoanGrant => "Personal loan granted",
            TransactionKind::PersonalLoanRepayment => "Personal loan repayment",
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Immutable log entry owned by an account
///
/// `name` and `account_number` describe the party shown next to the entry:
/// the account holder for cash and loan events, the other side for transfers.
/// The amount is always a magnitude; the direction follows from `kind`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionRecord {
    name: String,
    account_number: String,
    #[serde(rename = "type")]
    kind: TransactionKind,
    #[serde(with = "rust_decimal::serde::float")]
    amount: Decimal,
    #[serde(with = "timestamp")]
    timestamp: NaiveDateTime,
}

impl TransactionRecord {
    /// Create a record stamped with the current local time
    pub fn new(
        name: impl Into<String>,
        account_number: impl Into<String>,
        kind: TransactionKind,
        amount: Decimal,
    ) -> Self {
        TransactionRecord {
            name: name.into(),
            account_number: account_number.into(),
            kind,
            amount,
            timestamp: timestamp::now(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn account_number(&self) -> &str {
        &self.account_number
    }

    pub fn kind(&self) -> TransactionKind {
        self.kind
    }

    pub fn amount(&self) -> Decimal {
        self.amount
    }

    pub fn timestamp(&self) -> NaiveDateTime {
        self.timestamp
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::deposit(TransactionKind::Deposit, "\"deposit\"")]
    #[case::withdrawal_fee(TransactionKind::WithdrawalFee, "\"withdrawal_fee\"")]
    #[case::credit_in(TransactionKind::CreditIn, "\"credit_in\"")]
    #[case::credit_line(TransactionKind::CreditLineGrant, "\"credit_line_grant\"")]
    #[case::repayment(
        TransactionKind::PersonalLoanRepayment,
        "\"personal_loan_repayment\""
    )]
    fn test_kind_serialization(#[case] kind: TransactionKind, #[case] expected: &str) {
        assert_eq!(serde_json::to_string(&kind).unwrap(), expected);
    }

    #[rstest]
    #[case::deposit("Befizetés", TransactionKind::Deposit)]
    #[case::withdrawal("Kifizetés", TransactionKind::Withdrawal)]
    #[case::withdrawal_fee("Kifizetés költsége", TransactionKind::WithdrawalFee)]
    #[case::transfer_out("Átutalás bankszámlára", TransactionKind::TransferOut)]
    #[case::transfer_fee("Átutalás költsége", TransactionKind::TransferFee)]
    #[case::credit_in("Jóváírás", TransactionKind::CreditIn)]
    #[case::credit_line("Számlahitel igénylés", TransactionKind::CreditLineGrant)]
    #[case::personal_loan("Személyi hitel igénylés", TransactionKind::PersonalLoanGrant)]
    #[case::repayment("Személyi hiteltörlesztés", TransactionKind::PersonalLoanRepayment)]
    fn test_kind_reads_legacy_labels(#[case] label: &str, #[case] expected: TransactionKind) {
        let kind: TransactionKind = serde_json::from_value(serde_json::Value::from(label)).unwrap();

        assert_eq!(kind, expected);
    }

    #[test]
    fn test_record_json_shape() {
        let record = TransactionRecord::new(
            "Jane Doe",
            "11771234-12345678-87654321",
            TransactionKind::Deposit,
            Decimal::new(1000, 0),
        );

        let value = serde_json::to_value(&record).unwrap();

        assert_eq!(value["name"], "Jane Doe");
        assert_eq!(value["account_number"], "11771234-12345678-87654321");
        assert_eq!(value["type"], "deposit");
        assert_eq!(value["amount"].as_f64(), Some(1000.0));
        assert!(value["timestamp"].is_string());
    }

    #[test]
    fn test_record_reads_stored_shape() {
        let json = r#"{
            "name": "John Roe",
            "account_number": "11779999-11111111-22222222",
            "type": "withdrawal_fee",
            "amount": 2.5,
            "timestamp": "2024-03-01 10:15:00"
        }"#;

        let record: TransactionRecord = serde_json::from_str(json).unwrap();

        assert_eq!(record.name(), "John Roe");
        assert_eq!(record.kind(), TransactionKind::WithdrawalFee);
        assert_eq!(record.amount(), Decimal::new(25, 1));
        assert_eq!(
            record.timestamp().format("%Y-%m-%d %H:%M:%S").to_string(),
            "2024-03-01 10:15:00"
        );
    }
}
