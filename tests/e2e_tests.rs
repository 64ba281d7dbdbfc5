//! End-to-end ledger tests
//!
//! These tests drive the public ledger API against a real JSON database in a
//! temporary directory and check the monetary invariants:
//! - the credit floor holds after every debit
//! - the credit line is granted at most once
//! - loan repayments are clamped
//! - transfer fees leave the system
//! - a saved snapshot reloads unchanged

#[cfg(test)]
mod tests {
    use bank_ledger::{
        JsonFileStore, Ledger, LedgerError, LoanDecision, PriceList, Snapshot, SnapshotStore,
        TransactionKind,
    };
    use rstest::rstest;
    use rust_decimal::Decimal;
    use std::path::{Path, PathBuf};
    use tempfile::TempDir;

    type FileLedger = Ledger<JsonFileStore, PriceList>;

    fn dec(value: i64) -> Decimal {
        Decimal::new(value, 0)
    }

    fn prices(withdraw: f64, transaction: f64) -> PriceList {
        PriceList::new()
            .with_cost("withdraw", withdraw)
            .with_cost("transaction", transaction)
    }

    /// Create an empty database file and open a ledger on it
    fn open_empty(dir: &Path, prices: PriceList) -> (FileLedger, PathBuf) {
        let path = dir.join("database.json");
        JsonFileStore::new(&path)
            .save(&Snapshot::default())
            .expect("Failed to create database");
        let ledger = Ledger::open(JsonFileStore::new(&path), prices).expect("Failed to open ledger");
        (ledger, path)
    }

    fn assert_floor_holds(ledger: &FileLedger) {
        for account in ledger.customers() {
            assert!(
                account.balance() >= -account.credit_line(),
                "account {} breached its floor: balance {}, credit line {}",
                account.account_number(),
                account.balance(),
                account.credit_line()
            );
        }
    }

    #[test]
    fn test_account_lifecycle_scenario() {
        let dir = TempDir::new().unwrap();
        let (mut ledger, _) = open_empty(dir.path(), prices(0.01, 0.0));

        let id = ledger.register_customer("Jane Doe", "jane@example.com").unwrap();
        let account = ledger.find_by_id(&id).unwrap();
        assert_eq!(account.balance(), Decimal::ZERO);
        assert_eq!(account.credit_line(), Decimal::ZERO);
        assert_eq!(account.personal_loan(), Decimal::ZERO);

        ledger.deposit(&id, dec(1000)).unwrap();
        assert_eq!(ledger.find_by_id(&id).unwrap().balance(), dec(1000));

        ledger.withdraw(&id, dec(200)).unwrap();
        let account = ledger.find_by_id(&id).unwrap();
        assert_eq!(account.balance(), dec(798));
        assert_eq!(account.transactions().len(), 3);

        assert_eq!(
            ledger.request_account_loan(&id).unwrap(),
            LoanDecision::Granted(dec(1197))
        );
        assert_eq!(
            ledger.request_account_loan(&id).unwrap(),
            LoanDecision::AlreadyGranted
        );
        assert_eq!(ledger.find_by_id(&id).unwrap().credit_line(), dec(1197));
    }

    #[rstest]
    #[case::zero(dec(0))]
    #[case::negative(dec(-200))]
    fn test_non_positive_withdrawal_is_rejected(#[case] amount: Decimal) {
        let dir = TempDir::new().unwrap();
        let (mut ledger, _) = open_empty(dir.path(), prices(0.01, 0.0));
        let id = ledger.register_customer("Jane", "jane@example.com").unwrap();
        ledger.deposit(&id, dec(500)).unwrap();

        let result = ledger.withdraw(&id, amount);

        assert!(matches!(result, Err(LedgerError::InvalidAmount { .. })));
        let account = ledger.find_by_id(&id).unwrap();
        assert_eq!(account.balance(), dec(500));
        assert_eq!(account.transactions().len(), 1);
    }

    #[test]
    fn test_deposit_then_withdraw_without_fee_restores_balance() {
        let dir = TempDir::new().unwrap();
        let (mut ledger, _) = open_empty(dir.path(), prices(0.0, 0.0));
        let id = ledger.register_customer("Jane", "jane@example.com").unwrap();
        ledger.deposit(&id, dec(250)).unwrap();
        let before = ledger.find_by_id(&id).unwrap().clone();

        ledger.deposit(&id, dec(75)).unwrap();
        ledger.withdraw(&id, dec(75)).unwrap();

        let after = ledger.find_by_id(&id).unwrap();
        assert_eq!(after.balance(), before.balance());
        assert_eq!(after.transactions().len(), before.transactions().len() + 2);
        let kinds: Vec<TransactionKind> = after.transactions()[1..].iter().map(|t| t.kind()).collect();
        assert_eq!(kinds, vec![TransactionKind::Deposit, TransactionKind::Withdrawal]);
    }

    #[rstest]
    #[case::no_fee(0.0, dec(300), dec(0))]
    #[case::one_percent(0.01, dec(300), dec(3))]
    #[case::five_percent(0.05, dec(120), dec(6))]
    fn test_transfer_fee_leaves_the_system(
        #[case] rate: f64,
        #[case] amount: Decimal,
        #[case] fee: Decimal,
    ) {
        let dir = TempDir::new().unwrap();
        let (mut ledger, _) = open_empty(dir.path(), prices(0.0, rate));
        let a = ledger.register_customer("A", "a@example.com").unwrap();
        let b = ledger.register_customer("B", "b@example.com").unwrap();
        ledger.deposit(&a, dec(1000)).unwrap();
        ledger.deposit(&b, dec(50)).unwrap();
        let b_number = ledger.find_by_id(&b).unwrap().account_number().to_string();
        let total_before = ledger.total_balance();

        ledger.transfer(&a, &b_number, amount).unwrap();

        assert_eq!(ledger.find_by_id(&a).unwrap().balance(), dec(1000) - amount - fee);
        assert_eq!(ledger.find_by_id(&b).unwrap().balance(), dec(50) + amount);
        assert_eq!(total_before - ledger.total_balance(), fee);
    }

    #[test]
    fn test_floor_holds_through_mixed_operations() {
        let dir = TempDir::new().unwrap();
        let (mut ledger, _) = open_empty(dir.path(), prices(0.02, 0.01));
        let a = ledger.register_customer("A", "a@example.com").unwrap();
        let b = ledger.register_customer("B", "b@example.com").unwrap();
        let b_number = ledger.find_by_id(&b).unwrap().account_number().to_string();

        ledger.deposit(&a, dec(400)).unwrap();
        ledger.request_account_loan(&a).unwrap();

        let attempts = [
            dec(100),
            dec(250),
            dec(600),
            dec(90),
            dec(35),
            dec(1000),
            dec(5),
        ];
        for (i, amount) in attempts.into_iter().enumerate() {
            let result = if i % 2 == 0 {
                ledger.withdraw(&a, amount)
            } else {
                ledger.transfer(&a, &b_number, amount)
            };
            if let Err(e) = result {
                assert!(matches!(e, LedgerError::InsufficientFunds { .. }), "unexpected {e}");
            }
            assert_floor_holds(&ledger);
        }

        assert!(ledger.find_by_id(&a).unwrap().balance() < Decimal::ZERO);
    }

    #[test]
    fn test_overpaid_repayment_clears_loan_exactly() {
        let dir = TempDir::new().unwrap();
        let (mut ledger, _) = open_empty(dir.path(), prices(0.0, 0.0));
        let id = ledger.register_customer("Jane", "jane@example.com").unwrap();
        ledger.deposit(&id, dec(100)).unwrap();
        ledger.request_personal_loan(&id, dec(700)).unwrap();

        assert_eq!(ledger.repay_personal_loan(&id, dec(10_000)).unwrap(), dec(700));

        let account = ledger.find_by_id(&id).unwrap();
        assert_eq!(account.personal_loan(), Decimal::ZERO);
        assert_eq!(account.balance(), dec(100));
    }

    #[test]
    fn test_snapshot_reloads_unchanged() {
        let dir = TempDir::new().unwrap();
        let (mut ledger, path) = open_empty(dir.path(), prices(0.01, 0.05));
        let a = ledger.register_customer("Alice", "alice@example.com").unwrap();
        let b = ledger.register_customer("Bob", "bob@example.com").unwrap();
        let b_number = ledger.find_by_id(&b).unwrap().account_number().to_string();
        ledger.deposit(&a, dec(1000)).unwrap();
        ledger.withdraw(&a, dec(200)).unwrap();
        ledger.transfer(&a, &b_number, Decimal::new(12550, 2)).unwrap();
        ledger.request_account_loan(&a).unwrap();
        ledger.request_personal_loan(&b, dec(300)).unwrap();
        ledger.repay_personal_loan(&b, dec(120)).unwrap();

        let reloaded = Ledger::open(JsonFileStore::new(&path), prices(0.01, 0.05)).unwrap();

        assert_eq!(reloaded.customers().len(), 2);
        for (saved, loaded) in ledger.customers().iter().zip(reloaded.customers()) {
            assert_eq!(loaded.id(), saved.id());
            assert_eq!(loaded.account_number(), saved.account_number());
            assert_eq!(loaded.balance(), saved.balance());
            assert_eq!(loaded.credit_line(), saved.credit_line());
            assert_eq!(loaded.personal_loan(), saved.personal_loan());
            assert_eq!(loaded.transactions(), saved.transactions());
            assert_eq!(loaded.created_at(), saved.created_at());
        }
    }

    #[test]
    fn test_missing_database_is_fatal() {
        let dir = TempDir::new().unwrap();

        let result = Ledger::open(
            JsonFileStore::new(dir.path().join("database.json")),
            prices(0.01, 0.01),
        );

        match result {
            Err(e) => {
                assert!(matches!(e, LedgerError::PersistenceUnavailable { .. }));
                assert!(e.is_fatal());
            }
            Ok(_) => panic!("Expected the ledger to refuse a missing database"),
        }
    }
}
