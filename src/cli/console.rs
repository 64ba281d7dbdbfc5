//! Interactive console menus
//!
//! Numbered menus (main, customer actions, personal loan) that translate the
//! operator's choices into ledger operations and print the outcome. The
//! console is generic over its input and output so whole sessions can be
//! scripted in tests.
//!
//! Non-fatal errors are printed and the menu continues; fatal errors (storage,
//! configuration) are returned to the caller. End of input behaves like "exit".

use crate::core::{Ledger, Pricing, Session, SnapshotStore, PERSONAL_LOAN_INTEREST};
use crate::types::{LedgerError, LoanDecision};
use rust_decimal::Decimal;
use std::io::{BufRead, Write};
use std::str::FromStr;

/// Number of transactions shown on the customer details screen
const RECENT_TRANSACTIONS: usize = 5;

/// Where a menu hands control next
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Back,
    Exit,
}

/// Parse an operator-typed amount
///
/// Only the syntax is checked here; positivity is enforced by the account.
pub fn parse_amount(text: &str) -> Result<Decimal, LedgerError> {
    Decimal::from_str(text.trim()).map_err(|_| LedgerError::invalid_amount(text.trim()))
}

/// Format an amount with `.` thousands separators and `,` decimals (`1.234,50`)
pub fn format_amount(amount: Decimal) -> String {
    let rounded = amount.round_dp(2);
    let text = format!("{:.2}", rounded.abs());
    let (integer, fraction) = text.split_once('.').unwrap_or((text.as_str(), "00"));

    let mut grouped = String::new();
    for (i, digit) in integer.chars().enumerate() {
        if i > 0 && (integer.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(digit);
    }

    if rounded < Decimal::ZERO {
        grouped.insert(0, '-');
    }
    if fraction != "00" {
        grouped.push(',');
        grouped.push_str(fraction);
    }
    grouped
}

/// Menu-driven front end over a ledger
pub struct Console<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Console { input, output }
    }

    /// Give back the output sink (used to inspect scripted sessions)
    pub fn into_output(self) -> W {
        self.output
    }

    /// Run the main menu until the operator exits or input ends
    pub fn run<S: SnapshotStore, P: Pricing>(
        &mut self,
        ledger: &mut Ledger<S, P>,
        session: &mut Session,
    ) -> Result<(), LedgerError> {
        loop {
            writeln!(self.output, "\n---------- MENU ----------")?;
            writeln!(self.output, "(1) Find customer")?;
            if session.user().is_admin() {
                writeln!(self.output, "(2) Register customer")?;
            }
            writeln!(self.output, "(0) Exit")?;

            let Some(choice) = self.prompt("Choose: ")? else {
                break;
            };
            match choice.as_str() {
                "1" => {
                    if self.find_customer(ledger, session)?
                        && self.customer_menu(ledger, session)? == Flow::Exit
                    {
                        break;
                    }
                }
                "2" => self.register_customer(ledger, session)?,
                "0" => break,
                _ => writeln!(self.output, "Invalid choice!")?,
            }
        }

        writeln!(self.output, "Exiting...")?;
        Ok(())
    }

    fn customer_menu<S: SnapshotStore, P: Pricing>(
        &mut self,
        ledger: &mut Ledger<S, P>,
        session: &mut Session,
    ) -> Result<Flow, LedgerError> {
        loop {
            writeln!(self.output, "\n---------- CUSTOMER ----------")?;
            writeln!(self.output, "(1) Customer details")?;
            writeln!(self.output, "(2) Transactions")?;
            writeln!(self.output, "(3) Deposit")?;
            writeln!(self.output, "(4) Withdraw")?;
            writeln!(self.output, "(5) Transfer")?;
            writeln!(self.output, "(6) Credit line")?;
            writeln!(self.output, "(7) Personal loan")?;
            writeln!(self.output, "(8) Back to main menu")?;
            writeln!(self.output, "(0) Exit")?;

            let Some(choice) = self.prompt("Choose: ")? else {
                return Ok(Flow::Exit);
            };
            let id = session.active_customer()?.to_string();

            match choice.as_str() {
                "1" => self.customer_details(ledger, &id)?,
                "2" => self.transaction_list(ledger, &id)?,
                "3" => self.deposit(ledger, &id)?,
                "4" => self.withdraw(ledger, &id)?,
                "5" => self.transfer(ledger, &id)?,
                "6" => self.credit_line(ledger, &id)?,
                "7" => {
                    if self.personal_loan_menu(ledger, &id)? == Flow::Exit {
                        return Ok(Flow::Exit);
                    }
                }
                "8" => {
                    session.clear_customer();
                    return Ok(Flow::Back);
                }
                "0" => return Ok(Flow::Exit),
                _ => writeln!(self.output, "Invalid choice!")?,
            }
        }
    }

    fn personal_loan_menu<S: SnapshotStore, P: Pricing>(
        &mut self,
        ledger: &mut Ledger<S, P>,
        id: &str,
    ) -> Result<Flow, LedgerError> {
        loop {
            writeln!(self.output, "\n---------- PERSONAL LOAN ----------")?;
            writeln!(self.output, "(1) Request loan")?;
            writeln!(self.output, "(2) Repay loan")?;
            writeln!(self.output, "(0) Back")?;

            let Some(choice) = self.prompt("Choose: ")? else {
                return Ok(Flow::Exit);
            };
            match choice.as_str() {
                "1" => self.request_personal_loan(ledger, id)?,
                "2" => self.repay_personal_loan(ledger, id)?,
                "0" => return Ok(Flow::Back),
                _ => writeln!(self.output, "Invalid choice!")?,
            }
        }
    }

    fn find_customer<S: SnapshotStore, P: Pricing>(
        &mut self,
        ledger: &Ledger<S, P>,
        session: &mut Session,
    ) -> Result<bool, LedgerError> {
        let id = self.ask("Customer id: ")?;
        if self.report(session.select_customer(ledger, &id))?.is_none() {
            return Ok(false);
        }

        let account = ledger.customer(&id)?;
        writeln!(self.output, "Customer: {}", account.name())?;
        Ok(true)
    }

    fn register_customer<S: SnapshotStore, P: Pricing>(
        &mut self,
        ledger: &mut Ledger<S, P>,
        session: &Session,
    ) -> Result<(), LedgerError> {
        if self.report(session.ensure_can_register())?.is_none() {
            return Ok(());
        }

        let name = self.ask("Name: ")?;
        let email = self.ask("Email: ")?;
        let id = ledger.register_customer(&name, &email)?;
        writeln!(self.output, "New customer created. Id: {id}")?;
        Ok(())
    }

    fn customer_details<S: SnapshotStore, P: Pricing>(
        &mut self,
        ledger: &Ledger<S, P>,
        id: &str,
    ) -> Result<(), LedgerError> {
        let account = ledger.customer(id)?;

        writeln!(self.output, "\nCustomer details")?;
        writeln!(self.output, "Name:           {}", account.name())?;
        writeln!(self.output, "E-mail:         {}", account.email())?;
        writeln!(self.output, "Account number: {}", account.account_number())?;
        writeln!(self.output, "Balance:        {} Ft", format_amount(account.balance()))?;
        writeln!(self.output, "Credit line:    {} Ft", format_amount(account.credit_line()))?;
        writeln!(self.output, "Personal loan:  {} Ft", format_amount(account.personal_loan()))?;

        let log = account.transactions();
        writeln!(self.output, "Last {RECENT_TRANSACTIONS} transactions:")?;
        for record in &log[log.len().saturating_sub(RECENT_TRANSACTIONS)..] {
            writeln!(
                self.output,
                "  {} - {} - {} Ft",
                record.timestamp().format("%Y-%m-%d %H:%M:%S"),
                record.kind(),
                format_amount(record.amount())
            )?;
        }
        Ok(())
    }

    fn transaction_list<S: SnapshotStore, P: Pricing>(
        &mut self,
        ledger: &Ledger<S, P>,
        id: &str,
    ) -> Result<(), LedgerError> {
        let account = ledger.customer(id)?;

        writeln!(self.output, "\nTransactions:")?;
        if account.transactions().is_empty() {
            writeln!(self.output, "No transactions!")?;
        }
        for record in account.transactions() {
            writeln!(
                self.output,
                "{} - {} - {} ({}) - {} Ft",
                record.timestamp().format("%Y-%m-%d %H:%M:%S"),
                record.kind(),
                record.name(),
                record.account_number(),
                format_amount(record.amount())
            )?;
        }
        Ok(())
    }

    fn deposit<S: SnapshotStore, P: Pricing>(
        &mut self,
        ledger: &mut Ledger<S, P>,
        id: &str,
    ) -> Result<(), LedgerError> {
        writeln!(self.output, "Balance: {} Ft", format_amount(ledger.customer(id)?.balance()))?;
        let text = self.ask("Amount to deposit: ")?;

        let result = parse_amount(&text).and_then(|amount| ledger.deposit(id, amount));
        if self.report(result)?.is_some() {
            self.print_balance(ledger, id, "Deposit successful!")?;
        }
        Ok(())
    }

    fn withdraw<S: SnapshotStore, P: Pricing>(
        &mut self,
        ledger: &mut Ledger<S, P>,
        id: &str,
    ) -> Result<(), LedgerError> {
        let text = self.ask("Amount to withdraw: ")?;

        let result = parse_amount(&text).and_then(|amount| ledger.withdraw(id, amount));
        if self.report(result)?.is_some() {
            self.print_balance(ledger, id, "Withdrawal successful!")?;
        }
        Ok(())
    }

    fn transfer<S: SnapshotStore, P: Pricing>(
        &mut self,
        ledger: &mut Ledger<S, P>,
        id: &str,
    ) -> Result<(), LedgerError> {
        let source = ledger.customer(id)?;
        writeln!(self.output, "\nSource account: {}", source.account_number())?;
        writeln!(self.output, "Balance: {} Ft\n", format_amount(source.balance()))?;

        let target_number = self.ask("Target account number: ")?;
        let Some(target) = ledger.find_by_account_number(&target_number) else {
            writeln!(self.output, "Error: {}", LedgerError::account_not_found(&target_number))?;
            return Ok(());
        };
        writeln!(self.output, "\nTarget account")?;
        writeln!(self.output, "Name:           {}", target.name())?;
        writeln!(self.output, "Account number: {}\n", target.account_number())?;

        let text = self.ask("Amount to transfer: ")?;
        let result =
            parse_amount(&text).and_then(|amount| ledger.transfer(id, &target_number, amount));
        if self.report(result)?.is_some() {
            self.print_balance(ledger, id, "Transfer successful!")?;
        }
        Ok(())
    }

    fn credit_line<S: SnapshotStore, P: Pricing>(
        &mut self,
        ledger: &mut Ledger<S, P>,
        id: &str,
    ) -> Result<(), LedgerError> {
        match self.report(ledger.request_account_loan(id))? {
            Some(LoanDecision::Granted(amount)) => {
                writeln!(self.output, "Credit line granted: {} Ft", format_amount(amount))?
            }
            Some(LoanDecision::AlreadyGranted) => {
                writeln!(self.output, "The customer already has a credit line!")?
            }
            None => {}
        }
        Ok(())
    }

    fn request_personal_loan<S: SnapshotStore, P: Pricing>(
        &mut self,
        ledger: &mut Ledger<S, P>,
        id: &str,
    ) -> Result<(), LedgerError> {
        // Informational only; a loan can be granted without a configured rate
        if let Ok(rate) = ledger.pricing().interest(PERSONAL_LOAN_INTEREST) {
            writeln!(self.output, "Interest rate: {}%", (rate * Decimal::ONE_HUNDRED).normalize())?;
        }
        let text = self.ask("Loan amount: ")?;

        let result =
            parse_amount(&text).and_then(|amount| ledger.request_personal_loan(id, amount));
        match self.report(result)? {
            Some(LoanDecision::Granted(amount)) => {
                writeln!(self.output, "Personal loan granted: {} Ft", format_amount(amount))?
            }
            Some(LoanDecision::AlreadyGranted) => {
                writeln!(self.output, "The customer already has a personal loan!")?
            }
            None => {}
        }
        Ok(())
    }

    fn repay_personal_loan<S: SnapshotStore, P: Pricing>(
        &mut self,
        ledger: &mut Ledger<S, P>,
        id: &str,
    ) -> Result<(), LedgerError> {
        let outstanding = ledger.customer(id)?.personal_loan();
        writeln!(self.output, "\nOutstanding loan: {} Ft", format_amount(outstanding))?;
        let text = self.ask("Repayment amount: ")?;

        let result =
            parse_amount(&text).and_then(|amount| ledger.repay_personal_loan(id, amount));
        if let Some(repaid) = self.report(result)? {
            let outstanding = ledger.customer(id)?.personal_loan();
            writeln!(
                self.output,
                "Repaid {} Ft. Outstanding loan: {} Ft",
                format_amount(repaid),
                format_amount(outstanding)
            )?;
        }
        Ok(())
    }

    fn print_balance<S: SnapshotStore, P: Pricing>(
        &mut self,
        ledger: &Ledger<S, P>,
        id: &str,
        message: &str,
    ) -> Result<(), LedgerError> {
        let balance = ledger.customer(id)?.balance();
        writeln!(self.output, "{message} Balance: {} Ft", format_amount(balance))?;
        Ok(())
    }

    /// Print a non-fatal error and swallow it; pass fatal errors through
    fn report<T>(&mut self, result: Result<T, LedgerError>) -> Result<Option<T>, LedgerError> {
        match result {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.is_fatal() => Err(e),
            Err(e) => {
                writeln!(self.output, "Error: {e}")?;
                Ok(None)
            }
        }
    }

    /// Read one trimmed line; `None` at end of input
    fn prompt(&mut self, label: &str) -> Result<Option<String>, LedgerError> {
        write!(self.output, "{label}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    /// Like `prompt`, treating end of input as an empty answer
    fn ask(&mut self, label: &str) -> Result<String, LedgerError> {
        Ok(self.prompt(label)?.unwrap_or_default())
    }
}
