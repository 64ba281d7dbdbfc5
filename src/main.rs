//! Bank Ledger console
//!
//! Loads the ledger from its JSON database, serves a one-shot login page and,
//! once an operator has signed in, runs the interactive menus on stdin/stdout.
//!
//! # Usage
//!
//! ```bash
//! cargo run
//! cargo run -- --config settings.toml
//! cargo run -- --database database.json --port 8080
//! ```
//!
//! # Exit Codes
//!
//! - 0: Operator exited the console
//! - 1: Fatal error (missing database, missing rate, I/O error, etc.)

use bank_ledger::cli::{self, Console};
use bank_ledger::core::{Ledger, Pricing, Session, TRANSFER_RATE, WITHDRAW_RATE};
use bank_ledger::io::JsonFileStore;
use bank_ledger::settings::Settings;
use bank_ledger::types::{timestamp, LedgerError, User};
use bank_ledger::web;
use std::io;
use std::net::SocketAddr;
use std::process::ExitCode;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    let args = cli::parse_args();

    let settings = match Settings::load(&args.config) {
        Ok(settings) => settings.with_overrides(&args),
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    // Logs go to stderr so they never interleave with the menus on stdout
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(format!("bank_ledger={}", settings.log_level))),
        )
        .with_writer(io::stderr)
        .init();

    if let Err(e) = run(settings) {
        tracing::error!("fatal: {e}");
        eprintln!("Error: {}", e);
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

fn run(settings: Settings) -> Result<(), LedgerError> {
    let store = JsonFileStore::new(&settings.database);
    let mut ledger = Ledger::open(store, settings.pricing.clone())?;

    // No transaction may run without its rate
    ledger.pricing().rate(WITHDRAW_RATE)?;
    ledger.pricing().rate(TRANSFER_RATE)?;

    let addr = settings.login.address().map_err(|e| LedgerError::Login {
        message: e.to_string(),
    })?;
    let users = ledger.users().to_vec();

    let runtime = tokio::runtime::Runtime::new()?;
    let user = runtime.block_on(sign_in(addr, users, settings.login.open_browser))?;
    drop(runtime);

    println!(
        "\nSIGNED IN\nOperator: {}\nRole: {}\nSigned in at: {}",
        user.name,
        user.role,
        timestamp::now().format(timestamp::FORMAT)
    );

    let mut session = Session::new(user);
    let stdin = io::stdin();
    let mut console = Console::new(stdin.lock(), io::stdout());
    console.run(&mut ledger, &mut session)
}

async fn sign_in(
    addr: SocketAddr,
    users: Vec<User>,
    open_browser: bool,
) -> Result<User, LedgerError> {
    let listener = TcpListener::bind(addr).await?;
    let url = format!("http://{addr}");
    println!("Please sign in at {url}");

    // The printed URL still works if no browser can be launched
    if open_browser {
        if let Err(e) = open::that(&url) {
            tracing::warn!("could not open a browser: {e}");
        }
    }

    web::await_login(listener, users).await
}
