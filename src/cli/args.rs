use clap::Parser;
use std::path::PathBuf;

/// Single-operator banking ledger console
#[derive(Parser, Debug)]
#[command(name = "bank-ledger")]
#[command(about = "Single-operator banking ledger console", long_about = None)]
pub struct CliArgs {
    /// Settings file (TOML); missing file means built-in defaults
    #[arg(
        long = "config",
        value_name = "PATH",
        default_value = "settings.toml",
        help = "Path to the settings file"
    )]
    pub config: PathBuf,

    /// Override the snapshot file from the settings
    #[arg(
        long = "database",
        value_name = "PATH",
        help = "Path to the JSON database file"
    )]
    pub database: Option<PathBuf>,

    /// Override the login page port
    #[arg(long = "port", value_name = "PORT", help = "Port of the login page")]
    pub port: Option<u16>,

    /// Override the log level (trace, debug, info, warn, error)
    #[arg(long = "log-level", value_name = "LEVEL", help = "Log level")]
    pub log_level: Option<String>,
}
