// CLI module
// Command-line argument parsing and the interactive console menus

mod args;
mod console;

pub use args::CliArgs;
pub use console::{format_amount, parse_amount, Console};

use clap::Parser;

/// Parse command-line arguments using clap
///
/// If parsing fails (e.g., invalid arguments or --help flag), clap displays an
/// error message or help text and exits the process.
pub fn parse_args() -> CliArgs {
    CliArgs::parse()
}
