//! Wallet ledger CLI
//!
//! Command-line driver for the in-memory wallet ledger.
//!
//! # Usage
//!
//! ```bash
//! cargo run -- --demo
//! cargo run -- --import-dir data --strategy async --workers 8 --progress
//! cargo run -- --import-file data/export.txt --export-dir data
//! cargo run -- --import-dir data --history-account 1 --history-dir pages --page-size 20
//! ```
//!
//! The account report is written to stdout as CSV. Logs go to stderr;
//! set `RUST_LOG` to change the level (default: info).
//!
//! # Exit Codes
//!
//! - 0: Success
//! - 1: Error (file not found, unreadable dump, unknown account, etc.)

use env_logger::Env;
use std::process;
use wallet_ledger::cli;
use wallet_ledger::driver;

fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    // Parse command-line arguments using clap
    let args = cli::parse_args();

    let mut output = std::io::stdout();
    if let Err(e) = driver::run(&args, &mut output) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
