//! Example driver
//!
//! Wires the command-line options to the ledger: load state, optionally add
//! sample data, sum the payments with the selected strategy, write the
//! requested exports and print the account report.

use crate::cli::CliArgs;
use crate::core::Ledger;
use crate::io::write_accounts_csv;
use crate::strategy::create_strategy;
use crate::types::LedgerError;
use std::io::Write;

/// Run the driver and write the account report to `output`
///
/// Steps run in a fixed order: directory import, compact import, demo data,
/// summation, history pages, directory export, compact export, report.
/// The first error stops the run.
pub fn run(args: &CliArgs, output: &mut dyn Write) -> Result<Ledger, LedgerError> {
    let mut ledger = Ledger::new();

    if let Some(dir) = &args.import_dir {
        let report = ledger.import(dir)?;
        if !report.missing.is_empty() {
            log::warn!("{} dump files were missing", report.missing.len());
        }
    }

    if let Some(path) = &args.import_file {
        ledger.import_from_file(path)?;
    }

    if args.demo {
        seed_demo(&mut ledger)?;
    }

    let strategy = create_strategy(args.strategy.clone(), Some(args.to_sum_config()));
    let total = strategy.sum(&ledger)?;
    log::info!(
        "Payments total: {} across {} payments",
        total,
        ledger.payments().len()
    );

    if let (Some(account_id), Some(dir)) = (args.history_account, &args.history_dir) {
        ledger.export_history_pages(account_id, dir, args.page_size)?;
    }

    if let Some(dir) = &args.export_dir {
        ledger.export(dir)?;
    }

    if let Some(path) = &args.export_file {
        ledger.export_to_file(path)?;
    }

    write_accounts_csv(ledger.accounts(), output)?;

    Ok(ledger)
}

/// Add sample accounts, payments and a favorite
///
/// Phones already present (e.g. from an import) are skipped.
pub fn seed_demo(ledger: &mut Ledger) -> Result<(), LedgerError> {
    let samples: [(&str, i64, &[(i64, &str)]); 3] = [
        ("900000001", 100, &[(50, "food")]),
        ("900000002", 10_000, &[(2_500, "auto"), (700, "pharmacy")]),
        ("900000003", 3_000, &[(1_200, "restaurants")]),
    ];

    let mut created = Vec::new();
    for (phone, deposit, payments) in samples {
        let account = match ledger.register(phone) {
            Ok(account) => account,
            Err(LedgerError::DuplicatePhone { .. }) => {
                log::debug!("Demo phone {} already registered, skipping", phone);
                continue;
            }
            Err(e) => return Err(e),
        };

        ledger.deposit(account.id, deposit)?;
        for (amount, category) in payments {
            created.push(ledger.pay(account.id, *amount, category)?);
        }
    }

    // Reject the first sample payment; keep the first auto payment as a favorite
    if let Some(first) = created.first() {
        ledger.reject(&first.id)?;
    }
    if let Some(auto) = created.iter().find(|payment| payment.category == "auto") {
        let favorite = ledger.favorite(&auto.id, "Fuel")?;
        ledger.pay_from_favorite(&favorite.id)?;
    }

    Ok(())
}
