//! Directory dump format
//!
//! A dump directory holds three line-based files:
//!
//! - `accounts.dump` - `id;phone;balance`
//! - `payments.dump` - `id;account_id;amount;category;status;`
//! - `favorites.dump` - `id;account_id;amount;name;category;`
//!
//! Import is an upsert keyed by ID. Each file is optional on import: a missing
//! file is logged and reported back, and the remaining files are still read.

use super::dump_format::{
    line_reader, parse_account, parse_favorite, parse_payment, read_records, write_lines,
    FavoriteRow, PaymentRow,
};
use crate::core::Ledger;
use crate::types::LedgerError;
use csv::StringRecord;
use std::fs::File;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Accounts dump file name
pub const ACCOUNTS_DUMP: &str = "accounts.dump";

/// Payments dump file name
pub const PAYMENTS_DUMP: &str = "payments.dump";

/// Favorites dump file name
pub const FAVORITES_DUMP: &str = "favorites.dump";

/// Outcome of a directory import
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportReport {
    /// Account records read
    pub accounts: usize,
    /// Payment records read
    pub payments: usize,
    /// Favorite records read
    pub favorites: usize,
    /// Dump files that did not exist
    pub missing: Vec<PathBuf>,
}

impl Ledger {
    /// Write accounts, payments and favorites to `dir`
    ///
    /// All three files are always written, empty collections giving empty
    /// files, so a later import never sees stale data from an older export.
    /// The directory must already exist.
    pub fn export(&self, dir: &Path) -> Result<(), LedgerError> {
        let accounts = write_lines(&dir.join(ACCOUNTS_DUMP), &self.accounts)?;
        let payments = write_lines(
            &dir.join(PAYMENTS_DUMP),
            self.payments.iter().map(PaymentRow::from),
        )?;
        let favorites = write_lines(
            &dir.join(FAVORITES_DUMP),
            self.favorites.iter().map(FavoriteRow::from),
        )?;

        log::info!(
            "Exported {} accounts, {} payments, {} favorites to {}",
            accounts,
            payments,
            favorites,
            dir.display()
        );
        Ok(())
    }

    /// Load accounts, payments and favorites from `dir`
    ///
    /// Records whose ID already exists overwrite the stored record in place;
    /// others are appended. The account ID counter is advanced to the highest
    /// imported account ID.
    ///
    /// # Errors
    ///
    /// Missing files are not errors; they are listed in
    /// [`ImportReport::missing`]. Any other I/O failure is returned.
    pub fn import(&mut self, dir: &Path) -> Result<ImportReport, LedgerError> {
        let mut report = ImportReport::default();

        if let Some(accounts) = read_dump(&dir.join(ACCOUNTS_DUMP), parse_account, &mut report)? {
            report.accounts = accounts.len();
            for account in accounts {
                self.upsert_account(account);
            }
        }

        if let Some(payments) = read_dump(&dir.join(PAYMENTS_DUMP), parse_payment, &mut report)? {
            report.payments = payments.len();
            for payment in payments {
                self.upsert_payment(payment);
            }
        }

        if let Some(favorites) =
            read_dump(&dir.join(FAVORITES_DUMP), parse_favorite, &mut report)?
        {
            report.favorites = favorites.len();
            for favorite in favorites {
                self.upsert_favorite(favorite);
            }
        }

        log::info!(
            "Imported {} accounts, {} payments, {} favorites from {}",
            report.accounts,
            report.payments,
            report.favorites,
            dir.display()
        );
        Ok(report)
    }
}

fn read_dump<T>(
    path: &Path,
    parse: fn(&StringRecord) -> T,
    report: &mut ImportReport,
) -> Result<Option<Vec<T>>, LedgerError> {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            log::warn!("Dump file {} not found, skipping", path.display());
            report.missing.push(path.to_path_buf());
            return Ok(None);
        }
        Err(e) => return Err(e.into()),
    };

    let mut reader = line_reader(file);
    read_records(&mut reader, parse).map(Some)
}
