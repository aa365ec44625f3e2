//! Compact single-file account format
//!
//! All accounts are stored in one file as `id;phone;balance` records, each
//! terminated by `|` (so the file ends with a separator). There is no header,
//! version marker or checksum. Payments and favorites are not part of this
//! format.

use super::dump_format::{compact_reader, compact_writer, open_dump, parse_account, read_records};
use crate::core::Ledger;
use crate::types::LedgerError;
use std::fs::File;
use std::path::Path;

impl Ledger {
    /// Write every account to `path` in the compact format
    ///
    /// An existing file is replaced.
    pub fn export_to_file(&self, path: &Path) -> Result<(), LedgerError> {
        let mut writer = compact_writer(File::create(path)?);
        for account in &self.accounts {
            writer.serialize(account)?;
        }
        writer.flush()?;

        log::info!(
            "Exported {} accounts to {}",
            self.accounts.len(),
            path.display()
        );
        Ok(())
    }

    /// Load accounts from a compact file
    ///
    /// Accounts whose ID already exists are overwritten, others are appended.
    /// The ID counter is advanced past every imported ID. Returns the number
    /// of records read.
    ///
    /// # Errors
    ///
    /// Returns `FileNotFound` if `path` does not exist, or an I/O error if it
    /// cannot be read.
    pub fn import_from_file(&mut self, path: &Path) -> Result<usize, LedgerError> {
        let mut reader = compact_reader(open_dump(path)?);
        let accounts = read_records(&mut reader, parse_account)?;

        let count = accounts.len();
        for account in accounts {
            self.upsert_account(account);
        }

        log::info!("Imported {} accounts from {}", count, path.display());
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_export_to_file_layout() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("export.txt");
        let mut ledger = Ledger::new();
        let account = ledger.register("900000001").unwrap();
        ledger.register("900000002").unwrap();
        ledger.deposit(account.id, 250).unwrap();

        ledger.export_to_file(&path).unwrap();

        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "1;900000001;250|2;900000002;0|"
        );
    }

    #[test]
    fn test_export_empty_ledger_writes_empty_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("export.txt");

        Ledger::new().export_to_file(&path).unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "");
    }

    #[test]
    fn test_import_from_file_restores_accounts() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("export.txt");
        fs::write(&path, "1;900000001;250|2;900000002;0|3;900000003;7|").unwrap();

        let mut ledger = Ledger::new();
        let count = ledger.import_from_file(&path).unwrap();

        assert_eq!(count, 3);
        assert_eq!(ledger.find_account(1).unwrap().balance, 250);
        assert_eq!(ledger.find_account(3).unwrap().phone, "900000003");
        assert_eq!(ledger.register("900000004").unwrap().id, 4);
    }

    #[test]
    fn test_import_from_file_overwrites_existing_ids() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("export.txt");
        fs::write(&path, "1;900000009;40|").unwrap();

        let mut ledger = Ledger::new();
        ledger.register("900000001").unwrap();
        ledger.import_from_file(&path).unwrap();

        assert_eq!(ledger.accounts().len(), 1);
        assert_eq!(ledger.find_account(1).unwrap().phone, "900000009");
        assert_eq!(ledger.find_account(1).unwrap().balance, 40);
    }

    #[test]
    fn test_import_from_missing_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing.txt");

        let result = Ledger::new().import_from_file(&path);

        assert_eq!(result, Err(LedgerError::file_not_found(&path)));
    }
}
