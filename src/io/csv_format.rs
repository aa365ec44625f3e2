//! CSV report of account states
//!
//! Writes the accounts as a comma-separated table with a header row, for
//! humans and spreadsheets. This is separate from the `;`-delimited dump
//! formats, which are meant for re-import.

use crate::types::{Account, LedgerError};
use std::io::Write;

/// Write account states to CSV format
///
/// Writes accounts with columns: id, phone, balance.
/// Accounts are sorted by ID for deterministic output.
pub fn write_accounts_csv(accounts: &[Account], output: &mut dyn Write) -> Result<(), LedgerError> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(output);

    // Header is written explicitly so an empty ledger still gets one
    writer.write_record(["id", "phone", "balance"])?;

    let mut sorted_accounts: Vec<&Account> = accounts.iter().collect();
    sorted_accounts.sort_by_key(|account| account.id);

    for account in sorted_accounts {
        writer.serialize(account)?;
    }

    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::single_account(
        vec![Account { id: 1, phone: "900000001".to_string(), balance: 100 }],
        "id,phone,balance\n1,900000001,100\n"
    )]
    #[case::sorted_by_id(
        vec![
            Account::new(3, "c"),
            Account::new(1, "a"),
            Account::new(2, "b"),
        ],
        "id,phone,balance\n1,a,0\n2,b,0\n3,c,0\n"
    )]
    #[case::empty_accounts(vec![], "id,phone,balance\n")]
    fn test_write_accounts_csv(#[case] accounts: Vec<Account>, #[case] expected_output: &str) {
        let mut output = Vec::new();
        let result = write_accounts_csv(&accounts, &mut output);
        assert!(result.is_ok());

        let output_str = String::from_utf8(output).unwrap();
        assert_eq!(output_str, expected_output);
    }
}
