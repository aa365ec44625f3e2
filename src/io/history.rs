//! Paginated payment history export
//!
//! Splits a payment history into page files of at most `records` payments
//! each, written in the payments dump layout. A history that fits on one page
//! goes to `payments.dump`; longer histories go to `payments1.dump`,
//! `payments2.dump`, and so on.

use super::dump::PAYMENTS_DUMP;
use super::dump_format::{write_lines, PaymentRow};
use crate::core::Ledger;
use crate::types::{AccountId, LedgerError, Payment};
use std::path::{Path, PathBuf};

/// Write a payment history into page files under `dir`
///
/// Returns the paths written, in page order. An empty history writes nothing.
///
/// # Errors
///
/// - `InvalidPageSize` if `records` is zero
/// - I/O errors from creating or writing a page file
pub fn history_to_files(
    payments: &[Payment],
    dir: &Path,
    records: usize,
) -> Result<Vec<PathBuf>, LedgerError> {
    if records == 0 {
        return Err(LedgerError::InvalidPageSize { records });
    }
    if payments.is_empty() {
        return Ok(Vec::new());
    }

    if payments.len() <= records {
        let path = dir.join(PAYMENTS_DUMP);
        payments_to_file(payments, &path)?;
        return Ok(vec![path]);
    }

    let pages = payments
        .chunks(records)
        .enumerate()
        .map(|(index, page)| -> Result<PathBuf, LedgerError> {
            let path = dir.join(format!("payments{}.dump", index + 1));
            payments_to_file(page, &path)?;
            Ok(path)
        })
        .collect::<Result<Vec<_>, _>>()?;

    log::info!(
        "Wrote {} payments into {} pages under {}",
        payments.len(),
        pages.len(),
        dir.display()
    );
    Ok(pages)
}

/// Write one page of payments to `path`
///
/// Writing stops at the first payment whose account ID is zero; such entries
/// mark the unused tail of a fixed-size buffer. Returns the number of
/// payments written.
pub fn payments_to_file(payments: &[Payment], path: &Path) -> Result<usize, LedgerError> {
    let page: Vec<&Payment> = payments
        .iter()
        .take_while(|payment| payment.account_id != 0)
        .collect();
    if page.len() < payments.len() {
        log::warn!(
            "Stopped at empty payment slot {} of {} for {}",
            page.len(),
            payments.len(),
            path.display()
        );
    }

    write_lines(path, page.into_iter().map(PaymentRow::from))
}

impl Ledger {
    /// Export one account's payment history as page files under `dir`
    ///
    /// Combines [`Ledger::export_account_history`] and [`history_to_files`].
    pub fn export_history_pages(
        &self,
        account_id: AccountId,
        dir: &Path,
        records: usize,
    ) -> Result<Vec<PathBuf>, LedgerError> {
        let history = self.export_account_history(account_id)?;
        history_to_files(&history, dir, records)
    }
}
