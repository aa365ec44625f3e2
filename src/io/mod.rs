//! I/O module
//!
//! Handles persistence and reporting.
//!
//! # Components
//!
//! - `dump_format` - `;`-delimited record layout shared by every dump file
//! - `compact` - Single-file `|`-separated account export/import
//! - `dump` - Directory dump of accounts, payments and favorites
//! - `history` - Paginated payment history files
//! - `csv_format` - CSV account report

pub mod compact;
pub mod csv_format;
pub mod dump;
pub mod dump_format;
pub mod history;

pub use csv_format::write_accounts_csv;
pub use dump::{ImportReport, ACCOUNTS_DUMP, FAVORITES_DUMP, PAYMENTS_DUMP};
pub use history::{history_to_files, payments_to_file};
