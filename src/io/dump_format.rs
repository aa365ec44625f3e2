//! Delimited record format shared by all dump files
//!
//! Every dump stores one record per entity with `;`-separated fields in a
//! fixed positional order:
//!
//! - account: `id;phone;balance`
//! - payment: `id;account_id;amount;category;status;`
//! - favorite: `id;account_id;amount;name;category;`
//!
//! Line-based dumps end each record with `\n`; the compact single-file format
//! ends each record with `|`. Fields are never quoted or escaped, so values
//! must not contain `;`, `|` or line breaks.
//!
//! Reading is best-effort: an unparseable number becomes `0`, an unknown
//! status becomes `INPROGRESS` and a missing field becomes empty. Each
//! fallback is logged and the record is kept.

use crate::types::{Account, AccountId, Favorite, LedgerError, Money, Payment, PaymentStatus};
use csv::{QuoteStyle, ReaderBuilder, StringRecord, Terminator, WriterBuilder};
use serde::Serialize;
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

/// Separator between the fields of a record
pub const FIELD_DELIMITER: u8 = b';';

/// Separator between records in the compact single-file format
pub const RECORD_SEPARATOR: u8 = b'|';

/// Writer producing one record per line
pub fn line_writer<W: Write>(output: W) -> csv::Writer<W> {
    writer(output, Terminator::Any(b'\n'))
}

/// Writer producing `|`-terminated records
pub fn compact_writer<W: Write>(output: W) -> csv::Writer<W> {
    writer(output, Terminator::Any(RECORD_SEPARATOR))
}

fn writer<W: Write>(output: W, terminator: Terminator) -> csv::Writer<W> {
    WriterBuilder::new()
        .delimiter(FIELD_DELIMITER)
        .has_headers(false)
        .flexible(true)
        .quote_style(QuoteStyle::Never)
        .terminator(terminator)
        .from_writer(output)
}

/// Reader accepting `\n` or `\r\n` terminated records
pub fn line_reader<R: Read>(input: R) -> csv::Reader<R> {
    reader(input, Terminator::CRLF)
}

/// Reader for `|`-terminated records
pub fn compact_reader<R: Read>(input: R) -> csv::Reader<R> {
    reader(input, Terminator::Any(RECORD_SEPARATOR))
}

fn reader<R: Read>(input: R, terminator: Terminator) -> csv::Reader<R> {
    ReaderBuilder::new()
        .delimiter(FIELD_DELIMITER)
        .has_headers(false)
        .flexible(true)
        .quoting(false)
        .terminator(terminator)
        .from_reader(input)
}

/// Open a dump file, reporting a missing file as `FileNotFound`
pub fn open_dump(path: &Path) -> Result<File, LedgerError> {
    File::open(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => LedgerError::file_not_found(path),
        _ => e.into(),
    })
}

/// Serialize rows into a new line-based dump file, replacing any existing one
pub fn write_lines<I, S>(path: &Path, rows: I) -> Result<usize, LedgerError>
where
    I: IntoIterator<Item = S>,
    S: Serialize,
{
    let mut writer = line_writer(File::create(path)?);
    let mut count = 0;
    for row in rows {
        writer.serialize(row)?;
        count += 1;
    }
    writer.flush()?;

    Ok(count)
}

/// Parse every non-blank record from a reader
pub fn read_records<R, T, F>(reader: &mut csv::Reader<R>, parse: F) -> Result<Vec<T>, LedgerError>
where
    R: Read,
    F: Fn(&StringRecord) -> T,
{
    let mut items = Vec::new();
    for result in reader.records() {
        let record = result?;
        if is_blank(&record) {
            continue;
        }
        items.push(parse(&record));
    }

    Ok(items)
}

fn is_blank(record: &StringRecord) -> bool {
    record.iter().all(|field| field.trim().is_empty())
}

/// Payment record layout
///
/// Accounts need no row type: [`Account`] serializes as `id;phone;balance`.
#[derive(Debug, Serialize)]
pub struct PaymentRow<'a> {
    id: &'a str,
    account_id: AccountId,
    amount: Money,
    category: &'a str,
    status: PaymentStatus,
    // trailing `;`
    end: &'static str,
}

impl<'a> From<&'a Payment> for PaymentRow<'a> {
    fn from(payment: &'a Payment) -> Self {
        PaymentRow {
            id: &payment.id,
            account_id: payment.account_id,
            amount: payment.amount,
            category: &payment.category,
            status: payment.status,
            end: "",
        }
    }
}

/// Favorite record layout
#[derive(Debug, Serialize)]
pub struct FavoriteRow<'a> {
    id: &'a str,
    account_id: AccountId,
    amount: Money,
    name: &'a str,
    category: &'a str,
    // trailing `;`
    end: &'static str,
}

impl<'a> From<&'a Favorite> for FavoriteRow<'a> {
    fn from(favorite: &'a Favorite) -> Self {
        FavoriteRow {
            id: &favorite.id,
            account_id: favorite.account_id,
            amount: favorite.amount,
            name: &favorite.name,
            category: &favorite.category,
            end: "",
        }
    }
}

/// Build an account from `id;phone;balance`
pub fn parse_account(record: &StringRecord) -> Account {
    Account {
        id: number_field(record, 0, "id"),
        phone: text_field(record, 1, "phone"),
        balance: number_field(record, 2, "balance"),
    }
}

/// Build a payment from `id;account_id;amount;category;status`
pub fn parse_payment(record: &StringRecord) -> Payment {
    Payment {
        id: text_field(record, 0, "id"),
        account_id: number_field(record, 1, "account_id"),
        amount: number_field(record, 2, "amount"),
        category: text_field(record, 3, "category"),
        status: status_field(record, 4),
    }
}

/// Build a favorite from `id;account_id;amount;name;category`
pub fn parse_favorite(record: &StringRecord) -> Favorite {
    Favorite {
        id: text_field(record, 0, "id"),
        account_id: number_field(record, 1, "account_id"),
        amount: number_field(record, 2, "amount"),
        name: text_field(record, 3, "name"),
        category: text_field(record, 4, "category"),
    }
}

fn location(record: &StringRecord) -> String {
    record
        .position()
        .map(|pos| format!("record at line {}", pos.line()))
        .unwrap_or_else(|| "record".to_string())
}

fn text_field(record: &StringRecord, index: usize, name: &str) -> String {
    match record.get(index) {
        Some(value) => value.to_string(),
        None => {
            log::warn!("{}: missing {} field, using empty value", location(record), name);
            String::new()
        }
    }
}

fn number_field(record: &StringRecord, index: usize, name: &str) -> i64 {
    let Some(value) = record.get(index) else {
        log::warn!("{}: missing {} field, using 0", location(record), name);
        return 0;
    };

    value.parse().unwrap_or_else(|_| {
        log::warn!("{}: invalid {} '{}', using 0", location(record), name, value);
        0
    })
}

fn status_field(record: &StringRecord, index: usize) -> PaymentStatus {
    let value = record.get(index).unwrap_or_default();
    value.parse().unwrap_or_else(|e| {
        log::warn!("{}: {}, using INPROGRESS", location(record), e);
        PaymentStatus::InProgress
    })
}
