//! Defines the core data model and database queries for records.

use rusqlite::{Connection, Row};
use time::Date;

use crate::{Error, bank::BankName, error::is_unique_violation, reference::ReferenceCode};

// ============================================================================
// MODELS
// ============================================================================

/// Database identifier for a record.
pub type RecordId = i64;

/// A transaction reference kept by the user: which bank it went through and
/// when it happened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    /// The ID assigned by the database. Never changes.
    pub id: RecordId,
    /// The unique reference code, e.g. `RK0000453`.
    pub reference: ReferenceCode,
    /// The canonical name of the bank.
    pub bank: BankName,
    /// When the transaction happened.
    pub date: Date,
}

/// The validated fields of a record, i.e. everything but the ID.
///
/// Used both for creating records and for replacing the fields of an
/// existing record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordFields {
    /// The reference code.
    pub reference: ReferenceCode,
    /// The canonical bank name.
    pub bank: BankName,
    /// The transaction date, no later than today.
    pub date: Date,
}

impl RecordFields {
    /// Bundle already validated values.
    pub fn new(reference: ReferenceCode, bank: BankName, date: Date) -> Self {
        Self {
            reference,
            bank,
            date,
        }
    }
}

impl Record {
    /// The fields of this record without the ID.
    pub fn fields(&self) -> RecordFields {
        RecordFields::new(self.reference.clone(), self.bank.clone(), self.date)
    }
}

// ============================================================================
// DATABASE FUNCTIONS
// ============================================================================

/// The columns selected by every record query, in the order [map_record_row]
/// expects them.
pub(crate) const RECORD_COLUMNS: &str = "id, ref_number, bank_name, date";

/// Insert a new record and return its ID.
///
/// The date is not checked here, callers outside of the crate go through
/// [RecordStore::create](crate::RecordStore::create).
///
/// # Errors
/// This function will return a:
/// - [Error::DuplicateReference] if another record uses the same reference
///   code, ignoring case,
/// - or [Error::SqlError] if there is some other SQL error.
pub(crate) fn create_record(fields: &RecordFields, connection: &Connection) -> Result<RecordId, Error> {
    connection
        .execute(
            "INSERT INTO transactions (ref_number, bank_name, date) VALUES (?1, ?2, ?3)",
            (&fields.reference, &fields.bank, fields.date),
        )
        .map_err(|error| match error {
            error if is_unique_violation(&error) => {
                Error::DuplicateReference(fields.reference.clone())
            }
            error => error.into(),
        })?;

    let id = connection.last_insert_rowid();
    tracing::info!("created record {id} ({})", fields.reference);

    Ok(id)
}

/// Replace the reference, bank and date of the record `id`.
///
/// All three fields are written in a single statement, so either all of them
/// change or none do.
///
/// # Errors
/// This function will return a:
/// - [Error::DuplicateReference] if a different record already uses the new
///   reference code,
/// - [Error::NotFound] if `id` does not refer to a record,
/// - or [Error::SqlError] if there is some other SQL error.
pub(crate) fn update_record(
    id: RecordId,
    fields: &RecordFields,
    connection: &Connection,
) -> Result<(), Error> {
    let rows_affected = connection
        .execute(
            "UPDATE transactions SET ref_number = ?1, bank_name = ?2, date = ?3 WHERE id = ?4",
            (&fields.reference, &fields.bank, fields.date, id),
        )
        .map_err(|error| match error {
            error if is_unique_violation(&error) => {
                Error::DuplicateReference(fields.reference.clone())
            }
            error => error.into(),
        })?;

    if rows_affected == 0 {
        return Err(Error::NotFound);
    }

    tracing::info!("updated record {id} ({})", fields.reference);

    Ok(())
}

/// Retrieve a record by its `id`.
///
/// # Errors
/// This function will return a:
/// - [Error::NotFound] if `id` does not refer to a record,
/// - or [Error::SqlError] if there is some other SQL error.
pub fn get_record(id: RecordId, connection: &Connection) -> Result<Record, Error> {
    connection
        .prepare(&format!(
            "SELECT {RECORD_COLUMNS} FROM transactions WHERE id = :id"
        ))?
        .query_row(&[(":id", &id)], map_record_row)
        .map_err(|error| error.into())
}

/// Retrieve the records whose reference code equals `reference`, ignoring
/// case.
///
/// The reference column is unique so this is normally zero or one record.
pub fn get_records_by_reference(
    reference: &str,
    connection: &Connection,
) -> Result<Vec<Record>, Error> {
    connection
        .prepare(&format!(
            "SELECT {RECORD_COLUMNS} FROM transactions \
            WHERE ref_number = ?1 COLLATE NOCASE \
            ORDER BY ref_number ASC, id ASC"
        ))?
        .query_map([reference.trim()], map_record_row)?
        .map(|maybe_record| maybe_record.map_err(|error| error.into()))
        .collect()
}

/// Retrieve all records ordered by reference code.
pub fn get_all_records(connection: &Connection) -> Result<Vec<Record>, Error> {
    connection
        .prepare(&format!(
            "SELECT {RECORD_COLUMNS} FROM transactions ORDER BY ref_number ASC, id ASC"
        ))?
        .query_map([], map_record_row)?
        .map(|maybe_record| maybe_record.map_err(|error| error.into()))
        .collect()
}

/// Get the total number of records in the database.
pub fn count_records(connection: &Connection) -> Result<u32, Error> {
    connection
        .query_row("SELECT COUNT(id) FROM transactions;", [], |row| row.get(0))
        .map_err(|error| error.into())
}

/// Create the record table and its indexes.
///
/// # Errors
/// Returns an error if there is an SQL error.
pub fn create_record_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute_batch(
        "CREATE TABLE IF NOT EXISTS transactions (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            ref_number TEXT NOT NULL UNIQUE COLLATE NOCASE,
            bank_name TEXT NOT NULL,
            date TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_ref_number ON transactions(ref_number);
        CREATE INDEX IF NOT EXISTS idx_date ON transactions(date);",
    )?;

    Ok(())
}

/// Map a database row to a [Record].
pub(crate) fn map_record_row(row: &Row) -> Result<Record, rusqlite::Error> {
    let id = row.get(0)?;
    let reference = row.get(1)?;
    let bank = row.get(2)?;
    let date = row.get(3)?;

    Ok(Record {
        id,
        reference,
        bank,
        date,
    })
}

// ============================================================================
// TESTS
// ============================================================================
