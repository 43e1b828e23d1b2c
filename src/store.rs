//! The record store used by the shell.
//!
//! [RecordStore] only remembers where the database lives. Every method opens
//! its own connection, runs one operation and closes the connection again, so
//! nothing is held between calls and every successful write is already on
//! disk when the method returns.

use std::path::{Path, PathBuf};

use rusqlite::Connection;
use time::Date;

use crate::{
    Error,
    bank::BankFilter,
    db,
    record::{self, DateInput, Record, RecordFields, RecordId, Summary, validate_record_input},
    validation::{check_not_future, parse_date},
};

/// Create, read, update and query records in a SQLite file.
#[derive(Debug, Clone)]
pub struct RecordStore {
    db_path: PathBuf,
}

impl RecordStore {
    /// Create a store for the database at `db_path`, creating the file and
    /// tables if they do not exist yet.
    ///
    /// # Errors
    /// Returns an [Error::SqlError] if the database cannot be opened or
    /// initialized.
    pub fn open(db_path: impl Into<PathBuf>) -> Result<Self, Error> {
        let db_path = db_path.into();
        db::open(&db_path)?;
        tracing::info!("using database {}", db_path.display());

        Ok(Self { db_path })
    }

    /// The path of the database file.
    pub fn db_path(&self) -> &Path {
        &self.db_path
    }

    fn connect(&self) -> Result<Connection, Error> {
        Connection::open(&self.db_path).map_err(Error::from)
    }

    /// Insert a record and return its ID.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::InvalidDate] if the record is dated after `today`,
    /// - [Error::DuplicateReference] if another record uses the same reference
    ///   code, ignoring case,
    /// - or [Error::SqlError] if there is some other SQL error.
    pub fn create(&self, fields: &RecordFields, today: Date) -> Result<RecordId, Error> {
        check_not_future(fields.date, today)?;
        record::create_record(fields, &self.connect()?)
    }

    /// Replace the reference, bank and date of the record `id`.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::InvalidDate] if the new date is after `today`,
    /// - [Error::DuplicateReference] if a different record already uses the
    ///   new reference code,
    /// - [Error::NotFound] if `id` does not refer to a record,
    /// - or [Error::SqlError] if there is some other SQL error.
    ///
    /// The record is not changed when an error is returned.
    pub fn update(&self, id: RecordId, fields: &RecordFields, today: Date) -> Result<(), Error> {
        check_not_future(fields.date, today)?;
        record::update_record(id, fields, &self.connect()?)
    }

    /// Validate raw input and insert a new record.
    ///
    /// # Errors
    /// Returns the validation error for the first invalid input, otherwise
    /// see [RecordStore::create].
    pub fn add(
        &self,
        raw_number: &str,
        raw_bank: &str,
        date: &DateInput,
        today: Date,
    ) -> Result<RecordId, Error> {
        let fields = validate_record_input(raw_number, raw_bank, date, today)?;
        self.create(&fields, today)
    }

    /// Validate raw input and replace the fields of the record `id`.
    ///
    /// The record is left untouched if any input is invalid.
    ///
    /// # Errors
    /// Returns the validation error for the first invalid input, otherwise
    /// see [RecordStore::update].
    pub fn edit(
        &self,
        id: RecordId,
        raw_reference: &str,
        raw_bank: &str,
        raw_date: &str,
        today: Date,
    ) -> Result<(), Error> {
        let date = DateInput::Raw(raw_date.to_owned());
        let fields = validate_record_input(raw_reference, raw_bank, &date, today)?;
        self.update(id, &fields, today)
    }

    /// Get a record by ID, or `None` if there is no such record.
    pub fn get_by_id(&self, id: RecordId) -> Result<Option<Record>, Error> {
        match record::get_record(id, &self.connect()?) {
            Ok(record) => Ok(Some(record)),
            Err(Error::NotFound) => Ok(None),
            Err(error) => Err(error),
        }
    }

    /// Get the records with exactly this reference code, ignoring case.
    pub fn get_by_reference_exact(&self, reference: &str) -> Result<Vec<Record>, Error> {
        record::get_records_by_reference(reference, &self.connect()?)
    }

    /// Get all records ordered by reference code.
    pub fn get_all(&self) -> Result<Vec<Record>, Error> {
        record::get_all_records(&self.connect()?)
    }

    /// See [record::filter_by_reference_substring].
    pub fn filter_by_reference_substring(&self, text: &str) -> Result<Vec<Record>, Error> {
        record::filter_by_reference_substring(text, &self.connect()?)
    }

    /// See [record::filter_by_bank].
    pub fn filter_by_bank(&self, input: &str) -> Result<Vec<Record>, Error> {
        record::filter_by_bank(input, &self.connect()?)
    }

    /// See [record::filter_by_bank_filter].
    pub fn filter_by_bank_filter(&self, filter: &BankFilter) -> Result<Vec<Record>, Error> {
        record::filter_by_bank_filter(filter, &self.connect()?)
    }

    /// See [record::filter_by_raw_date].
    ///
    /// The date is checked before the database is opened.
    pub fn filter_by_date(&self, raw: &str, today: Date) -> Result<Vec<Record>, Error> {
        let date = parse_date(raw, today)?;
        record::filter_by_date(date, &self.connect()?)
    }

    /// See [record::filter_by_raw_date_range].
    pub fn filter_by_date_range(
        &self,
        raw_start: &str,
        raw_end: &str,
        today: Date,
    ) -> Result<Vec<Record>, Error> {
        let start = parse_date(raw_start, today)?;
        let end = parse_date(raw_end, today)?;
        record::filter_by_date_range(start, end, &self.connect()?)
    }

    /// See [record::get_summary].
    pub fn summary(&self, recent_limit: u32) -> Result<Summary, Error> {
        record::get_summary(recent_limit, &self.connect()?)
    }
}
