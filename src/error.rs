//! Defines the app level error type and its conversion from SQL errors.

use crate::{bank::BankDirectory, reference::ReferenceCode};

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// The raw input could not be turned into a reference code.
    ///
    /// Only whole numbers between 0 and 9,999,999 (inclusive) are accepted.
    #[error("invalid reference number \"{0}\": enter a whole number between 0 and 9999999")]
    InvalidReference(String),

    /// The bank short code is not in the bank directory.
    #[error("unknown bank code \"{0}\". Supported codes: {codes}", codes = BankDirectory::codes().join(", "))]
    UnknownBankCode(String),

    /// The date could not be parsed as `YYYY-MM-DD` or it is after today.
    ///
    /// Records describe transactions that have already happened, therefore
    /// future dates are not allowed.
    #[error("invalid date \"{0}\": use the YYYY-MM-DD format and a date no later than today")]
    InvalidDate(String),

    /// Another record already uses this reference code.
    ///
    /// Reference codes are compared case-insensitively.
    #[error("reference number {0} already exists")]
    DuplicateReference(ReferenceCode),

    /// The requested record could not be found.
    ///
    /// Internally, this error may occur when a query returns no rows.
    #[error("the requested record could not be found")]
    NotFound,

    /// The record ID typed by the user is not a positive whole number.
    #[error("\"{0}\" is not a valid record ID")]
    InvalidRecordId(String),

    /// The database file name contains characters outside of
    /// `[A-Za-z0-9_.-]` or does not end with `.db`.
    #[error("invalid database name \"{0}\": use letters, digits, '_', '-' or '.' and the .db extension")]
    InvalidDatabaseName(String),

    /// The configured timezone is not a canonical IANA timezone name.
    #[error("invalid timezone {0}")]
    InvalidTimezone(String),

    /// Writing the CSV export failed.
    ///
    /// Holds the path and the underlying I/O or CSV error message.
    #[error("could not export records to {0}: {1}")]
    ExportFailure(String, String),

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            rusqlite::Error::QueryReturnedNoRows => Error::NotFound,
            error => {
                tracing::error!("an unhandled SQL error occurred: {}", error);
                Error::SqlError(error)
            }
        }
    }
}

/// Returns `true` if `error` was raised by a `UNIQUE` constraint.
pub(crate) fn is_unique_violation(error: &rusqlite::Error) -> bool {
    matches!(
        error,
        rusqlite::Error::SqliteFailure(
            rusqlite::ffi::Error {
                code: _,
                extended_code: rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE,
            },
            _,
        )
    )
}
