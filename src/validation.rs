//! Validation helpers shared by the store, the queries and the shell.
//!
//! These functions never prompt. They turn raw strings into validated values
//! or return an [Error] the caller can recover from.

use std::path::Path;

use time::{Date, macros::format_description};

use crate::{Error, record::RecordId};

/// Parse a `YYYY-MM-DD` date that must not be after `today`.
///
/// # Errors
///
/// Returns [Error::InvalidDate] if `raw` is not a real calendar date in the
/// `YYYY-MM-DD` format or if it is after `today`.
pub fn parse_date(raw: &str, today: Date) -> Result<Date, Error> {
    let raw = raw.trim();
    let format = format_description!("[year]-[month]-[day]");

    let date = Date::parse(raw, &format).map_err(|_| Error::InvalidDate(raw.to_owned()))?;

    check_not_future(date, today)
}

/// Check that `date` is not after `today`.
///
/// # Errors
///
/// Returns [Error::InvalidDate] if `date` is after `today`.
pub fn check_not_future(date: Date, today: Date) -> Result<Date, Error> {
    if date > today {
        tracing::warn!("rejected future date {date} (today is {today})");
        return Err(Error::InvalidDate(date.to_string()));
    }

    Ok(date)
}

/// Parse a record ID typed in by the user.
///
/// # Errors
///
/// Returns [Error::InvalidRecordId] unless `raw` is a positive whole number.
pub fn parse_record_id(raw: &str) -> Result<RecordId, Error> {
    let raw = raw.trim();

    match raw.parse::<RecordId>() {
        Ok(id) if id > 0 && raw.bytes().all(|b| b.is_ascii_digit()) => Ok(id),
        _ => Err(Error::InvalidRecordId(raw.to_owned())),
    }
}

/// Check a database file name and reduce it to its base name.
///
/// The name may only contain ASCII letters, digits, `_`, `-` and `.` and must
/// end with `.db`. Directory components are rejected outright, so the result
/// can never point outside of the data directory.
///
/// # Errors
///
/// Returns [Error::InvalidDatabaseName] if the name does not follow these
/// rules.
pub fn sanitize_db_name(raw: &str) -> Result<String, Error> {
    let invalid = || Error::InvalidDatabaseName(raw.to_owned());

    let allowed = |c: char| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.');
    let stem = raw.strip_suffix(".db").ok_or_else(invalid)?;

    if stem.is_empty() || !raw.chars().all(allowed) {
        return Err(invalid());
    }

    let base_name = Path::new(raw)
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(invalid)?;

    if base_name != raw {
        return Err(invalid());
    }

    Ok(base_name.to_owned())
}
