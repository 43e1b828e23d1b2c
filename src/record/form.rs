//! Turning raw user input into validated record fields.

use std::str::FromStr;

use time::Date;

use crate::{
    Error,
    bank::{BankDirectory, BankName},
    reference::{REFERENCE_PREFIX, ReferenceCode, normalize},
    validation::parse_date,
};

use super::core::RecordFields;

/// Where the date of a record comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DateInput {
    /// Use the current date.
    Today,
    /// A `YYYY-MM-DD` string typed in by the user.
    Raw(String),
}

/// Parse either a plain number (`453`) or a canonical code (`RK0000453`).
///
/// # Errors
///
/// Returns [Error::InvalidReference] if `raw` is neither.
pub fn parse_reference_input(raw: &str) -> Result<ReferenceCode, Error> {
    let trimmed = raw.trim();
    let has_prefix = trimmed
        .get(..REFERENCE_PREFIX.len())
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case(REFERENCE_PREFIX));

    if has_prefix {
        ReferenceCode::from_str(trimmed)
    } else {
        normalize(trimmed)
    }
}

/// Resolve a bank code, or failing that part of a bank name.
///
/// # Errors
///
/// Returns [Error::UnknownBankCode] if neither matches a directory entry.
pub fn resolve_bank_input(raw: &str) -> Result<BankName, Error> {
    BankDirectory::resolve_free_text(raw)
        .ok_or_else(|| Error::UnknownBankCode(raw.trim().to_uppercase()))
}

/// Validate all raw inputs of a record.
///
/// The reference is checked first, then the bank and finally the date, and
/// the first failure is returned. Nothing is written, so a failure here
/// leaves the store untouched.
pub fn validate_record_input(
    raw_reference: &str,
    raw_bank: &str,
    date: &DateInput,
    today: Date,
) -> Result<RecordFields, Error> {
    let reference = parse_reference_input(raw_reference)?;
    let bank = resolve_bank_input(raw_bank)?;
    let date = match date {
        DateInput::Today => today,
        DateInput::Raw(raw) => parse_date(raw, today)?,
    };

    Ok(RecordFields::new(reference, bank, date))
}
