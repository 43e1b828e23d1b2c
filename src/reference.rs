//! Reference codes and the normalizer that produces them.

use std::{fmt::Display, str::FromStr};

use rusqlite::{
    ToSql,
    types::{FromSql, FromSqlResult, ToSqlOutput, ValueRef},
};

use crate::Error;

/// The prefix shared by all reference codes.
pub const REFERENCE_PREFIX: &str = "RK";

/// The largest number that fits in a reference code.
pub const MAX_REFERENCE_NUMBER: u32 = 9_999_999;

const REFERENCE_DIGITS: usize = 7;

/// A canonical reference code, e.g. `RK0000453`.
///
/// Construct one with [normalize] from the number the user typed in, or parse
/// an existing code with [ReferenceCode::from_str].
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ReferenceCode(String);

impl ReferenceCode {
    /// Create a reference code without validation.
    ///
    /// The caller should ensure that the string is a canonical code. This is
    /// used for values read back from the database.
    pub(crate) fn new_unchecked(code: &str) -> Self {
        Self(code.to_owned())
    }

    /// The number encoded in the code, e.g. 453 for `RK0000453`.
    pub fn number(&self) -> Option<u32> {
        self.0
            .get(REFERENCE_PREFIX.len()..)
            .and_then(|digits| digits.parse().ok())
    }
}

/// Turn a raw numeric string into a canonical reference code.
///
/// The input is trimmed and must be a whole number between 0 and
/// [MAX_REFERENCE_NUMBER]. The number is zero-padded to seven digits and
/// prefixed with [REFERENCE_PREFIX], so `"453"` becomes `RK0000453`.
///
/// # Errors
///
/// Returns [Error::InvalidReference] for non-numeric, negative or too large
/// inputs.
pub fn normalize(raw: &str) -> Result<ReferenceCode, Error> {
    let trimmed = raw.trim();
    let invalid = || Error::InvalidReference(trimmed.to_owned());

    // i64 so that "-1" is rejected by the range check rather than the parser.
    let number: i64 = trimmed.parse().map_err(|_| invalid())?;

    if !(0..=i64::from(MAX_REFERENCE_NUMBER)).contains(&number) {
        return Err(invalid());
    }

    Ok(ReferenceCode(format!(
        "{REFERENCE_PREFIX}{number:0width$}",
        width = REFERENCE_DIGITS
    )))
}

impl AsRef<str> for ReferenceCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Display for ReferenceCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Parse an already canonical code, ignoring case, e.g. `rk0000453`.
impl FromStr for ReferenceCode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let digits = trimmed
            .get(..REFERENCE_PREFIX.len())
            .filter(|prefix| prefix.eq_ignore_ascii_case(REFERENCE_PREFIX))
            .and_then(|_| trimmed.get(REFERENCE_PREFIX.len()..))
            .filter(|digits| {
                digits.len() == REFERENCE_DIGITS && digits.bytes().all(|b| b.is_ascii_digit())
            })
            .ok_or_else(|| Error::InvalidReference(trimmed.to_owned()))?;

        normalize(digits)
    }
}

impl ToSql for ReferenceCode {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        self.0.to_sql()
    }
}

impl FromSql for ReferenceCode {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        value.as_str().map(ReferenceCode::new_unchecked)
    }
}
