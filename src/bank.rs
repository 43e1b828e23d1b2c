//! The bank directory: short bank codes and their canonical names.

use std::fmt::Display;

use rusqlite::{
    ToSql,
    types::{FromSql, FromSqlResult, ToSqlOutput, ValueRef},
};

use crate::Error;

/// A short code and the canonical name it stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BankEntry {
    /// The short code, e.g. "PCBL".
    pub code: &'static str,
    /// The canonical full name, e.g. "PRIME COMMERCIAL BANK LTD".
    pub name: &'static str,
}

const ENTRIES: [BankEntry; 7] = [
    BankEntry {
        code: "CIT",
        name: "CITIZEN INVESTMENT TRUST",
    },
    BankEntry {
        code: "EPF",
        name: "EMPLOYEE PROVIDENT FUND",
    },
    BankEntry {
        code: "GBBL",
        name: "GARIMA BIKAS BANK LTD",
    },
    BankEntry {
        code: "MNBBL",
        name: "MUKTINATH BIKASH BANK LTD",
    },
    BankEntry {
        code: "NIMB",
        name: "NEPAL INVESTMENT MEGA BANK LTD",
    },
    BankEntry {
        code: "PCBL",
        name: "PRIME COMMERCIAL BANK LTD",
    },
    BankEntry {
        code: "SADBL",
        name: "SHANGRILA DEVELOPMENT BANK LTD",
    },
];

/// The canonical full name of a bank from the [BankDirectory].
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BankName(String);

impl BankName {
    /// Create a bank name without validation.
    ///
    /// Outside of this crate a bank name can only come from the
    /// [BankDirectory] or the database, so free text is never stored.
    pub(crate) fn new_unchecked(name: &str) -> Self {
        Self(name.to_owned())
    }
}

impl AsRef<str> for BankName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Display for BankName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl ToSql for BankName {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        self.0.to_sql()
    }
}

impl FromSql for BankName {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        value.as_str().map(BankName::new_unchecked)
    }
}

/// How stored bank names should be matched by a bank filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BankFilter {
    /// The stored name must equal this canonical name.
    ExactMatch(BankName),
    /// The stored name must contain this text, ignoring case.
    SubstringMatch(String),
}

/// The fixed mapping from short codes to canonical bank names.
///
/// Entries are kept in a constant table, the order of which is the order used
/// when resolving partial names.
pub struct BankDirectory;

impl BankDirectory {
    /// All entries in directory order.
    pub fn entries() -> &'static [BankEntry] {
        &ENTRIES
    }

    /// The short codes in directory order.
    pub fn codes() -> Vec<&'static str> {
        ENTRIES.iter().map(|entry| entry.code).collect()
    }

    /// The canonical names in directory order.
    pub fn names() -> Vec<&'static str> {
        ENTRIES.iter().map(|entry| entry.name).collect()
    }

    fn find_code(code: &str) -> Option<&'static BankEntry> {
        let code = code.trim();
        ENTRIES
            .iter()
            .find(|entry| entry.code.eq_ignore_ascii_case(code))
    }

    /// Resolve a short code (ignoring case) to its canonical bank name.
    ///
    /// # Errors
    ///
    /// Returns [Error::UnknownBankCode] if `code` is not in the directory.
    pub fn resolve_code(code: &str) -> Result<BankName, Error> {
        Self::find_code(code)
            .map(|entry| BankName::new_unchecked(entry.name))
            .ok_or_else(|| Error::UnknownBankCode(code.trim().to_uppercase()))
    }

    /// Resolve either a short code or part of a bank name.
    ///
    /// An exact code match wins, otherwise the first canonical name that
    /// contains `text` (ignoring case) is returned. Returns `None` if nothing
    /// matches or `text` is blank.
    pub fn resolve_free_text(text: &str) -> Option<BankName> {
        let text = text.trim();

        if text.is_empty() {
            return None;
        }

        if let Some(entry) = Self::find_code(text) {
            return Some(BankName::new_unchecked(entry.name));
        }

        let needle = text.to_uppercase();
        ENTRIES
            .iter()
            .find(|entry| entry.name.to_uppercase().contains(&needle))
            .map(|entry| BankName::new_unchecked(entry.name))
    }

    /// Build the filter for a bank search.
    ///
    /// Short codes are precise handles and match their canonical name
    /// exactly, anything else is matched as a substring.
    pub fn bank_filter(input: &str) -> BankFilter {
        match Self::find_code(input) {
            Some(entry) => BankFilter::ExactMatch(BankName::new_unchecked(entry.name)),
            None => BankFilter::SubstringMatch(input.trim().to_owned()),
        }
    }
}
