//! CSV export of all records.

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::{Error, record::Record};

/// The file name used when the user does not type one in.
pub const DEFAULT_EXPORT_FILE_NAME: &str = "transactions.csv";

#[derive(Serialize)]
struct ExportRow<'a> {
    #[serde(rename = "ID")]
    id: i64,
    #[serde(rename = "Reference Number")]
    reference: &'a str,
    #[serde(rename = "Bank Name")]
    bank: &'a str,
    #[serde(rename = "Date")]
    date: String,
}

/// Turn the file name typed in by the user into an export path.
///
/// A blank name becomes [DEFAULT_EXPORT_FILE_NAME] and `.csv` is appended
/// unless the name already ends with it (ignoring case).
pub fn export_path(raw: &str) -> PathBuf {
    let name = raw.trim();

    if name.is_empty() {
        return PathBuf::from(DEFAULT_EXPORT_FILE_NAME);
    }

    if name.to_lowercase().ends_with(".csv") {
        PathBuf::from(name)
    } else {
        PathBuf::from(format!("{name}.csv"))
    }
}

/// Write `records` to `path` as CSV with a header row, in the given order.
///
/// Returns the number of records written. No file is created when there are
/// no records.
///
/// # Errors
///
/// Returns [Error::ExportFailure] if the file cannot be created or written.
pub fn export_records(records: &[Record], path: &Path) -> Result<usize, Error> {
    if records.is_empty() {
        tracing::info!("no records to export");
        return Ok(0);
    }

    let failure = |error: &dyn std::fmt::Display| {
        tracing::error!("could not export records to {}: {error}", path.display());
        Error::ExportFailure(path.display().to_string(), error.to_string())
    };

    let mut writer = csv::Writer::from_path(path).map_err(|error| failure(&error))?;

    for record in records {
        writer
            .serialize(ExportRow {
                id: record.id,
                reference: record.reference.as_ref(),
                bank: record.bank.as_ref(),
                date: record.date.to_string(),
            })
            .map_err(|error| failure(&error))?;
    }

    writer.flush().map_err(|error| failure(&error))?;

    tracing::info!("exported {} records to {}", records.len(), path.display());

    Ok(records.len())
}

#[cfg(test)]
mod tests {
    use std::{fs, path::PathBuf};

    use time::macros::date;

    use crate::{
        Error,
        bank::BankName,
        record::Record,
        reference::normalize,
    };

    use super::{export_path, export_records};

    fn record(id: i64, number: &str, bank: &str) -> Record {
        Record {
            id,
            reference: normalize(number).unwrap(),
            bank: BankName::new_unchecked(bank),
            date: date!(2025 - 10 - 05),
        }
    }

    #[test]
    fn export_path_defaults_and_appends_extension() {
        assert_eq!(export_path(""), PathBuf::from("transactions.csv"));
        assert_eq!(export_path("  "), PathBuf::from("transactions.csv"));
        assert_eq!(export_path("backup"), PathBuf::from("backup.csv"));
        assert_eq!(export_path("Backup.CSV"), PathBuf::from("Backup.CSV"));
    }

    #[test]
    fn export_writes_header_and_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");
        let records = [
            record(2, "12", "EMPLOYEE PROVIDENT FUND"),
            record(1, "453", "PRIME COMMERCIAL BANK LTD"),
        ];

        let count = export_records(&records, &path).expect("Could not export");

        assert_eq!(count, 2);
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "ID,Reference Number,Bank Name,Date\n\
            2,RK0000012,EMPLOYEE PROVIDENT FUND,2025-10-05\n\
            1,RK0000453,PRIME COMMERCIAL BANK LTD,2025-10-05\n"
        );
    }

    #[test]
    fn export_of_nothing_creates_no_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.csv");

        assert_eq!(export_records(&[], &path), Ok(0));
        assert!(!path.exists());
    }

    #[test]
    fn export_to_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("out.csv");

        let result = export_records(&[record(1, "1", "EMPLOYEE PROVIDENT FUND")], &path);

        assert!(matches!(result, Err(Error::ExportFailure(_, _))));
    }
}
