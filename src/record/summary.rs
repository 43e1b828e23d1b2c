//! Aggregate report over all records.

use rusqlite::Connection;

use crate::{Error, bank::BankName};

use super::core::{RECORD_COLUMNS, Record, count_records, map_record_row};

/// The default number of recent records in the summary report.
pub const DEFAULT_RECENT_LIMIT: u32 = 5;

/// The number of records shown by the "latest records" view.
pub const LATEST_RECORDS_LIMIT: u32 = 10;

/// The number of records for one bank.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BankCount {
    /// The canonical bank name.
    pub bank: BankName,
    /// How many records use the bank.
    pub count: u32,
}

/// Totals and the most recent records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summary {
    /// The number of records in the store.
    pub total_count: u32,
    /// Records per bank, most used bank first. Ties are ordered by bank name.
    pub per_bank_counts: Vec<BankCount>,
    /// The newest records by date, then by ID, newest first.
    pub recent: Vec<Record>,
}

/// Build the summary report.
///
/// `recent_limit` is the maximum number of records in [Summary::recent].
pub fn get_summary(recent_limit: u32, connection: &Connection) -> Result<Summary, Error> {
    let total_count = count_records(connection)?;
    let per_bank_counts = get_per_bank_counts(connection)?;
    let recent = get_recent_records(recent_limit, connection)?;

    Ok(Summary {
        total_count,
        per_bank_counts,
        recent,
    })
}

fn get_per_bank_counts(connection: &Connection) -> Result<Vec<BankCount>, Error> {
    connection
        .prepare(
            "SELECT bank_name, COUNT(id) AS count FROM transactions \
            GROUP BY bank_name \
            ORDER BY count DESC, bank_name ASC",
        )?
        .query_map([], |row| {
            Ok(BankCount {
                bank: row.get(0)?,
                count: row.get(1)?,
            })
        })?
        .map(|maybe_count| maybe_count.map_err(|error| error.into()))
        .collect()
}

fn get_recent_records(limit: u32, connection: &Connection) -> Result<Vec<Record>, Error> {
    connection
        .prepare(&format!(
            "SELECT {RECORD_COLUMNS} FROM transactions ORDER BY date DESC, id DESC LIMIT ?1"
        ))?
        .query_map([limit], map_record_row)?
        .map(|maybe_record| maybe_record.map_err(|error| error.into()))
        .collect()
}

#[cfg(test)]
mod tests {
    use rusqlite::Connection;
    use time::{Date, macros::date};

    use crate::{
        bank::BankDirectory,
        db::initialize,
        record::{RecordFields, create_record},
        reference::normalize,
    };

    use super::get_summary;

    fn get_test_connection() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        initialize(&conn).unwrap();
        conn
    }

    fn insert(number: &str, code: &str, date: Date, conn: &Connection) -> i64 {
        let fields = RecordFields::new(
            normalize(number).unwrap(),
            BankDirectory::resolve_code(code).unwrap(),
            date,
        );
        create_record(&fields, conn).expect("Could not create record")
    }

    #[test]
    fn summary_of_empty_store() {
        let conn = get_test_connection();

        let summary = get_summary(5, &conn).unwrap();

        assert_eq!(summary.total_count, 0);
        assert!(summary.per_bank_counts.is_empty());
        assert!(summary.recent.is_empty());
    }

    #[test]
    fn summary_counts_per_bank_most_used_first() {
        let conn = get_test_connection();
        let today = date!(2025 - 10 - 05);
        insert("1", "PCBL", today, &conn);
        insert("2", "EPF", today, &conn);
        insert("3", "EPF", today, &conn);
        insert("4", "CIT", today, &conn);
        insert("5", "EPF", today, &conn);
        insert("6", "CIT", today, &conn);

        let summary = get_summary(5, &conn).unwrap();

        let got: Vec<(String, u32)> = summary
            .per_bank_counts
            .into_iter()
            .map(|count| (count.bank.to_string(), count.count))
            .collect();
        assert_eq!(summary.total_count, 6);
        assert_eq!(
            got,
            [
                ("EMPLOYEE PROVIDENT FUND".to_owned(), 3),
                ("CITIZEN INVESTMENT TRUST".to_owned(), 2),
                ("PRIME COMMERCIAL BANK LTD".to_owned(), 1),
            ]
        );
    }

    #[test]
    fn summary_breaks_count_ties_by_bank_name() {
        let conn = get_test_connection();
        let today = date!(2025 - 10 - 05);
        insert("1", "SADBL", today, &conn);
        insert("2", "PCBL", today, &conn);
        insert("3", "CIT", today, &conn);

        let summary = get_summary(5, &conn).unwrap();

        let got: Vec<(String, u32)> = summary
            .per_bank_counts
            .into_iter()
            .map(|count| (count.bank.to_string(), count.count))
            .collect();
        assert_eq!(
            got,
            [
                ("CITIZEN INVESTMENT TRUST".to_owned(), 1),
                ("PRIME COMMERCIAL BANK LTD".to_owned(), 1),
                ("SHANGRILA DEVELOPMENT BANK LTD".to_owned(), 1),
            ]
        );
    }

    #[test]
    fn summary_recent_is_ordered_by_date_then_id() {
        let conn = get_test_connection();
        let older = insert("1", "PCBL", date!(2025 - 01 - 01), &conn);
        let first_today = insert("2", "PCBL", date!(2025 - 10 - 05), &conn);
        let second_today = insert("3", "PCBL", date!(2025 - 10 - 05), &conn);
        let middle = insert("4", "PCBL", date!(2025 - 05 - 01), &conn);

        let summary = get_summary(3, &conn).unwrap();

        let got: Vec<i64> = summary.recent.iter().map(|record| record.id).collect();
        assert_eq!(got, [second_today, first_today, middle]);
        assert!(!got.contains(&older));
    }
}
