//! Filtered views over the record table.
//!
//! Every query returns records sorted by reference code, then by ID.

use rusqlite::{Connection, Params};
use time::Date;

use crate::{
    Error,
    bank::{BankDirectory, BankFilter},
    validation::parse_date,
};

use super::core::{RECORD_COLUMNS, Record, map_record_row};

/// Escape the `LIKE` wildcards in `text` and wrap it in `%` so that it
/// matches anywhere in a column. Use with `ESCAPE '\'`.
fn contains_pattern(text: &str) -> String {
    let mut pattern = String::with_capacity(text.len() + 2);
    pattern.push('%');

    for c in text.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }

    pattern.push('%');
    pattern
}

fn query_records<P: Params>(
    where_clause: &str,
    params: P,
    connection: &Connection,
) -> Result<Vec<Record>, Error> {
    let query = format!(
        "SELECT {RECORD_COLUMNS} FROM transactions WHERE {where_clause} \
        ORDER BY ref_number ASC, id ASC"
    );

    connection
        .prepare(&query)?
        .query_map(params, map_record_row)?
        .map(|maybe_record| maybe_record.map_err(|error| error.into()))
        .collect()
}

/// Get the records whose reference code contains `text`, ignoring case.
pub fn filter_by_reference_substring(
    text: &str,
    connection: &Connection,
) -> Result<Vec<Record>, Error> {
    tracing::debug!("filtering records by reference containing {text:?}");

    query_records(
        "ref_number LIKE ?1 ESCAPE '\\'",
        [contains_pattern(text.trim())],
        connection,
    )
}

/// Get the records matching a bank filter.
///
/// [BankFilter::ExactMatch] compares the stored name for equality while
/// [BankFilter::SubstringMatch] looks for the text anywhere in the stored
/// name, ignoring case.
pub fn filter_by_bank_filter(
    filter: &BankFilter,
    connection: &Connection,
) -> Result<Vec<Record>, Error> {
    tracing::debug!("filtering records by {filter:?}");

    match filter {
        BankFilter::ExactMatch(name) => query_records("bank_name = ?1", [name], connection),
        BankFilter::SubstringMatch(text) => query_records(
            "bank_name LIKE ?1 ESCAPE '\\'",
            [contains_pattern(text)],
            connection,
        ),
    }
}

/// Get the records for a bank code or (part of) a bank name.
///
/// A known short code matches its canonical name exactly, anything else is
/// matched as a substring of the stored bank names.
pub fn filter_by_bank(input: &str, connection: &Connection) -> Result<Vec<Record>, Error> {
    filter_by_bank_filter(&BankDirectory::bank_filter(input), connection)
}

/// Get the records dated on `date`.
pub fn filter_by_date(date: Date, connection: &Connection) -> Result<Vec<Record>, Error> {
    tracing::debug!("filtering records by date {date}");

    query_records("date = ?1", [date], connection)
}

/// Validate `raw` as a date no later than `today`, then get the records dated
/// on it.
///
/// # Errors
///
/// Returns [Error::InvalidDate] before touching the database if the date is
/// invalid or in the future.
pub fn filter_by_raw_date(
    raw: &str,
    today: Date,
    connection: &Connection,
) -> Result<Vec<Record>, Error> {
    let date = parse_date(raw, today)?;
    filter_by_date(date, connection)
}

/// Get the records dated between `start` and `end`, inclusive.
///
/// A reversed range, i.e. `start` after `end`, matches nothing.
pub fn filter_by_date_range(
    start: Date,
    end: Date,
    connection: &Connection,
) -> Result<Vec<Record>, Error> {
    tracing::debug!("filtering records between {start} and {end}");

    query_records("date BETWEEN ?1 AND ?2", [start, end], connection)
}

/// Validate both bounds as dates no later than `today`, then get the records
/// in the inclusive range.
///
/// # Errors
///
/// Returns [Error::InvalidDate] for the first invalid bound.
pub fn filter_by_raw_date_range(
    raw_start: &str,
    raw_end: &str,
    today: Date,
    connection: &Connection,
) -> Result<Vec<Record>, Error> {
    let start = parse_date(raw_start, today)?;
    let end = parse_date(raw_end, today)?;

    filter_by_date_range(start, end, connection)
}

#[cfg(test)]
mod tests {
    use rusqlite::Connection;
    use time::{Date, macros::date};

    use crate::{
        Error,
        bank::{BankDirectory, BankFilter, BankName},
        db::initialize,
        record::{RecordFields, create_record},
        reference::normalize,
    };

    use super::{
        contains_pattern, filter_by_bank, filter_by_bank_filter, filter_by_date_range,
        filter_by_raw_date, filter_by_raw_date_range, filter_by_reference_substring,
    };

    const TODAY: Date = date!(2025 - 10 - 05);

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

    fn references(records: Vec<crate::record::Record>) -> Vec<String> {
        records
            .into_iter()
            .map(|record| record.reference.to_string())
            .collect()
    }

    #[test]
    fn contains_pattern_escapes_wildcards() {
        assert_eq!(contains_pattern("a%b_c\\"), "%a\\%b\\_c\\\\%");
    }

    #[test]
    fn filter_by_reference_substring_ignores_case_and_sorts() {
        let conn = get_test_connection();
        insert("4530", "PCBL", TODAY, &conn);
        insert("453", "PCBL", TODAY, &conn);
        insert("12", "PCBL", TODAY, &conn);

        let by_digits = filter_by_reference_substring("45", &conn).unwrap();
        let by_prefix = filter_by_reference_substring("rk000001", &conn).unwrap();

        assert_eq!(references(by_digits), ["RK0000453", "RK0004530"]);
        assert_eq!(references(by_prefix), ["RK0000012"]);
    }

    #[test]
    fn filter_by_reference_substring_treats_wildcards_literally() {
        let conn = get_test_connection();
        insert("453", "PCBL", TODAY, &conn);

        let got = filter_by_reference_substring("%", &conn).unwrap();

        assert!(got.is_empty());
    }

    #[test]
    fn filter_by_bank_code_and_partial_name() {
        let conn = get_test_connection();
        let id = insert("453", "PCBL", TODAY, &conn);
        insert("454", "GBBL", TODAY, &conn);

        let by_code = filter_by_bank("PCBL", &conn).unwrap();
        let by_name = filter_by_bank("prime", &conn).unwrap();

        assert_eq!(by_code.len(), 1);
        assert_eq!(by_code[0].id, id);
        assert_eq!(by_name, by_code);
    }

    #[test]
    fn filter_by_bank_code_is_exact() {
        let conn = get_test_connection();
        insert("1", "CIT", TODAY, &conn);
        insert("2", "NIMB", TODAY, &conn);

        // "INVESTMENT" appears in two names, a code picks exactly one of them.
        let by_code = filter_by_bank("nimb", &conn).unwrap();
        let by_text = filter_by_bank("investment", &conn).unwrap();

        assert_eq!(references(by_code), ["RK0000002"]);
        assert_eq!(references(by_text), ["RK0000001", "RK0000002"]);
    }

    #[test]
    fn filter_by_exact_bank_name_ignores_substrings() {
        let conn = get_test_connection();
        insert("1", "PCBL", TODAY, &conn);

        let got = filter_by_bank_filter(
            &BankFilter::ExactMatch(BankName::new_unchecked("PRIME")),
            &conn,
        )
        .unwrap();

        assert!(got.is_empty());
    }

    #[test]
    fn filter_by_raw_date_matches_exact_date() {
        let conn = get_test_connection();
        insert("1", "EPF", date!(2025 - 10 - 01), &conn);
        insert("2", "EPF", date!(2025 - 10 - 02), &conn);

        let got = filter_by_raw_date("2025-10-01", TODAY, &conn).unwrap();

        assert_eq!(references(got), ["RK0000001"]);
    }

    #[test]
    fn filter_by_raw_date_rejects_future_date() {
        let conn = get_test_connection();

        let got = filter_by_raw_date("2999-01-01", TODAY, &conn);

        assert_eq!(got, Err(Error::InvalidDate("2999-01-01".to_owned())));
    }

    #[test]
    fn filter_by_date_range_is_inclusive() {
        let conn = get_test_connection();
        insert("1", "EPF", date!(2025 - 09 - 30), &conn);
        insert("2", "EPF", date!(2025 - 10 - 01), &conn);
        insert("3", "EPF", date!(2025 - 10 - 03), &conn);
        insert("4", "EPF", date!(2025 - 10 - 04), &conn);

        let got =
            filter_by_date_range(date!(2025 - 10 - 01), date!(2025 - 10 - 03), &conn).unwrap();

        assert_eq!(references(got), ["RK0000002", "RK0000003"]);
    }

    #[test]
    fn filter_by_date_range_reversed_is_empty() {
        let conn = get_test_connection();
        insert("1", "EPF", date!(2025 - 10 - 02), &conn);

        let got =
            filter_by_date_range(date!(2025 - 10 - 03), date!(2025 - 10 - 01), &conn).unwrap();

        assert!(got.is_empty());
    }

    #[test]
    fn filter_by_raw_date_range_validates_both_bounds() {
        let conn = get_test_connection();

        assert!(matches!(
            filter_by_raw_date_range("2025-13-01", "2025-10-01", TODAY, &conn),
            Err(Error::InvalidDate(_))
        ));
        assert!(matches!(
            filter_by_raw_date_range("2025-10-01", "2025-10-06", TODAY, &conn),
            Err(Error::InvalidDate(_))
        ));
    }
}
