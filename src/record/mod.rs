//! Record management.
//!
//! This module contains everything related to records:
//! - The `Record` model and the `RecordFields` used to create and edit them
//! - Validation of raw user input into `RecordFields`
//! - Database functions for storing and retrieving records
//! - Filter queries and the summary report

mod core;
mod form;
mod query;
mod summary;

pub use self::core::{
    Record, RecordFields, RecordId, count_records, create_record_table, get_all_records,
    get_record, get_records_by_reference,
};
pub(crate) use self::core::{create_record, update_record};
pub use form::{
    DateInput, parse_reference_input, resolve_bank_input, validate_record_input,
};
pub use query::{
    filter_by_bank, filter_by_bank_filter, filter_by_date, filter_by_date_range,
    filter_by_raw_date, filter_by_raw_date_range, filter_by_reference_substring,
};
pub use summary::{BankCount, DEFAULT_RECENT_LIMIT, LATEST_RECORDS_LIMIT, Summary, get_summary};
