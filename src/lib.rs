//! Refbook keeps track of transaction reference numbers.
//!
//! Reference numbers are normalized to the `RK0000453` format, bank short
//! codes are expanded to the full bank name and the records are stored in a
//! local SQLite database. The [shell::Shell] offers an interactive menu for
//! adding, editing, searching, reporting on and exporting records.

#![warn(missing_docs)]

pub mod bank;
pub mod config;
pub mod db;
mod error;
pub mod export;
pub mod logging;
pub mod record;
pub mod reference;
pub mod shell;
pub mod store;
pub mod timezone;
pub mod validation;

pub use config::Config;
pub use error::Error;
pub use record::{Record, RecordFields, RecordId};
pub use store::RecordStore;
