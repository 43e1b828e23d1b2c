//! Command line configuration for the `refbook` binary.

use std::path::PathBuf;

use clap::Parser;

use crate::{Error, record::DEFAULT_RECENT_LIMIT, validation::sanitize_db_name};

/// Keep track of transaction reference numbers from the terminal.
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None)]
pub struct Config {
    /// File name of the SQLite database, e.g. `transactions.db`.
    ///
    /// Only letters, digits, '_', '-' and '.' are allowed.
    #[arg(long, default_value = "transactions.db")]
    pub db_name: String,

    /// Directory that holds the database.
    #[arg(long, default_value = ".")]
    pub data_dir: PathBuf,

    /// Canonical timezone used to work out today's date, e.g. "Asia/Kathmandu".
    ///
    /// Defaults to the system's local timezone.
    #[arg(long)]
    pub timezone: Option<String>,

    /// File to append the application log to.
    #[arg(long, default_value = "refbook.log")]
    pub log_path: PathBuf,

    /// The number of recent records shown in the summary report.
    #[arg(long, default_value_t = DEFAULT_RECENT_LIMIT)]
    pub recent: u32,
}

impl Config {
    /// The full path of the database file.
    ///
    /// # Errors
    ///
    /// Returns [Error::InvalidDatabaseName] if the database name is not a
    /// plain `.db` file name.
    pub fn db_path(&self) -> Result<PathBuf, Error> {
        let db_name = sanitize_db_name(&self.db_name)?;

        Ok(self.data_dir.join(db_name))
    }
}
