//! Opening and initializing the application's SQLite database.

use std::path::Path;

use rusqlite::{Connection, Transaction as SqlTransaction};

use crate::{Error, record::create_record_table};

/// Create the tables and indexes if they do not exist yet.
///
/// # Errors
/// Returns an [Error::SqlError] if there is an SQL error.
pub fn initialize(connection: &Connection) -> Result<(), Error> {
    let transaction =
        SqlTransaction::new_unchecked(connection, rusqlite::TransactionBehavior::Exclusive)?;

    create_record_table(&transaction)?;

    transaction.commit()?;

    Ok(())
}

/// Open the database at `db_path`, creating and initializing it if needed.
///
/// # Errors
/// Returns an [Error::SqlError] if the file cannot be opened or initialized.
pub fn open(db_path: &Path) -> Result<Connection, Error> {
    let connection = Connection::open(db_path)?;
    initialize(&connection)?;

    Ok(connection)
}
