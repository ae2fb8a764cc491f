//! Sets up the tables the application needs in a SQLite database.

use rusqlite::{Connection, TransactionBehavior, Transaction};

use crate::{Error, auth::create_user_table, storage::create_storage_table};

/// Create the user and key-value storage tables.
///
/// Safe to call on a database that has already been initialized.
///
/// # Errors
/// Returns an [Error::SqlError] if a table could not be created.
pub fn initialize(connection: &Connection) -> Result<(), Error> {
    let transaction = Transaction::new_unchecked(connection, TransactionBehavior::Exclusive)?;

    create_user_table(&transaction)?;
    create_storage_table(&transaction)?;

    transaction.commit()?;

    Ok(())
}
