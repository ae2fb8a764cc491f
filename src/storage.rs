//! A string key-value store kept in a single SQLite table.
//!
//! Values are opaque strings; callers decide how to encode them. Transactions,
//! for example, are stored as one JSON array per user.

use rusqlite::{Connection, OptionalExtension};

use crate::Error;

/// Create the key-value storage table.
///
/// # Errors
///
/// This function will return an error if the SQL query failed.
pub fn create_storage_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS storage (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL
                )",
        (),
    )?;

    Ok(())
}

/// Get the value stored under `key`, or `None` if nothing has been stored yet.
///
/// # Errors
///
/// Returns a [Error::SqlError] if an SQL related error occurred.
pub fn get_item(key: &str, connection: &Connection) -> Result<Option<String>, Error> {
    connection
        .query_row(
            "SELECT value FROM storage WHERE key = :key",
            &[(":key", key)],
            |row| row.get(0),
        )
        .optional()
        .map_err(|error| error.into())
}

/// Store `value` under `key`, replacing any previous value.
///
/// # Errors
///
/// Returns a [Error::SqlError] if an SQL related error occurred.
pub fn set_item(key: &str, value: &str, connection: &Connection) -> Result<(), Error> {
    connection.execute(
        "INSERT INTO storage (key, value) VALUES (?1, ?2)
            ON CONFLICT(key) DO UPDATE SET value = excluded.value",
        (key, value),
    )?;

    Ok(())
}

/// Delete the value stored under `key`. Removing a missing key is not an error.
///
/// # Errors
///
/// Returns a [Error::SqlError] if an SQL related error occurred.
pub fn remove_item(key: &str, connection: &Connection) -> Result<(), Error> {
    connection.execute("DELETE FROM storage WHERE key = ?1", (key,))?;

    Ok(())
}
