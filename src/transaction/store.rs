//! Reads and writes each user's transaction list in the key-value store.

use rusqlite::Connection;

use crate::{
    Error, UserID,
    storage::{get_item, remove_item, set_item},
    transaction::Transaction,
};

/// The storage key holding the transactions of the user with `user_id`.
pub fn transactions_key(user_id: UserID) -> String {
    format!("@gofinances:transactions_user:{user_id}")
}

/// Get every transaction of the user in the order they were added.
///
/// A user that has not added any transactions yet has an empty list.
///
/// # Errors
///
/// Returns an [Error::CorruptTransactions] if the stored value is not a JSON
/// list of transactions, or an [Error::SqlError] if the store could not be read.
pub fn get_transactions(user_id: UserID, connection: &Connection) -> Result<Vec<Transaction>, Error> {
    let key = transactions_key(user_id);

    match get_item(&key, connection)? {
        Some(value) => parse_transactions(&key, &value),
        None => Ok(Vec::new()),
    }
}

fn parse_transactions(key: &str, value: &str) -> Result<Vec<Transaction>, Error> {
    serde_json::from_str::<Option<Vec<Transaction>>>(value)
        .map(Option::unwrap_or_default)
        .map_err(|error| {
            tracing::error!("could not parse transactions stored under {key}: {error}");
            Error::CorruptTransactions(key.to_owned())
        })
}

/// Add `transaction` to the end of the user's transaction list.
///
/// The list is read, extended and written back inside a single SQL transaction.
///
/// # Errors
///
/// Returns an error if the existing list cannot be read or parsed, or if the
/// updated list cannot be written.
pub fn append_transaction(
    user_id: UserID,
    transaction: Transaction,
    connection: &Connection,
) -> Result<(), Error> {
    let sql_transaction = connection.unchecked_transaction()?;

    let mut transactions = get_transactions(user_id, &sql_transaction)?;
    transactions.push(transaction);

    let value = serde_json::to_string(&transactions)
        .map_err(|error| Error::JSONSerializationError(error.to_string()))?;
    set_item(&transactions_key(user_id), &value, &sql_transaction)?;

    sql_transaction.commit()?;

    Ok(())
}

/// Delete every transaction of the user.
///
/// # Errors
///
/// Returns an [Error::SqlError] if the store could not be written.
pub fn clear_transactions(user_id: UserID, connection: &Connection) -> Result<(), Error> {
    remove_item(&transactions_key(user_id), connection)
}
