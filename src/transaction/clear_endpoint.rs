//! Defines the endpoint for deleting all of a user's transactions.

use std::sync::{Arc, Mutex};

use axum::{
    Extension,
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
use rusqlite::Connection;

use crate::{AppState, Error, UserID, alert::Alert, transaction::clear_transactions};

/// The state needed to clear a user's transactions.
#[derive(Debug, Clone)]
pub struct ClearTransactionsState {
    /// The database connection for managing transactions.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for ClearTransactionsState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// A route handler for deleting every transaction of the signed in user.
///
/// Responds with an alert describing the outcome.
pub async fn clear_transactions_endpoint(
    State(state): State<ClearTransactionsState>,
    Extension(user_id): Extension<UserID>,
) -> Response {
    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_alert_response();
        }
    };

    match clear_transactions(user_id, &connection) {
        Ok(()) => {
            tracing::info!("Cleared the transactions of user {user_id}");

            Alert::Success {
                message: "Transações apagadas".to_owned(),
                details: "Todas as suas transações foram removidas.".to_owned(),
            }
            .into_response()
        }
        Err(error) => {
            tracing::error!("could not clear transactions for user {user_id}: {error}");
            error.into_alert_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use axum::{Extension, extract::State, http::StatusCode};
    use rusqlite::Connection;

    use crate::{
        UserID,
        db::initialize,
        test_utils::parse_html_fragment,
        transaction::{Transaction, TransactionType, append_transaction, get_transactions},
    };

    use super::{ClearTransactionsState, clear_transactions_endpoint};

    #[tokio::test]
    async fn clears_only_the_current_users_transactions() {
        let connection = Connection::open_in_memory().unwrap();
        initialize(&connection).unwrap();
        for user_id in [UserID::new(1), UserID::new(2)] {
            append_transaction(
                user_id,
                Transaction::new("Pizza", 59.9, TransactionType::Expense, "food"),
                &connection,
            )
            .unwrap();
        }
        let state = ClearTransactionsState {
            db_connection: Arc::new(Mutex::new(connection)),
        };

        let response =
            clear_transactions_endpoint(State(state.clone()), Extension(UserID::new(1))).await;

        assert_eq!(response.status(), StatusCode::OK);
        let text = parse_html_fragment(response)
            .await
            .root_element()
            .text()
            .collect::<String>();
        assert!(text.contains("Transações apagadas"), "got {text:?}");

        let connection = state.db_connection.lock().unwrap();
        assert_eq!(get_transactions(UserID::new(1), &connection), Ok(vec![]));
        assert_eq!(get_transactions(UserID::new(2), &connection).unwrap().len(), 1);
    }
}
