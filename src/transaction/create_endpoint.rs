//! Defines the endpoint for registering a new transaction.
use std::sync::{Arc, Mutex};

use axum::{
    Extension,
    extract::{FromRef, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
// Must use axum_extra's Form since that parses an empty string as None instead
// of crashing like axum::Form.
use axum_extra::extract::Form;
use axum_htmx::HxRedirect;
use rusqlite::Connection;
use serde::Deserialize;

use crate::{
    AppState, Error, UserID,
    category::get_category,
    endpoints,
    transaction::{
        Transaction, TransactionType, append_transaction,
        form::{
            NAME_REQUIRED_MSG, TransactionFormErrors, TransactionFormValues, parse_amount,
            transaction_form,
        },
    },
};

/// The state needed to register a transaction.
#[derive(Debug, Clone)]
pub struct CreateTransactionState {
    /// The database connection for managing transactions.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for CreateTransactionState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// The form data for registering a transaction.
///
/// The amount is kept as text so that a non-numeric value can be reported
/// next to the field instead of rejecting the whole request.
#[derive(Debug, Deserialize)]
pub struct TransactionForm {
    /// Text describing the transaction.
    pub name: String,
    /// The value of the transaction as typed by the user.
    pub amount: String,
    /// Income or expense, unset if neither button was chosen.
    #[serde(rename = "type", default)]
    pub transaction_type: Option<TransactionType>,
    /// The category key, unset if the placeholder option was left selected.
    #[serde(default)]
    pub category: Option<String>,
}

/// A route handler for registering a new transaction, redirects to the dashboard on success.
///
/// Problems with the name or amount re-render the form with inline messages,
/// a missing type or category is reported with an alert.
pub async fn create_transaction_endpoint(
    State(state): State<CreateTransactionState>,
    Extension(user_id): Extension<UserID>,
    Form(form): Form<TransactionForm>,
) -> Response {
    let name = form.name.trim();
    let name_error = name.is_empty().then_some(NAME_REQUIRED_MSG);

    let amount = match parse_amount(&form.amount) {
        Ok(amount) if name_error.is_none() => amount,
        amount => {
            let values = TransactionFormValues {
                name: &form.name,
                amount: &form.amount,
                transaction_type: form.transaction_type,
                category: form.category.as_deref(),
            };
            let errors = TransactionFormErrors {
                name: name_error,
                amount: amount.err(),
            };

            return transaction_form(&values, &errors).into_response();
        }
    };

    let Some(transaction_type) = form.transaction_type else {
        return Error::MissingTransactionType.into_alert_response();
    };

    let Some(category_key) = form.category.filter(|key| !key.is_empty()) else {
        return Error::MissingCategory.into_alert_response();
    };

    let Some(category) = get_category(&category_key) else {
        tracing::warn!("Tried to register a transaction with unknown category {category_key}");
        return Error::InvalidCategory(category_key).into_alert_response();
    };

    let transaction = Transaction::new(name, amount, transaction_type, category.key);

    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::SaveTransactionError.into_alert_response();
        }
    };

    if let Err(error) = append_transaction(user_id, transaction, &connection) {
        tracing::error!("could not save transaction for user {user_id}: {error}");

        return Error::SaveTransactionError.into_alert_response();
    }

    (
        HxRedirect(endpoints::DASHBOARD_VIEW.to_owned()),
        StatusCode::SEE_OTHER,
    )
        .into_response()
}
