//! Dashboard HTTP handler and view rendering.

use std::sync::{Arc, Mutex};

use axum::{
    Extension,
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use rusqlite::Connection;
use time::UtcOffset;

use crate::{
    AppState, Error, UserID,
    auth::get_user_by_id,
    dashboard::{cards::highlight_cards, list::transaction_list},
    endpoints,
    html::base,
    navigation::NavBar,
    summary::summarize,
    timezone::require_local_offset,
    transaction::{Transaction, get_transactions},
};

/// The state needed for displaying the dashboard page.
#[derive(Debug, Clone)]
pub struct DashboardState {
    /// The database connection for reading users and transactions.
    pub db_connection: Arc<Mutex<Connection>>,
    /// The local timezone as a canonical timezone name, e.g. "America/Sao_Paulo".
    pub local_timezone: String,
}

impl FromRef<AppState> for DashboardState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
            local_timezone: state.local_timezone.clone(),
        }
    }
}

/// Display the greeting, the highlight cards and the list of transactions.
///
/// The summary is recomputed from the full transaction list on every visit.
pub async fn get_dashboard_page(
    State(state): State<DashboardState>,
    Extension(user_id): Extension<UserID>,
) -> Result<Response, Error> {
    let local_offset = require_local_offset(&state.local_timezone)?;

    let (user, transactions) = {
        let connection = state
            .db_connection
            .lock()
            .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
            .map_err(|_| Error::DatabaseLockError)?;

        let user = get_user_by_id(user_id, &connection)
            .inspect_err(|error| tracing::error!("could not get user {user_id}: {error}"))?;
        let transactions = get_transactions(user_id, &connection)?;

        (user, transactions)
    };

    Ok(dashboard_view(&user.name, &transactions, local_offset).into_response())
}

fn dashboard_view(user_name: &str, transactions: &[Transaction], local_offset: UtcOffset) -> Markup {
    let nav_bar = NavBar::new(endpoints::DASHBOARD_VIEW).into_html();
    let summary = summarize(transactions);

    let content = html! {
        (nav_bar)

        header class="w-full bg-violet-800 text-white px-6 pt-8 pb-20"
        {
            div class="max-w-screen-xl mx-auto"
            {
                p class="text-lg" { "Olá," }
                h1 class="text-lg font-bold" { (user_name) }
            }
        }

        div class="flex flex-col items-center mx-auto max-w-screen-xl text-gray-900 dark:text-white"
        {
            (highlight_cards(&summary, local_offset))
            (transaction_list(transactions, local_offset))
        }
    };

    base("Listagem", &[], &content)
}
