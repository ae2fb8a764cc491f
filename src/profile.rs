//! The profile page, where users change their display name and can clear
//! their transactions.

use std::sync::{Arc, Mutex};

use axum::{
    Extension,
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
use axum_extra::extract::Form;
use maud::{Markup, html};
use rusqlite::Connection;
use serde::{Deserialize, Serialize};

use crate::{
    AppState, Error, User, UserID,
    alert::Alert,
    auth::{get_user_by_id, update_user_name},
    endpoints,
    html::{
        BUTTON_DELETE_STYLE, BUTTON_PRIMARY_STYLE, FORM_CONTAINER_STYLE, FORM_LABEL_STYLE, base,
        labelled_input, page_header,
    },
    navigation::NavBar,
};

/// The state needed for the profile page and its endpoint.
#[derive(Debug, Clone)]
pub struct ProfileState {
    /// The database connection for reading and updating users.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for ProfileState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

fn profile_view(user: &User) -> Markup {
    let nav_bar = NavBar::new(endpoints::PROFILE_VIEW).into_html();

    let content = html! {
        (nav_bar)
        (page_header("Perfil"))

        div class=(FORM_CONTAINER_STYLE)
        {
            div class="w-full mt-6"
            {
                span class=(FORM_LABEL_STYLE) { "E-mail" }
                p id="email" class="text-sm" { (user.email.as_str()) }
            }

            form
                hx-put=(endpoints::PROFILE_API)
                hx-target="#alert-container"
                hx-target-error="#alert-container"
                hx-swap="innerHTML"
                class="w-full space-y-4 mt-6"
            {
                (labelled_input("name", "text", "Nome", &user.name, None))

                button type="submit" class=(BUTTON_PRIMARY_STYLE) { "Salvar" }
            }

            div class="w-full mt-12"
            {
                button
                    type="button"
                    id="clear-transactions"
                    hx-delete=(endpoints::TRANSACTIONS_API)
                    hx-confirm="Apagar todas as suas transações? Esta ação não pode ser desfeita."
                    hx-target="#alert-container"
                    hx-target-error="#alert-container"
                    hx-swap="innerHTML"
                    class=(BUTTON_DELETE_STYLE)
                {
                    "Apagar todas as transações"
                }
            }
        }
    };

    base("Perfil", &[], &content)
}

/// Display the signed-in user's email and name.
pub async fn get_profile_page(
    State(state): State<ProfileState>,
    Extension(user_id): Extension<UserID>,
) -> Result<Response, Error> {
    let user = {
        let connection = state
            .db_connection
            .lock()
            .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
            .map_err(|_| Error::DatabaseLockError)?;

        get_user_by_id(user_id, &connection)
            .inspect_err(|error| tracing::error!("could not get user {user_id}: {error}"))?
    };

    Ok(profile_view(&user).into_response())
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ProfileForm {
    pub name: String,
}

/// Change the display name of the signed-in user.
///
/// Responds with an alert describing the outcome.
pub async fn update_profile_endpoint(
    State(state): State<ProfileState>,
    Extension(user_id): Extension<UserID>,
    Form(form): Form<ProfileForm>,
) -> Response {
    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_alert_response();
        }
    };

    match update_user_name(user_id, &form.name, &connection) {
        Ok(()) => {
            tracing::info!("User {user_id} changed their name");
            Alert::Success {
                message: "Perfil atualizado".to_owned(),
                details: format!("Você será chamado de {}.", form.name.trim()),
            }
            .into_response()
        }
        Err(error) => {
            tracing::debug!("could not update the name of user {user_id}: {error}");
            error.into_alert_response()
        }
    }
}
