//! The registration page and the handler that creates new users.
use std::{
    str::FromStr,
    sync::{Arc, Mutex},
};

use axum::{
    Form,
    extract::{FromRef, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_extra::extract::{PrivateCookieJar, cookie::Key};
use axum_htmx::HxRedirect;
use email_address::EmailAddress;
use maud::{Markup, html};
use rusqlite::Connection;
use serde::{Deserialize, Serialize};
use time::Duration;

use crate::{
    AppState, Error, PasswordHash, ValidatedPassword,
    app_state::create_cookie_key,
    auth::{DEFAULT_COOKIE_DURATION, create_user, set_auth_cookie},
    endpoints,
    html::{
        BUTTON_PRIMARY_STYLE, FORM_ERROR_STYLE, FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE, LINK_STYLE,
        base, labelled_input, loading_spinner, log_in_register, password_input,
    },
    internal_server_error::get_internal_server_error_redirect,
};

/// Client-side minimum length, zxcvbn does the real check on the server.
const PASSWORD_INPUT_MIN_LENGTH: u8 = 8;

pub const NAME_REQUIRED_MSG: &str = "Nome é obrigatório";
pub const INVALID_EMAIL_MSG: &str = "Informe um e-mail válido";
pub const DUPLICATE_EMAIL_MSG: &str = "Este e-mail já está cadastrado";
pub const PASSWORD_MISMATCH_MSG: &str = "As senhas não coincidem";

/// The messages shown under each field of the registration form.
#[derive(Debug, Default)]
struct RegistrationErrors {
    name: Option<&'static str>,
    email: Option<&'static str>,
    password: Option<String>,
    confirm_password: Option<&'static str>,
}

impl RegistrationErrors {
    fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.email.is_none()
            && self.password.is_none()
            && self.confirm_password.is_none()
    }
}

fn confirm_password_input(min_length: u8, error_message: Option<&str>) -> Markup {
    html! {
        div
        {
            label for="confirm-password" class=(FORM_LABEL_STYLE) { "Confirme a senha" }

            input
                type="password"
                name="confirm_password"
                id="confirm-password"
                placeholder="••••••••"
                class=(FORM_TEXT_INPUT_STYLE)
                required
                minlength=(min_length)
                autofocus[error_message.is_some()];

            @if let Some(error_message) = error_message
            {
                p class=(FORM_ERROR_STYLE) { (error_message) }
            }
        }
    }
}

fn registration_form(form: &RegisterForm, errors: &RegistrationErrors) -> Markup {
    html! {
        form
            hx-post=(endpoints::USERS)
            hx-indicator="#indicator"
            hx-disabled-elt="#submit-button"
            class="space-y-4 md:space-y-6"
        {
            (labelled_input("name", "text", "Nome", &form.name, errors.name))
            (labelled_input("email", "email", "E-mail", &form.email, errors.email))
            (password_input(&form.password, PASSWORD_INPUT_MIN_LENGTH, errors.password.as_deref()))
            (confirm_password_input(PASSWORD_INPUT_MIN_LENGTH, errors.confirm_password))

            button type="submit" id="submit-button" tabindex="0" class=(BUTTON_PRIMARY_STYLE)
            {
                span class="inline htmx-indicator" id="indicator"
                {
                    (loading_spinner())
                }
                "Criar conta"
            }

            p class="text-sm font-light text-gray-500 dark:text-gray-400"
            {
                "Já tem uma conta? "
                a href=(endpoints::LOG_IN_VIEW) tabindex="0" class=(LINK_STYLE)
                {
                    "Entrar"
                }
            }
        }
    }
}

/// Display the registration page.
pub async fn get_register_page() -> Response {
    let registration_form = registration_form(&RegisterForm::default(), &Default::default());
    let content = log_in_register("Crie sua conta", &registration_form);
    base("Cadastro", &[], &content).into_response()
}

/// The state needed for creating a new user.
#[derive(Debug, Clone)]
pub struct RegistrationState {
    /// The key to be used for signing and encrypting private cookies.
    pub cookie_key: Key,
    /// The duration for which cookies used for authentication are valid.
    pub cookie_duration: Duration,
    pub db_connection: Arc<Mutex<Connection>>,
}

impl RegistrationState {
    /// Create the cookie key from a string and set the default cookie duration.
    pub fn new(cookie_secret: &str, db_connection: Arc<Mutex<Connection>>) -> Self {
        Self {
            cookie_key: create_cookie_key(cookie_secret),
            cookie_duration: DEFAULT_COOKIE_DURATION,
            db_connection,
        }
    }
}

impl FromRef<AppState> for RegistrationState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            cookie_key: state.cookie_key.clone(),
            cookie_duration: state.cookie_duration,
            db_connection: state.db_connection.clone(),
        }
    }
}

// this impl tells `PrivateCookieJar` how to access the key from our state
impl FromRef<RegistrationState> for Key {
    fn from_ref(state: &RegistrationState) -> Self {
        state.cookie_key.clone()
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct RegisterForm {
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

/// Check every field so the user sees all the problems at once.
fn validate(form: &RegisterForm) -> Result<(EmailAddress, ValidatedPassword), RegistrationErrors> {
    let mut errors = RegistrationErrors::default();

    if form.name.trim().is_empty() {
        errors.name = Some(NAME_REQUIRED_MSG);
    }

    let email = EmailAddress::from_str(form.email.trim())
        .inspect_err(|_| errors.email = Some(INVALID_EMAIL_MSG))
        .ok();

    let user_inputs = [form.name.as_str(), form.email.as_str()];
    let password = match ValidatedPassword::new(&form.password, &user_inputs) {
        Ok(password) => Some(password),
        Err(Error::TooWeak(feedback)) => {
            errors.password = Some(format!("Senha muito fraca. {feedback}"));
            None
        }
        Err(error) => {
            tracing::error!("Unexpected error while validating a password: {error}");
            errors.password = Some("Senha inválida.".to_owned());
            None
        }
    };

    if form.password != form.confirm_password {
        errors.confirm_password = Some(PASSWORD_MISMATCH_MSG);
    }

    match (email, password) {
        (Some(email), Some(password)) if errors.is_empty() => Ok((email, password)),
        _ => Err(errors),
    }
}

/// Handler for registration requests via the POST method.
///
/// A new user is logged in straight away and sent to the dashboard.
/// Invalid input re-renders the form with a message under each offending field.
pub async fn register_user(
    State(state): State<RegistrationState>,
    jar: PrivateCookieJar,
    Form(form): Form<RegisterForm>,
) -> Response {
    let (email, validated_password) = match validate(&form) {
        Ok(validated) => validated,
        Err(errors) => return registration_form(&form, &errors).into_response(),
    };

    let password_hash = match PasswordHash::new(validated_password, PasswordHash::DEFAULT_COST) {
        Ok(hash) => hash,
        Err(error) => {
            tracing::error!("an error occurred while hashing a password: {error}");
            return get_internal_server_error_redirect();
        }
    };

    let user = {
        let Ok(connection) = state
            .db_connection
            .lock()
            .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        else {
            return get_internal_server_error_redirect();
        };

        create_user(&form.name, email, password_hash, &connection)
    };

    let user = match user {
        Ok(user) => user,
        Err(Error::DuplicateEmail) => {
            let errors = RegistrationErrors {
                email: Some(DUPLICATE_EMAIL_MSG),
                ..Default::default()
            };
            return registration_form(&form, &errors).into_response();
        }
        Err(error) => {
            tracing::error!("An unhandled error occurred while inserting a new user: {error}");
            return get_internal_server_error_redirect();
        }
    };

    match set_auth_cookie(jar, user.id, state.cookie_duration) {
        Ok(jar) => {
            tracing::info!("Registered user {}", user.id);
            (
                StatusCode::SEE_OTHER,
                HxRedirect(endpoints::DASHBOARD_VIEW.to_owned()),
                jar,
            )
                .into_response()
        }
        Err(error) => {
            tracing::error!("An error occurred while setting the auth cookie: {error}");
            get_internal_server_error_redirect()
        }
    }
}


#[cfg(test)]
mod register_user_tests {
    use std::{
        str::FromStr,
        sync::{Arc, Mutex},
    };

    use axum::{Form, Router, body::Body, extract::State, http::Response, routing::post};
    use axum_extra::extract::PrivateCookieJar;
    use axum_test::TestServer;
    use email_address::EmailAddress;
    use rusqlite::Connection;
    use scraper::Selector;

    use crate::{
        PasswordHash, ValidatedPassword,
        auth::{COOKIE_TOKEN, create_user, create_user_table, get_user_by_email},
        endpoints,
        test_utils::{assert_hx_redirect, assert_status_ok, parse_html_fragment},
    };

    use super::{
        DUPLICATE_EMAIL_MSG, INVALID_EMAIL_MSG, NAME_REQUIRED_MSG, PASSWORD_MISMATCH_MSG,
        RegisterForm, RegistrationState, register_user,
    };

    const STRONG_PASSWORD: &str = "iamtestingwhethericancreateanewuser";

    fn get_test_state() -> RegistrationState {
        let connection =
            Connection::open_in_memory().expect("Could not open in-memory SQLite database");
        create_user_table(&connection).expect("Could not create user table");

        RegistrationState::new("42", Arc::new(Mutex::new(connection)))
    }

    fn register_form(name: &str, email: &str, password: &str, confirm: &str) -> RegisterForm {
        RegisterForm {
            name: name.to_owned(),
            email: email.to_owned(),
            password: password.to_owned(),
            confirm_password: confirm.to_owned(),
        }
    }

    fn valid_form() -> RegisterForm {
        register_form(
            "Rodrigo",
            "rodrigo@example.com",
            STRONG_PASSWORD,
            STRONG_PASSWORD,
        )
    }

    async fn new_register_request(state: RegistrationState, form: RegisterForm) -> Response<Body> {
        let jar = PrivateCookieJar::new(state.cookie_key.clone());
        register_user(State(state), jar, Form(form)).await
    }

    async fn error_messages(response: Response<Body>) -> Vec<String> {
        let fragment = parse_html_fragment(response).await;
        fragment
            .select(&Selector::parse("p.text-red-500").unwrap())
            .map(|p| p.text().collect::<String>())
            .collect()
    }

    #[tokio::test]
    async fn register_creates_user_and_logs_in() {
        let app = Router::new()
            .route(endpoints::USERS, post(register_user))
            .with_state(get_test_state());
        let server = TestServer::try_new(app).expect("Could not create test server.");

        let response = server.post(endpoints::USERS).form(&valid_form()).await;

        response.assert_status_see_other();
        assert_eq!(response.header("hx-redirect"), endpoints::DASHBOARD_VIEW);
        assert!(!response.cookie(COOKIE_TOKEN).value().is_empty());
    }

    #[tokio::test]
    async fn register_stores_trimmed_name_and_email() {
        let state = get_test_state();
        let form = RegisterForm {
            name: "  Rodrigo ".to_owned(),
            email: " rodrigo@example.com ".to_owned(),
            ..valid_form()
        };

        let response = new_register_request(state.clone(), form).await;

        assert_hx_redirect(&response, endpoints::DASHBOARD_VIEW);
        let user = get_user_by_email(
            &EmailAddress::from_str("rodrigo@example.com").unwrap(),
            &state.db_connection.lock().unwrap(),
        )
        .expect("user should have been created");
        assert_eq!(user.name, "Rodrigo");
    }

    #[tokio::test]
    async fn register_fails_with_duplicate_email() {
        let state = get_test_state();
        create_user(
            "Outra pessoa",
            EmailAddress::from_str("rodrigo@example.com").unwrap(),
            PasswordHash::new(ValidatedPassword::new_unchecked("foobarbazqux"), 4).unwrap(),
            &state.db_connection.lock().unwrap(),
        )
        .expect("Could not create test user");

        let response = new_register_request(state, valid_form()).await;

        assert_status_ok(&response);
        assert_eq!(error_messages(response).await, [DUPLICATE_EMAIL_MSG]);
    }

    #[tokio::test]
    async fn register_fails_with_empty_name() {
        let form = RegisterForm {
            name: "   ".to_owned(),
            ..valid_form()
        };

        let response = new_register_request(get_test_state(), form).await;

        assert_status_ok(&response);
        assert_eq!(error_messages(response).await, [NAME_REQUIRED_MSG]);
    }

    #[tokio::test]
    async fn register_fails_with_invalid_email() {
        let form = RegisterForm {
            email: "rodrigo".to_owned(),
            ..valid_form()
        };

        let response = new_register_request(get_test_state(), form).await;

        assert_status_ok(&response);
        assert_eq!(error_messages(response).await, [INVALID_EMAIL_MSG]);
    }

    #[tokio::test]
    async fn register_fails_with_weak_password() {
        let form = register_form("Rodrigo", "rodrigo@example.com", "foo", "foo");

        let response = new_register_request(get_test_state(), form).await;

        assert_status_ok(&response);
        let messages = error_messages(response).await;
        assert_eq!(messages.len(), 1, "got {messages:?}");
        assert!(
            messages[0].starts_with("Senha muito fraca."),
            "got {:?}",
            messages[0]
        );
    }

    #[tokio::test]
    async fn register_fails_when_passwords_do_not_match() {
        let form = RegisterForm {
            confirm_password: "thisisadifferentpassword".to_owned(),
            ..valid_form()
        };

        let response = new_register_request(get_test_state(), form).await;

        assert_status_ok(&response);
        assert_eq!(error_messages(response).await, [PASSWORD_MISMATCH_MSG]);
    }

    #[tokio::test]
    async fn register_reports_every_invalid_field() {
        let form = register_form("", "not an email", STRONG_PASSWORD, "different");

        let response = new_register_request(get_test_state(), form).await;

        assert_eq!(
            error_messages(response).await,
            [NAME_REQUIRED_MSG, INVALID_EMAIL_MSG, PASSWORD_MISMATCH_MSG]
        );
    }
}
