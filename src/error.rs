//! Defines the app level error type and conversions to rendered HTML pages and alerts.
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::{
    alert::Alert, html::error_view, internal_server_error::InternalServerError,
    not_found::NotFoundError,
};

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// The user provided an invalid combination of email and password.
    #[error("invalid email or password")]
    InvalidCredentials,

    /// The auth token cookie is missing from the cookie jar in the request.
    #[error("no cookies in the cookie jar :(")]
    CookieMissing,

    /// The auth token in the cookie jar has expired.
    #[error("the auth token expired at {0}")]
    TokenExpired(String),

    /// The user provided a password that is too easy to guess.
    #[error("password is too weak: {0}")]
    TooWeak(String),

    /// An unexpected error occurred with the underlying hashing library.
    ///
    /// The error string should only be logged for debugging on the server.
    /// When communicating with the application client this error should be
    /// replaced with a general error type indicating an internal server error.
    #[error("hashing failed: {0}")]
    HashingError(String),

    /// The string is not a valid email address.
    #[error("\"{0}\" is not a valid email address")]
    InvalidEmail(String),

    /// The email address is already registered to another user.
    #[error("the email address is already in use")]
    DuplicateEmail,

    /// An empty string was used for a user's display name.
    #[error("the user's name cannot be empty")]
    EmptyUserName,

    /// The transaction form was submitted without choosing income or expense.
    #[error("no transaction type was selected")]
    MissingTransactionType,

    /// The transaction form was submitted without choosing a category.
    #[error("no category was selected")]
    MissingCategory,

    /// The category key does not match any entry in the category table.
    #[error("\"{0}\" is not a known category")]
    InvalidCategory(String),

    /// The month query parameter could not be parsed as `YYYY-MM`.
    #[error("\"{0}\" is not a valid month")]
    InvalidMonth(String),

    /// The value stored for a user's transactions is not a JSON list of transactions.
    ///
    /// Holds the storage key of the offending value.
    #[error("the transactions stored under \"{0}\" could not be parsed")]
    CorruptTransactions(String),

    /// A new transaction could not be written to storage.
    #[error("could not save the transaction")]
    SaveTransactionError,

    /// The requested resource was not found.
    ///
    /// For HTTP request handlers, the client should check that the parameters
    /// (e.g., ID) are correct and that the resource has been created.
    ///
    /// Internally, this error may occur when a query returns no rows.
    #[error("the requested resource could not be found")]
    NotFound,

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),

    /// An error occurred while getting the local timezone from a canonical timezone string.
    #[error("invalid timezone {0}")]
    InvalidTimezoneError(String),

    /// An error occurred while serializing a struct as JSON
    #[error("could not serialize as JSON: {0}")]
    JSONSerializationError(String),

    /// Could not acquire the database lock
    #[error("could not acquire the database lock")]
    DatabaseLockError,
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            // Code 2067 occurs when a UNIQUE constraint failed.
            rusqlite::Error::SqliteFailure(sql_error, Some(ref desc))
                if sql_error.extended_code == 2067 && desc.ends_with("user.email") =>
            {
                Error::DuplicateEmail
            }
            rusqlite::Error::QueryReturnedNoRows => Error::NotFound,
            error => {
                tracing::error!("an unhandled SQL error occurred: {}", error);
                Error::SqlError(error)
            }
        }
    }
}

fn invalid_timezone_fix(timezone: &str) -> String {
    format!(
        "Não foi possível obter o fuso horário \"{timezone}\". Verifique as configurações do \
        servidor e use um nome de fuso horário canônico, por exemplo \"America/Sao_Paulo\"."
    )
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Error::NotFound => NotFoundError.into_response(),
            Error::InvalidMonth(month) => (
                StatusCode::BAD_REQUEST,
                error_view(
                    "Mês inválido",
                    "400",
                    "Mês inválido",
                    &format!("\"{month}\" não é um mês válido. Use o formato AAAA-MM, por exemplo 2022-04."),
                ),
            )
                .into_response(),
            Error::InvalidTimezoneError(timezone) => InternalServerError {
                description: "Fuso horário inválido",
                fix: &invalid_timezone_fix(&timezone),
            }
            .into_response(),
            Error::CorruptTransactions(key) => {
                tracing::error!("Could not parse the transactions stored under {key}");
                InternalServerError {
                    description: "Não foi possível carregar as transações",
                    fix: "Os dados salvos estão corrompidos. Verifique os logs do servidor.",
                }
                .into_response()
            }
            Error::DatabaseLockError => InternalServerError::default().into_response(),
            // Any errors that are not handled above are not intended to be shown to the client.
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                InternalServerError::default().into_response()
            }
        }
    }
}

impl Error {
    /// Convert the error into an HTTP response with an HTML alert.
    pub fn into_alert_response(self) -> Response {
        let (status_code, alert) = match self {
            Error::MissingTransactionType => (
                StatusCode::BAD_REQUEST,
                Alert::Error {
                    message: "Selecione o tipo da transação".to_owned(),
                    details: "Escolha entre entrada (Income) e saída (Outcome).".to_owned(),
                },
            ),
            Error::MissingCategory => (
                StatusCode::BAD_REQUEST,
                Alert::Error {
                    message: "Selecione a categoria".to_owned(),
                    details: String::new(),
                },
            ),
            Error::InvalidCategory(key) => (
                StatusCode::BAD_REQUEST,
                Alert::Error {
                    message: "Categoria inválida".to_owned(),
                    details: format!("A categoria \"{key}\" não existe."),
                },
            ),
            Error::EmptyUserName => (
                StatusCode::BAD_REQUEST,
                Alert::Error {
                    message: "Nome é obrigatório".to_owned(),
                    details: "Informe um nome para ser exibido na listagem.".to_owned(),
                },
            ),
            Error::SaveTransactionError => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Alert::Error {
                    message: "Não foi possível salvar".to_owned(),
                    details: "Tente novamente mais tarde.".to_owned(),
                },
            ),
            Error::InvalidTimezoneError(timezone) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Alert::Error {
                    message: "Fuso horário inválido".to_owned(),
                    details: invalid_timezone_fix(&timezone),
                },
            ),
            _ => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Alert::Error {
                    message: "Algo deu errado".to_owned(),
                    details: "Ocorreu um erro inesperado, verifique os logs do servidor."
                        .to_owned(),
                },
            ),
        };

        (status_code, alert.into_html()).into_response()
    }
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use rusqlite::Connection;

    use crate::{
        Error,
        test_utils::{assert_valid_html, parse_html_fragment},
    };

    #[test]
    fn unique_email_violation_maps_to_duplicate_email() {
        let connection = Connection::open_in_memory().unwrap();
        connection
            .execute("CREATE TABLE user (email TEXT UNIQUE)", ())
            .unwrap();
        connection
            .execute("INSERT INTO user (email) VALUES ('a@b.com')", ())
            .unwrap();

        let error: Error = connection
            .execute("INSERT INTO user (email) VALUES ('a@b.com')", ())
            .unwrap_err()
            .into();

        assert_eq!(error, Error::DuplicateEmail);
    }

    #[test]
    fn no_rows_maps_to_not_found() {
        let error: Error = rusqlite::Error::QueryReturnedNoRows.into();

        assert_eq!(error, Error::NotFound);
    }

    #[tokio::test]
    async fn missing_category_alert_is_a_bad_request() {
        let response = Error::MissingCategory.into_alert_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let html = parse_html_fragment(response).await;
        assert_valid_html(&html);
        let text = html.root_element().text().collect::<String>();
        assert!(text.contains("Selecione a categoria"), "got {text:?}");
    }

    #[tokio::test]
    async fn save_error_alert_tells_user_it_could_not_save() {
        let response = Error::SaveTransactionError.into_alert_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let html = parse_html_fragment(response).await;
        let text = html.root_element().text().collect::<String>();
        assert!(text.contains("Não foi possível salvar"), "got {text:?}");
    }
}
