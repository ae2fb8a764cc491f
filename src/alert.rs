//! Alert messages shown to users after form submissions.
//!
//! Alerts are swapped into the `#alert-container` element of the base page
//! by htmx, either via `hx-target-error` or an out-of-band swap.

use axum::response::{IntoResponse, Response};
use maud::{Markup, html};

/// A dismissible success or error message.
#[derive(Debug, Clone, PartialEq)]
pub enum Alert {
    /// The operation completed.
    Success {
        /// The headline of the alert.
        message: String,
        /// Extra context, may be empty.
        details: String,
    },
    /// The operation failed.
    Error {
        /// The headline of the alert.
        message: String,
        /// Extra context, may be empty.
        details: String,
    },
}

impl Alert {
    /// Render the alert as an HTML fragment.
    pub fn into_html(self) -> Markup {
        let (message, details, container_style) = match self {
            Alert::Success { message, details } => (
                message,
                details,
                "flex items-start gap-3 p-4 mb-4 rounded-lg border text-green-800 \
                border-green-300 bg-green-50 dark:bg-gray-800 dark:text-green-400 \
                dark:border-green-800",
            ),
            Alert::Error { message, details } => (
                message,
                details,
                "flex items-start gap-3 p-4 mb-4 rounded-lg border text-red-800 \
                border-red-300 bg-red-50 dark:bg-gray-800 dark:text-red-400 \
                dark:border-red-800",
            ),
        };

        html! {
            div role="alert" class=(container_style)
            {
                div class="flex-1"
                {
                    p class="font-semibold" { (message) }

                    @if !details.is_empty() {
                        p class="text-sm" { (details) }
                    }
                }

                button
                    type="button"
                    aria-label="Fechar"
                    class="text-lg leading-none"
                    onclick="this.closest('[role=alert]').remove()"
                {
                    "×"
                }
            }
        }
    }
}

impl IntoResponse for Alert {
    fn into_response(self) -> Response {
        self.into_html().into_response()
    }
}

#[cfg(test)]
mod tests {
    use scraper::{Html, Selector};

    use super::Alert;

    #[test]
    fn error_alert_shows_message_and_details() {
        let markup = Alert::Error {
            message: "Não foi possível salvar".to_owned(),
            details: "Tente novamente".to_owned(),
        }
        .into_html()
        .into_string();

        let html = Html::parse_fragment(&markup);
        let paragraphs = html
            .select(&Selector::parse("p").unwrap())
            .map(|p| p.text().collect::<String>())
            .collect::<Vec<_>>();

        assert_eq!(paragraphs, ["Não foi possível salvar", "Tente novamente"]);
    }

    #[test]
    fn empty_details_are_omitted() {
        let markup = Alert::Success {
            message: "Salvo".to_owned(),
            details: String::new(),
        }
        .into_html()
        .into_string();

        let html = Html::parse_fragment(&markup);
        let count = html.select(&Selector::parse("p").unwrap()).count();

        assert_eq!(count, 1);
    }
}
