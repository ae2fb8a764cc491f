//! Defines the route handler for the page for registering a new transaction.

use axum::response::{IntoResponse, Response};
use maud::{Markup, html};

use crate::{
    endpoints,
    html::{FORM_CONTAINER_STYLE, base, page_header},
    navigation::NavBar,
    transaction::form::{TransactionFormErrors, TransactionFormValues, transaction_form},
};

fn create_transaction_view() -> Markup {
    let nav_bar = NavBar::new(endpoints::NEW_TRANSACTION_VIEW).into_html();
    let form = transaction_form(
        &TransactionFormValues::default(),
        &TransactionFormErrors::default(),
    );

    let content = html! {
        (nav_bar)
        (page_header("Cadastro"))

        div class=(FORM_CONTAINER_STYLE)
        {
            (form)
        }
    };

    base("Cadastro", &[], &content)
}

/// Renders the page for registering a transaction.
pub async fn get_create_transaction_page() -> Response {
    create_transaction_view().into_response()
}

#[cfg(test)]
mod tests {
    use scraper::Selector;

    use crate::{
        endpoints,
        test_utils::{
            assert_content_type, assert_form_input, assert_form_submit_button_with_text,
            assert_hx_endpoint, assert_status_ok, assert_valid_html, must_get_form,
            parse_html_document,
        },
    };

    use super::get_create_transaction_page;

    #[tokio::test]
    async fn new_transaction_page_returns_form() {
        let response = get_create_transaction_page().await;

        assert_status_ok(&response);
        assert_content_type(&response, "text/html; charset=utf-8");
        let document = parse_html_document(response).await;
        assert_valid_html(&document);

        let form = must_get_form(&document);
        assert_hx_endpoint(&form, endpoints::TRANSACTIONS_API, "hx-post");
        assert_form_input(&form, "name", "text");
        assert_form_input(&form, "amount", "text");
        assert_form_submit_button_with_text(&form, "Enviar");

        let radios = form
            .select(&Selector::parse("input[type=radio][name=type]").unwrap())
            .map(|input| input.value().attr("value").unwrap())
            .collect::<Vec<_>>();
        assert_eq!(radios, ["up", "down"]);

        let labels = form
            .select(&Selector::parse("fieldset label").unwrap())
            .map(|label| label.text().collect::<String>().trim().to_owned())
            .collect::<Vec<_>>();
        assert_eq!(labels, ["Income", "Outcome"]);
    }

    #[tokio::test]
    async fn nothing_is_preselected() {
        let document = parse_html_document(get_create_transaction_page().await).await;

        let checked = document
            .select(&Selector::parse("input[checked]").unwrap())
            .count();
        let selected = document
            .select(&Selector::parse("option[selected]").unwrap())
            .count();

        assert_eq!(checked, 0);
        assert_eq!(selected, 0);
    }
}
