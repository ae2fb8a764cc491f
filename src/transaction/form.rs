//! The form for registering a new transaction and the parsing of its fields.

use maud::{Markup, html};

use crate::{
    category::CATEGORIES,
    endpoints,
    html::{
        BUTTON_PRIMARY_STYLE, FORM_ERROR_STYLE, FORM_LABEL_STYLE, FORM_RADIO_GROUP_STYLE,
        FORM_RADIO_INPUT_STYLE, FORM_RADIO_LABEL_STYLE, FORM_TEXT_INPUT_STYLE, feather_icon,
        loading_spinner,
    },
    transaction::TransactionType,
};

pub const NAME_REQUIRED_MSG: &str = "Nome é obrigatório";
pub const INVALID_AMOUNT_MSG: &str = "Informe um valor válido";
pub const NEGATIVE_AMOUNT_MSG: &str = "O valor não pode ser negativo";

/// The values to prefill the form with when it is re-rendered.
#[derive(Debug, Default)]
pub struct TransactionFormValues<'a> {
    pub name: &'a str,
    pub amount: &'a str,
    pub transaction_type: Option<TransactionType>,
    pub category: Option<&'a str>,
}

/// Inline messages for the text fields.
#[derive(Debug, Default, PartialEq)]
pub struct TransactionFormErrors {
    pub name: Option<&'static str>,
    pub amount: Option<&'static str>,
}

impl TransactionFormErrors {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.amount.is_none()
    }
}

/// Parse the amount typed by the user, accepting either '.' or ',' as the
/// decimal separator.
///
/// When a ',' is present, any '.' is read as pt-BR thousands grouping, so
/// "1.234,56" is 1234.56.
///
/// Returns the message to show under the field if the amount is not a
/// positive number.
pub fn parse_amount(raw_amount: &str) -> Result<f64, &'static str> {
    let raw_amount = raw_amount.trim();
    let normalized = if raw_amount.contains(',') {
        raw_amount.replace('.', "").replace(',', ".")
    } else {
        raw_amount.to_owned()
    };

    let amount = normalized
        .parse::<f64>()
        .ok()
        .filter(|amount| amount.is_finite())
        .ok_or(INVALID_AMOUNT_MSG)?;

    if amount <= 0.0 {
        return Err(NEGATIVE_AMOUNT_MSG);
    }

    Ok(amount)
}

fn type_button(
    transaction_type: TransactionType,
    selected: Option<TransactionType>,
    icon: &str,
    checked_style: &str,
) -> Markup {
    let id = format!("transaction-type-{}", transaction_type.as_str());

    html! {
        div class="flex flex-1"
        {
            input
                name="type"
                id=(id)
                type="radio"
                value=(transaction_type.as_str())
                checked[selected == Some(transaction_type)]
                tabindex="0"
                class=(FORM_RADIO_INPUT_STYLE);

            label
                for=(id)
                class={ (FORM_RADIO_LABEL_STYLE) " " (checked_style) }
            {
                (feather_icon(icon, "w-5 h-5"))
                (transaction_type.label())
            }
        }
    }
}

pub fn transaction_form(
    values: &TransactionFormValues<'_>,
    errors: &TransactionFormErrors,
) -> Markup {
    html! {
        form
            hx-post=(endpoints::TRANSACTIONS_API)
            hx-target="this"
            hx-swap="outerHTML"
            hx-target-error="#alert-container"
            hx-indicator="#indicator"
            hx-disabled-elt="#submit-button"
            class="w-full space-y-4 md:space-y-6"
        {
            div
            {
                label for="name" class=(FORM_LABEL_STYLE) { "Nome" }

                input
                    name="name"
                    id="name"
                    type="text"
                    placeholder="Nome"
                    required
                    value=(values.name)
                    autofocus[errors.name.is_some() || errors.is_empty()]
                    class=(FORM_TEXT_INPUT_STYLE);

                @if let Some(message) = errors.name {
                    p class=(FORM_ERROR_STYLE) { (message) }
                }
            }

            div
            {
                label for="amount" class=(FORM_LABEL_STYLE) { "Preço" }

                input
                    name="amount"
                    id="amount"
                    type="text"
                    inputmode="decimal"
                    placeholder="Preço"
                    required
                    value=(values.amount)
                    autofocus[errors.name.is_none() && errors.amount.is_some()]
                    class=(FORM_TEXT_INPUT_STYLE);

                @if let Some(message) = errors.amount {
                    p class=(FORM_ERROR_STYLE) { (message) }
                }
            }

            fieldset class="space-y-2"
            {
                legend class=(FORM_LABEL_STYLE) { "Tipo" }

                div class=(FORM_RADIO_GROUP_STYLE)
                {
                    (type_button(
                        TransactionType::Income,
                        values.transaction_type,
                        "arrow-up-circle",
                        "text-green-600 peer-checked:bg-green-100 peer-checked:border-transparent",
                    ))
                    (type_button(
                        TransactionType::Expense,
                        values.transaction_type,
                        "arrow-down-circle",
                        "text-red-600 peer-checked:bg-red-100 peer-checked:border-transparent",
                    ))
                }
            }

            div
            {
                label for="category" class=(FORM_LABEL_STYLE) { "Categoria" }

                select name="category" id="category" class=(FORM_TEXT_INPUT_STYLE)
                {
                    option value="" { "Categoria" }

                    @for category in &CATEGORIES {
                        option
                            value=(category.key)
                            selected[values.category == Some(category.key)]
                        {
                            (category.name)
                        }
                    }
                }
            }

            button type="submit" id="submit-button" tabindex="0" class=(BUTTON_PRIMARY_STYLE)
            {
                span id="indicator" class="inline htmx-indicator"
                {
                    (loading_spinner())
                }
                "Enviar"
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use scraper::{Html, Selector};

    use crate::transaction::TransactionType;

    use super::{
        INVALID_AMOUNT_MSG, NEGATIVE_AMOUNT_MSG, TransactionFormErrors, TransactionFormValues,
        parse_amount, transaction_form,
    };

    #[test]
    fn parses_amount_with_either_decimal_separator() {
        assert_eq!(parse_amount("12.5"), Ok(12.5));
        assert_eq!(parse_amount("12,5"), Ok(12.5));
        assert_eq!(parse_amount(" 1200 "), Ok(1200.0));
        assert_eq!(parse_amount("1.234,56"), Ok(1234.56));
        assert_eq!(parse_amount("1.000.000,00"), Ok(1_000_000.0));
    }

    #[test]
    fn rejects_non_numeric_amount() {
        assert_eq!(parse_amount(""), Err(INVALID_AMOUNT_MSG));
        assert_eq!(parse_amount("doze"), Err(INVALID_AMOUNT_MSG));
        assert_eq!(parse_amount("NaN"), Err(INVALID_AMOUNT_MSG));
        assert_eq!(parse_amount("inf"), Err(INVALID_AMOUNT_MSG));
    }

    #[test]
    fn rejects_amount_that_is_not_positive() {
        assert_eq!(parse_amount("-5"), Err(NEGATIVE_AMOUNT_MSG));
        assert_eq!(parse_amount("0"), Err(NEGATIVE_AMOUNT_MSG));
    }

    #[test]
    fn form_keeps_selected_type_and_category() {
        let markup = transaction_form(
            &TransactionFormValues {
                name: "Pizza",
                amount: "59,90",
                transaction_type: Some(TransactionType::Expense),
                category: Some("food"),
            },
            &TransactionFormErrors::default(),
        );
        let html = Html::parse_fragment(&markup.into_string());

        let checked = html
            .select(&Selector::parse("input[type=radio][checked]").unwrap())
            .map(|input| input.value().attr("value").unwrap())
            .collect::<Vec<_>>();
        assert_eq!(checked, ["down"]);

        let selected = html
            .select(&Selector::parse("option[selected]").unwrap())
            .map(|option| option.value().attr("value").unwrap())
            .collect::<Vec<_>>();
        assert_eq!(selected, ["food"]);
    }

    #[test]
    fn category_select_lists_placeholder_then_table() {
        let markup = transaction_form(
            &TransactionFormValues::default(),
            &TransactionFormErrors::default(),
        );
        let html = Html::parse_fragment(&markup.into_string());

        let options = html
            .select(&Selector::parse("select[name=category] option").unwrap())
            .map(|option| option.value().attr("value").unwrap())
            .collect::<Vec<_>>();

        assert_eq!(
            options,
            ["", "purchases", "food", "salary", "car", "leisure", "studies"]
        );
    }
}
