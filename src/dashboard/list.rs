//! The list of transactions on the dashboard.

use maud::{Markup, html};
use time::UtcOffset;

use crate::{
    category::get_category,
    endpoints,
    format::{format_currency, format_short_date},
    html::{feather_icon, link},
    transaction::{Transaction, TransactionType},
};

/// The amount as shown in the list, expenses are prefixed with "- ".
pub(super) fn display_amount(transaction: &Transaction) -> String {
    match transaction.transaction_type {
        TransactionType::Income => format_currency(transaction.amount),
        TransactionType::Expense => format!("- {}", format_currency(transaction.amount)),
    }
}

fn transaction_card(transaction: &Transaction, local_offset: UtcOffset) -> Markup {
    let amount_class = match transaction.transaction_type {
        TransactionType::Income => "text-green-600",
        TransactionType::Expense => "text-red-500",
    };
    let (category_name, category_icon) = match get_category(&transaction.category) {
        Some(category) => (category.name, category.icon),
        None => (transaction.category.as_str(), "help-circle"),
    };
    let date = transaction.date.to_offset(local_offset).date();

    html! {
        li
            class="bg-white dark:bg-gray-800 rounded-lg shadow-sm px-6 py-4 flex flex-col gap-2"
            data-transaction-id=(transaction.id.to_string())
        {
            span class="text-sm" data-name { (transaction.name) }
            span class=(format!("text-xl {amount_class}")) data-amount
            {
                (display_amount(transaction))
            }

            div class="flex justify-between text-sm text-gray-500 dark:text-gray-400 mt-2"
            {
                span class="flex items-center gap-2" data-category
                {
                    (feather_icon(category_icon, "w-4 h-4 stroke-current fill-none"))
                    (category_name)
                }
                span data-date { (format_short_date(date)) }
            }
        }
    }
}

/// Every transaction in the order it was added, or a prompt to add one.
pub(super) fn transaction_list(transactions: &[Transaction], local_offset: UtcOffset) -> Markup {
    html! {
        section id="transactions" class="w-full max-w-screen-xl px-6 mt-8 mb-24"
        {
            h2 class="text-lg mb-4" { "Listagem" }

            @if transactions.is_empty() {
                p class="text-gray-500 dark:text-gray-400"
                {
                    "Nenhuma transação cadastrada ainda. "
                    (link(endpoints::NEW_TRANSACTION_VIEW, "Cadastre a primeira"))
                    "."
                }
            } @else {
                ul class="flex flex-col gap-4"
                {
                    @for transaction in transactions {
                        (transaction_card(transaction, local_offset))
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use time::macros::datetime;

    use crate::transaction::{Transaction, TransactionType};

    use super::display_amount;

    #[test]
    fn expense_amount_has_minus_prefix() {
        let expense = Transaction::new("Hamburgueria", 59.0, TransactionType::Expense, "food")
            .date(datetime!(2022-04-10 12:00 UTC));

        assert_eq!(display_amount(&expense), "- R$ 59,00");
    }

    #[test]
    fn income_amount_has_no_prefix() {
        let income = Transaction::new("Salário", 12000.0, TransactionType::Income, "salary");

        assert_eq!(display_amount(&income), "R$ 12.000,00");
    }
}
