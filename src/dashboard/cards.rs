//! The highlight cards at the top of the dashboard.

use maud::{Markup, html};
use time::{OffsetDateTime, UtcOffset};

use crate::{
    format::{format_currency, format_day_month, month_name},
    html::feather_icon,
    summary::TransactionSummary,
};

const NO_TRANSACTIONS: &str = "Não há transações";

/// "Última entrada dia 13 de abril"
pub(super) fn last_entry_caption(date: Option<OffsetDateTime>, local_offset: UtcOffset) -> String {
    match date {
        Some(date) => format!(
            "Última entrada dia {}",
            format_day_month(date.to_offset(local_offset).date())
        ),
        None => NO_TRANSACTIONS.to_owned(),
    }
}

/// "Última saída dia 13 de abril"
pub(super) fn last_expense_caption(
    date: Option<OffsetDateTime>,
    local_offset: UtcOffset,
) -> String {
    match date {
        Some(date) => format!(
            "Última saída dia {}",
            format_day_month(date.to_offset(local_offset).date())
        ),
        None => NO_TRANSACTIONS.to_owned(),
    }
}

/// The interval from the start of the month up to the last expense,
/// e.g. "01 a 13 de abril".
pub(super) fn total_interval_caption(
    last_expense: Option<OffsetDateTime>,
    local_offset: UtcOffset,
) -> String {
    match last_expense {
        Some(date) => {
            let date = date.to_offset(local_offset).date();
            format!("01 a {:02} de {}", date.day(), month_name(date.month()))
        }
        None => NO_TRANSACTIONS.to_owned(),
    }
}

struct HighlightCard<'a> {
    title: &'a str,
    icon: &'a str,
    icon_class: &'a str,
    amount: f64,
    caption: String,
    highlighted: bool,
}

impl HighlightCard<'_> {
    fn into_html(self) -> Markup {
        let (card_class, caption_class) = if self.highlighted {
            ("bg-orange-500 text-white", "text-white/80")
        } else {
            (
                "bg-white dark:bg-gray-800 text-gray-900 dark:text-white",
                "text-gray-500 dark:text-gray-400",
            )
        };

        html! {
            div
                class=(format!("{card_class} rounded-lg shadow-md p-6 min-w-[260px] flex flex-col gap-6"))
                data-card=(self.title)
            {
                header class="flex items-center justify-between"
                {
                    span class="text-sm" { (self.title) }
                    (feather_icon(self.icon, self.icon_class))
                }

                footer
                {
                    p class="text-3xl font-medium" data-amount { (format_currency(self.amount)) }
                    p class=(format!("text-xs {caption_class}")) data-caption { (self.caption) }
                }
            }
        }
    }
}

/// The entries, expenses and total cards.
pub(super) fn highlight_cards(summary: &TransactionSummary, local_offset: UtcOffset) -> Markup {
    let cards = [
        HighlightCard {
            title: "Entradas",
            icon: "arrow-up-circle",
            icon_class: "w-10 h-10 stroke-green-600 fill-none",
            amount: summary.entries,
            caption: last_entry_caption(summary.last_entry, local_offset),
            highlighted: false,
        },
        HighlightCard {
            title: "Saídas",
            icon: "arrow-down-circle",
            icon_class: "w-10 h-10 stroke-red-500 fill-none",
            amount: summary.expenses,
            caption: last_expense_caption(summary.last_expense, local_offset),
            highlighted: false,
        },
        HighlightCard {
            title: "Total",
            icon: "dollar-sign",
            icon_class: "w-10 h-10 stroke-white fill-none",
            amount: summary.total,
            caption: total_interval_caption(summary.last_expense, local_offset),
            highlighted: true,
        },
    ];

    html! {
        section
            id="highlight-cards"
            class="w-full flex gap-4 overflow-x-auto -mt-12 px-6 pb-2"
        {
            @for card in cards {
                (card.into_html())
            }
        }
    }
}
