//! The handler for the monthly resume page.

use std::sync::{Arc, Mutex};

use axum::{
    Extension,
    extract::{FromRef, Query, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use rusqlite::Connection;
use serde::Deserialize;
use time::{Date, Duration, Month, OffsetDateTime};

use crate::{
    AppState, Error, UserID, endpoints,
    format::{format_currency, format_month_year, format_percent},
    html::{HeadElement, base, feather_icon, link, page_header},
    navigation::NavBar,
    resume::chart::{ECHARTS_URL, chart_script, chart_view, expenses_chart},
    summary::{CategoryTotal, expenses_by_category},
    timezone::require_local_offset,
    transaction::get_transactions,
};

/// The state needed for displaying the resume page.
#[derive(Debug, Clone)]
pub struct ResumeState {
    /// The database connection for reading transactions.
    pub db_connection: Arc<Mutex<Connection>>,
    /// The local timezone as a canonical timezone name, e.g. "America/Sao_Paulo".
    pub local_timezone: String,
}

impl FromRef<AppState> for ResumeState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
            local_timezone: state.local_timezone.clone(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct MonthQuery {
    /// The month to show as `YYYY-MM`, defaults to the current month.
    pub month: Option<String>,
}

fn first_of_month(date: Date) -> Date {
    date - Duration::days(i64::from(date.day()) - 1)
}

/// Parse a `YYYY-MM` month into the first day of that month.
fn parse_month(raw_month: &str) -> Result<Date, Error> {
    let invalid_month = || Error::InvalidMonth(raw_month.to_owned());

    let (year, month) = raw_month.split_once('-').ok_or_else(invalid_month)?;
    if year.len() != 4 || month.len() != 2 {
        return Err(invalid_month());
    }

    let year: i32 = year.parse().map_err(|_| invalid_month())?;
    let month: u8 = month.parse().map_err(|_| invalid_month())?;
    let month = Month::try_from(month).map_err(|_| invalid_month())?;

    Date::from_calendar_date(year, month, 1).map_err(|_| invalid_month())
}

fn month_query_url(month: Date) -> String {
    format!(
        "{}?month={:04}-{:02}",
        endpoints::RESUME_VIEW,
        month.year(),
        u8::from(month.month())
    )
}

fn previous_month(month: Date) -> Option<Date> {
    month.previous_day().map(first_of_month)
}

fn next_month(month: Date) -> Option<Date> {
    // Every month has at most 31 days, so this lands early in the next month.
    month.checked_add(Duration::days(31)).map(first_of_month)
}

/// Display the expenses of a month per category as a pie chart and a list of cards.
pub async fn get_resume_page(
    State(state): State<ResumeState>,
    Extension(user_id): Extension<UserID>,
    Query(query): Query<MonthQuery>,
) -> Result<Response, Error> {
    let local_offset = require_local_offset(&state.local_timezone)?;

    let month = match query.month.as_deref() {
        Some(raw_month) => parse_month(raw_month)?,
        None => first_of_month(OffsetDateTime::now_utc().to_offset(local_offset).date()),
    };

    let transactions = {
        let connection = state
            .db_connection
            .lock()
            .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
            .map_err(|_| Error::DatabaseLockError)?;

        get_transactions(user_id, &connection)?
    };

    let totals = expenses_by_category(&transactions, month, local_offset);

    Ok(resume_view(month, &totals).into_response())
}

fn month_selector(month: Date) -> Markup {
    let arrow = |target: Option<Date>, icon: &str, label: &str| {
        html! {
            @if let Some(target) = target {
                a href=(month_query_url(target)) aria-label=(label) class="p-2 hover:text-orange-500"
                {
                    (feather_icon(icon, "w-6 h-6 stroke-current fill-none"))
                }
            } @else {
                span class="p-2 w-10" {}
            }
        }
    };

    html! {
        div id="month-selector" class="w-full max-w-md flex items-center justify-between mt-6 px-6"
        {
            (arrow(previous_month(month), "chevron-left", "Mês anterior"))
            h2 class="text-xl" { (format_month_year(month)) }
            (arrow(next_month(month), "chevron-right", "Próximo mês"))
        }
    }
}

fn category_card(total: &CategoryTotal) -> Markup {
    html! {
        li
            class="bg-white dark:bg-gray-800 rounded-md px-6 py-4 flex justify-between border-l-4"
            style=(format!("border-left-color: {}", total.category.color))
            data-category=(total.category.key)
        {
            span data-name { (total.category.name) }
            span
            {
                span class="font-bold" data-total { (format_currency(total.total)) }
                span class="ml-2 text-sm text-gray-500 dark:text-gray-400" data-percent { (format_percent(total.percent)) }
            }
        }
    }
}

fn resume_view(month: Date, totals: &[CategoryTotal]) -> Markup {
    let nav_bar = NavBar::new(endpoints::RESUME_VIEW).into_html();

    let content = html! {
        (nav_bar)
        (page_header("Resumo por categoria"))

        div class="flex flex-col items-center mx-auto max-w-screen-xl text-gray-900 dark:text-white mb-24"
        {
            (month_selector(month))

            @if totals.is_empty() {
                p class="mt-8 text-gray-500 dark:text-gray-400"
                {
                    "Nenhuma saída registrada neste mês. "
                    (link(endpoints::NEW_TRANSACTION_VIEW, "Cadastrar transação"))
                }
            } @else {
                (chart_view())

                ul id="category-totals" class="w-full max-w-md flex flex-col gap-2 px-6"
                {
                    @for total in totals {
                        (category_card(total))
                    }
                }
            }
        }
    };

    if totals.is_empty() {
        return base("Resumo", &[], &content);
    }

    let head_elements = [
        HeadElement::ScriptLink(ECHARTS_URL.to_owned()),
        chart_script(&expenses_chart(totals)),
    ];

    base("Resumo", &head_elements, &content)
}
