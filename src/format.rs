//! Brazilian Portuguese formatting for money, dates and percentages.

use std::sync::OnceLock;

use numfmt::{Formatter, Precision};
use time::{Date, Month};

/// Format `amount` as Brazilian reais, e.g. "R$ 1.234,56" or "-R$ 50,00".
pub fn format_currency(amount: f64) -> String {
    static FORMATTER: OnceLock<Formatter> = OnceLock::new();
    const BILLION: f64 = 1e9;

    let formatter = FORMATTER.get_or_init(|| {
        Formatter::new()
            .separator(',')
            .unwrap()
            .precision(Precision::Decimals(2))
    });

    let cents = (amount.abs() * 100.0).round();
    let sign = if amount < 0.0 && cents > 0.0 { "-" } else { "" };
    let fraction = cents % 100.0;

    // numfmt switches to scientific notation past twelve integer digits, so
    // only the leading group of up to nine digits goes through it.
    let mut whole = ((cents - fraction) / 100.0).trunc();
    let mut billions = Vec::new();
    while whole >= BILLION {
        billions.push((whole % BILLION) as u32);
        whole = (whole / BILLION).trunc();
    }

    // Zero is hardcoded as "0" by numfmt.
    let mut digits = if whole == 0.0 {
        "0".to_owned()
    } else {
        let leading = formatter.fmt_string(whole);
        match leading.split_once('.') {
            Some((integer, _)) => integer.to_owned(),
            None => leading,
        }
    };

    for group in billions.iter().rev() {
        digits.push_str(&format!(
            ",{:03},{:03},{:03}",
            group / 1_000_000,
            group / 1_000 % 1_000,
            group % 1_000
        ));
    }
    digits.push_str(&format!(".{:02}", fraction as u8));

    // Swap to the pt-BR separators: '.' for thousands and ',' for decimals.
    let digits: String = digits
        .chars()
        .map(|c| match c {
            ',' => '.',
            '.' => ',',
            c => c,
        })
        .collect();

    format!("{sign}R$ {digits}")
}

/// Format a share of a total, already in percent, with no decimals, e.g. "42%".
///
/// Halves are rounded away from zero.
pub fn format_percent(percent: f64) -> String {
    format!("{:.0}%", percent.round())
}

/// The lower case Portuguese name of `month`.
pub fn month_name(month: Month) -> &'static str {
    match month {
        Month::January => "janeiro",
        Month::February => "fevereiro",
        Month::March => "março",
        Month::April => "abril",
        Month::May => "maio",
        Month::June => "junho",
        Month::July => "julho",
        Month::August => "agosto",
        Month::September => "setembro",
        Month::October => "outubro",
        Month::November => "novembro",
        Month::December => "dezembro",
    }
}

/// Format a date as "dd/MM/yy", e.g. "13/04/22".
pub fn format_short_date(date: Date) -> String {
    format!(
        "{:02}/{:02}/{:02}",
        date.day(),
        u8::from(date.month()),
        date.year().rem_euclid(100)
    )
}

/// Format a date as day and month, e.g. "13 de abril".
pub fn format_day_month(date: Date) -> String {
    format!("{:02} de {}", date.day(), month_name(date.month()))
}

/// Format the month of a date with its year, e.g. "abril, 2022".
pub fn format_month_year(date: Date) -> String {
    format!("{}, {}", month_name(date.month()), date.year())
}
