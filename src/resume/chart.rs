//! The pie chart of a month's expenses per category.
//!
//! The chart is generated as an ECharts configuration and rendered in the
//! browser.

use charming::{
    Chart,
    element::{Color, JsFunction, Label, Tooltip, Trigger},
    series::Pie,
};
use maud::{Markup, PreEscaped, html};

use crate::{format::format_percent, html::HeadElement, summary::CategoryTotal};

/// The ID of the HTML element the chart is drawn in.
pub(super) const CHART_ID: &str = "expenses-chart";

pub(super) const ECHARTS_URL: &str = "https://cdn.jsdelivr.net/npm/echarts@6.0.0/dist/echarts.min.js";

fn currency_formatter() -> JsFunction {
    JsFunction::new_with_args(
        "number",
        "const currencyFormatter = new Intl.NumberFormat('pt-BR', {
              style: 'currency',
              currency: 'BRL'
            });
            return currencyFormatter.format(number);",
    )
}

/// Label each slice with its category's share of the month, in slice order.
///
/// The shares are computed on the server because the month total also counts
/// expenses that have no slice.
fn percent_formatter(totals: &[CategoryTotal]) -> JsFunction {
    let labels: Vec<String> = totals
        .iter()
        .map(|total| format_percent(total.percent))
        .collect();
    let labels = serde_json::to_string(&labels).unwrap_or_else(|_| "[]".to_owned());

    JsFunction::new_with_args("params", &format!("return {labels}[params.dataIndex];"))
}

/// Slices are sized by total, labelled with the rounded percent and coloured
/// with the category colour.
pub(super) fn expenses_chart(totals: &[CategoryTotal]) -> Chart {
    let colors: Vec<Color> = totals
        .iter()
        .map(|total| Color::from(total.category.color))
        .collect();
    let data: Vec<(f64, &str)> = totals
        .iter()
        .map(|total| (total.total, total.category.name))
        .collect();

    Chart::new()
        .color(colors)
        .tooltip(
            Tooltip::new()
                .trigger(Trigger::Item)
                .value_formatter(currency_formatter()),
        )
        .series(
            Pie::new()
                .name("Saídas")
                .radius(vec!["40%", "75%"])
                .label(Label::new().show(true).formatter(percent_formatter(totals)))
                .data(data),
        )
}

pub(super) fn chart_view() -> Markup {
    html! {
        div id=(CHART_ID) class="w-full min-h-[320px]" {}
    }
}

/// The script that draws `chart` once the page has loaded.
pub(super) fn chart_script(chart: &Chart) -> HeadElement {
    let script = format!(
        r#"document.addEventListener('DOMContentLoaded', function() {{
            const chart = echarts.init(document.getElementById("{CHART_ID}"));
            chart.setOption({options});
            window.addEventListener('resize', chart.resize);
        }});"#,
        options = chart
    );

    HeadElement::ScriptSource(PreEscaped(script))
}

#[cfg(test)]
mod tests {
    use time::macros::{date, datetime, offset};

    use crate::{
        category::get_category,
        summary::{CategoryTotal, expenses_by_category},
        transaction::{Transaction, TransactionType},
    };

    use super::expenses_chart;

    #[test]
    fn slices_follow_category_totals() {
        let totals = [
            CategoryTotal {
                category: get_category("food").unwrap(),
                total: 75.0,
                percent: 75.0,
            },
            CategoryTotal {
                category: get_category("car").unwrap(),
                total: 25.0,
                percent: 25.0,
            },
        ];

        let options = expenses_chart(&totals).to_string();

        for want in ["#FF872C", "#E83F5B", "Alimentação", "Carro", r#"["75%","25%"]"#] {
            assert!(options.contains(want), "chart options should contain {want:?}");
        }
        let food = options.find("#FF872C").unwrap();
        let car = options.find("#E83F5B").unwrap();
        assert!(food < car, "colours should be in category order");
    }

    #[test]
    fn slice_labels_include_expenses_without_a_slice() {
        let transactions = [
            Transaction::new("Mercado", 50.0, TransactionType::Expense, "food")
                .date(datetime!(2022-04-07 12:00 UTC)),
            Transaction::new("Aluguel", 50.0, TransactionType::Expense, "home")
                .date(datetime!(2022-04-10 12:00 UTC)),
        ];
        let totals = expenses_by_category(&transactions, date!(2022-04-01), offset!(UTC));

        let options = expenses_chart(&totals).to_string();

        assert!(
            options.contains(r#"["50%"]"#),
            "the food slice should be labelled with its share of the whole month"
        );
        assert!(!options.contains("params.percent"));
    }
}
