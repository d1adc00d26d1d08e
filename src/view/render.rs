//! Page rendering
//!
//! Projects a [`ViewState`] to HTML. Controls are plain links and a GET
//! form, so every interaction is a request whose query string carries the
//! actions to replay (see `api::routes::page`).

use super::state::{ActiveChart, ViewState};
use crate::filter::{canonical_amount, Filter};
use crate::source::LoadStatus;

/// Everything the page needs besides the view state
pub struct PageModel<'a> {
    pub state: &'a ViewState,
    pub status: LoadStatus,
    /// Message shown above the table, e.g. a chart lookup miss
    pub notice: Option<String>,
    pub chart_script_url: &'a str,
}

/// Render the full page
pub fn render_page(model: &PageModel<'_>) -> String {
    let state = model.state;

    let notice = model
        .notice
        .as_deref()
        .map(|n| {
            format!(
                r#"<div class="alert alert-warning w-75" role="alert">{}</div>"#,
                escape_html(n)
            )
        })
        .unwrap_or_default();

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="utf-8">
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <title>Customer Transactions</title>
</head>
<body class="bg-dark">
<section id="main-section" class="table py-5 m-0 bg-dark">
    <div class="gradient-custom-2 h-100 d-flex flex-column align-items-center">
        {search}
        <div class="d-flex my-5 px-3">
            <a class="btn btn-primary me-3" href="{all_chart_href}">All Customers Chart</a>
            <a class="btn btn-danger" href="/">Clear Inputs</a>
        </div>
        {notice}
        <div class="table-responsive w-75">
            <table class="table table-dark table-bordered table-hover table-striped mb-0">
                <thead class="text-center">
                    <tr>
                        <th scope="col">#</th>
                        <th scope="col">Name</th>
                        <th scope="col">Transaction</th>
                        <th scope="col">Date</th>
                        <th scope="col">View Chart</th>
                    </tr>
                </thead>
                <tbody class="text-center">
{rows}
                </tbody>
            </table>
        </div>
    </div>
    {chart}
</section>
</body>
</html>
"#,
        search = render_search(state),
        all_chart_href = page_href(state.filter(), Some("all")),
        notice = notice,
        rows = render_rows(state, model.status),
        chart = render_chart(state, model.chart_script_url),
    )
}

fn render_search(state: &ViewState) -> String {
    let active = match state.filter() {
        Filter::AmountPrefix(_) => "amount",
        _ => "name",
    };
    let autofocus = |field: &str| if state.filter().is_all() || field != active { "" } else { " autofocus" };

    format!(
        r#"<form id="search" class="w-75 d-flex flex-column align-items-center" method="get" action="/">
            <input type="hidden" id="searchBy" name="by" value="{active}">
            <input class="form-control shadow rounded-pill py-2" id="searchByName" name="name" type="text"
                placeholder="Search by name" autocomplete="off" value="{name}"{name_focus}
                onfocus="this.setSelectionRange(this.value.length, this.value.length)" onkeyup="search('name')">
            <input class="form-control mt-4 shadow rounded-pill py-2" id="searchByTransaction" name="amount" type="text"
                placeholder="Search by transaction" autocomplete="off" value="{amount}"{amount_focus}
                onfocus="this.setSelectionRange(this.value.length, this.value.length)" onkeyup="search('amount')">
        </form>
        <script>
            function search(by) {{
                var other = by === 'name' ? 'searchByTransaction' : 'searchByName';
                document.getElementById('searchBy').value = by;
                document.getElementById(other).value = '';
                document.getElementById('search').submit();
            }}
        </script>"#,
        active = active,
        name = escape_html(state.name_query()),
        amount = escape_html(state.amount_query()),
        name_focus = autofocus("name"),
        amount_focus = autofocus("amount"),
    )
}

fn render_rows(state: &ViewState, status: LoadStatus) -> String {
    let rows: Vec<String> = state
        .filtered()
        .iter()
        .flat_map(|customer| {
            let id = escape_html(customer.id().as_str());
            let name = escape_html(customer.name());
            let chart_href = page_href(state.filter(), Some(customer.id().as_str()));

            customer.transactions.iter().map(move |transaction| {
                format!(
                    r#"                    <tr>
                        <th scope="row">{}</th>
                        <td>{}</td>
                        <td>{}</td>
                        <td>{}</td>
                        <td><a class="btn btn-primary" href="{}">chart</a></td>
                    </tr>"#,
                    id,
                    name,
                    canonical_amount(transaction.amount),
                    escape_html(&transaction.date),
                    chart_href,
                )
            })
        })
        .collect();

    if !rows.is_empty() {
        return rows.join("\n");
    }

    let message = match status {
        LoadStatus::Pending => "Loading…",
        LoadStatus::Failed => "No data",
        LoadStatus::Ready if state.dataset().is_empty() => "No data",
        LoadStatus::Ready => "No matching transactions",
    };
    format!(
        r#"                    <tr><td colspan="5" class="text-muted">{}</td></tr>"#,
        message
    )
}

fn render_chart(state: &ViewState, chart_script_url: &str) -> String {
    let chart = state.active_chart();
    let Some(series) = chart.series() else {
        return String::new();
    };

    let heading = if matches!(chart, ActiveChart::All { .. }) {
        r#"<h2 class="text-white bg-transparent mb-5">Showing All Customers Transactions</h2>"#
    } else {
        ""
    };

    // A series always serializes; fall back to an empty chart if it ever does not
    let data = serde_json::to_string(series).unwrap_or_else(|_| "{}".to_string());

    format!(
        r#"<div id="chartContainer" class="bg-dark overflow-hidden position-absolute top-50 start-50 py-4 translate-middle">
        <a class="fs-5 position-absolute top-0 end-0 btn text-white fw-bolder m-3" href="{close_href}">X</a>
        <div class="container d-flex justify-content-center align-items-center flex-column h-100 w-100 p-5 px-2">
            {heading}
            <canvas id="transactionChart"></canvas>
        </div>
    </div>
    <script id="chartData" type="application/json">{data}</script>
    <script src="{script}"></script>
    <script>
        new Chart(document.getElementById('transactionChart'), {{
            type: 'line',
            data: JSON.parse(document.getElementById('chartData').textContent)
        }});
    </script>"#,
        close_href = page_href(state.filter(), None),
        heading = heading,
        data = escape_script_json(&data),
        script = escape_html(chart_script_url),
    )
}

/// Link to the page with `filter` applied and, optionally, a chart open
pub fn page_href(filter: &Filter, chart: Option<&str>) -> String {
    let mut params = Vec::new();
    match filter {
        Filter::All => {}
        Filter::Name(query) => {
            params.push("by=name".to_string());
            params.push(format!("name={}", urlencoding::encode(query)));
        }
        Filter::AmountPrefix(query) => {
            params.push("by=amount".to_string());
            params.push(format!("amount={}", urlencoding::encode(query)));
        }
    }
    if let Some(chart) = chart {
        params.push(format!("chart={}", urlencoding::encode(chart)));
    }

    if params.is_empty() {
        "/".to_string()
    } else {
        // `&` is escaped for use inside an href attribute
        format!("/?{}", params.join("&amp;"))
    }
}

/// Escape text for HTML element content and quoted attributes
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

/// Make serialized JSON safe inside a `<script>` element
///
/// `<` only occurs inside JSON strings, where `<` is equivalent.
fn escape_script_json(json: &str) -> String {
    json.replace('<', "\\u003c")
}
