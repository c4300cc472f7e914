//! HTML page assembly.
//!
//! Pages are small enough that a template engine would outweigh them; each
//! one is a `format!`-assembled string served via `axum::response::Html`.

use crate::config::CurrencyInfo;
use crate::core::convert::{ConversionResult, HOME_CURRENCY};
use crate::core::history::Period;
use crate::core::quote::{Quote, RateVariant};

const HOME_SYMBOL: &str = "R$";

/// Escapes user-supplied text for embedding in HTML.
pub fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Formats a monetary amount without trailing zero noise.
pub fn format_amount(value: f64) -> String {
    let fixed = format!("{value:.6}");
    fixed.trim_end_matches('0').trim_end_matches('.').to_string()
}

fn page(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>{title}</title>
<style>
  body {{ font-family: sans-serif; margin: 2rem auto; max-width: 960px; color: #222; }}
  nav a {{ margin-right: 1rem; }}
  form {{ margin: 1rem 0; }}
  select, input {{ margin-right: 1rem; padding: 0.25rem; }}
  button {{ padding: 0.25rem 1rem; }}
  .error {{ color: #b00020; }}
  .notice {{ color: #555; }}
  .result {{ font-size: 1.25rem; margin: 1rem 0; }}
  table {{ border-collapse: collapse; margin: 1rem 0; }}
  td, th {{ border: 1px solid #ccc; padding: 0.4rem 0.8rem; text-align: left; }}
</style>
</head>
<body>
<nav><a href="/">Rates</a><a href="/convert">Converter</a></nav>
{body}
</body>
</html>
"#
    )
}

fn currency_options(currencies: &[CurrencyInfo], include_home: bool) -> String {
    let mut options = String::new();
    if include_home {
        options.push_str(&format!(
            "<option value=\"{HOME_CURRENCY}\">Brazilian Real ({HOME_CURRENCY})</option>"
        ));
    }
    for currency in currencies {
        options.push_str(&format!(
            "<option value=\"{}\">{} ({})</option>",
            escape(&currency.code),
            escape(&currency.name),
            escape(&currency.code)
        ));
    }
    options
}

fn period_options() -> String {
    Period::ALL
        .iter()
        .map(|p| format!("<option value=\"{p}\">{}</option>", p.label()))
        .collect()
}

fn variant_options() -> String {
    RateVariant::ALL
        .iter()
        .map(|v| format!("<option value=\"{v}\">{}</option>", capitalize(&v.to_string())))
        .collect()
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

fn symbol_for<'a>(currencies: &'a [CurrencyInfo], code: &str) -> &'a str {
    if code == HOME_CURRENCY {
        return HOME_SYMBOL;
    }
    currencies
        .iter()
        .find(|c| c.code == code)
        .map(|c| c.symbol.as_str())
        .unwrap_or("")
}

pub fn index(currencies: &[CurrencyInfo], error: Option<&str>) -> String {
    let mut body = String::from("<h1>BRL Exchange Rates</h1>");
    if let Some(message) = error {
        body.push_str(&format!("<p class=\"error\">{}</p>", escape(message)));
    }
    body.push_str(&format!(
        r#"<form method="post" action="/rates">
<label for="currency">Currency</label>
<select id="currency" name="currency">{}</select>
<label for="period">Period</label>
<select id="period" name="period">{}</select>
<button type="submit">Show rates</button>
</form>"#,
        currency_options(currencies, false),
        period_options()
    ));
    page("BRL Exchange Rates", &body)
}

pub fn rates(
    currency: &CurrencyInfo,
    period: Period,
    quote: Option<&Quote>,
    chart_svg: Option<&str>,
) -> String {
    let mut body = format!(
        "<h1>{} ({}) - {}</h1>",
        escape(&currency.name),
        escape(&currency.code),
        period.label()
    );

    match quote {
        Some(quote) => {
            body.push_str(&format!(
                r#"<table>
<tr><th>Variant</th><th>Rate ({HOME_SYMBOL} per {})</th></tr>
<tr><td>Commercial</td><td>{:.4}</td></tr>
<tr><td>Tourism</td><td>{:.4}</td></tr>
<tr><td>Average</td><td>{:.4}</td></tr>
</table>"#,
                escape(&currency.code),
                quote.commercial,
                quote.tourism,
                quote.average
            ));
        }
        None => body.push_str("<p class=\"error\">Current rates are unavailable right now.</p>"),
    }

    match chart_svg {
        Some(svg) => body.push_str(svg),
        None => body.push_str("<p class=\"notice\">No history is available for this period.</p>"),
    }

    page(&format!("{} - BRL", currency.code), &body)
}

pub fn rates_unavailable(currency: &CurrencyInfo, period: Period) -> String {
    let body = format!(
        "<h1>{} ({}) - {}</h1>\
         <p class=\"error\">Exchange rates are unavailable right now. Try again in a moment.</p>",
        escape(&currency.name),
        escape(&currency.code),
        period.label()
    );
    page("Rates unavailable", &body)
}

pub fn converter(
    currencies: &[CurrencyInfo],
    error: Option<&str>,
    result: Option<&ConversionResult>,
) -> String {
    let mut body = String::from("<h1>Currency Converter</h1>");

    if let Some(message) = error {
        body.push_str(&format!("<p class=\"error\">{}</p>", escape(message)));
    }

    if let Some(result) = result {
        body.push_str(&format!(
            "<p class=\"result\">{} {} ({}) = {} {} ({}) <span class=\"notice\">at the {} rate</span></p>",
            symbol_for(currencies, &result.source),
            format_amount(result.amount_in),
            escape(&result.source),
            symbol_for(currencies, &result.target),
            format_amount(result.amount_out),
            escape(&result.target),
            result.variant
        ));
    }

    body.push_str(&format!(
        r#"<form method="post" action="/convert">
<label for="amount">Amount</label>
<input id="amount" name="amount" type="text" inputmode="decimal" placeholder="100.00">
<label for="source">From</label>
<select id="source" name="source">{}</select>
<label for="target">To</label>
<select id="target" name="target">{}</select>
<label for="variant">Rate</label>
<select id="variant" name="variant">{}</select>
<button type="submit">Convert</button>
</form>"#,
        currency_options(currencies, true),
        currency_options(currencies, true),
        variant_options()
    ));

    page("Currency Converter", &body)
}
