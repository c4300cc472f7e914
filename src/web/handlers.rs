//! Request handlers for the HTML pages and the JSON API.
//!
//! Form and query values are parsed by hand so a bad select value renders a
//! readable message (or a machine-readable JSON error kind) instead of the
//! extractor's generic rejection.

use axum::Json;
use axum::extract::{Form, Path, Query, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::chart;
use crate::core::convert::{ConversionRequest, ConversionResult, HOME_CURRENCY, RateTable, convert};
use crate::core::error::RateError;
use crate::core::history::Period;
use crate::core::quote::RateVariant;
use crate::rates::{self, FetchFailure};
use crate::web::{AppState, pages};

pub async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub async fn index(State(state): State<Arc<AppState>>) -> Html<String> {
    Html(pages::index(&state.config.currencies, None))
}

#[derive(Debug, Deserialize)]
pub struct RatesForm {
    pub currency: String,
    pub period: String,
}

pub async fn rates_page(
    State(state): State<Arc<AppState>>,
    Form(form): Form<RatesForm>,
) -> Response {
    let code = form.currency.trim().to_uppercase();
    let Some(currency) = state.config.currency(&code).cloned() else {
        return bad_selection(&state);
    };
    let Ok(period) = form.period.parse::<Period>() else {
        return bad_selection(&state);
    };

    let provider = state.provider.as_ref();

    let quote = match rates::latest_quote(provider, &code).await {
        Ok(quote) => Some(quote),
        Err(e) => {
            warn!("Latest quote failed for {code}: {e:#}");
            None
        }
    };

    let chart_svg = match rates::period_history(provider, &code, period).await {
        Ok(series) if series.len() >= 2 => {
            let title = format!("{} - {}", currency.name, period.label());
            match chart::render_history_svg(&series, &title) {
                Ok(svg) => Some(svg),
                Err(e) => {
                    warn!("Chart rendering failed for {code}: {e:#}");
                    None
                }
            }
        }
        Ok(series) => {
            debug!("History for {code} too thin to chart: {} points", series.len());
            None
        }
        Err(e) => {
            warn!("History fetch failed for {code}: {e:#}");
            None
        }
    };

    if quote.is_none() && chart_svg.is_none() {
        return (
            StatusCode::BAD_GATEWAY,
            Html(pages::rates_unavailable(&currency, period)),
        )
            .into_response();
    }

    Html(pages::rates(
        &currency,
        period,
        quote.as_ref(),
        chart_svg.as_deref(),
    ))
    .into_response()
}

fn bad_selection(state: &AppState) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Html(pages::index(
            &state.config.currencies,
            Some("Select a valid currency and period."),
        )),
    )
        .into_response()
}

pub async fn convert_page(State(state): State<Arc<AppState>>) -> Html<String> {
    Html(pages::converter(&state.config.currencies, None, None))
}

#[derive(Debug, Deserialize)]
pub struct ConvertForm {
    pub source: String,
    pub target: String,
    pub amount: String,
    pub variant: String,
}

pub async fn convert_submit(
    State(state): State<Arc<AppState>>,
    Form(form): Form<ConvertForm>,
) -> Response {
    let form_error = |status: StatusCode, message: &str| {
        (
            status,
            Html(pages::converter(&state.config.currencies, Some(message), None)),
        )
            .into_response()
    };

    let Ok(amount) = form.amount.trim().parse::<f64>() else {
        return form_error(StatusCode::BAD_REQUEST, "Enter a valid amount.");
    };
    let Ok(variant) = form.variant.parse::<RateVariant>() else {
        return form_error(StatusCode::BAD_REQUEST, "Select a valid rate variant.");
    };

    let source = form.source.trim().to_uppercase();
    let target = form.target.trim().to_uppercase();
    for code in [&source, &target] {
        if !state.config.knows(code) {
            return form_error(
                StatusCode::BAD_REQUEST,
                &format!("Unknown currency: {code}"),
            );
        }
    }

    let (result, failures) = run_conversion(&state, source, target, amount, variant).await;
    match result {
        Ok(result) => {
            Html(pages::converter(&state.config.currencies, None, Some(&result))).into_response()
        }
        Err(RateError::InvalidAmount(_)) => {
            form_error(StatusCode::BAD_REQUEST, "Enter an amount greater than zero.")
        }
        Err(e) => {
            // Both sides were validated against the configured set, so a
            // missing table entry means its fetch failed.
            warn!("Conversion failed: {e}; fetch failures: {failures:?}");
            form_error(
                StatusCode::BAD_GATEWAY,
                "Exchange rates are unavailable right now. Try again in a moment.",
            )
        }
    }
}

/// Builds a fresh table holding the foreign sides of the request and runs
/// the conversion. Identity conversions skip fetching entirely.
async fn run_conversion(
    state: &AppState,
    source: String,
    target: String,
    amount: f64,
    variant: RateVariant,
) -> (Result<ConversionResult, RateError>, Vec<FetchFailure>) {
    let mut codes: Vec<String> = Vec::new();
    for code in [&source, &target] {
        if code != HOME_CURRENCY && !codes.contains(code) {
            codes.push(code.clone());
        }
    }

    let (table, failures) = if source == target {
        (RateTable::new(), Vec::new())
    } else {
        rates::build_rate_table(state.provider.as_ref(), &codes).await
    };

    let request = ConversionRequest {
        source,
        target,
        amount,
        variant,
    };
    (convert(&request, &table), failures)
}

fn api_error(status: StatusCode, kind: &str, message: impl Into<String>) -> Response {
    (
        status,
        Json(json!({ "error": kind, "message": message.into() })),
    )
        .into_response()
}

pub async fn api_rates(State(state): State<Arc<AppState>>) -> Response {
    let codes: Vec<String> = state
        .config
        .currencies
        .iter()
        .map(|c| c.code.clone())
        .collect();

    let (table, failures) = rates::build_rate_table(state.provider.as_ref(), &codes).await;
    if table.is_empty() && !failures.is_empty() {
        return api_error(
            StatusCode::BAD_GATEWAY,
            "unavailable",
            "no exchange rates could be fetched",
        );
    }

    let unavailable: Vec<&str> = failures.iter().map(|f| f.code.as_str()).collect();
    Json(json!({
        "base": HOME_CURRENCY,
        "rates": table,
        "unavailable": unavailable,
    }))
    .into_response()
}

pub async fn api_rate(State(state): State<Arc<AppState>>, Path(code): Path<String>) -> Response {
    let code = code.trim().to_uppercase();
    if state.config.currency(&code).is_none() {
        return api_error(
            StatusCode::NOT_FOUND,
            "unknown_currency",
            format!("unknown currency: {code}"),
        );
    }

    match rates::latest_quote(state.provider.as_ref(), &code).await {
        Ok(quote) => Json(json!({
            "code": code,
            "base": HOME_CURRENCY,
            "quote": quote,
        }))
        .into_response(),
        Err(e) => {
            warn!("Latest quote failed for {code}: {e:#}");
            api_error(
                StatusCode::BAD_GATEWAY,
                "unavailable",
                format!("rates for {code} are unavailable"),
            )
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ConvertParams {
    pub source: Option<String>,
    pub target: Option<String>,
    pub amount: Option<String>,
    pub variant: Option<String>,
}

pub async fn api_convert(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ConvertParams>,
) -> Response {
    let (Some(source), Some(target), Some(amount)) =
        (params.source, params.target, params.amount)
    else {
        return api_error(
            StatusCode::BAD_REQUEST,
            "invalid_request",
            "source, target and amount are required",
        );
    };

    let Ok(amount) = amount.trim().parse::<f64>() else {
        return api_error(
            StatusCode::BAD_REQUEST,
            "invalid_amount",
            "amount must be a number",
        );
    };

    let variant = match params.variant {
        None => RateVariant::Commercial,
        Some(raw) => match raw.parse::<RateVariant>() {
            Ok(variant) => variant,
            Err(_) => {
                return api_error(
                    StatusCode::BAD_REQUEST,
                    "invalid_variant",
                    format!("unknown rate variant: {raw}"),
                );
            }
        },
    };

    let source = source.trim().to_uppercase();
    let target = target.trim().to_uppercase();
    for code in [&source, &target] {
        if !state.config.knows(code) {
            return api_error(
                StatusCode::BAD_REQUEST,
                "unknown_currency",
                format!("unknown currency: {code}"),
            );
        }
    }

    let (result, failures) = run_conversion(&state, source, target, amount, variant).await;
    match result {
        Ok(result) => Json(result).into_response(),
        Err(RateError::InvalidAmount(amount)) => api_error(
            StatusCode::BAD_REQUEST,
            "invalid_amount",
            format!("amount must be greater than zero, got {amount}"),
        ),
        Err(e) => {
            warn!("Conversion failed: {e}; fetch failures: {failures:?}");
            api_error(
                StatusCode::BAD_GATEWAY,
                "unavailable",
                "exchange rates are unavailable right now",
            )
        }
    }
}
