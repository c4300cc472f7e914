//! Cross-rate conversion against the home currency.
//!
//! Every rate in a [`RateTable`] is expressed as home-currency units per one
//! foreign unit, so home-to-foreign divides, foreign-to-home multiplies, and
//! foreign-to-foreign hops through the home currency in two steps.

use crate::core::error::RateError;
use crate::core::quote::{Quote, RateVariant};
use serde::Serialize;
use std::collections::BTreeMap;

/// The local currency all foreign quotes are expressed against.
pub const HOME_CURRENCY: &str = "BRL";

/// Fractional digits kept in a presented amount.
const AMOUNT_SCALE: f64 = 1_000_000.0;

/// Per-currency quotes, built fresh for the request that consumes it.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct RateTable {
    rates: BTreeMap<String, Quote>,
}

impl RateTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, code: impl Into<String>, quote: Quote) {
        self.rates.insert(code.into(), quote);
    }

    pub fn get(&self, code: &str) -> Option<&Quote> {
        self.rates.get(code)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Quote)> {
        self.rates.iter().map(|(code, quote)| (code.as_str(), quote))
    }

    pub fn len(&self) -> usize {
        self.rates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConversionRequest {
    pub source: String,
    pub target: String,
    pub amount: f64,
    pub variant: RateVariant,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConversionResult {
    pub amount_in: f64,
    pub source: String,
    pub target: String,
    pub amount_out: f64,
    pub variant: RateVariant,
}

/// Converts an amount between two currencies using the supplied table.
///
/// Identity conversions succeed without any rate lookup, even against an
/// empty table. The final amount is rounded to six fractional digits; all
/// intermediate arithmetic keeps full precision.
pub fn convert(request: &ConversionRequest, table: &RateTable) -> Result<ConversionResult, RateError> {
    let amount = request.amount;
    if !amount.is_finite() || amount <= 0.0 {
        return Err(RateError::InvalidAmount(amount));
    }

    let source = request.source.as_str();
    let target = request.target.as_str();
    let variant = request.variant;

    let amount_out = if source == target {
        amount
    } else if source == HOME_CURRENCY {
        amount / foreign_rate(table, target, variant)?
    } else if target == HOME_CURRENCY {
        amount * foreign_rate(table, source, variant)?
    } else {
        match (table.get(source), table.get(target)) {
            (Some(source_quote), Some(target_quote)) => {
                let amount_home = amount * source_quote.rate(variant);
                amount_home / target_quote.rate(variant)
            }
            _ => {
                return Err(RateError::UnsupportedPair(
                    source.to_string(),
                    target.to_string(),
                ));
            }
        }
    };

    Ok(ConversionResult {
        amount_in: amount,
        source: source.to_string(),
        target: target.to_string(),
        amount_out: round_presented(amount_out),
        variant,
    })
}

fn foreign_rate(table: &RateTable, code: &str, variant: RateVariant) -> Result<f64, RateError> {
    table
        .get(code)
        .map(|quote| quote.rate(variant))
        .ok_or_else(|| RateError::UnknownCurrency(code.to_string()))
}

fn round_presented(amount: f64) -> f64 {
    (amount * AMOUNT_SCALE).round() / AMOUNT_SCALE
}
