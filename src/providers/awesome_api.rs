//! AwesomeAPI economia client.
//!
//! The upstream serves decimal fields as JSON strings (`"bid": "5.1234"`,
//! `"timestamp": "1741392000"`), so every field is parsed defensively.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate};
use serde::Deserialize;
use std::collections::HashMap;
use tracing::{debug, instrument};

use crate::rate_provider::{ProviderError, RateProvider};

const USER_AGENT: &str = "cambio/1.0";

pub struct AwesomeApiProvider {
    base_url: String,
}

impl AwesomeApiProvider {
    pub fn new(base_url: &str) -> Self {
        AwesomeApiProvider {
            base_url: base_url.to_string(),
        }
    }

    async fn get_text(&self, url: &str) -> Result<String, ProviderError> {
        let client = reqwest::Client::builder().user_agent(USER_AGENT).build()?;
        let response = client.get(url).send().await?;

        if !response.status().is_success() {
            return Err(ProviderError::Status(response.status()));
        }

        Ok(response.text().await?)
    }
}

#[derive(Debug, Deserialize)]
struct LastQuote {
    bid: String,
}

#[derive(Debug, Deserialize)]
struct DailyQuote {
    bid: String,
    timestamp: String,
}

fn parse_bid(pair: &str, bid: &str) -> Result<f64, ProviderError> {
    bid.parse::<f64>().map_err(|e| ProviderError::Malformed {
        pair: pair.to_string(),
        detail: format!("bid '{bid}' is not a number: {e}"),
    })
}

fn parse_epoch_date(timestamp: &str) -> Option<NaiveDate> {
    timestamp
        .parse::<i64>()
        .ok()
        .and_then(|ts| DateTime::from_timestamp(ts, 0))
        .map(|dt| dt.date_naive())
}

#[async_trait]
impl RateProvider for AwesomeApiProvider {
    #[instrument(
        name = "AwesomeApiLatest",
        skip(self),
        fields(code = %code)
    )]
    async fn fetch_latest(&self, code: &str) -> Result<f64, ProviderError> {
        let pair = format!("{code}-BRL");
        let url = format!("{}/json/last/{}", self.base_url, pair);
        debug!("Requesting latest rate from {}", url);

        let text = self.get_text(&url).await?;

        // The payload is keyed by the concatenated pair, e.g. "USDBRL".
        let data: HashMap<String, LastQuote> =
            serde_json::from_str(&text).map_err(|e| ProviderError::Malformed {
                pair: pair.clone(),
                detail: e.to_string(),
            })?;

        let key = format!("{code}BRL");
        let quote = data
            .get(&key)
            .ok_or_else(|| ProviderError::NoData(pair.clone()))?;

        parse_bid(&pair, &quote.bid)
    }

    #[instrument(
        name = "AwesomeApiHistory",
        skip(self),
        fields(code = %code, days = days)
    )]
    async fn fetch_history(
        &self,
        code: &str,
        days: u32,
    ) -> Result<Vec<(NaiveDate, f64)>, ProviderError> {
        let pair = format!("{code}-BRL");
        let url = format!("{}/json/daily/{}/{}", self.base_url, pair, days);
        debug!("Requesting daily rates from {}", url);

        let text = self.get_text(&url).await?;

        let rows: Vec<DailyQuote> =
            serde_json::from_str(&text).map_err(|e| ProviderError::Malformed {
                pair: pair.clone(),
                detail: e.to_string(),
            })?;

        let mut points = Vec::with_capacity(rows.len());
        for row in rows {
            match (parse_epoch_date(&row.timestamp), row.bid.parse::<f64>().ok()) {
                (Some(date), Some(bid)) => points.push((date, bid)),
                _ => debug!(
                    "Skipping malformed daily row for {pair}: bid='{}' timestamp='{}'",
                    row.bid, row.timestamp
                ),
            }
        }

        Ok(points)
    }
}
