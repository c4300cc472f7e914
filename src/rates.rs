//! Builds per-request rate data from a quote provider.
//!
//! Nothing here is cached: every page and API call gets a table fetched for
//! that call alone.

use anyhow::{Context, Result};
use futures::future::join_all;
use tracing::warn;

use crate::core::convert::RateTable;
use crate::core::history::{HistorySeries, Period, derive_history};
use crate::core::quote::{Quote, derive_quote};
use crate::rate_provider::RateProvider;

/// A currency whose fetch failed, with the reason chain.
#[derive(Debug, Clone)]
pub struct FetchFailure {
    pub code: String,
    pub reason: String,
}

/// Fetches and derives the current quote for one currency.
pub async fn latest_quote(provider: &dyn RateProvider, code: &str) -> Result<Quote> {
    let commercial = provider
        .fetch_latest(code)
        .await
        .with_context(|| format!("failed to fetch latest {code} rate"))?;

    let quote =
        derive_quote(commercial).with_context(|| format!("rejecting fetched {code} rate"))?;
    Ok(quote)
}

/// Fetches and derives the charted series for one currency and period.
pub async fn period_history(
    provider: &dyn RateProvider,
    code: &str,
    period: Period,
) -> Result<HistorySeries> {
    let rows = provider
        .fetch_history(code, period.days())
        .await
        .with_context(|| format!("failed to fetch {code} history"))?;

    Ok(derive_history(rows))
}

/// Fetches every requested currency concurrently into a fresh table.
///
/// Failed currencies come back separately so callers can report them instead
/// of substituting plausible-looking defaults.
pub async fn build_rate_table(
    provider: &dyn RateProvider,
    codes: &[String],
) -> (RateTable, Vec<FetchFailure>) {
    let fetches = codes.iter().map(|code| async move {
        let result = latest_quote(provider, code).await;
        (code.clone(), result)
    });

    let mut table = RateTable::new();
    let mut failures = Vec::new();
    for (code, result) in join_all(fetches).await {
        match result {
            Ok(quote) => table.insert(code, quote),
            Err(e) => {
                warn!("Rate fetch failed for {code}: {e:#}");
                failures.push(FetchFailure {
                    code,
                    reason: format!("{e:#}"),
                });
            }
        }
    }

    (table, failures)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rate_provider::ProviderError;
    use async_trait::async_trait;
    use chrono::NaiveDate;
    use std::collections::HashMap;

    struct MockProvider {
        rates: HashMap<&'static str, f64>,
    }

    #[async_trait]
    impl RateProvider for MockProvider {
        async fn fetch_latest(&self, code: &str) -> Result<f64, ProviderError> {
            self.rates
                .get(code)
                .copied()
                .ok_or_else(|| ProviderError::NoData(format!("{code}-BRL")))
        }

        async fn fetch_history(
            &self,
            code: &str,
            _days: u32,
        ) -> Result<Vec<(NaiveDate, f64)>, ProviderError> {
            let base = self
                .rates
                .get(code)
                .copied()
                .ok_or_else(|| ProviderError::NoData(format!("{code}-BRL")))?;
            let day = |s| NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap();
            Ok(vec![
                (day("2025-03-09"), base + 0.1),
                (day("2025-03-08"), base),
            ])
        }
    }

    fn provider() -> MockProvider {
        MockProvider {
            rates: HashMap::from([("USD", 5.0), ("EUR", 5.5), ("BAD", -1.0)]),
        }
    }

    #[tokio::test]
    async fn test_latest_quote_derives_variants() {
        let quote = latest_quote(&provider(), "USD").await.unwrap();
        assert_eq!(quote.tourism, 5.25);
        assert_eq!(quote.average, 5.125);
    }

    #[tokio::test]
    async fn test_latest_quote_rejects_invalid_upstream_price() {
        assert!(latest_quote(&provider(), "BAD").await.is_err());
    }

    #[tokio::test]
    async fn test_period_history_is_sorted() {
        let series = period_history(&provider(), "USD", Period::OneMonth)
            .await
            .unwrap();
        assert_eq!(series.len(), 2);
        assert!(series[0].date < series[1].date);
        assert_eq!(series[0].commercial, 5.0);
    }

    #[tokio::test]
    async fn test_build_rate_table_collects_failures() {
        let codes: Vec<String> = ["USD", "EUR", "JPY", "BAD"]
            .iter()
            .map(|s| s.to_string())
            .collect();

        let (table, failures) = build_rate_table(&provider(), &codes).await;

        assert_eq!(table.len(), 2);
        assert!(table.get("USD").is_some());
        assert!(table.get("EUR").is_some());

        let mut failed: Vec<&str> = failures.iter().map(|f| f.code.as_str()).collect();
        failed.sort();
        assert_eq!(failed, vec!["BAD", "JPY"]);
    }

    #[tokio::test]
    async fn test_build_rate_table_empty_codes() {
        let (table, failures) = build_rate_table(&provider(), &[]).await;
        assert!(table.is_empty());
        assert!(failures.is_empty());
    }
}
