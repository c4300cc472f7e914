//! Quote-source abstractions.

use async_trait::async_trait;
use chrono::NaiveDate;
use thiserror::Error;

/// Failure modes of an upstream quote service.
///
/// Callers treat every variant as "rates unavailable"; none of them maps to
/// a user mistake.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("quote service request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("quote service returned HTTP {0}")]
    Status(reqwest::StatusCode),

    #[error("no rate data found for pair: {0}")]
    NoData(String),

    #[error("malformed rate data for pair {pair}: {detail}")]
    Malformed { pair: String, detail: String },
}

#[async_trait]
pub trait RateProvider: Send + Sync {
    /// Latest commercial price of one unit of `code` in home-currency units.
    async fn fetch_latest(&self, code: &str) -> Result<f64, ProviderError>;

    /// Daily commercial prices covering the last `days` days. Row order is
    /// whatever the upstream returns; the history deriver sorts.
    async fn fetch_history(
        &self,
        code: &str,
        days: u32,
    ) -> Result<Vec<(NaiveDate, f64)>, ProviderError>;
}
