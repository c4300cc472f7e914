//! Historical series derivation.

use crate::core::quote::derive_quote;
use chrono::NaiveDate;
use serde::Serialize;
use std::fmt::Display;
use std::str::FromStr;
use tracing::debug;

/// One charted day: the commercial price plus its derived variants.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HistoryPoint {
    pub date: NaiveDate,
    pub commercial: f64,
    pub tourism: f64,
    pub average: f64,
}

/// Date-ascending sequence of [`HistoryPoint`].
pub type HistorySeries = Vec<HistoryPoint>;

/// Chartable look-back periods offered by the result page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd)]
pub enum Period {
    OneMonth,
    ThreeMonths,
    SixMonths,
    OneYear,
}

impl Period {
    pub const ALL: [Period; 4] = [
        Period::OneMonth,
        Period::ThreeMonths,
        Period::SixMonths,
        Period::OneYear,
    ];

    pub fn days(&self) -> u32 {
        match self {
            Period::OneMonth => 30,
            Period::ThreeMonths => 90,
            Period::SixMonths => 180,
            Period::OneYear => 365,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Period::OneMonth => "1 Month",
            Period::ThreeMonths => "3 Months",
            Period::SixMonths => "6 Months",
            Period::OneYear => "1 Year",
        }
    }
}

impl Display for Period {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Period::OneMonth => "1M",
                Period::ThreeMonths => "3M",
                Period::SixMonths => "6M",
                Period::OneYear => "1Y",
            }
        )
    }
}

impl FromStr for Period {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "1M" => Ok(Period::OneMonth),
            "3M" => Ok(Period::ThreeMonths),
            "6M" => Ok(Period::SixMonths),
            "1Y" => Ok(Period::OneYear),
            _ => Err(anyhow::anyhow!("Invalid period: {}", s)),
        }
    }
}

/// Derives a chartable series from raw (date, commercial price) rows.
///
/// Invalid individual prices are skipped, never fatal: an upstream feed may
/// contain occasional corrupt rows. The output is sorted ascending by date
/// regardless of input order; duplicate dates are preserved as supplied.
pub fn derive_history(points: impl IntoIterator<Item = (NaiveDate, f64)>) -> HistorySeries {
    let mut series: HistorySeries = points
        .into_iter()
        .filter_map(|(date, commercial)| match derive_quote(commercial) {
            Ok(quote) => Some(HistoryPoint {
                date,
                commercial: quote.commercial,
                tourism: quote.tourism,
                average: quote.average,
            }),
            Err(e) => {
                debug!("Skipping history point at {date}: {e}");
                None
            }
        })
        .collect();

    series.sort_by_key(|point| point.date);
    series
}
