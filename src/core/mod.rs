//! Core business logic: quote derivation, history derivation, conversion.

pub mod convert;
pub mod error;
pub mod history;
pub mod log;
pub mod quote;

// Re-export main types for cleaner imports
pub use convert::{ConversionRequest, ConversionResult, HOME_CURRENCY, RateTable, convert};
pub use error::RateError;
pub use history::{HistoryPoint, HistorySeries, Period, derive_history};
pub use quote::{Quote, RateVariant, TOURISM_MARKUP, derive_quote};
