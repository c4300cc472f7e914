//! Typed failures of the rate derivation and conversion core.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum RateError {
    /// A fetched price that is not a finite, non-negative number.
    #[error("invalid rate input: {0}")]
    InvalidInput(f64),

    /// A conversion amount that is not a finite, positive number.
    #[error("invalid amount: {0}")]
    InvalidAmount(f64),

    /// A currency that is neither the home currency nor present in the
    /// supplied rate table.
    #[error("unknown currency: {0}")]
    UnknownCurrency(String),

    /// A foreign/foreign pair that cannot be routed through the home
    /// currency because a side is missing from the rate table.
    #[error("unsupported conversion pair: {0}/{1}")]
    UnsupportedPair(String, String),
}
