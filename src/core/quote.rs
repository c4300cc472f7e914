//! Quote derivation from a fetched commercial price.

use crate::core::error::RateError;
use serde::Serialize;
use std::fmt::Display;
use std::str::FromStr;

/// Markup applied to the commercial rate to model the retail/cash-exchange
/// spread of the tourism rate.
pub const TOURISM_MARKUP: f64 = 1.05;

/// The three rate variants derived from one fetched commercial price.
///
/// Values are home-currency units per one foreign unit. No rounding is
/// applied here; formatting belongs to the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Quote {
    pub commercial: f64,
    pub tourism: f64,
    pub average: f64,
}

impl Quote {
    pub fn rate(&self, variant: RateVariant) -> f64 {
        match variant {
            RateVariant::Commercial => self.commercial,
            RateVariant::Tourism => self.tourism,
            RateVariant::Average => self.average,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RateVariant {
    Commercial,
    Tourism,
    Average,
}

impl RateVariant {
    pub const ALL: [RateVariant; 3] = [
        RateVariant::Commercial,
        RateVariant::Tourism,
        RateVariant::Average,
    ];
}

impl Display for RateVariant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                RateVariant::Commercial => "commercial",
                RateVariant::Tourism => "tourism",
                RateVariant::Average => "average",
            }
        )
    }
}

impl FromStr for RateVariant {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "commercial" => Ok(RateVariant::Commercial),
            "tourism" => Ok(RateVariant::Tourism),
            "average" => Ok(RateVariant::Average),
            _ => Err(anyhow::anyhow!("Invalid rate variant: {}", s)),
        }
    }
}

/// Derives the full quote from a commercial price.
///
/// Fails with [`RateError::InvalidInput`] unless the price is finite and
/// non-negative. Absence of a price is an upstream condition and never
/// reaches this function.
pub fn derive_quote(commercial: f64) -> Result<Quote, RateError> {
    if !commercial.is_finite() || commercial < 0.0 {
        return Err(RateError::InvalidInput(commercial));
    }

    let tourism = commercial * TOURISM_MARKUP;
    Ok(Quote {
        commercial,
        tourism,
        average: (commercial + tourism) / 2.0,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derive_quote_markup() {
        let quote = derive_quote(5.0).unwrap();
        assert_eq!(quote.commercial, 5.0);
        assert_eq!(quote.tourism, 5.25);
        assert_eq!(quote.average, 5.125);
    }

    #[test]
    fn test_derive_quote_zero() {
        let quote = derive_quote(0.0).unwrap();
        assert_eq!(quote.tourism, 0.0);
        assert_eq!(quote.average, 0.0);
    }

    #[test]
    fn test_average_between_variants() {
        let quote = derive_quote(5.4321).unwrap();
        assert!(quote.commercial < quote.average);
        assert!(quote.average < quote.tourism);
    }

    #[test]
    fn test_derive_quote_rejects_negative() {
        assert_eq!(derive_quote(-1.0), Err(RateError::InvalidInput(-1.0)));
    }

    #[test]
    fn test_derive_quote_rejects_non_finite() {
        assert!(matches!(
            derive_quote(f64::NAN),
            Err(RateError::InvalidInput(_))
        ));
        assert!(matches!(
            derive_quote(f64::INFINITY),
            Err(RateError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_variant_lookup() {
        let quote = derive_quote(2.0).unwrap();
        assert_eq!(quote.rate(RateVariant::Commercial), 2.0);
        assert_eq!(quote.rate(RateVariant::Tourism), 2.1);
        assert_eq!(quote.rate(RateVariant::Average), 2.05);
    }

    #[test]
    fn test_variant_round_trip() {
        for variant in RateVariant::ALL {
            assert_eq!(variant.to_string().parse::<RateVariant>().unwrap(), variant);
        }
        assert!("retail".parse::<RateVariant>().is_err());
    }
}
