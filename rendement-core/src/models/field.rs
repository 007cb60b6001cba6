use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One of the four worksheet parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    /// Purchase price, a lump sum.
    Achat,
    /// Rent, monthly or annual.
    Loyer,
    /// Charges, monthly or annual.
    Charges,
    /// Yield, as a percentage.
    Rendement,
}

impl Field {
    pub const ALL: [Field; 4] = [Self::Achat, Self::Loyer, Self::Charges, Self::Rendement];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Achat => "achat",
            Self::Loyer => "loyer",
            Self::Charges => "charges",
            Self::Rendement => "rendement",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Achat => "Prix d'achat",
            Self::Loyer => "Loyer",
            Self::Charges => "Charges",
            Self::Rendement => "Rendement",
        }
    }

    /// Only rent and charges are expressed per period.
    pub fn has_period(&self) -> bool {
        matches!(self, Self::Loyer | Self::Charges)
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "achat" | "prix" => Some(Self::Achat),
            "loyer" => Some(Self::Loyer),
            "charges" => Some(Self::Charges),
            "rendement" => Some(Self::Rendement),
            _ => None,
        }
    }
}

impl fmt::Display for Field {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when text does not name a known field.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown field '{0}' (expected achat, loyer, charges or rendement)")]
pub struct ParseFieldError(pub String);

impl FromStr for Field {
    type Err = ParseFieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| ParseFieldError(s.to_string()))
    }
}

/// Time basis of a rent or charges amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Period {
    #[default]
    #[serde(rename = "mensuel", alias = "monthly")]
    Monthly,
    #[serde(rename = "annuel", alias = "annual")]
    Annual,
}

impl Period {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Monthly => "mensuel",
            Self::Annual => "annuel",
        }
    }

    /// Unit suffix used in equivalence text ("/mois", "/an").
    pub fn suffix(&self) -> &'static str {
        match self {
            Self::Monthly => "/mois",
            Self::Annual => "/an",
        }
    }

    /// Number of months covered by one amount in this period.
    pub fn months(&self) -> u32 {
        match self {
            Self::Monthly => 1,
            Self::Annual => 12,
        }
    }

    pub fn other(&self) -> Self {
        match self {
            Self::Monthly => Self::Annual,
            Self::Annual => Self::Monthly,
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mensuel" | "monthly" | "mois" | "m" => Some(Self::Monthly),
            "annuel" | "annual" | "an" | "a" => Some(Self::Annual),
            _ => None,
        }
    }
}

impl fmt::Display for Period {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when text does not name a known period.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown period '{0}' (expected mensuel or annuel)")]
pub struct ParsePeriodError(pub String);

impl FromStr for Period {
    type Err = ParsePeriodError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| ParsePeriodError(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn period_months_match_conversion_factor() {
        assert_eq!(Period::Monthly.months(), 1);
        assert_eq!(Period::Annual.months(), 12);
        assert_eq!(Period::Annual.months() / Period::Monthly.months(), 12);
    }

    #[test]
    fn field_parse_round_trips_codes() {
        for field in Field::ALL {
            assert_eq!(Field::parse(field.as_str()), Some(field));
        }
    }

    #[test]
    fn field_parse_is_case_insensitive() {
        assert_eq!(Field::parse("  LOYER "), Some(Field::Loyer));
    }

    #[test]
    fn field_from_str_reports_unknown_name() {
        let err = "surface".parse::<Field>().unwrap_err();

        assert_eq!(err, ParseFieldError("surface".to_string()));
    }

    #[test]
    fn only_rent_and_charges_have_a_period() {
        assert!(!Field::Achat.has_period());
        assert!(Field::Loyer.has_period());
        assert!(Field::Charges.has_period());
        assert!(!Field::Rendement.has_period());
    }

    #[test]
    fn period_defaults_to_monthly() {
        assert_eq!(Period::default(), Period::Monthly);
    }

    #[test]
    fn period_parse_accepts_french_and_english() {
        assert_eq!(Period::parse("mensuel"), Some(Period::Monthly));
        assert_eq!(Period::parse("Annual"), Some(Period::Annual));
        assert_eq!(Period::parse("a"), Some(Period::Annual));
        assert_eq!(Period::parse("weekly"), None);
    }

    #[test]
    fn period_other_flips() {
        assert_eq!(Period::Monthly.other(), Period::Annual);
        assert_eq!(Period::Annual.other(), Period::Monthly);
    }
}
