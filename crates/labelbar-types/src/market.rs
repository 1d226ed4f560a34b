//! Broker market definitions.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// A market the IG fetcher can download minute bars for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Market {
    /// Crude oil CFD.
    Oil,
    /// AUD/USD mini contract.
    Aud,
    /// Spot gold CFD.
    Gold,
}

impl Market {
    /// Returns the IG epic identifying the market.
    #[must_use]
    pub const fn epic(&self) -> &'static str {
        match self {
            Self::Oil => "CC.D.CL.BMU.IP",
            Self::Aud => "CS.D.AUDUSD.MINI.IP",
            Self::Gold => "CS.D.CFDGOLD.BMU.IP",
        }
    }

    /// Returns the storage name used for this market's price table.
    ///
    /// Also used as the default output file stem.
    #[must_use]
    pub const fn table(&self) -> &'static str {
        match self {
            Self::Oil => "prices",
            Self::Aud => "aud_prices",
            Self::Gold => "gold_prices",
        }
    }

    /// Returns a short human-readable description.
    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::Oil => "US crude oil (CFD)",
            Self::Aud => "Australian dollar vs US dollar (mini)",
            Self::Gold => "Spot gold (CFD)",
        }
    }

    /// Returns the market identifier.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Oil => "oil",
            Self::Aud => "aud",
            Self::Gold => "gold",
        }
    }

    /// Returns all known markets.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Oil, Self::Aud, Self::Gold]
    }
}

impl std::fmt::Display for Market {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Market {
    type Err = MarketParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_lowercase();
        Self::all()
            .iter()
            .copied()
            .find(|m| m.as_str() == lower || m.epic().eq_ignore_ascii_case(s) || m.table() == lower)
            .or_else(|| match lower.as_str() {
                "crude" | "cl" => Some(Self::Oil),
                "audusd" => Some(Self::Aud),
                "xauusd" => Some(Self::Gold),
                _ => None,
            })
            .ok_or_else(|| MarketParseError(s.to_string()))
    }
}

/// Error returned when parsing an unknown market.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarketParseError(String);

impl std::fmt::Display for MarketParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown market '{}', expected one of: oil, aud, gold", self.0)
    }
}

impl std::error::Error for MarketParseError {}
