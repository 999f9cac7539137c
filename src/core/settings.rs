//! Session settings - budget cap, conversion rates, display currency.
//!
//! Settings are persisted data, not application configuration: they are
//! created once with defaults, loaded at startup, and replaced wholesale by
//! explicit save actions.

use crate::core::record::Amount;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The currency every derived figure is rendered in. Amounts are always
/// stored in the base currency (RWF); the display currency only applies at
/// presentation time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Currency {
    #[default]
    #[serde(rename = "RWF")]
    Rwf,
    #[serde(rename = "USD")]
    Usd,
    #[serde(rename = "EUR")]
    Eur,
}

impl Currency {
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Rwf => "RWF",
            Self::Usd => "USD",
            Self::Eur => "EUR",
        }
    }
}

impl FromStr for Currency {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "RWF" => Ok(Self::Rwf),
            "USD" => Ok(Self::Usd),
            "EUR" => Ok(Self::Eur),
            other => Err(format!("unknown currency code: {other}")),
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Multiplicative conversion factors from the base currency. A rate of `0`
/// means "unset" and converts every amount to zero rather than erroring.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Rates {
    #[serde(rename = "USD")]
    pub usd: f64,
    #[serde(rename = "EUR")]
    pub eur: f64,
}

/// Process-wide session settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Budget ceiling in the base currency; zero means no cap is set.
    pub cap: Amount,
    pub rates: Rates,
    pub display: Currency,
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::float_cmp)]
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.cap, Amount::ZERO);
        assert_eq!(settings.rates.usd, 0.0);
        assert_eq!(settings.rates.eur, 0.0);
        assert_eq!(settings.display, Currency::Rwf);
    }

    #[test]
    fn test_settings_json_shape() {
        let settings = Settings {
            cap: Amount::from_major_units(50_000),
            rates: Rates {
                usd: 0.00078,
                eur: 0.00071,
            },
            display: Currency::Usd,
        };
        let json = serde_json::to_value(&settings).unwrap();
        assert_eq!(json["cap"], 50_000);
        assert_eq!(json["rates"]["USD"], 0.00078);
        assert_eq!(json["display"], "USD");
    }

    #[test]
    fn test_partial_settings_fill_defaults() {
        // Older persisted blobs may miss fields; serde(default) fills them.
        let settings: Settings = serde_json::from_str(r#"{"cap": 100}"#).unwrap();
        assert_eq!(settings.cap, Amount::from_major_units(100));
        assert_eq!(settings.display, Currency::Rwf);
    }

    #[test]
    fn test_currency_parse_is_case_insensitive() {
        assert_eq!("usd".parse::<Currency>().unwrap(), Currency::Usd);
        assert_eq!("RWF".parse::<Currency>().unwrap(), Currency::Rwf);
        assert!("GBP".parse::<Currency>().is_err());
    }
}
