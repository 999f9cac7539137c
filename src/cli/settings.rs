//! Settings command - show or save the cap, rates, and display currency.
//!
//! This is the boundary where bad setting values are rejected; the conversion
//! and aggregation code downstream assumes non-negative caps and rates.

use crate::core::currency::format_amount;
use crate::core::engine::Ledger;
use crate::core::record::Amount;
use crate::core::settings::{Currency, Settings};
use crate::errors::{Error, Result};
use crate::store::{BlobStore, session};
use clap::Args;

#[derive(Debug, Args)]
pub struct SettingsArgs {
    /// Monthly spending cap in the base currency; 0 clears the cap
    #[arg(long)]
    pub cap: Option<f64>,
    /// RWF -> USD conversion rate
    #[arg(long)]
    pub rate_usd: Option<f64>,
    /// RWF -> EUR conversion rate
    #[arg(long)]
    pub rate_eur: Option<f64>,
    /// Currency all amounts are displayed in: RWF, USD, or EUR
    #[arg(long)]
    pub display: Option<Currency>,
}

impl SettingsArgs {
    fn is_show(&self) -> bool {
        self.cap.is_none()
            && self.rate_usd.is_none()
            && self.rate_eur.is_none()
            && self.display.is_none()
    }
}

/// Shows the current settings, or validates and saves the given changes.
///
/// # Errors
/// [`Error::InvalidSetting`] for a negative or over-precise cap or a
/// negative rate; nothing is saved in that case.
pub fn run<S: BlobStore>(ledger: &mut Ledger, store: &S, args: &SettingsArgs) -> Result<()> {
    if args.is_show() {
        show(ledger.settings());
        return Ok(());
    }

    // Build the replacement on a staged copy; the live settings are only
    // swapped once every value has passed.
    let mut settings = ledger.settings().clone();
    if let Some(cap) = args.cap {
        settings.cap = Amount::from_base_units_exact(cap).ok_or_else(|| Error::InvalidSetting {
            message: format!("cap must be a non-negative amount with up to 2 decimals, got {cap}"),
        })?;
    }
    if let Some(rate) = args.rate_usd {
        settings.rates.usd = checked_rate("USD", rate)?;
    }
    if let Some(rate) = args.rate_eur {
        settings.rates.eur = checked_rate("EUR", rate)?;
    }
    if let Some(display) = args.display {
        settings.display = display;
    }

    session::save_settings(store, &settings)?;
    ledger.update_settings(settings);
    println!("Settings saved.");
    show(ledger.settings());
    Ok(())
}

fn checked_rate(code: &str, rate: f64) -> Result<f64> {
    if rate.is_finite() && rate >= 0.0 {
        Ok(rate)
    } else {
        Err(Error::InvalidSetting {
            message: format!("{code} rate must be a non-negative number, got {rate}"),
        })
    }
}

fn show(settings: &Settings) {
    let cap = if settings.cap == Amount::ZERO {
        "not set".to_string()
    } else {
        format_amount(settings.cap, settings)
    };
    println!("Cap:              {cap}");
    println!("Rate RWF -> USD:  {}", settings.rates.usd);
    println!("Rate RWF -> EUR:  {}", settings.rates.eur);
    println!("Display currency: {}", settings.display);
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::store::MemoryStore;

    fn args() -> SettingsArgs {
        SettingsArgs {
            cap: None,
            rate_usd: None,
            rate_eur: None,
            display: None,
        }
    }

    #[test]
    fn test_save_updates_ledger_and_store() {
        let store = MemoryStore::new();
        let mut ledger = Ledger::default();

        run(
            &mut ledger,
            &store,
            &SettingsArgs {
                cap: Some(50_000.0),
                rate_usd: Some(0.00078),
                display: Some(Currency::Usd),
                ..args()
            },
        )
        .unwrap();

        assert_eq!(ledger.settings().cap, Amount::from_major_units(50_000));
        assert_eq!(ledger.settings().display, Currency::Usd);
        assert_eq!(session::load_settings(&store), *ledger.settings());
    }

    #[test]
    fn test_negative_cap_rejected_without_saving() {
        let store = MemoryStore::new();
        let mut ledger = Ledger::default();

        let result = run(
            &mut ledger,
            &store,
            &SettingsArgs {
                cap: Some(-5.0),
                ..args()
            },
        );
        assert!(matches!(result, Err(Error::InvalidSetting { .. })));
        assert_eq!(*ledger.settings(), Settings::default());
        assert_eq!(session::load_settings(&store), Settings::default());
    }

    #[test]
    fn test_negative_rate_rejected() {
        let store = MemoryStore::new();
        let mut ledger = Ledger::default();

        let result = run(
            &mut ledger,
            &store,
            &SettingsArgs {
                rate_eur: Some(-0.1),
                ..args()
            },
        );
        assert!(matches!(result, Err(Error::InvalidSetting { .. })));
    }

    #[test]
    fn test_show_does_not_touch_store() {
        let store = MemoryStore::new();
        let mut ledger = Ledger::default();
        run(&mut ledger, &store, &args()).unwrap();
        assert!(store.get(crate::store::SETTINGS_KEY).unwrap().is_none());
    }
}
