//! Display-currency conversion and amount formatting.
//!
//! Every amount is stored in the base currency (RWF); conversion happens only
//! at the presentation edge, once per displayed figure, so it has to stay a
//! cheap pure function. An unset rate (zero) converts to zero rather than
//! erroring; negative rates are rejected at the settings-save boundary, not
//! here.

use crate::core::record::Amount;
use crate::core::settings::{Currency, Rates, Settings};

/// Converts a base-currency amount into display-currency units.
///
/// RWF is the identity; USD/EUR multiply by the user-supplied rate.
#[must_use]
pub fn convert(amount: Amount, display: Currency, rates: &Rates) -> f64 {
    let base = amount.to_base_units();
    match display {
        Currency::Rwf => base,
        Currency::Usd => base * rates.usd,
        Currency::Eur => base * rates.eur,
    }
}

/// Renders an amount in the configured display currency, with thousands
/// grouping and the currency code: `12,500 RWF`, `-9.75 USD`.
///
/// RWF shows whole units; USD and EUR show two fraction digits.
#[must_use]
pub fn format_amount(amount: Amount, settings: &Settings) -> String {
    let shown = convert(amount, settings.display, &settings.rates);
    let digits = fraction_digits(settings.display);
    format!(
        "{} {}",
        group_thousands(&format!("{shown:.digits$}")),
        settings.display.code()
    )
}

const fn fraction_digits(display: Currency) -> usize {
    match display {
        Currency::Rwf => 0,
        Currency::Usd | Currency::Eur => 2,
    }
}

/// Inserts `,` separators into the integer part of an already-formatted
/// decimal string. Handles a leading minus sign.
fn group_thousands(formatted: &str) -> String {
    let (number, fraction) = match formatted.split_once('.') {
        Some((whole, frac)) => (whole, Some(frac)),
        None => (formatted, None),
    };
    let (sign, digits) = match number.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", number),
    };

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    match fraction {
        Some(frac) => format!("{sign}{grouped}.{frac}"),
        None => format!("{sign}{grouped}"),
    }
}
