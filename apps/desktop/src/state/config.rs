//! # Configuration State
//!
//! Stores application configuration loaded at startup.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Environment variables (`TALLY_*`)
//! 2. Defaults (this file)
//!
//! ## Thread Safety
//! Configuration is read-only after initialization, so no mutex needed.

use serde::Serialize;
use tally_core::validation::validate_tax_rate_bps;
use tally_core::{CurrencyFormat, Letterhead, TaxRate, STANDARD_TAX_RATE};
use tracing::warn;

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigState {
    /// Seller block printed on every invoice
    pub letterhead: Letterhead,

    /// Currency symbol and layout for amounts
    pub currency: CurrencyFormat,

    /// Tax applied to new bills; `None` for the "no tax" variant
    pub tax_rate: Option<TaxRate>,
}

impl Default for ConfigState {
    /// Returns the stock configuration.
    ///
    /// ## Default Values
    /// - Letterhead: "Your Company Name" placeholder block
    /// - Currency: `$`
    /// - Tax: 10%
    fn default() -> Self {
        ConfigState {
            letterhead: Letterhead::default(),
            currency: CurrencyFormat::default(),
            tax_rate: Some(STANDARD_TAX_RATE),
        }
    }
}

impl ConfigState {
    /// Creates a new ConfigState from environment variables and defaults.
    ///
    /// ## Environment Variables
    /// - `TALLY_COMPANY_NAME`: Override the letterhead company name
    /// - `TALLY_CURRENCY_SYMBOL`: Override the currency symbol (e.g., "€")
    /// - `TALLY_TAX_RATE`: Tax percentage (e.g., "8.25"); "none" or "0" disables tax
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with an explicit variable source.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = ConfigState::default();

        if let Some(company_name) = lookup("TALLY_COMPANY_NAME") {
            config.letterhead.company_name = company_name;
        }

        if let Some(symbol) = lookup("TALLY_CURRENCY_SYMBOL") {
            config.currency = CurrencyFormat::new(symbol);
        }

        if let Some(raw) = lookup("TALLY_TAX_RATE") {
            match parse_tax_rate(&raw) {
                Some(rate) => config.tax_rate = rate,
                None => warn!(value = %raw, "Ignoring invalid TALLY_TAX_RATE"),
            }
        }

        config
    }
}

/// `Some(None)` disables tax, `Some(Some(rate))` sets it, `None` is invalid.
fn parse_tax_rate(raw: &str) -> Option<Option<TaxRate>> {
    let raw = raw.trim();
    if raw.eq_ignore_ascii_case("none") {
        return Some(None);
    }

    let pct = raw.trim_end_matches('%').parse::<f64>().ok()?;
    if !pct.is_finite() || pct < 0.0 {
        return None;
    }

    let rate = TaxRate::from_percentage(pct);
    if !validate_tax_rate_bps(rate.bps()) {
        return None;
    }
    Some((!rate.is_zero()).then_some(rate))
}
