//! # Pricing Configuration
//!
//! Which currency the storefront displays and how base amounts convert
//! into each supported currency.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     STOREFRONT_CURRENCY=PLN                                            │
//! │     STOREFRONT_LOCALE=pl-PL                                            │
//! │     STOREFRONT_RATE_PLN=4.5                                            │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     ~/.config/storefront/pricing.toml (Linux)                          │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     currency from locale, every rate 1.0                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! [display]
//! currency = "PLN"   # optional, detected from locale otherwise
//! locale = "pl-PL"
//!
//! [rates]            # multipliers from the base currency (EUR)
//! EUR = 1.0
//! PLN = 4.5
//! UAH = 45.0
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use storefront_core::currency::{detect_currency_from_locale, detect_currency_with};
use storefront_core::validation::validate_exchange_rate;
use storefront_core::{Currency, ExchangeRateContext};
use tracing::{debug, info, warn};

use crate::error::{ConfigError, ConfigResult};

// =============================================================================
// Display Settings
// =============================================================================

/// How the display currency is chosen.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DisplaySettings {
    /// Fixed display currency. Wins over `locale`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<Currency>,

    /// Locale tag used to detect the currency when none is fixed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locale: Option<String>,
}

// =============================================================================
// Exchange Rates
// =============================================================================

/// Multipliers from the base currency into each display currency.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExchangeRates {
    #[serde(rename = "EUR", default = "default_rate")]
    pub eur: f64,

    #[serde(rename = "PLN", default = "default_rate")]
    pub pln: f64,

    #[serde(rename = "UAH", default = "default_rate")]
    pub uah: f64,
}

fn default_rate() -> f64 {
    1.0
}

impl Default for ExchangeRates {
    fn default() -> Self {
        ExchangeRates {
            eur: default_rate(),
            pln: default_rate(),
            uah: default_rate(),
        }
    }
}

impl ExchangeRates {
    /// Rate for a currency.
    pub fn get(&self, currency: Currency) -> f64 {
        match currency {
            Currency::Eur => self.eur,
            Currency::Pln => self.pln,
            Currency::Uah => self.uah,
        }
    }

    /// Replaces the rate for a currency.
    pub fn set(&mut self, currency: Currency, rate: f64) {
        match currency {
            Currency::Eur => self.eur = rate,
            Currency::Pln => self.pln = rate,
            Currency::Uah => self.uah = rate,
        }
    }
}

// =============================================================================
// Main Pricing Configuration
// =============================================================================

/// Complete pricing configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PricingConfig {
    #[serde(default)]
    pub display: DisplaySettings,

    #[serde(default)]
    pub rates: ExchangeRates,
}

impl PricingConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// An explicit `config_path` must exist; only the platform default
    /// path may be missing.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (pricing.toml)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> ConfigResult<Self> {
        let mut config = Self::default();

        match config_path {
            Some(path) => {
                if !path.exists() {
                    return Err(ConfigError::NotFound(path));
                }
                config = Self::read_file(&path)?;
            }
            None => match Self::default_config_path() {
                Some(path) if path.exists() => config = Self::read_file(&path)?,
                Some(path) => debug!(?path, "Config file not found, using defaults"),
                None => debug!("No platform config directory, using defaults"),
            },
        }

        config.apply_overrides(|key| std::env::var(key).ok());
        config.validate()?;

        Ok(config)
    }

    fn read_file(path: &Path) -> ConfigResult<Self> {
        info!(?path, "Loading pricing config from file");
        let contents = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&contents)?)
    }

    /// Loads config or returns default if load fails.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load pricing config: {}. Using defaults.", e);
            Self::default()
        })
    }

    /// Saves configuration to file.
    pub fn save(&self, config_path: Option<PathBuf>) -> ConfigResult<()> {
        let path = config_path
            .or_else(Self::default_config_path)
            .ok_or(ConfigError::NoConfigPath)?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)?;
        std::fs::write(&path, contents)?;

        info!(?path, "Pricing config saved");
        Ok(())
    }

    /// Validates the configuration.
    pub fn validate(&self) -> ConfigResult<()> {
        for currency in Currency::ALL {
            validate_exchange_rate(&format!("rates.{}", currency), self.rates.get(currency))?;
        }
        Ok(())
    }

    /// Applies `STOREFRONT_*` overrides from a variable lookup.
    ///
    /// Unparseable values are logged and ignored.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(code) = lookup("STOREFRONT_CURRENCY") {
            match code.parse::<Currency>() {
                Ok(currency) => {
                    debug!(%currency, "Overriding display currency from environment");
                    self.display.currency = Some(currency);
                }
                Err(_) => warn!(code = %code, "Unknown currency in environment"),
            }
        }

        if let Some(locale) = lookup("STOREFRONT_LOCALE") {
            debug!(locale = %locale, "Overriding locale from environment");
            self.display.locale = Some(locale);
        }

        for currency in Currency::ALL {
            let key = format!("STOREFRONT_RATE_{}", currency.code());
            if let Some(raw) = lookup(&key) {
                match raw.trim().parse::<f64>() {
                    Ok(rate) => {
                        debug!(%currency, rate, "Overriding exchange rate from environment");
                        self.rates.set(currency, rate);
                    }
                    Err(_) => warn!(key = %key, value = %raw, "Invalid exchange rate in environment"),
                }
            }
        }
    }

    /// Returns the default config file path.
    pub fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "storefront", "storefront")
            .map(|dirs| dirs.config_dir().join("pricing.toml"))
    }

    // =========================================================================
    // Convenience Methods
    // =========================================================================

    /// The configured display currency.
    ///
    /// A fixed currency wins; otherwise the configured locale decides;
    /// otherwise the process locale does.
    pub fn display_currency(&self) -> Currency {
        self.display_currency_with(|key| std::env::var(key).ok())
    }

    /// [`Self::display_currency`] with the process locale read through `lookup`.
    pub fn display_currency_with<F>(&self, lookup: F) -> Currency
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(currency) = self.display.currency {
            return currency;
        }
        match self.display.locale.as_deref() {
            Some(locale) => detect_currency_from_locale(Some(locale)),
            None => detect_currency_with(lookup),
        }
    }

    /// Conversion context for a given currency.
    pub fn context_for(&self, currency: Currency) -> ExchangeRateContext {
        ExchangeRateContext::new(currency, self.rates.get(currency))
    }

    /// Conversion context for the configured display currency.
    pub fn display_context(&self) -> ExchangeRateContext {
        self.context_for(self.display_currency())
    }
}
