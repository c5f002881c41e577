//! Configuration loading from TOML.
//!
//! Reads `config.toml` (or the file named by `QUOTE_WIZARD_CONFIG`) into
//! strongly-typed structs. Every key is optional; anything absent falls back
//! to the built-in pricing policy and the default quote page.

use anyhow::{Context, Result};
use rust_decimal::prelude::*;
use serde::Deserialize;
use std::fs;
use std::path::Path;
use tracing::info;

use crate::handoff::redirect::DEFAULT_DESTINATION;
use crate::pricing::PricingTable;
use crate::types::WizardError;
use crate::wizard::validation::ValidationRules;

/// Environment variable naming the config file.
pub const CONFIG_PATH_ENV: &str = "QUOTE_WIZARD_CONFIG";

/// Config file used when the environment does not name one.
pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

/// Top-level application configuration.
#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct AppConfig {
    pub pricing: PricingConfig,
    pub wizard: WizardConfig,
    pub handoff: HandoffConfig,
}

/// Pricing overrides. Keys are snake_case; the camelCase option names used
/// by the embedding page are accepted as aliases.
#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct PricingConfig {
    #[serde(alias = "basePriceLanding")]
    pub base_price_landing: Option<f64>,
    #[serde(alias = "basePricePresentation")]
    pub base_price_presentation: Option<f64>,
    #[serde(alias = "basePriceEcommerce")]
    pub base_price_ecommerce: Option<f64>,
    #[serde(alias = "basePriceCustom")]
    pub base_price_custom: Option<f64>,
    #[serde(alias = "perPageRate")]
    pub per_page_rate: Option<f64>,
    #[serde(alias = "designMultiplierBasic")]
    pub design_multiplier_basic: Option<f64>,
    #[serde(alias = "designMultiplierPremium")]
    pub design_multiplier_premium: Option<f64>,
    #[serde(alias = "designMultiplierCustom")]
    pub design_multiplier_custom: Option<f64>,
}

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct WizardConfig {
    /// Block step 4 on a malformed (non-empty) email address.
    pub enforce_email_format: bool,
}

#[derive(Debug, Deserialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TransportKind {
    #[default]
    Redirect,
    JsonFile,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct HandoffConfig {
    pub transport: TransportKind,
    /// Quote page the redirect transport appends the payload to.
    pub destination: String,
    /// Output file for the `json_file` transport.
    pub output_path: Option<String>,
}

impl Default for HandoffConfig {
    fn default() -> Self {
        Self {
            transport: TransportKind::Redirect,
            destination: DEFAULT_DESTINATION.to_string(),
            output_path: None,
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &str) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {path}"))?;
        Self::parse(&contents).with_context(|| format!("Failed to parse config file: {path}"))
    }

    /// Load from `path`, or fall back to defaults when the file does not exist.
    pub fn load_or_default(path: &str) -> Result<Self> {
        if !Path::new(path).exists() {
            info!(path, "No config file found, using default pricing");
            return Ok(Self::default());
        }
        Self::load(path)
    }

    /// Config path from the environment, or [`DEFAULT_CONFIG_PATH`].
    pub fn path_from_env() -> String {
        std::env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string())
    }

    pub fn parse(contents: &str) -> Result<Self> {
        let config: AppConfig = toml::from_str(contents)?;
        config.pricing.to_table()?;
        Ok(config)
    }
}

impl PricingConfig {
    /// Resolve overrides against the default table.
    pub fn to_table(&self) -> Result<PricingTable, WizardError> {
        let defaults = PricingTable::default();
        let table = PricingTable {
            base_landing: amount(
                "base_price_landing",
                self.base_price_landing,
                defaults.base_landing,
            )?,
            base_presentation: amount(
                "base_price_presentation",
                self.base_price_presentation,
                defaults.base_presentation,
            )?,
            base_ecommerce: amount(
                "base_price_ecommerce",
                self.base_price_ecommerce,
                defaults.base_ecommerce,
            )?,
            base_custom: amount("base_price_custom", self.base_price_custom, defaults.base_custom)?,
            per_page_rate: amount("per_page_rate", self.per_page_rate, defaults.per_page_rate)?,
            multiplier_basic: amount(
                "design_multiplier_basic",
                self.design_multiplier_basic,
                defaults.multiplier_basic,
            )?,
            multiplier_premium: amount(
                "design_multiplier_premium",
                self.design_multiplier_premium,
                defaults.multiplier_premium,
            )?,
            multiplier_custom: amount(
                "design_multiplier_custom",
                self.design_multiplier_custom,
                defaults.multiplier_custom,
            )?,
        };
        table.validate()?;
        Ok(table)
    }
}

impl WizardConfig {
    pub fn rules(&self) -> ValidationRules {
        ValidationRules {
            enforce_email_format: self.enforce_email_format,
        }
    }
}

fn amount(name: &str, value: Option<f64>, default: Decimal) -> Result<Decimal, WizardError> {
    let Some(v) = value else {
        return Ok(default);
    };
    if !v.is_finite() || v < 0.0 {
        return Err(WizardError::Config(format!(
            "pricing.{name} must be a non-negative number, got {v}"
        )));
    }
    Decimal::from_f64(v)
        .ok_or_else(|| WizardError::Config(format!("pricing.{name} is out of range: {v}")))
}
