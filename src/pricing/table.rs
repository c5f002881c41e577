//! Pricing table: base prices, per-page rate and design multipliers.
//!
//! Built once per session from defaults, the TOML `[pricing]` section, or a
//! string option map (one entry per data attribute on the host element).

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::str::FromStr;
use tracing::warn;

use crate::types::{DesignTier, ProjectType, WizardError};

/// Largest amount accepted for any table entry. Keeps every quote well
/// inside `Decimal` range for realistic page counts.
pub const MAX_TABLE_AMOUNT: Decimal = dec!(1000000000000);

/// Immutable pricing policy for one wizard session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PricingTable {
    pub base_landing: Decimal,
    pub base_presentation: Decimal,
    pub base_ecommerce: Decimal,
    pub base_custom: Decimal,
    /// Charged for each page beyond the included ones.
    pub per_page_rate: Decimal,
    pub multiplier_basic: Decimal,
    pub multiplier_premium: Decimal,
    pub multiplier_custom: Decimal,
}

impl Default for PricingTable {
    fn default() -> Self {
        Self {
            base_landing: dec!(500),
            base_presentation: dec!(1000),
            base_ecommerce: dec!(2500),
            base_custom: dec!(5000),
            per_page_rate: dec!(100),
            multiplier_basic: dec!(1),
            multiplier_premium: dec!(1.5),
            multiplier_custom: dec!(2),
        }
    }
}

/// Recognized option names, paired with the attribute names the host
/// markup has historically used for the same value.
const OPTION_KEYS: &[(&str, &str)] = &[
    ("basePriceLanding", "priceLanding"),
    ("basePricePresentation", "pricePresentation"),
    ("basePriceEcommerce", "priceEcommerce"),
    ("basePriceCustom", "priceCustom"),
    ("perPageRate", "pricePerPage"),
    ("designMultiplierBasic", "designBasic"),
    ("designMultiplierPremium", "designPremium"),
    ("designMultiplierCustom", "designCustom"),
];

impl PricingTable {
    pub fn base_price_for(&self, project: ProjectType) -> Decimal {
        match project {
            ProjectType::Landing => self.base_landing,
            ProjectType::Presentation => self.base_presentation,
            ProjectType::Ecommerce => self.base_ecommerce,
            ProjectType::Custom => self.base_custom,
        }
    }

    pub fn multiplier_for(&self, tier: DesignTier) -> Decimal {
        match tier {
            DesignTier::Basic => self.multiplier_basic,
            DesignTier::Premium => self.multiplier_premium,
            DesignTier::Custom => self.multiplier_custom,
        }
    }

    /// Reject negative amounts and amounts above [`MAX_TABLE_AMOUNT`].
    /// Every quote guarantee assumes a non-negative table.
    pub fn validate(&self) -> Result<(), WizardError> {
        for (name, value) in self.entries() {
            if !in_range(value) {
                return Err(WizardError::Config(format!(
                    "{name} must be between 0 and {MAX_TABLE_AMOUNT}, got {value}"
                )));
            }
        }
        Ok(())
    }

    /// Build a table from string options such as host data attributes.
    ///
    /// Parsing is lenient: absent, unparseable, negative or oversized values
    /// keep the default (with a warning for all but the first); unknown keys
    /// are ignored.
    pub fn from_options<I, K, V>(options: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut table = Self::default();

        for (key, raw) in options {
            let key = key.as_ref();
            let raw = raw.as_ref().trim();

            let Some(canonical) = OPTION_KEYS
                .iter()
                .find(|(long, short)| *long == key || *short == key)
                .map(|(long, _)| *long)
            else {
                warn!(option = key, "Ignoring unknown pricing option");
                continue;
            };

            let value = match Decimal::from_str(raw) {
                Ok(v) if in_range(v) => v,
                _ => {
                    warn!(
                        option = canonical,
                        value = raw,
                        "Invalid pricing option, keeping default"
                    );
                    continue;
                }
            };

            *table.slot_mut(canonical) = value;
        }

        table
    }

    fn entries(&self) -> [(&'static str, Decimal); 8] {
        [
            ("basePriceLanding", self.base_landing),
            ("basePricePresentation", self.base_presentation),
            ("basePriceEcommerce", self.base_ecommerce),
            ("basePriceCustom", self.base_custom),
            ("perPageRate", self.per_page_rate),
            ("designMultiplierBasic", self.multiplier_basic),
            ("designMultiplierPremium", self.multiplier_premium),
            ("designMultiplierCustom", self.multiplier_custom),
        ]
    }

    fn slot_mut(&mut self, canonical: &str) -> &mut Decimal {
        match canonical {
            "basePriceLanding" => &mut self.base_landing,
            "basePricePresentation" => &mut self.base_presentation,
            "basePriceEcommerce" => &mut self.base_ecommerce,
            "basePriceCustom" => &mut self.base_custom,
            "perPageRate" => &mut self.per_page_rate,
            "designMultiplierBasic" => &mut self.multiplier_basic,
            "designMultiplierPremium" => &mut self.multiplier_premium,
            _ => &mut self.multiplier_custom,
        }
    }
}

fn in_range(value: Decimal) -> bool {
    value >= Decimal::ZERO && value <= MAX_TABLE_AMOUNT
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let t = PricingTable::default();
        assert_eq!(t.base_price_for(ProjectType::Landing), dec!(500));
        assert_eq!(t.base_price_for(ProjectType::Presentation), dec!(1000));
        assert_eq!(t.base_price_for(ProjectType::Ecommerce), dec!(2500));
        assert_eq!(t.base_price_for(ProjectType::Custom), dec!(5000));
        assert_eq!(t.per_page_rate, dec!(100));
        assert_eq!(t.multiplier_for(DesignTier::Basic), dec!(1));
        assert_eq!(t.multiplier_for(DesignTier::Premium), dec!(1.5));
        assert_eq!(t.multiplier_for(DesignTier::Custom), dec!(2));
        assert!(t.validate().is_ok());
    }

    #[test]
    fn test_from_options_overrides() {
        let t = PricingTable::from_options([
            ("basePriceLanding", "750"),
            ("perPageRate", "80"),
            ("designMultiplierPremium", "1.25"),
        ]);
        assert_eq!(t.base_landing, dec!(750));
        assert_eq!(t.per_page_rate, dec!(80));
        assert_eq!(t.multiplier_premium, dec!(1.25));
        // Untouched values keep their defaults
        assert_eq!(t.base_custom, dec!(5000));
    }

    #[test]
    fn test_from_options_accepts_attribute_names() {
        let t = PricingTable::from_options([("priceEcommerce", "3000"), ("designCustom", "2.5")]);
        assert_eq!(t.base_ecommerce, dec!(3000));
        assert_eq!(t.multiplier_custom, dec!(2.5));
    }

    #[test]
    fn test_from_options_is_lenient() {
        let t = PricingTable::from_options([
            ("basePriceLanding", "cheap"),
            ("perPageRate", "-10"),
            ("unknownKey", "42"),
            ("basePriceCustom", ""),
        ]);
        assert_eq!(t, PricingTable::default());
    }

    #[test]
    fn test_from_options_allows_zero() {
        let t = PricingTable::from_options([("perPageRate", "0")]);
        assert_eq!(t.per_page_rate, Decimal::ZERO);
    }

    #[test]
    fn test_validate_rejects_negative() {
        let t = PricingTable {
            multiplier_basic: dec!(-1),
            ..Default::default()
        };
        let err = t.validate().unwrap_err();
        assert!(err.to_string().contains("designMultiplierBasic"));
    }

    #[test]
    fn test_from_options_rejects_oversized_values() {
        let t = PricingTable::from_options([
            ("perPageRate", "100000000000000000000"),
            ("basePriceCustom", "70000000000000000000000000000"),
            ("designMultiplierBasic", "1000000000000"),
        ]);
        assert_eq!(t.per_page_rate, dec!(100));
        assert_eq!(t.base_custom, dec!(5000));
        // The bound itself is accepted
        assert_eq!(t.multiplier_basic, MAX_TABLE_AMOUNT);
        assert!(t.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_oversized() {
        let t = PricingTable {
            base_custom: MAX_TABLE_AMOUNT + dec!(1),
            ..Default::default()
        };
        let err = t.validate().unwrap_err();
        assert!(err.to_string().contains("basePriceCustom"));
    }
}
