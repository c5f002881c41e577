//! Shared types for the quote wizard.
//!
//! The selection set, its closed field identifiers, the catalogue enums
//! (project type, design tier), the price quote, and the crate error type.
//! Pricing, validation and the wizard itself all depend on these without
//! depending on each other.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Pages included in every base price; only pages beyond this are charged.
pub const INCLUDED_PAGES: u64 = 5;

// ---------------------------------------------------------------------------
// Catalogue enums
// ---------------------------------------------------------------------------

/// Kind of website being quoted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectType {
    Landing,
    Presentation,
    Ecommerce,
    Custom,
}

impl ProjectType {
    pub const ALL: &'static [ProjectType] = &[
        ProjectType::Landing,
        ProjectType::Presentation,
        ProjectType::Ecommerce,
        ProjectType::Custom,
    ];

    /// Identifier used in option cards and in the handoff payload.
    pub fn key(&self) -> &'static str {
        match self {
            ProjectType::Landing => "landing",
            ProjectType::Presentation => "presentation",
            ProjectType::Ecommerce => "ecommerce",
            ProjectType::Custom => "custom",
        }
    }

    /// Human-readable label shown on the quote page.
    pub fn label(&self) -> &'static str {
        match self {
            ProjectType::Landing => "Landing Page",
            ProjectType::Presentation => "Site de Prezentare",
            ProjectType::Ecommerce => "Magazin Online",
            ProjectType::Custom => "Aplicatie Custom",
        }
    }

    /// Label for a raw selection value, falling back to the raw value itself.
    pub fn label_for(raw: &str) -> String {
        raw.parse::<ProjectType>()
            .map(|t| t.label().to_string())
            .unwrap_or_else(|_| raw.to_string())
    }
}

impl fmt::Display for ProjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

/// Option keys are matched exactly; option cards always emit lowercase keys.
impl FromStr for ProjectType {
    type Err = WizardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "landing" => Ok(ProjectType::Landing),
            "presentation" => Ok(ProjectType::Presentation),
            "ecommerce" => Ok(ProjectType::Ecommerce),
            "custom" => Ok(ProjectType::Custom),
            _ => Err(WizardError::UnknownOption {
                field: Field::ProjectType,
                value: s.to_string(),
            }),
        }
    }
}

/// Visual design tier; scales the whole price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DesignTier {
    Basic,
    Premium,
    Custom,
}

impl DesignTier {
    pub const ALL: &'static [DesignTier] =
        &[DesignTier::Basic, DesignTier::Premium, DesignTier::Custom];

    pub fn key(&self) -> &'static str {
        match self {
            DesignTier::Basic => "basic",
            DesignTier::Premium => "premium",
            DesignTier::Custom => "custom",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            DesignTier::Basic => "Basic",
            DesignTier::Premium => "Premium",
            DesignTier::Custom => "Custom",
        }
    }

    pub fn label_for(raw: &str) -> String {
        raw.parse::<DesignTier>()
            .map(|t| t.label().to_string())
            .unwrap_or_else(|_| raw.to_string())
    }
}

impl fmt::Display for DesignTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

impl FromStr for DesignTier {
    type Err = WizardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "basic" => Ok(DesignTier::Basic),
            "premium" => Ok(DesignTier::Premium),
            "custom" => Ok(DesignTier::Custom),
            _ => Err(WizardError::UnknownOption {
                field: Field::DesignTier,
                value: s.to_string(),
            }),
        }
    }
}

// ---------------------------------------------------------------------------
// Selection set
// ---------------------------------------------------------------------------

/// Identifier of a selection-set field. Closed: a typo cannot be stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Field {
    ProjectType,
    PageCount,
    DesignTier,
    ContactName,
    ContactPhone,
    ContactEmail,
}

impl Field {
    pub const ALL: &'static [Field] = &[
        Field::ProjectType,
        Field::PageCount,
        Field::DesignTier,
        Field::ContactName,
        Field::ContactPhone,
        Field::ContactEmail,
    ];

    /// Name used by the host form (`data-field` / input `name`).
    pub fn form_name(&self) -> &'static str {
        match self {
            Field::ProjectType => "type",
            Field::PageCount => "pages",
            Field::DesignTier => "design",
            Field::ContactName => "name",
            Field::ContactPhone => "phone",
            Field::ContactEmail => "email",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.form_name())
    }
}

/// Resolve a host-supplied field name. Accepts the form names
/// (`type`, `pages`, ...) and the long names (`projectType`, `pageCount`, ...).
impl FromStr for Field {
    type Err = WizardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "type" | "projectType" => Ok(Field::ProjectType),
            "pages" | "pageCount" => Ok(Field::PageCount),
            "design" | "designTier" => Ok(Field::DesignTier),
            "name" | "contactName" => Ok(Field::ContactName),
            "phone" | "contactPhone" => Ok(Field::ContactPhone),
            "email" | "contactEmail" => Ok(Field::ContactEmail),
            _ => Err(WizardError::UnknownField(s.to_string())),
        }
    }
}

/// The user's accumulated choices. Every field exists from construction.
///
/// Enum-like fields hold the raw selected key rather than a parsed enum so
/// that an unexpected key still flows through pricing (with fallbacks) and
/// into the handoff payload unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionSet {
    pub project_type: String,
    pub page_count: String,
    pub design_tier: String,
    pub contact_name: String,
    pub contact_phone: String,
    pub contact_email: String,
}

impl Default for SelectionSet {
    fn default() -> Self {
        Self {
            project_type: String::new(),
            page_count: INCLUDED_PAGES.to_string(),
            design_tier: String::new(),
            contact_name: String::new(),
            contact_phone: String::new(),
            contact_email: String::new(),
        }
    }
}

impl SelectionSet {
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::ProjectType => &self.project_type,
            Field::PageCount => &self.page_count,
            Field::DesignTier => &self.design_tier,
            Field::ContactName => &self.contact_name,
            Field::ContactPhone => &self.contact_phone,
            Field::ContactEmail => &self.contact_email,
        }
    }

    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        let slot = match field {
            Field::ProjectType => &mut self.project_type,
            Field::PageCount => &mut self.page_count,
            Field::DesignTier => &mut self.design_tier,
            Field::ContactName => &mut self.contact_name,
            Field::ContactPhone => &mut self.contact_phone,
            Field::ContactEmail => &mut self.contact_email,
        };
        *slot = value.into();
    }

    /// Page count as a positive integer, or `None` if the input is not one.
    pub fn pages(&self) -> Option<u64> {
        parse_page_count(&self.page_count)
    }

    pub fn project_type(&self) -> Option<ProjectType> {
        self.project_type.parse().ok()
    }

    pub fn design_tier(&self) -> Option<DesignTier> {
        self.design_tier.parse().ok()
    }
}

/// Parse user-typed page count the way a browser number field is read:
/// leading whitespace and an optional sign are skipped, then the leading
/// run of digits is taken (`"3.5"` is 3, `"10 pages"` is 10). Counts too
/// large for `u64` saturate. Anything without a positive leading integer
/// yields `None`.
pub fn parse_page_count(raw: &str) -> Option<u64> {
    let trimmed = raw.trim_start();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let digits_len = rest.bytes().take_while(u8::is_ascii_digit).count();
    if digits_len == 0 {
        return None;
    }

    let value = rest[..digits_len]
        .bytes()
        .fold(0u64, |acc, d| acc.saturating_mul(10).saturating_add(u64::from(d - b'0')));

    (!negative && value > 0).then_some(value)
}

// ---------------------------------------------------------------------------
// Price quote
// ---------------------------------------------------------------------------

/// Result of the pricing engine. All three values are whole, non-negative
/// amounts with `min <= total <= max`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceQuote {
    pub min: Decimal,
    pub max: Decimal,
    pub total: Decimal,
}

impl fmt::Display for PriceQuote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {} (estimate {})", self.min, self.max, self.total)
    }
}

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Errors raised at the edges of the wizard. The state machine itself never
/// fails: invalid input only keeps the forward control disabled.
#[derive(Debug, thiserror::Error)]
pub enum WizardError {
    #[error("Unknown field: {0}")]
    UnknownField(String),

    #[error("Unknown option for {field}: {value}")]
    UnknownOption { field: Field, value: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Handoff failed ({transport}): {message}")]
    Handoff { transport: String, message: String },
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
