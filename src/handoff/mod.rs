//! Submission handoff.
//!
//! Builds the flat payload handed to the quote page once the wizard is
//! complete, and defines the `HandoffSink` trait with two transports:
//! - `redirect`: query string appended to the destination URL
//! - `json_file`: payload written as a JSON object to disk

pub mod json_file;
pub mod redirect;

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::config::{HandoffConfig, TransportKind};
use crate::types::{DesignTier, PriceQuote, ProjectType, SelectionSet, WizardError};

pub use json_file::JsonFileSink;
pub use redirect::QueryStringRedirect;

// ---------------------------------------------------------------------------
// Payload
// ---------------------------------------------------------------------------

/// Data handed to the destination page. Every value is a string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HandoffPayload {
    pub name: String,
    pub phone: String,
    pub email: String,
    #[serde(rename = "type")]
    pub project_type: String,
    pub type_name: String,
    pub pages: String,
    pub design: String,
    pub design_name: String,
    pub price_min: String,
    pub price_max: String,
}

impl HandoffPayload {
    /// Assemble the payload from a completed selection and its quote.
    /// Labels fall back to the raw selection value when it is not in the
    /// catalogue.
    pub fn new(selection: &SelectionSet, quote: &PriceQuote) -> Self {
        Self {
            name: selection.contact_name.clone(),
            phone: selection.contact_phone.clone(),
            email: selection.contact_email.clone(),
            project_type: selection.project_type.clone(),
            type_name: ProjectType::label_for(&selection.project_type),
            pages: selection.page_count.clone(),
            design: selection.design_tier.clone(),
            design_name: DesignTier::label_for(&selection.design_tier),
            price_min: quote.min.to_string(),
            price_max: quote.max.to_string(),
        }
    }

    /// Key/value pairs in the order the destination page expects them.
    pub fn pairs(&self) -> [(&'static str, &str); 10] {
        [
            ("name", self.name.as_str()),
            ("phone", self.phone.as_str()),
            ("email", self.email.as_str()),
            ("type", self.project_type.as_str()),
            ("typeName", self.type_name.as_str()),
            ("pages", self.pages.as_str()),
            ("design", self.design.as_str()),
            ("designName", self.design_name.as_str()),
            ("priceMin", self.price_min.as_str()),
            ("priceMax", self.price_max.as_str()),
        ]
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs().into_iter().find(|(k, _)| *k == key).map(|(_, v)| v)
    }

    /// `application/x-www-form-urlencoded`-style query string (no leading `?`).
    pub fn to_query_string(&self) -> String {
        self.pairs()
            .iter()
            .map(|(k, v)| format!("{k}={}", urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&")
    }
}

// ---------------------------------------------------------------------------
// Transport
// ---------------------------------------------------------------------------

/// What a transport did with the payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HandoffReceipt {
    /// The host should navigate to this URL.
    Redirect { url: String },
    /// The payload was written to this file.
    Written { path: PathBuf },
}

/// Destination for a completed wizard. Encoding and delivery are entirely
/// the transport's concern; the wizard only produces the payload.
#[cfg_attr(test, mockall::automock)]
pub trait HandoffSink {
    /// Deliver the payload.
    fn deliver(&self, payload: &HandoffPayload) -> Result<HandoffReceipt, WizardError>;

    /// Transport name for logging.
    fn name(&self) -> &'static str;
}

/// Build the transport selected in configuration.
pub fn build_sink(config: &HandoffConfig) -> Result<Box<dyn HandoffSink>, WizardError> {
    match config.transport {
        TransportKind::Redirect => Ok(Box::new(QueryStringRedirect::new(&config.destination))),
        TransportKind::JsonFile => {
            let path = config.output_path.as_deref().ok_or_else(|| {
                WizardError::Config(
                    "handoff.output_path is required for the json_file transport".into(),
                )
            })?;
            Ok(Box::new(JsonFileSink::new(path)))
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
