//! Query-string redirect transport.
//!
//! Appends the encoded payload to an opaque destination; the host performs
//! the navigation.

use tracing::info;

use super::{HandoffPayload, HandoffReceipt, HandoffSink};
use crate::types::WizardError;

/// Default quote page on the host site.
pub const DEFAULT_DESTINATION: &str = "/pages/oferta";

pub struct QueryStringRedirect {
    destination: String,
}

impl QueryStringRedirect {
    pub fn new(destination: &str) -> Self {
        Self {
            destination: destination.to_string(),
        }
    }

    /// Destination URL with the payload appended, keeping any query the
    /// destination already carries.
    pub fn target_url(&self, payload: &HandoffPayload) -> String {
        let separator = if self.destination.contains('?') { '&' } else { '?' };
        format!("{}{separator}{}", self.destination, payload.to_query_string())
    }
}

impl Default for QueryStringRedirect {
    fn default() -> Self {
        Self::new(DEFAULT_DESTINATION)
    }
}

impl HandoffSink for QueryStringRedirect {
    fn deliver(&self, payload: &HandoffPayload) -> Result<HandoffReceipt, WizardError> {
        let url = self.target_url(payload);
        info!(destination = %self.destination, "Redirecting to quote page");
        Ok(HandoffReceipt::Redirect { url })
    }

    fn name(&self) -> &'static str {
        "redirect"
    }
}
