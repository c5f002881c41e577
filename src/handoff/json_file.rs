//! JSON file transport.
//!
//! Writes the payload as a pretty-printed JSON object, for hosts that pick
//! submissions up from disk instead of following a redirect.

use std::path::{Path, PathBuf};
use tracing::{debug, info};

use super::{HandoffPayload, HandoffReceipt, HandoffSink};
use crate::types::WizardError;

pub struct JsonFileSink {
    path: PathBuf,
}

impl JsonFileSink {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    fn failure(&self, message: String) -> WizardError {
        WizardError::Handoff {
            transport: self.name().to_string(),
            message,
        }
    }
}

impl HandoffSink for JsonFileSink {
    fn deliver(&self, payload: &HandoffPayload) -> Result<HandoffReceipt, WizardError> {
        let json = serde_json::to_string_pretty(payload)
            .map_err(|e| self.failure(format!("failed to serialise payload: {e}")))?;

        std::fs::write(&self.path, &json).map_err(|e| {
            self.failure(format!("failed to write {}: {e}", self.path.display()))
        })?;

        debug!(bytes = json.len(), "Payload serialised");
        info!(path = %self.path.display(), "Quote request written");
        Ok(HandoffReceipt::Written {
            path: self.path.clone(),
        })
    }

    fn name(&self) -> &'static str {
        "json_file"
    }
}
