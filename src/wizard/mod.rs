//! Wizard state machine.
//!
//! A session walks four steps (project type → page count → design tier →
//! contact). Moving forward requires the current step to validate; moving
//! back never does. Advancing from the last step prices the selection and
//! produces the handoff payload, after which the session is closed.
//!
//! Nothing here fails: invalid input leaves the forward control disabled
//! and out-of-range moves are no-ops. Validity is always recomputed from the
//! selection, never cached.

pub mod controls;
pub mod step;
pub mod validation;

use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::config::AppConfig;
use crate::handoff::{HandoffPayload, HandoffReceipt, HandoffSink};
use crate::pricing::{compute_quote, PricingTable};
use crate::types::{Field, PriceQuote, SelectionSet, WizardError};
use controls::ControlState;
use step::Step;
use validation::ValidationRules;

/// Result of a completed wizard: the quote and the data for the quote page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub quote: PriceQuote,
    pub payload: HandoffPayload,
}

/// Outcome of a navigation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    Moved { from: Step, to: Step },
    /// Advanced from the last step; the session is now closed.
    Submitted(Submission),
    /// Current step does not validate; nothing changed.
    Blocked { step: Step },
    /// Nowhere to go (retreat on the first step, or session already closed).
    Unchanged,
}

/// One visitor's pass through the wizard.
pub struct WizardSession {
    id: Uuid,
    step: Step,
    selection: SelectionSet,
    pricing: PricingTable,
    rules: ValidationRules,
    quote: Option<PriceQuote>,
}

impl WizardSession {
    pub fn new(pricing: PricingTable) -> Self {
        Self::with_rules(pricing, ValidationRules::default())
    }

    pub fn with_rules(pricing: PricingTable, rules: ValidationRules) -> Self {
        let id = Uuid::new_v4();
        debug!(session_id = %id, "Wizard session started");
        Self {
            id,
            step: Step::FIRST,
            selection: SelectionSet::default(),
            pricing,
            rules,
            quote: None,
        }
    }

    pub fn from_config(config: &AppConfig) -> Result<Self, WizardError> {
        Ok(Self::with_rules(config.pricing.to_table()?, config.wizard.rules()))
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn current_step(&self) -> Step {
        self.step
    }

    pub fn selection(&self) -> &SelectionSet {
        &self.selection
    }

    pub fn pricing(&self) -> &PricingTable {
        &self.pricing
    }

    /// Quote produced on submission, if the wizard has been completed.
    pub fn quote(&self) -> Option<&PriceQuote> {
        self.quote.as_ref()
    }

    pub fn is_submitted(&self) -> bool {
        self.quote.is_some()
    }

    pub fn step_is_valid(&self, step: Step) -> bool {
        self.rules.step_is_valid(step, &self.selection)
    }

    pub fn is_current_step_valid(&self) -> bool {
        self.step_is_valid(self.step)
    }

    /// What the host should display right now.
    pub fn controls(&self) -> ControlState {
        ControlState::new(self.step, !self.is_submitted() && self.is_current_step_valid())
    }

    // -- Field updates ---------------------------------------------------

    /// Record an option-card choice (project type, design tier).
    pub fn select_option(&mut self, field: Field, value: &str) {
        self.write(field, value);
    }

    /// Record free-text or numeric input.
    pub fn set_field(&mut self, field: Field, value: &str) {
        self.write(field, value);
    }

    /// Record input addressed by its form name. Unknown names are rejected
    /// rather than stored.
    pub fn set_field_by_name(&mut self, name: &str, value: &str) -> Result<(), WizardError> {
        let field = name.parse::<Field>().inspect_err(|_| {
            warn!(session_id = %self.id, field = name, "Rejected unknown field");
        })?;
        self.write(field, value);
        Ok(())
    }

    fn write(&mut self, field: Field, value: &str) {
        if self.is_submitted() {
            debug!(session_id = %self.id, %field, "Session closed, ignoring input");
            return;
        }
        self.selection.set(field, value);
        debug!(
            session_id = %self.id,
            %field,
            step = self.step.number(),
            step_valid = self.is_current_step_valid(),
            "Field updated"
        );
    }

    // -- Navigation ------------------------------------------------------

    /// Move forward if the current step validates. On the last step this
    /// computes the quote and builds the handoff payload instead.
    pub fn advance(&mut self) -> Transition {
        if self.is_submitted() {
            debug!(session_id = %self.id, "Session closed, ignoring advance");
            return Transition::Unchanged;
        }

        if !self.is_current_step_valid() {
            debug!(
                session_id = %self.id,
                step = self.step.number(),
                "Advance blocked by validation"
            );
            return Transition::Blocked { step: self.step };
        }

        match self.step.next() {
            Some(to) => {
                let from = self.step;
                self.step = to;
                debug!(session_id = %self.id, from = from.number(), to = to.number(), "Advanced");
                Transition::Moved { from, to }
            }
            None => Transition::Submitted(self.submit()),
        }
    }

    /// Move back one step. No validation; no-op on the first step.
    pub fn retreat(&mut self) -> Transition {
        if self.is_submitted() {
            return Transition::Unchanged;
        }
        match self.step.previous() {
            Some(to) => {
                let from = self.step;
                self.step = to;
                debug!(session_id = %self.id, from = from.number(), to = to.number(), "Retreated");
                Transition::Moved { from, to }
            }
            None => Transition::Unchanged,
        }
    }

    /// Advance, and if that completes the wizard hand the payload to `sink`.
    ///
    /// Returns the transport receipt on submission. A failed delivery
    /// reopens the session on the last step so the visitor can retry.
    pub fn advance_with(
        &mut self,
        sink: &dyn HandoffSink,
    ) -> Result<Option<HandoffReceipt>, WizardError> {
        let Transition::Submitted(submission) = self.advance() else {
            return Ok(None);
        };

        let transport = sink.name();
        match sink.deliver(&submission.payload) {
            Ok(receipt) => {
                info!(session_id = %self.id, transport, "Handoff delivered");
                Ok(Some(receipt))
            }
            Err(e) => {
                warn!(session_id = %self.id, transport, error = %e, "Handoff failed");
                self.quote = None;
                Err(e)
            }
        }
    }

    fn submit(&mut self) -> Submission {
        let quote = compute_quote(&self.selection, &self.pricing);
        let payload = HandoffPayload::new(&self.selection, &quote);
        self.quote = Some(quote);

        info!(
            session_id = %self.id,
            project_type = %self.selection.project_type,
            pages = %self.selection.page_count,
            design_tier = %self.selection.design_tier,
            price_min = %quote.min,
            price_max = %quote.max,
            "Wizard completed"
        );

        Submission { quote, payload }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
