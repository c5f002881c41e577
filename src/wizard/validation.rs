//! Per-step validation rules.
//!
//! | step | rule |
//! |------|------|
//! | 1 | project type chosen |
//! | 2 | page count is a positive integer |
//! | 3 | design tier chosen |
//! | 4 | name given and phone has at least [`MIN_PHONE_DIGITS`] digits |
//!
//! The email check is only part of step 4 when
//! [`ValidationRules::enforce_email_format`] is set; by default a malformed
//! email does not block submission.

use regex::Regex;
use std::sync::LazyLock;

use super::step::Step;
use crate::types::SelectionSet;

/// Digits required in a phone number once separators are stripped.
pub const MIN_PHONE_DIGITS: usize = 10;

static EMAIL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles"));

/// Switches that tune the rule table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ValidationRules {
    /// Require a well-formed email (when one is given) to leave step 4.
    pub enforce_email_format: bool,
}

impl ValidationRules {
    /// Whether `step` may be left going forward with this selection.
    pub fn step_is_valid(&self, step: Step, selection: &SelectionSet) -> bool {
        match step {
            Step::ProjectType => !selection.project_type.is_empty(),
            Step::PageCount => selection.pages().is_some(),
            Step::DesignTier => !selection.design_tier.is_empty(),
            Step::Contact => {
                let contact_ok = !selection.contact_name.is_empty()
                    && is_valid_phone(&selection.contact_phone);
                if self.enforce_email_format {
                    contact_ok && is_valid_email(&selection.contact_email)
                } else {
                    contact_ok
                }
            }
        }
    }
}

/// At least [`MIN_PHONE_DIGITS`] digits, ignoring spaces, dashes, `+` etc.
pub fn is_valid_phone(phone: &str) -> bool {
    phone.chars().filter(|c| c.is_ascii_digit()).count() >= MIN_PHONE_DIGITS
}

/// Empty is valid (the field is optional); otherwise `local@domain.tld`.
pub fn is_valid_email(email: &str) -> bool {
    email.is_empty() || EMAIL_PATTERN.is_match(email)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
