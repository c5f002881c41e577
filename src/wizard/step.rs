//! Wizard steps.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of steps in the wizard.
pub const TOTAL_STEPS: u8 = 4;

/// One screen of the wizard, in presentation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Step {
    ProjectType,
    PageCount,
    DesignTier,
    Contact,
}

impl Step {
    pub const FIRST: Step = Step::ProjectType;
    pub const LAST: Step = Step::Contact;

    pub const ALL: &'static [Step] = &[
        Step::ProjectType,
        Step::PageCount,
        Step::DesignTier,
        Step::Contact,
    ];

    /// 1-based position of the step.
    pub fn number(&self) -> u8 {
        match self {
            Step::ProjectType => 1,
            Step::PageCount => 2,
            Step::DesignTier => 3,
            Step::Contact => 4,
        }
    }

    pub fn from_number(n: u8) -> Option<Step> {
        match n {
            1 => Some(Step::ProjectType),
            2 => Some(Step::PageCount),
            3 => Some(Step::DesignTier),
            4 => Some(Step::Contact),
            _ => None,
        }
    }

    pub fn next(&self) -> Option<Step> {
        Step::from_number(self.number() + 1)
    }

    pub fn previous(&self) -> Option<Step> {
        Step::from_number(self.number().checked_sub(1)?)
    }

    pub fn is_last(&self) -> bool {
        *self == Step::LAST
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Step::ProjectType => "project type",
            Step::PageCount => "page count",
            Step::DesignTier => "design tier",
            Step::Contact => "contact",
        };
        write!(f, "{}/{} ({name})", self.number(), TOTAL_STEPS)
    }
}
