//! Navigation control state.
//!
//! Snapshot of what the host surface should show for the current step:
//! forward button enabled/label, back button visibility, progress bar.
//! Recomputed from the session on every query; the host polls it after each
//! event instead of being notified.

use serde::Serialize;

use super::step::{Step, TOTAL_STEPS};

/// Forward label on intermediate steps.
pub const CONTINUE_LABEL: &str = "Continua";

/// Forward label on the final step, where advancing submits.
pub const SUBMIT_LABEL: &str = "Vezi Oferta";

/// One marker in the progress indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ProgressMarker {
    /// Step reached or passed.
    pub active: bool,
    /// Step currently shown.
    pub current: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ControlState {
    pub step: Step,
    pub forward_enabled: bool,
    pub forward_label: &'static str,
    pub back_visible: bool,
    /// Fill of the progress bar, 0 on the first step and 100 on the last.
    pub progress_percent: f64,
    pub markers: [ProgressMarker; TOTAL_STEPS as usize],
}

impl ControlState {
    pub fn new(step: Step, forward_enabled: bool) -> Self {
        let n = step.number();
        let progress_percent = f64::from(n - 1) / f64::from(TOTAL_STEPS - 1) * 100.0;

        let mut markers = [ProgressMarker { active: false, current: false }; TOTAL_STEPS as usize];
        for (i, marker) in markers.iter_mut().enumerate() {
            marker.active = i < n as usize;
            marker.current = i == (n - 1) as usize;
        }

        Self {
            step,
            forward_enabled,
            forward_label: if step.is_last() { SUBMIT_LABEL } else { CONTINUE_LABEL },
            back_visible: step != Step::FIRST,
            progress_percent,
            markers,
        }
    }
}
