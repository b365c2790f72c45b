//! Onboarding wizard steps and the step sequencer.
//!
//! The sequencer only tracks position. It holds no validation logic and
//! transitions unconditionally when asked; callers gate `advance` with the
//! matching validator from [`crate::validate`]. Completion is a distinct
//! operation implemented at the API layer, not `advance` past the last
//! step.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// The seven steps in the onboarding wizard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WizardStep {
    PersonalInfo,
    Location,
    Roles,
    Projects,
    Education,
    Skills,
    Finish,
}

/// Total number of steps in the wizard.
pub const TOTAL_STEPS: u8 = 7;

impl WizardStep {
    /// Minimum step number (1-based).
    pub const MIN: u8 = 1;

    /// Maximum step number (1-based).
    pub const MAX: u8 = TOTAL_STEPS;

    /// Convert a 1-based step number to a `WizardStep`.
    pub fn from_number(n: u8) -> Result<Self, CoreError> {
        match n {
            1 => Ok(Self::PersonalInfo),
            2 => Ok(Self::Location),
            3 => Ok(Self::Roles),
            4 => Ok(Self::Projects),
            5 => Ok(Self::Education),
            6 => Ok(Self::Skills),
            7 => Ok(Self::Finish),
            _ => Err(CoreError::Validation(format!(
                "Invalid step number {n}. Must be between {} and {}",
                Self::MIN,
                Self::MAX
            ))),
        }
    }

    /// Convert to a 1-based step number.
    pub fn to_number(self) -> u8 {
        match self {
            Self::PersonalInfo => 1,
            Self::Location => 2,
            Self::Roles => 3,
            Self::Projects => 4,
            Self::Education => 5,
            Self::Skills => 6,
            Self::Finish => 7,
        }
    }

    /// Human-readable label for the step.
    pub fn label(self) -> &'static str {
        match self {
            Self::PersonalInfo => "Personal Info",
            Self::Location => "Location",
            Self::Roles => "Roles",
            Self::Projects => "Projects",
            Self::Education => "Education",
            Self::Skills => "Skills",
            Self::Finish => "Finish",
        }
    }
}

/// Tracks which wizard step is active.
///
/// Out-of-range or non-numeric navigation input is ignored: the sequencer
/// stays where it is and never errors. The step number routinely arrives
/// from an untrusted page parameter, so garbage input must be harmless.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepSequencer {
    current: WizardStep,
}

impl Default for StepSequencer {
    fn default() -> Self {
        Self::new()
    }
}

impl StepSequencer {
    /// A sequencer positioned on the first step.
    pub fn new() -> Self {
        Self {
            current: WizardStep::PersonalInfo,
        }
    }

    /// A sequencer positioned on `step`.
    pub fn at(step: WizardStep) -> Self {
        Self { current: step }
    }

    pub fn current(&self) -> WizardStep {
        self.current
    }

    pub fn current_number(&self) -> u8 {
        self.current.to_number()
    }

    /// Jump to a step by number. Out-of-range input is ignored.
    pub fn go_to(&mut self, n: u8) {
        if let Ok(step) = WizardStep::from_number(n) {
            self.current = step;
        }
    }

    /// Jump to a step given a raw navigation parameter. Non-numeric or
    /// out-of-range input is ignored.
    pub fn go_to_param(&mut self, raw: &str) {
        if let Ok(n) = raw.trim().parse::<u8>() {
            self.go_to(n);
        }
    }

    /// Move forward one step, saturating at the last step. The caller is
    /// responsible for validating the current step first.
    pub fn advance(&mut self) {
        let n = self.current.to_number();
        if n < WizardStep::MAX {
            self.current = WizardStep::from_number(n + 1).expect("step range");
        }
    }

    /// Move back one step, saturating at the first step.
    pub fn back(&mut self) {
        let n = self.current.to_number();
        if n > WizardStep::MIN {
            self.current = WizardStep::from_number(n - 1).expect("step range");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn step_number_roundtrip() {
        for n in WizardStep::MIN..=WizardStep::MAX {
            let step = WizardStep::from_number(n).unwrap();
            assert_eq!(step.to_number(), n);
            assert!(!step.label().is_empty());
        }
    }

    #[test]
    fn step_from_number_out_of_range() {
        assert!(WizardStep::from_number(0).is_err());
        assert!(WizardStep::from_number(8).is_err());
        assert!(WizardStep::from_number(255).is_err());
    }

    #[test]
    fn go_to_ignores_invalid_input() {
        let mut seq = StepSequencer::at(WizardStep::Roles);

        seq.go_to(0);
        assert_eq!(seq.current_number(), 3);

        seq.go_to(8);
        assert_eq!(seq.current_number(), 3);

        seq.go_to_param("x");
        assert_eq!(seq.current_number(), 3);

        seq.go_to_param("-1");
        assert_eq!(seq.current_number(), 3);

        seq.go_to_param("");
        assert_eq!(seq.current_number(), 3);
    }

    #[test]
    fn go_to_accepts_valid_input() {
        let mut seq = StepSequencer::new();
        seq.go_to(5);
        assert_eq!(seq.current(), WizardStep::Education);

        seq.go_to_param(" 2 ");
        assert_eq!(seq.current(), WizardStep::Location);
    }

    #[test]
    fn advance_and_back_saturate() {
        let mut seq = StepSequencer::new();
        seq.back();
        assert_eq!(seq.current_number(), 1);

        for _ in 0..10 {
            seq.advance();
        }
        assert_eq!(seq.current_number(), 7);
    }

    #[test]
    fn advance_is_unconditional() {
        // The sequencer carries no validation; it moves when told.
        let mut seq = StepSequencer::new();
        seq.advance();
        assert_eq!(seq.current(), WizardStep::Location);
    }
}
