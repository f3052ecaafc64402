//! Safety scorer
//!
//! Maps the number of completed modules to the "Digital Shield" tier shown
//! to the citizen. Pure: the same count always yields the same tier.

use std::fmt;

/// Visual severity of a tier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Danger,
    Warning,
    Success,
    /// Success with extra emphasis, reserved for the maximal tier
    SuccessEmphasized,
}

/// Discrete safety tier derived from progress
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum SafetyTier {
    Unverified,
    Learner,
    CitizenGuard,
    DigitalSurakshak,
}

/// Tier for a number of completed modules
///
/// Counts above the module total clamp to the maximal tier.
pub fn tier_for(count: usize) -> SafetyTier {
    match count {
        0 => SafetyTier::Unverified,
        1..=2 => SafetyTier::Learner,
        3..=4 => SafetyTier::CitizenGuard,
        _ => SafetyTier::DigitalSurakshak,
    }
}

impl SafetyTier {
    pub fn label(&self) -> &'static str {
        match self {
            SafetyTier::Unverified => "UNVERIFIED",
            SafetyTier::Learner => "LEARNER",
            SafetyTier::CitizenGuard => "CITIZEN GUARD",
            SafetyTier::DigitalSurakshak => "DIGITAL SURAKSHAK",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            SafetyTier::Unverified => "No safety modules completed yet",
            SafetyTier::Learner => "You're starting to build your awareness",
            SafetyTier::CitizenGuard => "You can identify major digital threats",
            SafetyTier::DigitalSurakshak => "You understand basic cyber safety practices",
        }
    }

    pub fn severity(&self) -> Severity {
        match self {
            SafetyTier::Unverified => Severity::Danger,
            SafetyTier::Learner => Severity::Warning,
            SafetyTier::CitizenGuard => Severity::Success,
            SafetyTier::DigitalSurakshak => Severity::SuccessEmphasized,
        }
    }

}

impl fmt::Display for SafetyTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.label(), self.description())
    }
}
