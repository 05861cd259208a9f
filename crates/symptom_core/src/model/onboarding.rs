//! Onboarding wizard model.
//!
//! # Responsibility
//! - Name the nine wizard steps and the five profile selection sets.
//! - Hold the profile fields captured during onboarding.
//!
//! # Invariants
//! - Step indices are `0..=LAST_STEP_INDEX`.
//! - `OnboardingProfile::default()` is the reset state of the wizard.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

pub const STEP_COUNT: u8 = 9;
pub const LAST_STEP_INDEX: u8 = STEP_COUNT - 1;
pub const DEFAULT_SEVERITY_LEVEL: f64 = 5.0;
pub const DEFAULT_FLARE_FREQUENCY: &str = "Weekly";
/// Stored in place of a user name that fails validation.
pub const FALLBACK_USER_NAME: &str = "User";

/// One screen of the onboarding wizard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OnboardingStep {
    Welcome,
    ProfileSetup,
    Conditions,
    Symptoms,
    FlarePattern,
    Treatments,
    Triggers,
    Goals,
    Summary,
}

impl OnboardingStep {
    pub const ALL: [OnboardingStep; STEP_COUNT as usize] = [
        Self::Welcome,
        Self::ProfileSetup,
        Self::Conditions,
        Self::Symptoms,
        Self::FlarePattern,
        Self::Treatments,
        Self::Triggers,
        Self::Goals,
        Self::Summary,
    ];

    /// Maps a step index to its step; indices past the end map to `None`.
    pub fn from_index(index: u8) -> Option<Self> {
        Self::ALL.get(usize::from(index)).copied()
    }

    pub fn index(self) -> u8 {
        match self {
            Self::Welcome => 0,
            Self::ProfileSetup => 1,
            Self::Conditions => 2,
            Self::Symptoms => 3,
            Self::FlarePattern => 4,
            Self::Treatments => 5,
            Self::Triggers => 6,
            Self::Goals => 7,
            Self::Summary => 8,
        }
    }

    pub fn is_last(self) -> bool {
        self.index() == LAST_STEP_INDEX
    }

    /// Human-readable progress label, e.g. `Step 3 of 9`.
    pub fn progress_label(self) -> String {
        format!("Step {} of {}", self.index() + 1, STEP_COUNT)
    }
}

/// The five multi-select sets captured during onboarding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionKind {
    Conditions,
    Symptoms,
    Triggers,
    Routines,
    Goals,
}

impl SelectionKind {
    pub const ALL: [SelectionKind; 5] = [
        Self::Conditions,
        Self::Symptoms,
        Self::Triggers,
        Self::Routines,
        Self::Goals,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Conditions => "condition",
            Self::Symptoms => "symptom",
            Self::Triggers => "trigger",
            Self::Routines => "routine",
            Self::Goals => "goal",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "condition" => Some(Self::Conditions),
            "symptom" => Some(Self::Symptoms),
            "trigger" => Some(Self::Triggers),
            "routine" => Some(Self::Routines),
            "goal" => Some(Self::Goals),
            _ => None,
        }
    }
}

/// Profile fields captured by the wizard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OnboardingProfile {
    pub show_onboarding: bool,
    pub current_step: u8,
    pub user_name: String,
    /// 0.0..=10.0.
    pub severity_level: f64,
    pub flare_frequency: String,
    pub conditions: BTreeSet<String>,
    pub symptoms: BTreeSet<String>,
    pub triggers: BTreeSet<String>,
    pub routines: BTreeSet<String>,
    pub goals: BTreeSet<String>,
}

impl Default for OnboardingProfile {
    fn default() -> Self {
        Self {
            show_onboarding: true,
            current_step: 0,
            user_name: String::new(),
            severity_level: DEFAULT_SEVERITY_LEVEL,
            flare_frequency: DEFAULT_FLARE_FREQUENCY.to_string(),
            conditions: BTreeSet::new(),
            symptoms: BTreeSet::new(),
            triggers: BTreeSet::new(),
            routines: BTreeSet::new(),
            goals: BTreeSet::new(),
        }
    }
}

impl OnboardingProfile {
    pub fn selections(&self, kind: SelectionKind) -> &BTreeSet<String> {
        match kind {
            SelectionKind::Conditions => &self.conditions,
            SelectionKind::Symptoms => &self.symptoms,
            SelectionKind::Triggers => &self.triggers,
            SelectionKind::Routines => &self.routines,
            SelectionKind::Goals => &self.goals,
        }
    }

    pub fn selections_mut(&mut self, kind: SelectionKind) -> &mut BTreeSet<String> {
        match kind {
            SelectionKind::Conditions => &mut self.conditions,
            SelectionKind::Symptoms => &mut self.symptoms,
            SelectionKind::Triggers => &mut self.triggers,
            SelectionKind::Routines => &mut self.routines,
            SelectionKind::Goals => &mut self.goals,
        }
    }

    /// Whether every selection set is empty.
    pub fn has_no_selections(&self) -> bool {
        SelectionKind::ALL
            .iter()
            .all(|kind| self.selections(*kind).is_empty())
    }
}
