//! Read-only reference vocabularies for onboarding and logging forms.
//!
//! # Responsibility
//! - Expose the fixed option lists rendered as selectable cards.
//! - Map loosely typed option text back to its canonical spelling.
//!
//! # Invariants
//! - Lists are constant for the process lifetime.
//! - Matching is whitespace-collapsing and case-insensitive.

use crate::model::onboarding::SelectionKind;
use once_cell::sync::Lazy;
use regex::Regex;

static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid ws regex"));

pub const AVAILABLE_CONDITIONS: &[&str] = &[
    "Rheumatoid Arthritis",
    "Lupus",
    "Fibromyalgia",
    "Chronic Fatigue Syndrome",
    "Multiple Sclerosis",
    "Crohn's Disease",
    "IBS",
    "Endometriosis",
    "Psoriasis",
    "Eczema",
    "Migraine",
    "Anxiety",
    "Depression",
];

pub const AVAILABLE_SYMPTOMS: &[&str] = &[
    "Joint Pain",
    "Fatigue",
    "Stiffness",
    "Swelling",
    "Brain Fog",
    "Sleep Issues",
    "Headaches",
    "Nausea",
    "Digestive Issues",
    "Mood Changes",
    "Skin Issues",
    "Muscle Pain",
    "Memory Problems",
];

pub const AVAILABLE_TRIGGERS: &[&str] = &[
    "Stress",
    "Weather Changes",
    "Lack of Sleep",
    "Certain Foods",
    "Overexertion",
    "Hormonal Changes",
    "Infections",
    "Medication Changes",
];

pub const AVAILABLE_ROUTINES: &[&str] = &[
    "Morning Stretching",
    "Meditation",
    "Regular Exercise",
    "Healthy Eating",
    "Consistent Sleep Schedule",
    "Hydration",
    "Stress Management",
    "Gentle Movement",
];

pub const AVAILABLE_GOALS: &[&str] = &[
    "Reduce Pain",
    "Improve Sleep",
    "Increase Energy",
    "Better Mood",
    "Manage Stress",
    "Maintain Mobility",
    "Track Patterns",
    "Build Habits",
];

pub const MEAL_TYPES: &[&str] = &["Breakfast", "Lunch", "Dinner", "Snacks"];

pub const FLARE_PATTERNS: &[&str] = &["Episodic", "Constant", "Variable"];

/// Selections seeded into a brand-new profile on first launch.
pub fn default_selections(kind: SelectionKind) -> &'static [&'static str] {
    match kind {
        SelectionKind::Conditions => &["Rheumatoid Arthritis", "Lupus"],
        SelectionKind::Symptoms => &["Joint Pain", "Fatigue", "Brain Fog"],
        SelectionKind::Triggers => &["Stress", "Weather Changes", "Lack of Sleep"],
        SelectionKind::Routines => &["Morning Stretching", "Regular Exercise", "Healthy Eating"],
        SelectionKind::Goals => &["Reduce Pain", "Improve Sleep", "Increase Energy"],
    }
}

/// Returns the reference list for one selection set.
pub fn options(kind: SelectionKind) -> &'static [&'static str] {
    match kind {
        SelectionKind::Conditions => AVAILABLE_CONDITIONS,
        SelectionKind::Symptoms => AVAILABLE_SYMPTOMS,
        SelectionKind::Triggers => AVAILABLE_TRIGGERS,
        SelectionKind::Routines => AVAILABLE_ROUTINES,
        SelectionKind::Goals => AVAILABLE_GOALS,
    }
}

/// Resolves raw option text to the canonical vocabulary entry.
///
/// Returns `None` when the text is not a member of the list for `kind`.
pub fn canonical_option(kind: SelectionKind, raw: &str) -> Option<&'static str> {
    let normalized = normalize_option(raw);
    if normalized.is_empty() {
        return None;
    }

    options(kind)
        .iter()
        .copied()
        .find(|candidate| candidate.to_lowercase() == normalized)
}

/// Whether `value` is an exact member of the list for `kind`.
pub fn is_known_option(kind: SelectionKind, value: &str) -> bool {
    options(kind).contains(&value)
}

fn normalize_option(raw: &str) -> String {
    WHITESPACE_RE
        .replace_all(raw.trim(), " ")
        .to_lowercase()
}
