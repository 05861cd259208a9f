//! Navigation destinations.

use serde::{Deserialize, Serialize};

/// Closed set of top-level destinations the presentation layer can show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AppScreen {
    #[default]
    Home,
    FoodTracking,
    MedicationTracking,
    RestTracking,
    TherapyTracking,
    SymptomsTracking,
}

impl AppScreen {
    pub const ALL: [AppScreen; 6] = [
        Self::Home,
        Self::FoodTracking,
        Self::MedicationTracking,
        Self::RestTracking,
        Self::TherapyTracking,
        Self::SymptomsTracking,
    ];

    /// Stable string id used in log and analytics events.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Home => "home",
            Self::FoodTracking => "food_tracking",
            Self::MedicationTracking => "medication_tracking",
            Self::RestTracking => "rest_tracking",
            Self::TherapyTracking => "therapy_tracking",
            Self::SymptomsTracking => "symptoms_tracking",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Self::Home => "Home",
            Self::FoodTracking => "Food Tracking",
            Self::MedicationTracking => "Medication Tracking",
            Self::RestTracking => "Rest Tracking",
            Self::TherapyTracking => "Therapy Tracking",
            Self::SymptomsTracking => "Symptoms Tracking",
        }
    }

    /// Symbol name the presentation layer maps to an icon.
    pub fn icon(self) -> &'static str {
        match self {
            Self::Home => "house.fill",
            Self::FoodTracking => "fork.knife",
            Self::MedicationTracking => "pills.fill",
            Self::RestTracking => "bed.double.fill",
            Self::TherapyTracking => "brain.head.profile",
            Self::SymptomsTracking => "heart.fill",
        }
    }
}
