//! Raw, unvalidated input for the journal logging entry points.
//!
//! Numbers are wide signed values so out-of-range input can be clamped
//! instead of failing to parse. Absent dates default to "now".

use chrono::{DateTime, Utc};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FoodDraft {
    pub name: String,
    pub calories: i64,
    pub meal_type: String,
    pub icon: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MedicationDraft {
    pub name: String,
    pub dosage: String,
    pub frequency: String,
    pub icon: String,
    /// Logged as already taken; only taken medications reach the timeline.
    pub is_taken: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SymptomDraft {
    pub name: String,
    pub severity: i64,
    pub notes: String,
    pub timestamp: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SleepDraft {
    pub hours: f64,
    pub quality: i64,
    pub notes: String,
    pub date: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TherapyDraft {
    pub session_type: String,
    pub duration_minutes: i64,
    pub notes: String,
    pub date: Option<DateTime<Utc>>,
}
