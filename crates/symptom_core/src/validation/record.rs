//! Composite validators, one per record kind.
//!
//! Each composite runs the field rules independently and reports every field,
//! so partial success is visible to the caller: a rejected food name does not
//! stop calories from being clamped and returned.

use super::field::{
    validate_calories, validate_duration, validate_name, validate_quality, validate_severity,
    validate_sleep_hours, validate_string, DESCRIPTOR_MAX_LENGTH, LABEL_MAX_LENGTH,
    NOTES_MAX_LENGTH,
};

/// Validated fields of a food entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedFoodItem {
    pub name: Option<String>,
    pub calories: u32,
    pub meal_type: Option<String>,
}

impl ValidatedFoodItem {
    /// Name of the first required field that was rejected, if any.
    pub fn first_rejected_field(&self) -> Option<&'static str> {
        if self.name.is_none() {
            return Some("name");
        }
        if self.meal_type.is_none() {
            return Some("meal_type");
        }
        None
    }
}

/// Validated fields of a medication.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedMedication {
    pub name: Option<String>,
    pub dosage: Option<String>,
    pub frequency: Option<String>,
}

impl ValidatedMedication {
    /// Name of the first required field that was rejected, if any.
    pub fn first_rejected_field(&self) -> Option<&'static str> {
        if self.name.is_none() {
            return Some("name");
        }
        if self.dosage.is_none() {
            return Some("dosage");
        }
        if self.frequency.is_none() {
            return Some("frequency");
        }
        None
    }
}

/// Validated fields of a symptom occurrence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedSymptom {
    pub name: Option<String>,
    pub severity: u8,
    /// Optional text; `None` only for NUL-carrying input.
    pub notes: Option<String>,
}

impl ValidatedSymptom {
    pub fn first_rejected_field(&self) -> Option<&'static str> {
        self.name.is_none().then_some("name")
    }
}

/// Validated fields of a sleep log. Sleep logs have no required text.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedSleepLog {
    pub hours: f64,
    pub quality: u8,
    pub notes: Option<String>,
}

/// Validated fields of a therapy session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedTherapySession {
    pub session_type: Option<String>,
    pub duration_minutes: u32,
    pub notes: Option<String>,
}

impl ValidatedTherapySession {
    pub fn first_rejected_field(&self) -> Option<&'static str> {
        self.session_type.is_none().then_some("type")
    }
}

pub fn validate_food_item(name: &str, calories: i64, meal_type: &str) -> ValidatedFoodItem {
    ValidatedFoodItem {
        name: validate_name(name),
        calories: validate_calories(calories),
        meal_type: validate_string(meal_type, LABEL_MAX_LENGTH, false),
    }
}

pub fn validate_medication(name: &str, dosage: &str, frequency: &str) -> ValidatedMedication {
    ValidatedMedication {
        name: validate_name(name),
        dosage: validate_string(dosage, DESCRIPTOR_MAX_LENGTH, false),
        frequency: validate_string(frequency, DESCRIPTOR_MAX_LENGTH, false),
    }
}

pub fn validate_symptom(name: &str, severity: i64, notes: &str) -> ValidatedSymptom {
    ValidatedSymptom {
        name: validate_name(name),
        severity: validate_severity(severity),
        notes: validate_string(notes, NOTES_MAX_LENGTH, true),
    }
}

pub fn validate_sleep_log(hours: f64, quality: i64, notes: &str) -> ValidatedSleepLog {
    ValidatedSleepLog {
        hours: validate_sleep_hours(hours),
        quality: validate_quality(quality),
        notes: validate_string(notes, NOTES_MAX_LENGTH, true),
    }
}

pub fn validate_therapy_session(
    session_type: &str,
    duration_minutes: i64,
    notes: &str,
) -> ValidatedTherapySession {
    ValidatedTherapySession {
        session_type: validate_string(session_type, DESCRIPTOR_MAX_LENGTH, false),
        duration_minutes: validate_duration(duration_minutes),
        notes: validate_string(notes, NOTES_MAX_LENGTH, true),
    }
}
