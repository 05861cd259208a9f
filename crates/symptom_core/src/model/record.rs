//! Logged health records.
//!
//! # Responsibility
//! - Define the five record kinds kept in session collections and storage.
//! - Give every record a stable identity assigned at creation.
//!
//! # Invariants
//! - `RecordId` is generated once and never reused for another record.
//! - Record constructors do not validate; callers pass validated values.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier of one logged record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(Uuid);

impl RecordId {
    /// Generates a fresh random id.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wraps an id that already exists, e.g. one read back from storage.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for RecordId {
    fn default() -> Self {
        Self::new()
    }
}

impl Display for RecordId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Discriminant for the five record collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordKind {
    FoodItem,
    Medication,
    Symptom,
    SleepLog,
    TherapySession,
}

impl RecordKind {
    /// Stable string id used in log events and storage.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::FoodItem => "food_item",
            Self::Medication => "medication",
            Self::Symptom => "symptom",
            Self::SleepLog => "sleep_log",
            Self::TherapySession => "therapy_session",
        }
    }
}

/// Common shape of records kept in a [`crate::state::RecordLog`].
pub trait Record {
    const KIND: RecordKind;

    fn id(&self) -> RecordId;
}

/// One food entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FoodItem {
    pub id: RecordId,
    pub name: String,
    pub calories: u32,
    /// Display glyph chosen by the presentation layer.
    pub icon: String,
    /// Breakfast, Lunch, Dinner, Snacks, or a custom label.
    pub meal_type: String,
    pub logged_at: DateTime<Utc>,
}

impl FoodItem {
    pub fn new(
        name: impl Into<String>,
        calories: u32,
        icon: impl Into<String>,
        meal_type: impl Into<String>,
    ) -> Self {
        Self {
            id: RecordId::new(),
            name: name.into(),
            calories,
            icon: icon.into(),
            meal_type: meal_type.into(),
            logged_at: Utc::now(),
        }
    }
}

impl Record for FoodItem {
    const KIND: RecordKind = RecordKind::FoodItem;

    fn id(&self) -> RecordId {
        self.id
    }
}

/// One medication in the user's regimen with its adherence flag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MedicationItem {
    pub id: RecordId,
    pub name: String,
    pub dosage: String,
    pub frequency: String,
    pub icon: String,
    pub is_taken: bool,
    pub logged_at: DateTime<Utc>,
}

impl MedicationItem {
    /// Creates a medication that has not been taken yet.
    pub fn new(
        name: impl Into<String>,
        dosage: impl Into<String>,
        frequency: impl Into<String>,
        icon: impl Into<String>,
    ) -> Self {
        Self {
            id: RecordId::new(),
            name: name.into(),
            dosage: dosage.into(),
            frequency: frequency.into(),
            icon: icon.into(),
            is_taken: false,
            logged_at: Utc::now(),
        }
    }

    /// Flips the adherence flag and returns the new value.
    pub fn toggle_taken(&mut self) -> bool {
        self.is_taken = !self.is_taken;
        self.is_taken
    }
}

impl Record for MedicationItem {
    const KIND: RecordKind = RecordKind::Medication;

    fn id(&self) -> RecordId {
        self.id
    }
}

/// One symptom occurrence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymptomItem {
    pub id: RecordId,
    pub name: String,
    /// 0..=10.
    pub severity: u8,
    pub notes: String,
    pub timestamp: DateTime<Utc>,
}

impl SymptomItem {
    pub fn new(
        name: impl Into<String>,
        severity: u8,
        notes: impl Into<String>,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            id: RecordId::new(),
            name: name.into(),
            severity,
            notes: notes.into(),
            timestamp,
        }
    }
}

impl Record for SymptomItem {
    const KIND: RecordKind = RecordKind::Symptom;

    fn id(&self) -> RecordId {
        self.id
    }
}

/// One night of sleep.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SleepLog {
    pub id: RecordId,
    /// 0.0..=24.0.
    pub sleep_hours: f64,
    /// 0..=10.
    pub quality: u8,
    pub notes: String,
    pub date: DateTime<Utc>,
}

impl SleepLog {
    pub fn new(sleep_hours: f64, quality: u8, notes: impl Into<String>, date: DateTime<Utc>) -> Self {
        Self {
            id: RecordId::new(),
            sleep_hours,
            quality,
            notes: notes.into(),
            date,
        }
    }
}

impl Record for SleepLog {
    const KIND: RecordKind = RecordKind::SleepLog;

    fn id(&self) -> RecordId {
        self.id
    }
}

/// One therapy session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TherapySession {
    pub id: RecordId,
    /// Serialized as `type` to match the journal's external naming.
    #[serde(rename = "type")]
    pub session_type: String,
    /// 0..=1440.
    pub duration_minutes: u32,
    pub notes: String,
    pub date: DateTime<Utc>,
}

impl TherapySession {
    pub fn new(
        session_type: impl Into<String>,
        duration_minutes: u32,
        notes: impl Into<String>,
        date: DateTime<Utc>,
    ) -> Self {
        Self {
            id: RecordId::new(),
            session_type: session_type.into(),
            duration_minutes,
            notes: notes.into(),
            date,
        }
    }
}

impl Record for TherapySession {
    const KIND: RecordKind = RecordKind::TherapySession;

    fn id(&self) -> RecordId {
        self.id
    }
}
