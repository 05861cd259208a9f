//! Daily timeline projection of logged records.

use crate::model::record::{FoodItem, MedicationItem, SleepLog, SymptomItem, TherapySession};
use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Timeline category. Serialized values match storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimelineEntryKind {
    Symptom,
    Food,
    Medication,
    Rest,
    Therapy,
}

impl TimelineEntryKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Symptom => "symptom",
            Self::Food => "food",
            Self::Medication => "medication",
            Self::Rest => "rest",
            Self::Therapy => "therapy",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "symptom" => Some(Self::Symptom),
            "food" => Some(Self::Food),
            "medication" => Some(Self::Medication),
            "rest" => Some(Self::Rest),
            "therapy" => Some(Self::Therapy),
            _ => None,
        }
    }
}

/// One line on the home timeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelineEntry {
    pub id: Uuid,
    pub kind: TimelineEntryKind,
    pub title: String,
    pub subtitle: String,
    pub icon: String,
    pub timestamp: DateTime<Utc>,
}

impl TimelineEntry {
    pub fn new(
        kind: TimelineEntryKind,
        title: impl Into<String>,
        subtitle: impl Into<String>,
        icon: impl Into<String>,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            title: title.into(),
            subtitle: subtitle.into(),
            icon: icon.into(),
            timestamp,
        }
    }

    pub fn for_food(item: &FoodItem) -> Self {
        Self::new(
            TimelineEntryKind::Food,
            format!("{}: {}", item.meal_type, item.name),
            format!("{} calories", item.calories),
            item.icon.as_str(),
            item.logged_at,
        )
    }

    pub fn for_medication(medication: &MedicationItem) -> Self {
        Self::new(
            TimelineEntryKind::Medication,
            medication.name.as_str(),
            format!("{} - {}", medication.dosage, medication.frequency),
            medication.icon.as_str(),
            medication.logged_at,
        )
    }

    pub fn for_symptom(symptom: &SymptomItem) -> Self {
        Self::new(
            TimelineEntryKind::Symptom,
            symptom.name.as_str(),
            format!("Severity: {}/10", symptom.severity),
            "❤️‍🩹",
            symptom.timestamp,
        )
    }

    pub fn for_sleep(log: &SleepLog) -> Self {
        Self::new(
            TimelineEntryKind::Rest,
            "Sleep Log",
            format!("{} hours, Quality: {}/10", log.sleep_hours, log.quality),
            "😴",
            log.date,
        )
    }

    pub fn for_therapy(session: &TherapySession) -> Self {
        Self::new(
            TimelineEntryKind::Therapy,
            session.session_type.as_str(),
            format!("{} minutes", session.duration_minutes),
            "🧠",
            session.date,
        )
    }

    /// Whether this entry falls on the calendar day `date` as seen in `tz`.
    pub fn is_on<Tz: TimeZone>(&self, date: NaiveDate, tz: &Tz) -> bool {
        self.timestamp.with_timezone(tz).date_naive() == date
    }
}

#[cfg(test)]
mod tests {
    use super::{TimelineEntry, TimelineEntryKind};
    use crate::model::record::{FoodItem, SleepLog};
    use chrono::{FixedOffset, TimeZone, Utc};

    #[test]
    fn kind_strings_roundtrip() {
        for kind in [
            TimelineEntryKind::Symptom,
            TimelineEntryKind::Food,
            TimelineEntryKind::Medication,
            TimelineEntryKind::Rest,
            TimelineEntryKind::Therapy,
        ] {
            assert_eq!(TimelineEntryKind::parse(kind.as_str()), Some(kind));
        }
        assert_eq!(TimelineEntryKind::parse("unknown"), None);
    }

    #[test]
    fn food_entry_uses_meal_prefix_and_calories() {
        let item = FoodItem::new("Oatmeal", 320, "🥣", "Breakfast");
        let entry = TimelineEntry::for_food(&item);
        assert_eq!(entry.title, "Breakfast: Oatmeal");
        assert_eq!(entry.subtitle, "320 calories");
        assert_eq!(entry.kind, TimelineEntryKind::Food);
    }

    #[test]
    fn sleep_entry_is_on_its_calendar_day() {
        let date = Utc.with_ymd_and_hms(2025, 9, 10, 23, 30, 0).unwrap();
        let entry = TimelineEntry::for_sleep(&SleepLog::new(7.5, 8, "", date));
        assert_eq!(entry.subtitle, "7.5 hours, Quality: 8/10");
        assert!(entry.is_on(date.date_naive(), &Utc));
        assert!(!entry.is_on(date.date_naive().succ_opt().unwrap(), &Utc));
    }

    #[test]
    fn evening_entry_west_of_utc_stays_on_local_day() {
        let eastern = FixedOffset::west_opt(5 * 3600).unwrap();
        let evening = eastern.with_ymd_and_hms(2025, 9, 10, 20, 0, 0).unwrap();
        let entry = TimelineEntry::for_sleep(&SleepLog::new(
            7.0,
            6,
            "",
            evening.with_timezone(&Utc),
        ));

        let local_day = evening.date_naive();
        assert!(entry.is_on(local_day, &eastern));
        assert!(!entry.is_on(local_day, &Utc));
        assert!(entry.is_on(local_day.succ_opt().unwrap(), &Utc));
    }
}
