//! Journal repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Persist the onboarding profile and every logged record kind.
//! - Read the whole journal back into a [`JournalSnapshot`] at startup.
//!
//! # Invariants
//! - Profile writes re-validate every field before SQL mutation.
//! - Selection replacement happens in a single transaction.
//! - Read paths reject malformed persisted rows instead of masking them.
//! - Records are read back in insertion order; timeline newest first.

use crate::db::DbError;
use crate::model::onboarding::{
    OnboardingProfile, SelectionKind, DEFAULT_FLARE_FREQUENCY, FALLBACK_USER_NAME,
};
use crate::model::record::{
    FoodItem, MedicationItem, RecordId, SleepLog, SymptomItem, TherapySession,
};
use crate::model::timeline::{TimelineEntry, TimelineEntryKind};
use crate::state::JournalSnapshot;
use crate::validation::field::{
    validate_name, validate_severity_level, validate_string, LABEL_MAX_LENGTH,
};
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, Row, TransactionBehavior};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

pub type RepoResult<T> = Result<T, RepoError>;

/// Persistence and query error for journal storage.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    NotFound(RecordId),
    InvalidData(String),
    MissingRequiredTable(&'static str),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "record not found: {id}"),
            Self::InvalidData(message) => write!(f, "invalid persisted journal data: {message}"),
            Self::MissingRequiredTable(table) => {
                write!(f, "journal table `{table}` is missing; run migrations first")
            }
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Storage contract used by the journal service.
pub trait JournalRepository {
    /// Returns the stored profile, or `None` before the first save.
    fn load_profile(&self) -> RepoResult<Option<OnboardingProfile>>;
    /// Upserts the profile and replaces all selections atomically.
    fn save_profile(&mut self, profile: &OnboardingProfile) -> RepoResult<()>;
    fn insert_food_item(&self, item: &FoodItem) -> RepoResult<()>;
    fn insert_medication(&self, medication: &MedicationItem) -> RepoResult<()>;
    fn set_medication_taken(&self, id: RecordId, is_taken: bool) -> RepoResult<()>;
    fn delete_medication(&self, id: RecordId) -> RepoResult<()>;
    fn insert_symptom(&self, symptom: &SymptomItem) -> RepoResult<()>;
    fn insert_sleep_log(&self, log: &SleepLog) -> RepoResult<()>;
    fn insert_therapy_session(&self, session: &TherapySession) -> RepoResult<()>;
    fn insert_timeline_entry(&self, entry: &TimelineEntry) -> RepoResult<()>;
    /// Reads every record collection and the timeline.
    fn load_journal(&self) -> RepoResult<JournalSnapshot>;
}

/// SQLite-backed journal repository.
pub struct SqliteJournalRepository<'conn> {
    conn: &'conn mut Connection,
}

impl<'conn> SqliteJournalRepository<'conn> {
    /// Wraps a migrated connection, checking the journal tables exist.
    pub fn try_new(conn: &'conn mut Connection) -> RepoResult<Self> {
        ensure_journal_tables(conn)?;
        Ok(Self { conn })
    }
}

const REQUIRED_TABLES: &[&str] = &[
    "user_profile",
    "profile_selections",
    "food_items",
    "medications",
    "symptom_logs",
    "sleep_logs",
    "therapy_sessions",
    "timeline_entries",
];

impl JournalRepository for SqliteJournalRepository<'_> {
    fn load_profile(&self) -> RepoResult<Option<OnboardingProfile>> {
        let mut stmt = self.conn.prepare(
            "SELECT user_name, onboarding_completed, severity_level, flare_frequency
             FROM user_profile
             WHERE id = 1;",
        )?;
        let mut rows = stmt.query([])?;
        let Some(row) = rows.next()? else {
            return Ok(None);
        };

        let mut profile = OnboardingProfile {
            show_onboarding: !parse_flag(row, "onboarding_completed")?,
            user_name: row.get("user_name")?,
            severity_level: row.get("severity_level")?,
            flare_frequency: row.get("flare_frequency")?,
            ..OnboardingProfile::default()
        };

        let mut stmt = self
            .conn
            .prepare("SELECT kind, name FROM profile_selections ORDER BY kind, name;")?;
        let mut rows = stmt.query([])?;
        while let Some(row) = rows.next()? {
            let kind_text: String = row.get("kind")?;
            let kind = SelectionKind::parse(&kind_text).ok_or_else(|| {
                RepoError::InvalidData(format!(
                    "invalid selection kind `{kind_text}` in profile_selections.kind"
                ))
            })?;
            profile.selections_mut(kind).insert(row.get("name")?);
        }

        Ok(Some(profile))
    }

    fn save_profile(&mut self, profile: &OnboardingProfile) -> RepoResult<()> {
        let prepared = prepare_profile_for_storage(profile);
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;

        tx.execute(
            "INSERT INTO user_profile (id, user_name, onboarding_completed, severity_level, flare_frequency)
             VALUES (1, ?1, ?2, ?3, ?4)
             ON CONFLICT(id) DO UPDATE SET
                user_name = excluded.user_name,
                onboarding_completed = excluded.onboarding_completed,
                severity_level = excluded.severity_level,
                flare_frequency = excluded.flare_frequency,
                updated_at = (strftime('%s', 'now') * 1000);",
            params![
                prepared.user_name,
                bool_to_int(!prepared.show_onboarding),
                prepared.severity_level,
                prepared.flare_frequency,
            ],
        )?;

        tx.execute("DELETE FROM profile_selections;", [])?;
        for kind in SelectionKind::ALL {
            for name in prepared.selections(kind) {
                tx.execute(
                    "INSERT OR IGNORE INTO profile_selections (kind, name) VALUES (?1, ?2);",
                    params![kind.as_str(), name],
                )?;
            }
        }

        tx.commit()?;
        Ok(())
    }

    fn insert_food_item(&self, item: &FoodItem) -> RepoResult<()> {
        self.conn.execute(
            "INSERT INTO food_items (uuid, name, calories, icon, meal_type, logged_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6);",
            params![
                item.id.to_string(),
                item.name,
                item.calories,
                item.icon,
                item.meal_type,
                item.logged_at.timestamp_millis(),
            ],
        )?;
        Ok(())
    }

    fn insert_medication(&self, medication: &MedicationItem) -> RepoResult<()> {
        self.conn.execute(
            "INSERT INTO medications (uuid, name, dosage, frequency, icon, is_taken, logged_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7);",
            params![
                medication.id.to_string(),
                medication.name,
                medication.dosage,
                medication.frequency,
                medication.icon,
                bool_to_int(medication.is_taken),
                medication.logged_at.timestamp_millis(),
            ],
        )?;
        Ok(())
    }

    fn set_medication_taken(&self, id: RecordId, is_taken: bool) -> RepoResult<()> {
        let changed = self.conn.execute(
            "UPDATE medications SET is_taken = ?2 WHERE uuid = ?1;",
            params![id.to_string(), bool_to_int(is_taken)],
        )?;
        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }
        Ok(())
    }

    fn delete_medication(&self, id: RecordId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM medications WHERE uuid = ?1;", [id.to_string()])?;
        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }
        Ok(())
    }

    fn insert_symptom(&self, symptom: &SymptomItem) -> RepoResult<()> {
        self.conn.execute(
            "INSERT INTO symptom_logs (uuid, name, severity, notes, timestamp)
             VALUES (?1, ?2, ?3, ?4, ?5);",
            params![
                symptom.id.to_string(),
                symptom.name,
                symptom.severity,
                symptom.notes,
                symptom.timestamp.timestamp_millis(),
            ],
        )?;
        Ok(())
    }

    fn insert_sleep_log(&self, log: &SleepLog) -> RepoResult<()> {
        self.conn.execute(
            "INSERT INTO sleep_logs (uuid, sleep_hours, quality, notes, date)
             VALUES (?1, ?2, ?3, ?4, ?5);",
            params![
                log.id.to_string(),
                log.sleep_hours,
                log.quality,
                log.notes,
                log.date.timestamp_millis(),
            ],
        )?;
        Ok(())
    }

    fn insert_therapy_session(&self, session: &TherapySession) -> RepoResult<()> {
        self.conn.execute(
            "INSERT INTO therapy_sessions (uuid, type, duration_minutes, notes, date)
             VALUES (?1, ?2, ?3, ?4, ?5);",
            params![
                session.id.to_string(),
                session.session_type,
                session.duration_minutes,
                session.notes,
                session.date.timestamp_millis(),
            ],
        )?;
        Ok(())
    }

    fn insert_timeline_entry(&self, entry: &TimelineEntry) -> RepoResult<()> {
        self.conn.execute(
            "INSERT INTO timeline_entries (uuid, kind, title, subtitle, icon, timestamp)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6);",
            params![
                entry.id.to_string(),
                entry.kind.as_str(),
                entry.title,
                entry.subtitle,
                entry.icon,
                entry.timestamp.timestamp_millis(),
            ],
        )?;
        Ok(())
    }

    fn load_journal(&self) -> RepoResult<JournalSnapshot> {
        Ok(JournalSnapshot {
            food_items: query_all(
                self.conn,
                "SELECT uuid, name, calories, icon, meal_type, logged_at
                 FROM food_items ORDER BY rowid ASC;",
                parse_food_row,
            )?,
            medications: query_all(
                self.conn,
                "SELECT uuid, name, dosage, frequency, icon, is_taken, logged_at
                 FROM medications ORDER BY rowid ASC;",
                parse_medication_row,
            )?,
            symptoms: query_all(
                self.conn,
                "SELECT uuid, name, severity, notes, timestamp
                 FROM symptom_logs ORDER BY rowid ASC;",
                parse_symptom_row,
            )?,
            sleep_logs: query_all(
                self.conn,
                "SELECT uuid, sleep_hours, quality, notes, date
                 FROM sleep_logs ORDER BY rowid ASC;",
                parse_sleep_row,
            )?,
            therapy_sessions: query_all(
                self.conn,
                "SELECT uuid, type, duration_minutes, notes, date
                 FROM therapy_sessions ORDER BY rowid ASC;",
                parse_therapy_row,
            )?,
            timeline: query_all(
                self.conn,
                "SELECT uuid, kind, title, subtitle, icon, timestamp
                 FROM timeline_entries ORDER BY timestamp DESC, rowid ASC;",
                parse_timeline_row,
            )?,
        })
    }
}

/// Applies the storage sanitization rules to a profile.
///
/// - user name: name rule, falling back to `"User"`;
/// - severity level: clamped to `[0, 10]`;
/// - flare frequency: required label (max 50), falling back to `"Weekly"`;
/// - selections failing the name rule are dropped.
pub fn prepare_profile_for_storage(profile: &OnboardingProfile) -> OnboardingProfile {
    let mut prepared = OnboardingProfile {
        show_onboarding: profile.show_onboarding,
        current_step: profile.current_step,
        user_name: validate_name(&profile.user_name)
            .unwrap_or_else(|| FALLBACK_USER_NAME.to_string()),
        severity_level: validate_severity_level(profile.severity_level),
        flare_frequency: validate_string(&profile.flare_frequency, LABEL_MAX_LENGTH, false)
            .unwrap_or_else(|| DEFAULT_FLARE_FREQUENCY.to_string()),
        ..OnboardingProfile::default()
    };

    for kind in SelectionKind::ALL {
        let validated = profile
            .selections(kind)
            .iter()
            .filter_map(|name| validate_name(name));
        prepared.selections_mut(kind).extend(validated);
    }

    prepared
}

fn query_all<T>(
    conn: &Connection,
    sql: &str,
    parse: fn(&Row<'_>) -> RepoResult<T>,
) -> RepoResult<Vec<T>> {
    let mut stmt = conn.prepare(sql)?;
    let mut rows = stmt.query([])?;
    let mut items = Vec::new();
    while let Some(row) = rows.next()? {
        items.push(parse(row)?);
    }
    Ok(items)
}

fn parse_food_row(row: &Row<'_>) -> RepoResult<FoodItem> {
    Ok(FoodItem {
        id: parse_record_id(row, "food_items")?,
        name: row.get("name")?,
        calories: row.get("calories")?,
        icon: row.get("icon")?,
        meal_type: row.get("meal_type")?,
        logged_at: parse_millis(row, "logged_at")?,
    })
}

fn parse_medication_row(row: &Row<'_>) -> RepoResult<MedicationItem> {
    Ok(MedicationItem {
        id: parse_record_id(row, "medications")?,
        name: row.get("name")?,
        dosage: row.get("dosage")?,
        frequency: row.get("frequency")?,
        icon: row.get("icon")?,
        is_taken: parse_flag(row, "is_taken")?,
        logged_at: parse_millis(row, "logged_at")?,
    })
}

fn parse_symptom_row(row: &Row<'_>) -> RepoResult<SymptomItem> {
    Ok(SymptomItem {
        id: parse_record_id(row, "symptom_logs")?,
        name: row.get("name")?,
        severity: row.get("severity")?,
        notes: row.get("notes")?,
        timestamp: parse_millis(row, "timestamp")?,
    })
}

fn parse_sleep_row(row: &Row<'_>) -> RepoResult<SleepLog> {
    Ok(SleepLog {
        id: parse_record_id(row, "sleep_logs")?,
        sleep_hours: row.get("sleep_hours")?,
        quality: row.get("quality")?,
        notes: row.get("notes")?,
        date: parse_millis(row, "date")?,
    })
}

fn parse_therapy_row(row: &Row<'_>) -> RepoResult<TherapySession> {
    Ok(TherapySession {
        id: parse_record_id(row, "therapy_sessions")?,
        session_type: row.get("type")?,
        duration_minutes: row.get("duration_minutes")?,
        notes: row.get("notes")?,
        date: parse_millis(row, "date")?,
    })
}

fn parse_timeline_row(row: &Row<'_>) -> RepoResult<TimelineEntry> {
    let kind_text: String = row.get("kind")?;
    let kind = TimelineEntryKind::parse(&kind_text).ok_or_else(|| {
        RepoError::InvalidData(format!(
            "invalid timeline kind `{kind_text}` in timeline_entries.kind"
        ))
    })?;
    Ok(TimelineEntry {
        id: parse_uuid(row, "timeline_entries")?,
        kind,
        title: row.get("title")?,
        subtitle: row.get("subtitle")?,
        icon: row.get("icon")?,
        timestamp: parse_millis(row, "timestamp")?,
    })
}

fn parse_uuid(row: &Row<'_>, table: &str) -> RepoResult<Uuid> {
    let text: String = row.get("uuid")?;
    Uuid::parse_str(&text)
        .map_err(|_| RepoError::InvalidData(format!("invalid uuid value `{text}` in {table}.uuid")))
}

fn parse_record_id(row: &Row<'_>, table: &str) -> RepoResult<RecordId> {
    parse_uuid(row, table).map(RecordId::from_uuid)
}

fn parse_millis(row: &Row<'_>, column: &str) -> RepoResult<DateTime<Utc>> {
    let millis: i64 = row.get(column)?;
    DateTime::from_timestamp_millis(millis).ok_or_else(|| {
        RepoError::InvalidData(format!("timestamp `{millis}` out of range in {column}"))
    })
}

fn parse_flag(row: &Row<'_>, column: &str) -> RepoResult<bool> {
    match row.get::<_, i64>(column)? {
        0 => Ok(false),
        1 => Ok(true),
        other => Err(RepoError::InvalidData(format!(
            "invalid flag value `{other}` in {column}"
        ))),
    }
}

fn bool_to_int(value: bool) -> i64 {
    i64::from(value)
}

fn ensure_journal_tables(conn: &Connection) -> RepoResult<()> {
    for &table in REQUIRED_TABLES {
        let exists: i64 = conn.query_row(
            "SELECT EXISTS(
                SELECT 1
                FROM sqlite_master
                WHERE type = 'table' AND name = ?1
            );",
            [table],
            |row| row.get(0),
        )?;
        if exists != 1 {
            return Err(RepoError::MissingRequiredTable(table));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::prepare_profile_for_storage;
    use crate::model::onboarding::{OnboardingProfile, SelectionKind};

    #[test]
    fn prepare_profile_falls_back_for_rejected_text() {
        let profile = OnboardingProfile {
            user_name: " \n ".to_string(),
            flare_frequency: String::new(),
            severity_level: 14.0,
            ..OnboardingProfile::default()
        };

        let prepared = prepare_profile_for_storage(&profile);
        assert_eq!(prepared.user_name, "User");
        assert_eq!(prepared.flare_frequency, "Weekly");
        assert_eq!(prepared.severity_level, 10.0);
    }

    #[test]
    fn prepare_profile_drops_invalid_selection_names() {
        let mut profile = OnboardingProfile::default();
        profile.conditions.insert("Lupus".to_string());
        profile.conditions.insert("bad\u{1}name".to_string());

        let prepared = prepare_profile_for_storage(&profile);
        let kept: Vec<&String> = prepared.selections(SelectionKind::Conditions).iter().collect();
        assert_eq!(kept, vec!["Lupus"]);
    }
}
