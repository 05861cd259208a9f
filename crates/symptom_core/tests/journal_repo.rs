use chrono::{TimeZone, Utc};
use rusqlite::Connection;
use symptom_core::db::{open_db, open_db_in_memory};
use symptom_core::{
    FoodItem, JournalRepository, MedicationItem, OnboardingProfile, RecordId, RepoError,
    SelectionKind, SleepLog, SqliteJournalRepository, SymptomItem, TherapySession, TimelineEntry,
    TimelineEntryKind,
};

#[test]
fn load_profile_is_none_before_first_save() {
    let mut conn = open_db_in_memory().unwrap();
    let repo = SqliteJournalRepository::try_new(&mut conn).unwrap();

    assert!(repo.load_profile().unwrap().is_none());
}

#[test]
fn profile_roundtrip_keeps_fields_and_selections() {
    let mut conn = open_db_in_memory().unwrap();
    let mut repo = SqliteJournalRepository::try_new(&mut conn).unwrap();

    let mut profile = OnboardingProfile {
        show_onboarding: false,
        user_name: "  Sam  ".to_string(),
        severity_level: 7.5,
        flare_frequency: "Monthly".to_string(),
        ..OnboardingProfile::default()
    };
    profile.conditions.insert("Lupus".to_string());
    profile.triggers.insert("Stress".to_string());
    profile.goals.insert("Improve Sleep".to_string());
    repo.save_profile(&profile).unwrap();

    let loaded = repo.load_profile().unwrap().unwrap();
    assert!(!loaded.show_onboarding);
    assert_eq!(loaded.current_step, 0);
    assert_eq!(loaded.user_name, "Sam");
    assert_eq!(loaded.severity_level, 7.5);
    assert_eq!(loaded.flare_frequency, "Monthly");
    assert_eq!(loaded.conditions, profile.conditions);
    assert_eq!(loaded.triggers, profile.triggers);
    assert_eq!(loaded.goals, profile.goals);
    assert!(loaded.symptoms.is_empty());
}

#[test]
fn saving_profile_replaces_previous_selections() {
    let mut conn = open_db_in_memory().unwrap();
    let mut repo = SqliteJournalRepository::try_new(&mut conn).unwrap();

    let mut profile = OnboardingProfile::default();
    profile.symptoms.insert("Fatigue".to_string());
    profile.symptoms.insert("Brain Fog".to_string());
    repo.save_profile(&profile).unwrap();

    profile.symptoms.remove("Fatigue");
    repo.save_profile(&profile).unwrap();

    let loaded = repo.load_profile().unwrap().unwrap();
    let symptoms: Vec<&str> = loaded
        .selections(SelectionKind::Symptoms)
        .iter()
        .map(String::as_str)
        .collect();
    assert_eq!(symptoms, vec!["Brain Fog"]);
}

#[test]
fn records_load_back_in_insertion_order() {
    let mut conn = open_db_in_memory().unwrap();
    let repo = SqliteJournalRepository::try_new(&mut conn).unwrap();
    let at = Utc.with_ymd_and_hms(2024, 4, 2, 9, 15, 0).unwrap();

    let mut lunch = FoodItem::new("Salad", 350, "🥗", "Lunch");
    lunch.logged_at = at;
    let breakfast = FoodItem::new("Oatmeal", 300, "🥣", "Breakfast");
    repo.insert_food_item(&lunch).unwrap();
    repo.insert_food_item(&breakfast).unwrap();

    let symptom = SymptomItem::new("Joint Pain", 8, "left knee", at);
    repo.insert_symptom(&symptom).unwrap();
    let sleep = SleepLog::new(6.5, 4, "", at);
    repo.insert_sleep_log(&sleep).unwrap();
    let therapy = TherapySession::new("Physical Therapy", 45, "", at);
    repo.insert_therapy_session(&therapy).unwrap();

    let journal = repo.load_journal().unwrap();
    let food_names: Vec<&str> = journal.food_items.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(food_names, vec!["Salad", "Oatmeal"]);
    assert_eq!(journal.food_items[0], lunch);
    assert_eq!(journal.symptoms, vec![symptom]);
    assert_eq!(journal.sleep_logs, vec![sleep]);
    assert_eq!(journal.therapy_sessions, vec![therapy]);
}

#[test]
fn medication_flag_update_and_delete() {
    let mut conn = open_db_in_memory().unwrap();
    let repo = SqliteJournalRepository::try_new(&mut conn).unwrap();

    let medication = MedicationItem::new("Prednisone", "5mg", "Daily", "💊");
    repo.insert_medication(&medication).unwrap();
    repo.set_medication_taken(medication.id, true).unwrap();

    let journal = repo.load_journal().unwrap();
    assert!(journal.medications[0].is_taken);

    repo.delete_medication(medication.id).unwrap();
    assert!(repo.load_journal().unwrap().medications.is_empty());

    let missing = RecordId::new();
    assert!(matches!(
        repo.delete_medication(missing),
        Err(RepoError::NotFound(id)) if id == missing
    ));
    assert!(matches!(
        repo.set_medication_taken(missing, true),
        Err(RepoError::NotFound(_))
    ));
}

#[test]
fn timeline_loads_newest_first() {
    let mut conn = open_db_in_memory().unwrap();
    let repo = SqliteJournalRepository::try_new(&mut conn).unwrap();

    let early = TimelineEntry::new(
        TimelineEntryKind::Rest,
        "Sleep Log",
        "7 hours, Quality: 6/10",
        "😴",
        Utc.with_ymd_and_hms(2024, 4, 1, 7, 0, 0).unwrap(),
    );
    let late = TimelineEntry::new(
        TimelineEntryKind::Food,
        "Dinner: Soup",
        "250 calories",
        "🍲",
        Utc.with_ymd_and_hms(2024, 4, 1, 19, 0, 0).unwrap(),
    );
    repo.insert_timeline_entry(&early).unwrap();
    repo.insert_timeline_entry(&late).unwrap();

    assert_eq!(repo.load_journal().unwrap().timeline, vec![late, early]);
}

#[test]
fn malformed_rows_are_reported_not_masked() {
    let mut conn = open_db_in_memory().unwrap();
    conn.execute(
        "INSERT INTO food_items (uuid, name, calories, icon, meal_type, logged_at)
         VALUES ('not-a-uuid', 'Toast', 80, '🍞', 'Breakfast', 0);",
        [],
    )
    .unwrap();
    let repo = SqliteJournalRepository::try_new(&mut conn).unwrap();

    let err = repo.load_journal().unwrap_err();
    assert!(matches!(err, RepoError::InvalidData(_)));
}

#[test]
fn try_new_rejects_unmigrated_connection() {
    let mut conn = Connection::open_in_memory().unwrap();

    let result = SqliteJournalRepository::try_new(&mut conn);
    assert!(matches!(
        result,
        Err(RepoError::MissingRequiredTable("user_profile"))
    ));
}

#[test]
fn journal_survives_reopening_the_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("journal.db");
    let symptom = SymptomItem::new("Stiffness", 5, "", Utc::now());

    {
        let mut conn = open_db(&path).unwrap();
        let repo = SqliteJournalRepository::try_new(&mut conn).unwrap();
        repo.insert_symptom(&symptom).unwrap();
    }

    let mut conn = open_db(&path).unwrap();
    let repo = SqliteJournalRepository::try_new(&mut conn).unwrap();
    let journal = repo.load_journal().unwrap();
    assert_eq!(journal.symptoms.len(), 1);
    assert_eq!(journal.symptoms[0].id, symptom.id);
    assert_eq!(
        journal.symptoms[0].timestamp.timestamp_millis(),
        symptom.timestamp.timestamp_millis()
    );
}

#[test]
fn records_serialize_with_stable_wire_names() {
    let session = TherapySession::new(
        "Counseling",
        50,
        "",
        Utc.with_ymd_and_hms(2024, 1, 5, 10, 0, 0).unwrap(),
    );
    let value = serde_json::to_value(&session).unwrap();

    assert_eq!(value["type"], "Counseling");
    assert_eq!(value["duration_minutes"], 50);
    assert_eq!(value["id"], session.id.to_string());
    assert!(value.get("session_type").is_none());

    let entry = TimelineEntry::for_therapy(&session);
    let value = serde_json::to_value(&entry).unwrap();
    assert_eq!(value["kind"], "therapy");
}
