use chrono::{Duration, Months, TimeZone, Utc};
use symptom_core::validation::field::{
    date_window, text_length, validate_calories, validate_date, validate_date_at,
    validate_duration, validate_name, validate_quality, validate_severity,
    validate_severity_level, validate_sleep_hours, validate_string,
};
use symptom_core::validation::record::{
    validate_food_item, validate_medication, validate_sleep_log, validate_symptom,
    validate_therapy_session,
};

#[test]
fn returned_text_never_exceeds_max_length() {
    let samples = [
        "",
        "   ",
        "Joint Pain",
        "  padded value with spaces  ",
        "ümlaut çharacters ünïcode",
        "🤕🤕🤕🤕🤕🤕🤕🤕🤕🤕🤕🤕",
        "👨\u{200D}👩\u{200D}👧 family 👍🏽 thumbs",
        "cafe\u{301} re\u{301}sume\u{301}",
        "a very long sentence about morning stiffness that keeps going well past any small limit",
    ];
    for max in [0, 1, 5, 10, 50] {
        for sample in samples {
            if let Some(value) = validate_string(sample, max, true) {
                assert!(
                    text_length(&value) <= max,
                    "`{sample}` with max {max} produced {} chars",
                    text_length(&value)
                );
                assert!(sample.trim().starts_with(value.as_str()));
            }
        }
    }
}

#[test]
fn empty_required_text_is_absent() {
    assert_eq!(validate_string("", 10, false), None);
    assert_eq!(validate_string(" \n\t ", 10, false), None);
    assert_eq!(validate_string("", 10, true), Some(String::new()));
}

#[test]
fn nul_byte_is_absent_whatever_the_parameters() {
    assert_eq!(validate_string("a\0b", 10, false), None);
    assert_eq!(validate_string("a\0b", 10, true), None);
    assert_eq!(validate_string("a\0b", 1, true), None);
    assert_eq!(validate_name("a\0b"), None);
}

#[test]
fn text_is_trimmed_then_truncated() {
    assert_eq!(
        validate_string("  Brain Fog\n", 100, false).as_deref(),
        Some("Brain Fog")
    );
    assert_eq!(validate_string("  Fatigue  ", 3, false).as_deref(), Some("Fat"));
}

#[test]
fn truncation_never_splits_a_user_perceived_character() {
    let family = "👨\u{200D}👩\u{200D}👧";
    assert_eq!(validate_string(family, 1, false).as_deref(), Some(family));
    assert_eq!(
        validate_string(&format!("ab{family}cd"), 3, false),
        Some(format!("ab{family}"))
    );

    let name = format!("{}e\u{301}", "x".repeat(99));
    let validated = validate_name(&name).unwrap();
    assert_eq!(validated, name);
    assert_eq!(text_length(&validated), 100);

    let longer = format!("{name}y");
    assert_eq!(validate_name(&longer).unwrap(), name);
}

#[test]
fn names_reject_bidi_overrides() {
    assert_eq!(validate_name("Robin\u{202E}txt.exe"), None);
    assert_eq!(validate_name("\u{2066}Robin\u{2069}"), None);
    assert_eq!(validate_name("Zoë").as_deref(), Some("Zoë"));
}

#[test]
fn names_reject_control_characters() {
    assert_eq!(validate_name("Lupus"), Some("Lupus".to_string()));
    assert_eq!(validate_name("Joint\tPain"), None);
    assert_eq!(validate_name("Joint\u{7}Pain"), None);
    let long = "x".repeat(150);
    assert_eq!(validate_name(&long).map(|name| name.len()), Some(100));
}

#[test]
fn severity_is_clamped_and_identity_in_range() {
    for n in [i64::MIN, -100, -1, 0, 1, 5, 9, 10, 11, 1_000, i64::MAX] {
        let clamped = i64::from(validate_severity(n));
        assert!((0..=10).contains(&clamped));
        if (0..=10).contains(&n) {
            assert_eq!(clamped, n);
        }
    }
}

#[test]
fn numeric_fields_clamp_to_their_ranges() {
    assert_eq!(validate_calories(-5), 0);
    assert_eq!(validate_calories(999_999), 10_000);
    assert_eq!(validate_calories(450), 450);

    assert_eq!(validate_sleep_hours(30.0), 24.0);
    assert_eq!(validate_sleep_hours(-1.0), 0.0);
    assert_eq!(validate_sleep_hours(7.5), 7.5);
    assert_eq!(validate_sleep_hours(f64::NAN), 0.0);

    assert_eq!(validate_quality(12), 10);
    assert_eq!(validate_duration(2_000), 1_440);
    assert_eq!(validate_duration(-30), 0);
    assert_eq!(validate_severity_level(10.5), 10.0);
}

#[test]
fn far_future_date_becomes_now_not_the_boundary() {
    let before = Utc::now();
    let clamped = validate_date(before + Duration::days(2));
    let after = Utc::now();

    assert!(clamped >= before && clamped <= after);
}

#[test]
fn far_past_date_becomes_exactly_the_lower_bound() {
    let now = Utc.with_ymd_and_hms(2024, 6, 15, 12, 30, 0).unwrap();
    let clamped = validate_date_at(now - Duration::days(365 * 20), now);

    assert_eq!(clamped, Utc.with_ymd_and_hms(2014, 6, 15, 12, 30, 0).unwrap());
    assert_eq!(clamped, date_window(now).0);
}

#[test]
fn far_past_date_with_live_clock_lands_on_ten_years_back() {
    let now = Utc::now();
    let clamped = validate_date(now - Duration::days(365 * 20));
    let expected = now.checked_sub_months(Months::new(120)).unwrap();

    // Both sides derive from clocks read microseconds apart.
    assert!((clamped - expected).num_seconds().abs() < 5);
}

#[test]
fn dates_inside_window_are_unchanged() {
    let now = Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap();
    let yesterday = now - Duration::days(1);
    let later_today = now + Duration::hours(20);

    assert_eq!(validate_date_at(yesterday, now), yesterday);
    assert_eq!(validate_date_at(later_today, now), later_today);
}

#[test]
fn composite_validators_report_every_field() {
    let food = validate_food_item("", 20_000, "Lunch");
    assert_eq!(food.name, None);
    assert_eq!(food.calories, 10_000);
    assert_eq!(food.meal_type.as_deref(), Some("Lunch"));
    assert_eq!(food.first_rejected_field(), Some("name"));

    let medication = validate_medication("Methotrexate", "", "Weekly");
    assert_eq!(medication.first_rejected_field(), Some("dosage"));
    assert_eq!(medication.frequency.as_deref(), Some("Weekly"));

    let symptom = validate_symptom("Fatigue", 14, "  after work  ");
    assert_eq!(symptom.first_rejected_field(), None);
    assert_eq!(symptom.severity, 10);
    assert_eq!(symptom.notes.as_deref(), Some("after work"));

    let sleep = validate_sleep_log(-2.0, 3, "");
    assert_eq!(sleep.hours, 0.0);
    assert_eq!(sleep.notes.as_deref(), Some(""));

    let therapy = validate_therapy_session("   ", 90, "notes");
    assert_eq!(therapy.first_rejected_field(), Some("type"));
    assert_eq!(therapy.duration_minutes, 90);
}
