//! Field-level validators.
//!
//! Text rules reject; numeric and date rules clamp. The two styles are kept
//! apart on purpose and must not be unified.

use chrono::{DateTime, Days, Months, Utc};
use unicode_segmentation::UnicodeSegmentation;

/// Upper bound for names (user name, condition names, record names).
pub const NAME_MAX_LENGTH: usize = 100;
/// Upper bound for short labels such as meal type or flare frequency.
pub const LABEL_MAX_LENGTH: usize = 50;
/// Upper bound for dosage, frequency and therapy type labels.
pub const DESCRIPTOR_MAX_LENGTH: usize = 100;
/// Upper bound for free-form notes.
pub const NOTES_MAX_LENGTH: usize = 1000;

pub const SEVERITY_MAX: u8 = 10;
pub const QUALITY_MAX: u8 = 10;
pub const CALORIES_MAX: u32 = 10_000;
pub const DURATION_MAX_MINUTES: u32 = 1_440;
pub const SLEEP_HOURS_MAX: f64 = 24.0;
pub const SEVERITY_LEVEL_MAX: f64 = 10.0;

const DATE_PAST_WINDOW: Months = Months::new(12 * 10);
const DATE_FUTURE_WINDOW: Days = Days::new(1);

/// Validates free text with length and emptiness constraints.
///
/// Rules, in order:
/// - input containing a NUL byte is rejected;
/// - leading/trailing whitespace (newlines included) is trimmed;
/// - empty trimmed text is rejected unless `allow_empty`;
/// - text longer than `max_length` characters is truncated to exactly
///   `max_length` characters.
///
/// A character is one extended grapheme cluster, so emoji sequences and
/// combining accents are never split.
///
/// Returns `None` when the input is rejected.
pub fn validate_string(input: &str, max_length: usize, allow_empty: bool) -> Option<String> {
    if input.contains('\0') {
        return None;
    }

    let trimmed = input.trim();
    if trimmed.is_empty() && !allow_empty {
        return None;
    }

    match trimmed.grapheme_indices(true).nth(max_length) {
        Some((cut, _)) => Some(trimmed[..cut].to_string()),
        None => Some(trimmed.to_string()),
    }
}

/// Length of `text` in user-perceived characters (extended grapheme clusters).
pub fn text_length(text: &str) -> usize {
    text.graphemes(true).count()
}

/// Validates a required name (user name, option name, record name).
///
/// Same as [`validate_string`] with `max_length = 100` and
/// `allow_empty = false`, then rejects any remaining control character or
/// bidirectional embedding, override or isolate.
pub fn validate_name(name: &str) -> Option<String> {
    let validated = validate_string(name, NAME_MAX_LENGTH, false)?;
    if validated
        .chars()
        .any(|ch| ch.is_control() || is_bidi_control(ch))
    {
        return None;
    }
    Some(validated)
}

// U+202A..=U+202E embeddings/overrides, U+2066..=U+2069 isolates.
fn is_bidi_control(ch: char) -> bool {
    matches!(ch, '\u{202A}'..='\u{202E}' | '\u{2066}'..='\u{2069}')
}

/// Clamps a symptom severity to `[0, 10]`.
pub fn validate_severity(severity: i64) -> u8 {
    clamp_u8(severity, SEVERITY_MAX)
}

/// Clamps a calorie count to `[0, 10000]`.
pub fn validate_calories(calories: i64) -> u32 {
    clamp_u32(calories, CALORIES_MAX)
}

/// Clamps sleep hours to `[0.0, 24.0]`. NaN maps to `0.0`.
pub fn validate_sleep_hours(hours: f64) -> f64 {
    clamp_real(hours, SLEEP_HOURS_MAX)
}

/// Clamps a quality rating to `[0, 10]`.
pub fn validate_quality(quality: i64) -> u8 {
    clamp_u8(quality, QUALITY_MAX)
}

/// Clamps a duration in minutes to `[0, 1440]`.
pub fn validate_duration(minutes: i64) -> u32 {
    clamp_u32(minutes, DURATION_MAX_MINUTES)
}

/// Clamps the onboarding severity level slider to `[0.0, 10.0]`. NaN maps to `0.0`.
pub fn validate_severity_level(level: f64) -> f64 {
    clamp_real(level, SEVERITY_LEVEL_MAX)
}

/// Clamps a date into `[now - 10 years, now + 1 day]` using the current time.
///
/// See [`validate_date_at`] for the exact rules.
pub fn validate_date(date: DateTime<Utc>) -> DateTime<Utc> {
    validate_date_at(date, Utc::now())
}

/// Clamps a date relative to an explicit `now`.
///
/// - Later than `now + 1 day`: replaced by `now` itself, not by the upper bound.
/// - Earlier than `now - 10 years`: replaced by exactly that lower bound.
/// - Otherwise returned unchanged.
pub fn validate_date_at(date: DateTime<Utc>, now: DateTime<Utc>) -> DateTime<Utc> {
    let (min_past, max_future) = date_window(now);

    if date > max_future {
        return now;
    }

    if date < min_past {
        return min_past;
    }

    date
}

/// Returns the accepted `(earliest, latest)` date window around `now`.
///
/// Calendar arithmetic that cannot be represented falls back to `now`.
pub fn date_window(now: DateTime<Utc>) -> (DateTime<Utc>, DateTime<Utc>) {
    let min_past = now.checked_sub_months(DATE_PAST_WINDOW).unwrap_or(now);
    let max_future = now.checked_add_days(DATE_FUTURE_WINDOW).unwrap_or(now);
    (min_past, max_future)
}

fn clamp_u8(value: i64, max: u8) -> u8 {
    u8::try_from(value.clamp(0, i64::from(max))).unwrap_or(max)
}

fn clamp_u32(value: i64, max: u32) -> u32 {
    u32::try_from(value.clamp(0, i64::from(max))).unwrap_or(max)
}

fn clamp_real(value: f64, max: f64) -> f64 {
    if value.is_nan() {
        return 0.0;
    }
    value.clamp(0.0, max)
}
