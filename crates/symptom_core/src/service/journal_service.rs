//! Journal use-case service.
//!
//! # Responsibility
//! - Validate drafts, persist records, mirror them into [`SessionState`]
//!   and report product events.
//! - Drive the onboarding wizard and persist the profile.
//!
//! # Invariants
//! - Storage is written before session state changes; a failed write leaves
//!   the state untouched.
//! - Timeline persistence failures are logged and do not fail the call.
//! - Log lines carry record kinds and field names, never user text.

use crate::analytics::{AnalyticsEvent, EventSink};
use crate::model::onboarding::{OnboardingProfile, OnboardingStep, SelectionKind, FALLBACK_USER_NAME};
use crate::model::record::{
    FoodItem, MedicationItem, Record, RecordId, RecordKind, SleepLog, SymptomItem, TherapySession,
};
use crate::model::screen::AppScreen;
use crate::model::timeline::TimelineEntry;
use crate::repo::journal_repo::{JournalRepository, RepoError};
use crate::service::draft::{FoodDraft, MedicationDraft, SleepDraft, SymptomDraft, TherapyDraft};
use crate::state::SessionState;
use crate::validation::field::validate_date;
use crate::validation::record::{
    validate_food_item, validate_medication, validate_sleep_log, validate_symptom,
    validate_therapy_session,
};
use crate::vocabulary::{canonical_option, default_selections};
use chrono::{DateTime, NaiveDate, Utc};
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type JournalServiceResult<T> = Result<T, JournalServiceError>;

/// Error for journal service flows.
#[derive(Debug)]
pub enum JournalServiceError {
    /// A required field was absent after validation.
    InvalidField(&'static str),
    /// Selection value is not part of the reference vocabulary.
    UnknownOption { kind: SelectionKind, value: String },
    /// Persistence-layer failure.
    Repo(RepoError),
}

impl Display for JournalServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidField(field) => write!(f, "invalid or missing field: {field}"),
            Self::UnknownOption { kind, value } => {
                write!(f, "`{value}` is not a known {} option", kind.as_str())
            }
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for JournalServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for JournalServiceError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

/// Result of pressing "next" in the onboarding wizard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    Advanced(OnboardingStep),
    /// The wizard was on its last step and is now closed.
    Completed,
}

/// Call site tying validation, storage, session state and analytics.
pub struct JournalService<R: JournalRepository, S: EventSink> {
    state: SessionState,
    repo: R,
    sink: S,
}

impl<R: JournalRepository, S: EventSink> JournalService<R, S> {
    /// Wraps existing collaborators without touching storage.
    pub fn new(state: SessionState, repo: R, sink: S) -> Self {
        Self { state, repo, sink }
    }

    /// Builds a service with a fresh state loaded from `repo`.
    ///
    /// On first launch the default profile is seeded and saved.
    pub fn bootstrap(repo: R, sink: S) -> JournalServiceResult<Self> {
        let mut service = Self::new(SessionState::new(), repo, sink);
        service.load()?;
        Ok(service)
    }

    /// Reloads profile and records from storage into the session state.
    pub fn load(&mut self) -> JournalServiceResult<()> {
        let profile = match self.repo.load_profile()? {
            Some(profile) => profile,
            None => {
                let seeded = seeded_profile();
                self.repo.save_profile(&seeded)?;
                info!("event=profile_seed module=service status=ok");
                seeded
            }
        };
        let snapshot = self.repo.load_journal()?;
        info!(
            "event=journal_load module=service status=ok food={} medications={} symptoms={} sleep={} therapy={} timeline={}",
            snapshot.food_items.len(),
            snapshot.medications.len(),
            snapshot.symptoms.len(),
            snapshot.sleep_logs.len(),
            snapshot.therapy_sessions.len(),
            snapshot.timeline.len()
        );
        self.state.restore(profile, snapshot);
        Ok(())
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Direct state access for UI-only fields (name typing, sliders, dates).
    pub fn state_mut(&mut self) -> &mut SessionState {
        &mut self.state
    }

    // ---- record logging ---------------------------------------------------

    pub fn log_food(&mut self, draft: &FoodDraft) -> JournalServiceResult<RecordId> {
        let validated = validate_food_item(&draft.name, draft.calories, &draft.meal_type);
        reject_if_missing(FoodItem::KIND, validated.first_rejected_field())?;
        let (Some(name), Some(meal_type)) = (validated.name, validated.meal_type) else {
            return Err(JournalServiceError::InvalidField("name"));
        };

        let item = FoodItem::new(name, validated.calories, draft.icon.as_str(), meal_type);
        self.repo.insert_food_item(&item)?;
        let id = item.id;
        let entry = TimelineEntry::for_food(&item);
        self.state.add_food_item(item);
        self.append_timeline(entry);
        self.finish_log(FoodItem::KIND, AnalyticsEvent::FoodLogged);
        Ok(id)
    }

    pub fn log_medication(&mut self, draft: &MedicationDraft) -> JournalServiceResult<RecordId> {
        let validated = validate_medication(&draft.name, &draft.dosage, &draft.frequency);
        reject_if_missing(MedicationItem::KIND, validated.first_rejected_field())?;
        let (Some(name), Some(dosage), Some(frequency)) =
            (validated.name, validated.dosage, validated.frequency)
        else {
            return Err(JournalServiceError::InvalidField("name"));
        };

        let mut medication = MedicationItem::new(name, dosage, frequency, draft.icon.as_str());
        medication.is_taken = draft.is_taken;
        self.repo.insert_medication(&medication)?;
        let id = medication.id;
        let entry = medication
            .is_taken
            .then(|| TimelineEntry::for_medication(&medication));
        self.state.add_medication(medication);
        if let Some(entry) = entry {
            self.append_timeline(entry);
            self.sink.track(AnalyticsEvent::MedicationTaken);
        }
        info!(
            "event=journal_log module=service status=ok kind={}",
            MedicationItem::KIND.as_str()
        );
        Ok(id)
    }

    pub fn log_symptom(&mut self, draft: &SymptomDraft) -> JournalServiceResult<RecordId> {
        let validated = validate_symptom(&draft.name, draft.severity, &draft.notes);
        reject_if_missing(SymptomItem::KIND, validated.first_rejected_field())?;
        let Some(name) = validated.name else {
            return Err(JournalServiceError::InvalidField("name"));
        };

        let symptom = SymptomItem::new(
            name,
            validated.severity,
            validated.notes.unwrap_or_default(),
            clamp_date(draft.timestamp),
        );
        self.repo.insert_symptom(&symptom)?;
        let id = symptom.id;
        let entry = TimelineEntry::for_symptom(&symptom);
        self.state.add_symptom(symptom);
        self.append_timeline(entry);
        self.finish_log(SymptomItem::KIND, AnalyticsEvent::SymptomLogged);
        Ok(id)
    }

    /// Sleep logs have no required text and are never rejected by validation.
    pub fn log_sleep(&mut self, draft: &SleepDraft) -> JournalServiceResult<RecordId> {
        let validated = validate_sleep_log(draft.hours, draft.quality, &draft.notes);
        let log = SleepLog::new(
            validated.hours,
            validated.quality,
            validated.notes.unwrap_or_default(),
            clamp_date(draft.date),
        );
        self.repo.insert_sleep_log(&log)?;
        let id = log.id;
        let entry = TimelineEntry::for_sleep(&log);
        self.state.add_sleep_log(log);
        self.append_timeline(entry);
        self.finish_log(SleepLog::KIND, AnalyticsEvent::SleepLogged);
        Ok(id)
    }

    pub fn log_therapy(&mut self, draft: &TherapyDraft) -> JournalServiceResult<RecordId> {
        let validated =
            validate_therapy_session(&draft.session_type, draft.duration_minutes, &draft.notes);
        reject_if_missing(TherapySession::KIND, validated.first_rejected_field())?;
        let Some(session_type) = validated.session_type else {
            return Err(JournalServiceError::InvalidField("type"));
        };

        let session = TherapySession::new(
            session_type,
            validated.duration_minutes,
            validated.notes.unwrap_or_default(),
            clamp_date(draft.date),
        );
        self.repo.insert_therapy_session(&session)?;
        let id = session.id;
        let entry = TimelineEntry::for_therapy(&session);
        self.state.add_therapy_session(session);
        self.append_timeline(entry);
        self.finish_log(TherapySession::KIND, AnalyticsEvent::TherapySessionLogged);
        Ok(id)
    }

    // ---- medications ------------------------------------------------------

    /// Flips the taken flag of a stored medication.
    ///
    /// Returns `Ok(None)` when no medication has this id.
    pub fn toggle_medication(&mut self, id: RecordId) -> JournalServiceResult<Option<bool>> {
        let Some(current) = self.state.medication(id).map(|medication| medication.is_taken) else {
            return Ok(None);
        };
        self.repo.set_medication_taken(id, !current)?;
        let is_taken = self.state.toggle_medication_by_id(id);
        if is_taken == Some(true) {
            self.sink.track(AnalyticsEvent::MedicationTaken);
        }
        info!("event=medication_toggle module=service status=ok");
        Ok(is_taken)
    }

    /// Removes a medication from storage and state. Returns `false` on a miss.
    pub fn remove_medication(&mut self, id: RecordId) -> JournalServiceResult<bool> {
        if self.state.medication(id).is_none() {
            return Ok(false);
        }
        match self.repo.delete_medication(id) {
            Ok(()) | Err(RepoError::NotFound(_)) => {}
            Err(err) => return Err(err.into()),
        }
        let removed = self.state.remove_medication(id);
        info!("event=medication_remove module=service status=ok");
        Ok(removed)
    }

    // ---- onboarding -------------------------------------------------------

    /// Advances the wizard; on the last step this completes onboarding.
    pub fn next_step(&mut self) -> JournalServiceResult<StepOutcome> {
        if self.state.current_onboarding_step().is_last() {
            self.complete_onboarding()?;
            return Ok(StepOutcome::Completed);
        }
        self.state.advance_step();
        Ok(StepOutcome::Advanced(self.state.current_onboarding_step()))
    }

    pub fn previous_step(&mut self) -> OnboardingStep {
        self.state.retreat_step();
        self.state.current_onboarding_step()
    }

    /// Persists the profile as completed, then closes the wizard.
    pub fn complete_onboarding(&mut self) -> JournalServiceResult<()> {
        let mut profile = self.state.profile().clone();
        profile.show_onboarding = false;
        self.repo.save_profile(&profile)?;
        self.state.complete_onboarding();
        self.sink.track(AnalyticsEvent::OnboardingCompleted);
        info!("event=onboarding_complete module=service status=ok");
        Ok(())
    }

    /// Persists a default profile, then resets the wizard. Records are kept.
    pub fn reset_onboarding(&mut self) -> JournalServiceResult<()> {
        self.repo.save_profile(&OnboardingProfile::default())?;
        self.state.reset_onboarding();
        info!("event=onboarding_reset module=service status=ok");
        Ok(())
    }

    /// Persists the current profile without changing wizard visibility.
    pub fn save_onboarding(&mut self) -> JournalServiceResult<()> {
        self.repo.save_profile(self.state.profile())?;
        info!("event=profile_save module=service status=ok");
        Ok(())
    }

    /// Selects or deselects a vocabulary option, stored in canonical spelling.
    pub fn select_option(
        &mut self,
        kind: SelectionKind,
        value: &str,
        selected: bool,
    ) -> JournalServiceResult<()> {
        let canonical = known_option(kind, value)?;
        self.state.set_selected(kind, canonical, selected);
        Ok(())
    }

    /// Flips a vocabulary option. Returns whether it is now selected.
    pub fn toggle_option(&mut self, kind: SelectionKind, value: &str) -> JournalServiceResult<bool> {
        let canonical = known_option(kind, value)?;
        Ok(self.state.toggle_selection(kind, canonical))
    }

    // ---- navigation -------------------------------------------------------

    pub fn navigate_to(&mut self, screen: AppScreen) {
        self.state.navigate_to(screen);
        self.sink.track(AnalyticsEvent::ScreenView(screen));
    }

    /// Timeline entries on the local calendar day `date`, newest first.
    pub fn timeline_for_date(&self, date: NaiveDate) -> Vec<&TimelineEntry> {
        self.state.timeline_entries_for_date(date)
    }

    fn append_timeline(&mut self, entry: TimelineEntry) {
        if let Err(err) = self.repo.insert_timeline_entry(&entry) {
            warn!(
                "event=timeline_append module=service status=error kind={} error={err}",
                entry.kind.as_str()
            );
        }
        self.state.add_timeline_entry(entry);
    }

    fn finish_log(&self, kind: RecordKind, event: AnalyticsEvent) {
        self.sink.track(event);
        info!(
            "event=journal_log module=service status=ok kind={}",
            kind.as_str()
        );
    }
}

fn reject_if_missing(kind: RecordKind, field: Option<&'static str>) -> JournalServiceResult<()> {
    match field {
        Some(field) => {
            warn!(
                "event=journal_log module=service status=rejected kind={} field={field}",
                kind.as_str()
            );
            Err(JournalServiceError::InvalidField(field))
        }
        None => Ok(()),
    }
}

fn known_option(kind: SelectionKind, value: &str) -> JournalServiceResult<&'static str> {
    canonical_option(kind, value).ok_or_else(|| JournalServiceError::UnknownOption {
        kind,
        value: value.to_string(),
    })
}

fn clamp_date(date: Option<DateTime<Utc>>) -> DateTime<Utc> {
    validate_date(date.unwrap_or_else(Utc::now))
}

/// Profile written on first launch.
fn seeded_profile() -> OnboardingProfile {
    let mut profile = OnboardingProfile {
        user_name: FALLBACK_USER_NAME.to_string(),
        ..OnboardingProfile::default()
    };
    for kind in SelectionKind::ALL {
        profile
            .selections_mut(kind)
            .extend(default_selections(kind).iter().map(|name| name.to_string()));
    }
    profile
}
