//! In-process session state for one journal user.

use crate::model::onboarding::{OnboardingProfile, OnboardingStep, SelectionKind, LAST_STEP_INDEX};
use crate::model::record::{
    FoodItem, MedicationItem, Record, RecordId, RecordKind, SleepLog, SymptomItem, TherapySession,
};
use crate::model::screen::AppScreen;
use crate::model::timeline::TimelineEntry;
use crate::state::observer::{ObserverRegistry, StateChange, SubscriptionId};
use crate::state::record_log::RecordLog;
use crate::validation::field::validate_severity_level;
use chrono::{Local, NaiveDate, TimeZone};
use log::debug;
use std::collections::BTreeSet;

/// Records and timeline loaded from storage at startup.
#[derive(Debug, Clone, Default)]
pub struct JournalSnapshot {
    pub food_items: Vec<FoodItem>,
    pub medications: Vec<MedicationItem>,
    pub symptoms: Vec<SymptomItem>,
    pub sleep_logs: Vec<SleepLog>,
    pub therapy_sessions: Vec<TherapySession>,
    pub timeline: Vec<TimelineEntry>,
}

/// Authoritative holder of onboarding progress and logged records.
///
/// Every mutation that changes a field publishes a [`StateChange`] to the
/// subscribed observers before returning. Record contents are not
/// validated here; callers pass already-validated records.
#[derive(Debug)]
pub struct SessionState {
    profile: OnboardingProfile,
    current_screen: AppScreen,
    selected_date: NaiveDate,
    food_items: RecordLog<FoodItem>,
    medications: RecordLog<MedicationItem>,
    symptoms: RecordLog<SymptomItem>,
    sleep_logs: RecordLog<SleepLog>,
    therapy_sessions: RecordLog<TherapySession>,
    timeline: Vec<TimelineEntry>,
    observers: ObserverRegistry,
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionState {
    /// Creates a state with wizard defaults, the home screen and no records.
    pub fn new() -> Self {
        Self {
            profile: OnboardingProfile::default(),
            current_screen: AppScreen::Home,
            selected_date: Local::now().date_naive(),
            food_items: RecordLog::new(),
            medications: RecordLog::new(),
            symptoms: RecordLog::new(),
            sleep_logs: RecordLog::new(),
            therapy_sessions: RecordLog::new(),
            timeline: Vec::new(),
            observers: ObserverRegistry::new(),
        }
    }

    pub fn subscribe(&mut self, observer: impl FnMut(&StateChange) + 'static) -> SubscriptionId {
        self.observers.subscribe(observer)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.observers.unsubscribe(id)
    }

    /// Replaces profile and collections with data read from storage.
    ///
    /// The step pointer is clamped and the timeline re-sorted newest first.
    pub fn restore(&mut self, mut profile: OnboardingProfile, snapshot: JournalSnapshot) {
        profile.current_step = profile.current_step.min(LAST_STEP_INDEX);
        profile.severity_level = validate_severity_level(profile.severity_level);
        self.profile = profile;
        self.food_items = RecordLog::from_records(snapshot.food_items);
        self.medications = RecordLog::from_records(snapshot.medications);
        self.symptoms = RecordLog::from_records(snapshot.symptoms);
        self.sleep_logs = RecordLog::from_records(snapshot.sleep_logs);
        self.therapy_sessions = RecordLog::from_records(snapshot.therapy_sessions);
        self.timeline = snapshot.timeline;
        self.timeline
            .sort_by(|left, right| right.timestamp.cmp(&left.timestamp));
        self.publish(StateChange::Restored);
    }

    // ---- onboarding -------------------------------------------------------

    pub fn profile(&self) -> &OnboardingProfile {
        &self.profile
    }

    pub fn show_onboarding(&self) -> bool {
        self.profile.show_onboarding
    }

    pub fn current_step(&self) -> u8 {
        self.profile.current_step
    }

    pub fn current_onboarding_step(&self) -> OnboardingStep {
        OnboardingStep::from_index(self.profile.current_step).unwrap_or(OnboardingStep::Summary)
    }

    pub fn user_name(&self) -> &str {
        &self.profile.user_name
    }

    pub fn severity_level(&self) -> f64 {
        self.profile.severity_level
    }

    pub fn flare_frequency(&self) -> &str {
        &self.profile.flare_frequency
    }

    pub fn selections(&self, kind: SelectionKind) -> &BTreeSet<String> {
        self.profile.selections(kind)
    }

    /// Hides the wizard and lands on the home screen. Idempotent.
    pub fn complete_onboarding(&mut self) {
        debug!("event=onboarding_complete module=state status=ok");
        self.set_show_onboarding(false);
        self.navigate_to(AppScreen::Home);
    }

    /// Restores every onboarding field to its default.
    ///
    /// Logged-record collections and the timeline are left untouched.
    pub fn reset_onboarding(&mut self) {
        debug!("event=onboarding_reset module=state status=ok");
        if self.profile == OnboardingProfile::default() {
            return;
        }
        self.profile = OnboardingProfile::default();
        self.publish(StateChange::OnboardingReset);
    }

    /// Moves one step forward, stopping at the last step. Returns the new step.
    pub fn advance_step(&mut self) -> u8 {
        self.set_step(self.profile.current_step.saturating_add(1))
    }

    /// Moves one step back, stopping at the first step. Returns the new step.
    pub fn retreat_step(&mut self) -> u8 {
        self.set_step(self.profile.current_step.saturating_sub(1))
    }

    /// Jumps to a step; indices past the last step are clamped to it.
    pub fn set_step(&mut self, step: u8) -> u8 {
        let bounded = step.min(LAST_STEP_INDEX);
        if bounded != self.profile.current_step {
            self.profile.current_step = bounded;
            self.publish(StateChange::CurrentStep(bounded));
        }
        bounded
    }

    /// Stores the name as typed; it is validated when the profile is saved.
    pub fn set_user_name(&mut self, name: impl Into<String>) {
        let name = name.into();
        if name != self.profile.user_name {
            self.profile.user_name = name;
            self.publish(StateChange::UserName);
        }
    }

    /// Sets the severity slider, clamped to `[0.0, 10.0]`.
    pub fn set_severity_level(&mut self, level: f64) {
        let bounded = validate_severity_level(level);
        if bounded != self.profile.severity_level {
            self.profile.severity_level = bounded;
            self.publish(StateChange::SeverityLevel(bounded));
        }
    }

    pub fn set_flare_frequency(&mut self, frequency: impl Into<String>) {
        let frequency = frequency.into();
        if frequency != self.profile.flare_frequency {
            self.profile.flare_frequency = frequency;
            self.publish(StateChange::FlareFrequency);
        }
    }

    /// Adds or removes one option from a selection set.
    ///
    /// Membership in the reference vocabulary is not checked here.
    pub fn set_selected(&mut self, kind: SelectionKind, value: impl Into<String>, selected: bool) {
        let value = value.into();
        let set = self.profile.selections_mut(kind);
        let changed = if selected {
            set.insert(value)
        } else {
            set.remove(&value)
        };
        if changed {
            self.publish(StateChange::Selection(kind));
        }
    }

    /// Flips membership of one option. Returns whether it is now selected.
    pub fn toggle_selection(&mut self, kind: SelectionKind, value: impl Into<String>) -> bool {
        let value = value.into();
        let selected = !self.profile.selections(kind).contains(&value);
        self.set_selected(kind, value, selected);
        selected
    }

    // ---- navigation -------------------------------------------------------

    pub fn current_screen(&self) -> AppScreen {
        self.current_screen
    }

    /// Sets the current screen. Reachability is not checked.
    pub fn navigate_to(&mut self, screen: AppScreen) {
        if screen != self.current_screen {
            self.current_screen = screen;
            self.publish(StateChange::Screen(screen));
        }
    }

    pub fn selected_date(&self) -> NaiveDate {
        self.selected_date
    }

    pub fn set_selected_date(&mut self, date: NaiveDate) {
        if date != self.selected_date {
            self.selected_date = date;
            self.publish(StateChange::SelectedDate(date));
        }
    }

    // ---- records ----------------------------------------------------------

    pub fn food_items(&self) -> &[FoodItem] {
        self.food_items.as_slice()
    }

    pub fn medications(&self) -> &[MedicationItem] {
        self.medications.as_slice()
    }

    pub fn medication(&self, id: RecordId) -> Option<&MedicationItem> {
        self.medications.get(id)
    }

    pub fn symptoms(&self) -> &[SymptomItem] {
        self.symptoms.as_slice()
    }

    pub fn sleep_logs(&self) -> &[SleepLog] {
        self.sleep_logs.as_slice()
    }

    pub fn therapy_sessions(&self) -> &[TherapySession] {
        self.therapy_sessions.as_slice()
    }

    pub fn add_food_item(&mut self, item: FoodItem) {
        let id = item.id();
        self.food_items.push(item);
        self.publish_record_added(FoodItem::KIND, id);
    }

    pub fn add_medication(&mut self, medication: MedicationItem) {
        let id = medication.id();
        self.medications.push(medication);
        self.publish_record_added(MedicationItem::KIND, id);
    }

    pub fn add_symptom(&mut self, symptom: SymptomItem) {
        let id = symptom.id();
        self.symptoms.push(symptom);
        self.publish_record_added(SymptomItem::KIND, id);
    }

    pub fn add_sleep_log(&mut self, log: SleepLog) {
        let id = log.id();
        self.sleep_logs.push(log);
        self.publish_record_added(SleepLog::KIND, id);
    }

    pub fn add_therapy_session(&mut self, session: TherapySession) {
        let id = session.id();
        self.therapy_sessions.push(session);
        self.publish_record_added(TherapySession::KIND, id);
    }

    /// Flips the taken flag of the stored medication with the same id.
    ///
    /// Returns the new flag, or `None` when no such medication is stored.
    pub fn toggle_medication(&mut self, medication: &MedicationItem) -> Option<bool> {
        self.toggle_medication_by_id(medication.id)
    }

    pub fn toggle_medication_by_id(&mut self, id: RecordId) -> Option<bool> {
        let is_taken = self.medications.get_mut(id)?.toggle_taken();
        self.publish(StateChange::MedicationToggled { id, is_taken });
        Some(is_taken)
    }

    /// Removes the medication with this id. Returns `false` on a miss.
    pub fn remove_medication(&mut self, id: RecordId) -> bool {
        if self.medications.remove_all(id) == 0 {
            return false;
        }
        self.publish(StateChange::RecordRemoved {
            kind: RecordKind::Medication,
            id,
        });
        true
    }

    // ---- timeline ---------------------------------------------------------

    /// Timeline entries, newest first.
    pub fn timeline_entries(&self) -> &[TimelineEntry] {
        &self.timeline
    }

    /// Inserts one entry keeping newest-first order.
    pub fn add_timeline_entry(&mut self, entry: TimelineEntry) {
        let position = self
            .timeline
            .partition_point(|existing| existing.timestamp >= entry.timestamp);
        self.timeline.insert(position, entry);
        self.publish(StateChange::TimelineUpdated);
    }

    /// Entries on the local calendar day `date`, newest first.
    pub fn timeline_entries_for_date(&self, date: NaiveDate) -> Vec<&TimelineEntry> {
        self.timeline_entries_for_date_in(date, &Local)
    }

    /// Entries on the calendar day `date` as seen in `tz`, newest first.
    pub fn timeline_entries_for_date_in<Tz: TimeZone>(
        &self,
        date: NaiveDate,
        tz: &Tz,
    ) -> Vec<&TimelineEntry> {
        self.timeline
            .iter()
            .filter(|entry| entry.is_on(date, tz))
            .collect()
    }

    fn set_show_onboarding(&mut self, visible: bool) {
        if visible != self.profile.show_onboarding {
            self.profile.show_onboarding = visible;
            self.publish(StateChange::OnboardingVisibility(visible));
        }
    }

    fn publish_record_added(&mut self, kind: RecordKind, id: RecordId) {
        self.publish(StateChange::RecordAdded { kind, id });
    }

    fn publish(&mut self, change: StateChange) {
        self.observers.notify(&change);
    }
}
