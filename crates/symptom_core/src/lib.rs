//! Core domain logic for the symptom journal.
//! Validation, session state and storage live here; presentation does not.

pub mod analytics;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod state;
pub mod validation;
pub mod vocabulary;

pub use analytics::{AnalyticsEvent, EventSink, LogEventSink, NoopEventSink};
pub use db::{open_db, open_db_in_memory, DbError, DbResult};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::onboarding::{OnboardingProfile, OnboardingStep, SelectionKind};
pub use model::record::{
    FoodItem, MedicationItem, RecordId, RecordKind, SleepLog, SymptomItem, TherapySession,
};
pub use model::screen::AppScreen;
pub use model::timeline::{TimelineEntry, TimelineEntryKind};
pub use repo::journal_repo::{
    JournalRepository, RepoError, RepoResult, SqliteJournalRepository,
};
pub use service::draft::{FoodDraft, MedicationDraft, SleepDraft, SymptomDraft, TherapyDraft};
pub use service::journal_service::{
    JournalService, JournalServiceError, JournalServiceResult, StepOutcome,
};
pub use state::{JournalSnapshot, SessionState, StateChange, SubscriptionId};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
