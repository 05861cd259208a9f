//! Analytics hooks.
//!
//! Sinks are fire-and-forget: tracking never fails and never blocks the
//! caller. Events carry no user-entered text.

use crate::model::screen::AppScreen;
use log::debug;

/// Product event emitted by the journal service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalyticsEvent {
    ScreenView(AppScreen),
    SymptomLogged,
    MedicationTaken,
    FoodLogged,
    SleepLogged,
    TherapySessionLogged,
    OnboardingCompleted,
}

impl AnalyticsEvent {
    /// Stable event name understood by analytics backends.
    pub fn name(self) -> &'static str {
        match self {
            Self::ScreenView(_) => "screen_view",
            Self::SymptomLogged => "symptom_logged",
            Self::MedicationTaken => "medication_taken",
            Self::FoodLogged => "food_logged",
            Self::SleepLogged => "sleep_logged",
            Self::TherapySessionLogged => "therapy_session_logged",
            Self::OnboardingCompleted => "onboarding_completed",
        }
    }
}

/// Destination for analytics events.
pub trait EventSink {
    fn track(&self, event: AnalyticsEvent);
}

/// Writes every event as a debug log line.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogEventSink;

impl EventSink for LogEventSink {
    fn track(&self, event: AnalyticsEvent) {
        match event {
            AnalyticsEvent::ScreenView(screen) => debug!(
                "event=analytics module=analytics name={} screen_name={}",
                event.name(),
                screen.as_str()
            ),
            other => debug!("event=analytics module=analytics name={}", other.name()),
        }
    }
}

/// Discards every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopEventSink;

impl EventSink for NoopEventSink {
    fn track(&self, _event: AnalyticsEvent) {}
}

impl<S: EventSink + ?Sized> EventSink for &S {
    fn track(&self, event: AnalyticsEvent) {
        (**self).track(event);
    }
}
