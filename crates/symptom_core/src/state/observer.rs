//! Change notifications for session state observers.

use crate::model::onboarding::SelectionKind;
use crate::model::record::{RecordId, RecordKind};
use crate::model::screen::AppScreen;
use chrono::NaiveDate;
use std::fmt::{Debug, Formatter};

/// One observable change to [`super::SessionState`].
#[derive(Debug, Clone, PartialEq)]
pub enum StateChange {
    OnboardingVisibility(bool),
    CurrentStep(u8),
    UserName,
    SeverityLevel(f64),
    FlareFrequency,
    Selection(SelectionKind),
    /// All onboarding fields went back to their defaults.
    OnboardingReset,
    Screen(AppScreen),
    SelectedDate(NaiveDate),
    RecordAdded {
        kind: RecordKind,
        id: RecordId,
    },
    RecordRemoved {
        kind: RecordKind,
        id: RecordId,
    },
    MedicationToggled {
        id: RecordId,
        is_taken: bool,
    },
    TimelineUpdated,
    /// Profile and collections were replaced wholesale from storage.
    Restored,
}

/// Handle returned by `subscribe`, used to unsubscribe later.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

type Observer = Box<dyn FnMut(&StateChange)>;

/// Ordered list of observer callbacks.
///
/// Observers run synchronously, in subscription order, on the thread that
/// performed the mutation.
#[derive(Default)]
pub struct ObserverRegistry {
    next_id: u64,
    observers: Vec<(SubscriptionId, Observer)>,
}

impl ObserverRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, observer: impl FnMut(&StateChange) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.observers.push((id, Box::new(observer)));
        id
    }

    /// Removes one observer. Returns `false` when the id is unknown.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(current, _)| *current != id);
        self.observers.len() != before
    }

    pub fn notify(&mut self, change: &StateChange) {
        for (_, observer) in &mut self.observers {
            observer(change);
        }
    }

    pub fn len(&self) -> usize {
        self.observers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observers.is_empty()
    }
}

impl Debug for ObserverRegistry {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ObserverRegistry")
            .field("observers", &self.observers.len())
            .finish()
    }
}
