//! Observable session state.
//!
//! # Responsibility
//! - Hold onboarding progress, navigation and logged-record collections.
//! - Notify subscribed observers synchronously on every change.
//!
//! # Invariants
//! - `current_step` never leaves `0..=8`.
//! - `severity_level` never leaves `0.0..=10.0`.
//! - Record collections keep insertion order; lookup is by `RecordId`.
//! - Single writer: no internal synchronization.

pub mod observer;
pub mod record_log;
pub mod session;

pub use observer::{ObserverRegistry, StateChange, SubscriptionId};
pub use record_log::RecordLog;
pub use session::{JournalSnapshot, SessionState};
