//! Domain model for the symptom journal.
//!
//! # Responsibility
//! - Define the records, onboarding profile, screens and timeline shapes
//!   shared by state, storage and service layers.
//!
//! # Invariants
//! - Every logged record is identified by a stable `RecordId`.
//! - Model types carry already-validated values; they do not validate.

pub mod onboarding;
pub mod record;
pub mod screen;
pub mod timeline;
