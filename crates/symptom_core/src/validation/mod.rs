//! Input hygiene for user-entered health data.
//!
//! # Responsibility
//! - Turn raw text, numbers and dates into values that are safe to persist.
//! - Bundle per-field rules into one call per record kind.
//!
//! # Invariants
//! - Every validator is pure and never panics, whatever the input.
//! - Numeric and date input is clamped to the nearest bound, never rejected.
//! - Required text is rejected as `None`, never replaced by a default.
//! - Nothing here depends on session state.

pub mod field;
pub mod record;
