//! Journal use-case services.
//!
//! # Responsibility
//! - Turn raw user input into validated records and route them to storage,
//!   session state and analytics.
//! - Keep presentation callers decoupled from storage details.

pub mod draft;
pub mod journal_service;
