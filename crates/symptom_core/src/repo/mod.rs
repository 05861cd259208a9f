//! Persistence collaborator for the journal.
//!
//! # Responsibility
//! - Define the storage contract the journal service writes through.
//! - Keep SQLite query details out of state and service code.
//!
//! # Invariants
//! - Only validated records reach the repository.
//! - Repository APIs return semantic errors (`NotFound`) in addition to DB
//!   transport errors.

pub mod journal_repo;
