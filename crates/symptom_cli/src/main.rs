//! CLI smoke entry point.
//!
//! # Responsibility
//! - Verify `symptom_core` linkage and run one in-memory journal session.
//! - Keep output deterministic for quick local sanity checks.
//!
//! Usage: `symptom_cli [ABSOLUTE_LOG_DIR]`. Without a directory nothing is
//! logged to disk.

use log::info;
use std::error::Error;
use symptom_core::{
    default_log_level, init_logging, open_db_in_memory, AppScreen, JournalService, LogEventSink,
    SqliteJournalRepository, SymptomDraft,
};

fn main() -> Result<(), Box<dyn Error>> {
    if let Some(log_dir) = std::env::args().nth(1) {
        init_logging(default_log_level(), log_dir.as_str())?;
    }

    println!("symptom_core ping={}", symptom_core::ping());
    println!("symptom_core version={}", symptom_core::core_version());

    let mut conn = open_db_in_memory()?;
    let repo = SqliteJournalRepository::try_new(&mut conn)?;
    let mut service = JournalService::bootstrap(repo, LogEventSink)?;

    service.log_symptom(&SymptomDraft {
        name: "Joint Pain".to_string(),
        severity: 6,
        ..SymptomDraft::default()
    })?;
    service.navigate_to(AppScreen::SymptomsTracking);

    let state = service.state();
    println!(
        "journal symptoms={} timeline={} screen={}",
        state.symptoms().len(),
        state.timeline_entries().len(),
        state.current_screen().as_str()
    );
    info!("event=cli_smoke module=cli status=ok");
    Ok(())
}
