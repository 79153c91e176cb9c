// src/util/process.rs
use anyhow::{bail, Result};
use sysinfo::System;

/// Check if Anki application is currently running
///
/// Returns an error if Anki is detected. The collection is opened read-only,
/// but while Anki holds the database a read can hit a lock or see a
/// mid-transaction state.
pub fn check_anki_not_running() -> Result<()> {
    let system = System::new_all();

    // Platform-specific process names
    let process_names: &[&str] = if cfg!(target_os = "windows") {
        &["anki.exe"]
    } else if cfg!(target_os = "macos") {
        &["Anki", "anki"] // macOS can show as either
    } else {
        &["anki"] // Linux and others
    };

    // Check each possible process name
    for name in process_names {
        if let Some(process) = system.processes_by_exact_name(name.as_ref()).next() {
            bail!(
                "Anki is currently running (PID: {}).\n\n\
                 Please close Anki completely before exporting.\n\
                 While Anki is open the collection may be locked or mid-write,\n\
                 and the export would fail or read a stale snapshot.\n\n\
                 After closing Anki, wait a few seconds for it to fully exit,\n\
                 then try again.",
                process.pid()
            );
        }
    }

    Ok(())
}
