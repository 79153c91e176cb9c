// src/lib.rs
pub mod application;
pub mod cli;
pub mod constants;
pub mod domain;
pub mod infrastructure;
pub mod ports;
pub mod util;

use std::path::PathBuf;
use anyhow::{bail, Context, Result};
use tracing::{debug, info, warn};

use crate::application::DeckExporter;
use crate::cli::args::Args;
use crate::infrastructure::{AnkiRepository, Config};

pub fn run(args: Args) -> Result<()> {
    debug!(?args, "Starting ankiorg with arguments");

    util::process::check_anki_not_running()?;

    // The output directory carries its own config file
    let config = Config::load_from_dir(&args.output_dir)?;
    debug!(?config, "Loaded configuration");

    // CLI flags win over the config file
    let deck = args.deck.unwrap_or_else(|| config.defaults.deck.clone());
    let profile = args.profile.or_else(|| {
        (!config.defaults.profile.is_empty()).then(|| config.defaults.profile.clone())
    });

    let collection_path = match args.collection {
        Some(path) => {
            debug!(?path, "Using provided collection path");
            path
        }
        None if !config.anki.path.is_empty() => {
            let path = PathBuf::from(&config.anki.path);
            debug!(?path, "Using collection path from config");
            path
        }
        None => {
            debug!(?profile, "Finding collection path for profile");
            find_collection_path(profile.as_deref())?
        }
    };

    // Initialize infrastructure and application
    let repository = AnkiRepository::new(&collection_path)?;
    let mut exporter = DeckExporter::new(repository);

    // Execute use case
    info!(deck = %deck, output_dir = %args.output_dir.display(), "Exporting deck");
    let summary = exporter.export_deck(&deck, &args.output_dir, args.edited)?;

    info!(
        created = summary.created,
        updated = summary.updated,
        unchanged = summary.unchanged,
        "Export complete"
    );

    if !summary.empty_title_notes.is_empty() {
        warn!(
            notes = ?summary.empty_title_notes,
            "Notes with an empty front field were exported with fallback titles"
        );
    }

    if !summary.failures.is_empty() {
        bail!(
            "Failed to write {} of {} files under {}",
            summary.failures.len(),
            summary.exported() + summary.failures.len(),
            args.output_dir.display()
        );
    }

    Ok(())
}

pub fn find_collection_path(profile: Option<&str>) -> Result<PathBuf> {
    let home = dirs::home_dir().context("Could not find home directory")?;

    // Get the Anki base directory
    #[cfg(target_os = "macos")]
    let anki_path = home.join("Library/Application Support/Anki2");
    #[cfg(target_os = "linux")]
    let anki_path = home.join(".local/share/Anki2");
    #[cfg(target_os = "windows")]
    let anki_path = home.join("AppData/Roaming/Anki2");

    // If profile is specified, use it directly
    if let Some(profile_name) = profile {
        return Ok(anki_path.join(profile_name).join("collection.anki2"));
    }

    // Otherwise, find the first valid profile
    for entry in std::fs::read_dir(&anki_path)? {
        let entry = entry?;
        let path = entry.path();
        if path.is_dir() && path.join("collection.anki2").exists() {
            return Ok(path.join("collection.anki2"));
        }
    }

    Err(anyhow::anyhow!("No valid Anki profile found"))
}
