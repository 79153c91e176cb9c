// src/infrastructure/anki.rs
use crate::application::CardRepository;
use crate::constants::{DECK_NAME_SEPARATOR, FIELD_SEPARATOR};
use crate::domain::{CardRecord, DomainError};
use rusqlite::{Connection, OpenFlags};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument, warn};

pub struct AnkiRepository {
    connection: Connection,
    path: PathBuf,
}

/// Deck entry in the schema-11 `col.decks` JSON blob. Only the fields the
/// exporter needs; the blob carries many more.
#[derive(Debug, Deserialize)]
struct LegacyDeck {
    id: i64,
    name: String,
}

impl AnkiRepository {
    pub fn new<P: AsRef<Path>>(collection_path: P) -> Result<Self, DomainError> {
        let path = PathBuf::from(collection_path.as_ref());
        debug!(?path, "Opening Anki collection");

        if !path.exists() {
            return Err(DomainError::DataStore(format!(
                "Collection file not found: {}",
                path.display()
            )));
        }

        // Read-only open: exporting must never touch the store. A collection
        // file that is itself read-only (e.g. on a backup mount) is fine.
        let connection = Connection::open_with_flags(&path, OpenFlags::SQLITE_OPEN_READ_ONLY)
            .map_err(|e| {
                DomainError::DataStore(format!("Failed to open {}: {}", path.display(), e))
            })?;

        // A real collection has exactly one row in `col`; anything else is
        // not an Anki collection, or a corrupt one.
        let version: i64 = connection
            .query_row("SELECT ver FROM col", [], |row| row.get(0))
            .map_err(|e| {
                DomainError::DataStore(format!(
                    "Not a readable Anki collection: {} ({})",
                    path.display(),
                    e
                ))
            })?;

        info!(?path, version, "Opened Anki collection read-only");
        Ok(Self { connection, path })
    }

    /// All decks as `(id, display name)`, with nesting normalized to `::`.
    ///
    /// Current collections keep decks in their own table with the 0x1F
    /// separator; schema-11 collections keep a JSON blob in `col.decks`
    /// with `::` names. Notes and cards are identical across both, so this
    /// is the only place the schema difference shows.
    fn decks(&self) -> Result<Vec<(i64, String)>, DomainError> {
        if self.has_decks_table()? {
            self.decks_from_table()
        } else {
            self.decks_from_col_json()
        }
    }

    fn has_decks_table(&self) -> Result<bool, DomainError> {
        let count: i64 = self
            .connection
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = 'decks'",
                [],
                |row| row.get(0),
            )
            .map_err(store_error)?;
        Ok(count > 0)
    }

    fn decks_from_table(&self) -> Result<Vec<(i64, String)>, DomainError> {
        let mut stmt = self
            .connection
            .prepare("SELECT id, name FROM decks")
            .map_err(store_error)?;
        let rows = stmt
            .query_map([], |row| {
                Ok((row.get::<_, i64>(0)?, row.get::<_, String>(1)?))
            })
            .map_err(store_error)?;

        let mut decks = Vec::new();
        for row in rows {
            let (id, raw_name) = row.map_err(store_error)?;
            decks.push((id, raw_name.replace(FIELD_SEPARATOR, DECK_NAME_SEPARATOR)));
        }
        Ok(decks)
    }

    fn decks_from_col_json(&self) -> Result<Vec<(i64, String)>, DomainError> {
        let blob: String = self
            .connection
            .query_row("SELECT decks FROM col", [], |row| row.get(0))
            .map_err(store_error)?;
        let decks: HashMap<String, LegacyDeck> = serde_json::from_str(&blob).map_err(|e| {
            DomainError::DataStore(format!(
                "Malformed deck data in {}: {}",
                self.path.display(),
                e
            ))
        })?;
        Ok(decks.into_values().map(|d| (d.id, d.name)).collect())
    }

    /// Ids of the named deck and all its subdecks (`deck::child::...`),
    /// matching Anki's own `deck:` search semantics.
    fn deck_ids(&self, deck: &str) -> Result<Vec<i64>, DomainError> {
        let child_prefix = format!("{deck}{DECK_NAME_SEPARATOR}");
        Ok(self
            .decks()?
            .into_iter()
            .filter(|(_, name)| name == deck || name.starts_with(&child_prefix))
            .map(|(id, _)| id)
            .collect())
    }
}

impl CardRepository for AnkiRepository {
    #[instrument(level = "debug", skip(self))]
    fn deck_cards(
        &mut self,
        deck: &str,
        edited_within_days: Option<u32>,
    ) -> Result<Vec<CardRecord>, DomainError> {
        let deck_ids = self.deck_ids(deck)?;
        if deck_ids.is_empty() {
            warn!(deck, "Deck not found in collection");
            return Ok(Vec::new());
        }

        let placeholders = vec!["?"; deck_ids.len()].join(", ");
        let mut sql = format!(
            "SELECT id, flds, tags, mod FROM notes \
             WHERE id IN (SELECT DISTINCT nid FROM cards WHERE did IN ({placeholders}))"
        );
        if edited_within_days.is_some() {
            sql.push_str(" AND mod >= ?");
        }
        // Ordering is not meaningful downstream (each note becomes its own
        // file); sorting by id just keeps logs and summaries stable.
        sql.push_str(" ORDER BY id");

        let mut params: Vec<i64> = deck_ids;
        if let Some(days) = edited_within_days {
            params.push(modified_cutoff(days));
        }

        let mut stmt = self.connection.prepare(&sql).map_err(store_error)?;
        let rows = stmt
            .query_map(rusqlite::params_from_iter(params), |row| {
                Ok((
                    row.get::<_, i64>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, String>(2)?,
                    row.get::<_, i64>(3)?,
                ))
            })
            .map_err(store_error)?;

        let mut cards = Vec::new();
        for row in rows {
            let (id, flds, tags, modified) = row.map_err(store_error)?;
            cards.push(card_record(id, &flds, &tags, modified));
        }
        debug!(deck, count = cards.len(), "Loaded card records");
        Ok(cards)
    }
}

fn store_error(e: rusqlite::Error) -> DomainError {
    DomainError::DataStore(e.to_string())
}

fn card_record(id: i64, flds: &str, tags: &str, modified: i64) -> CardRecord {
    let mut fields = flds.split(FIELD_SEPARATOR);
    let front = fields.next().unwrap_or_default().to_string();
    let back = fields.next().unwrap_or_default().to_string();
    CardRecord {
        id,
        front,
        back,
        // Anki stores tags as a space-padded, space-separated string
        tags: tags.split_whitespace().map(String::from).collect(),
        modified,
    }
}

fn modified_cutoff(days: u32) -> i64 {
    chrono::Utc::now().timestamp() - i64::from(days) * 86_400
}
