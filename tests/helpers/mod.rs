use ankiorg::infrastructure::AnkiRepository;
use anyhow::{Context, Result};
use rusqlite::{params, Connection};
use std::path::PathBuf;
use tempfile::TempDir;

/// Test fixture for working with temporary Anki collections
///
/// Builds a real `collection.anki2` SQLite file from scratch, either with
/// the pre-2020 schema (decks as JSON in the `col` table) or the current
/// one (a separate `decks` table).
#[allow(dead_code)]
pub struct TestCollection {
    _temp_dir: TempDir,
    pub collection_path: PathBuf,
    next_note_id: i64,
}

#[allow(dead_code)]
impl TestCollection {
    /// Create a legacy collection (schema version 11)
    ///
    /// `decks` holds (deck id, display name) pairs; nested names use "::".
    pub fn legacy(decks: &[(i64, &str)]) -> Result<Self> {
        let fixture = Self::empty()?;
        let connection = fixture.connect()?;

        create_base_tables(&connection)?;

        let deck_map: serde_json::Map<String, serde_json::Value> = decks
            .iter()
            .map(|(id, name)| {
                (
                    id.to_string(),
                    serde_json::json!({
                        "id": id,
                        "name": name,
                        "mod": 0,
                        "usn": 0,
                        "collapsed": false,
                        "desc": "",
                    }),
                )
            })
            .collect();

        connection
            .execute(
                "INSERT INTO col (id, crt, mod, scm, ver, dty, usn, ls, conf, models, decks, dconf, tags)
                 VALUES (1, 1690000000, 1690000000000, 1690000000000, 11, 0, 0, 0, '{}', '{}', ?1, '{}', '{}')",
                params![serde_json::Value::Object(deck_map).to_string()],
            )
            .context("Failed to insert col row")?;

        Ok(fixture)
    }

    /// Create a modern collection (schema version 18)
    ///
    /// `decks` holds (deck id, display name) pairs; nested names use "::"
    /// and are stored with the 0x1f separator the way Anki does.
    pub fn modern(decks: &[(i64, &str)]) -> Result<Self> {
        let fixture = Self::empty()?;
        let connection = fixture.connect()?;

        create_base_tables(&connection)?;

        connection
            .execute(
                "INSERT INTO col (id, crt, mod, scm, ver, dty, usn, ls, conf, models, decks, dconf, tags)
                 VALUES (1, 1690000000, 1690000000000, 1690000000000, 18, 0, 0, 0, '{}', '{}', '{}', '{}', '{}')",
                [],
            )
            .context("Failed to insert col row")?;

        connection
            .execute(
                "CREATE TABLE decks (
                    id integer primary key not null,
                    name text not null,
                    mtime_secs integer not null,
                    usn integer not null
                )",
                [],
            )
            .context("Failed to create decks table")?;

        for (id, name) in decks {
            connection
                .execute(
                    "INSERT INTO decks (id, name, mtime_secs, usn) VALUES (?1, ?2, 0, 0)",
                    params![id, name.replace("::", "\u{1f}")],
                )
                .context("Failed to insert deck")?;
        }

        Ok(fixture)
    }

    /// Add a basic note with one card in the given deck, returning the note id
    ///
    /// `tags` is the space-separated form Anki stores; pass "" for none.
    pub fn add_note(
        &mut self,
        deck_id: i64,
        front: &str,
        back: &str,
        tags: &str,
        modified: i64,
    ) -> Result<i64> {
        let note_id = self.next_note_id;
        self.next_note_id += 1;

        let connection = self.connect()?;
        let stored_tags = if tags.is_empty() {
            String::new()
        } else {
            format!(" {} ", tags)
        };

        connection
            .execute(
                "INSERT INTO notes (id, guid, mid, mod, usn, tags, flds, sfld, csum, flags, data)
                 VALUES (?1, ?2, 1, ?3, -1, ?4, ?5, ?6, 0, 0, '')",
                params![
                    note_id,
                    format!("guid{}", note_id),
                    modified,
                    stored_tags,
                    format!("{}\u{1f}{}", front, back),
                    front,
                ],
            )
            .context("Failed to insert note")?;

        connection
            .execute(
                "INSERT INTO cards (id, nid, did, ord, mod, usn, type, queue, due, ivl, factor,
                                    reps, lapses, left, odue, odid, flags, data)
                 VALUES (?1, ?2, ?3, 0, ?4, -1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, '')",
                params![note_id, note_id, deck_id, modified],
            )
            .context("Failed to insert card")?;

        Ok(note_id)
    }

    /// Overwrite the fields of an existing note, bumping its modified time
    pub fn set_note_fields(
        &self,
        note_id: i64,
        front: &str,
        back: &str,
        modified: i64,
    ) -> Result<()> {
        let connection = self.connect()?;
        connection
            .execute(
                "UPDATE notes SET flds = ?1, sfld = ?2, mod = ?3 WHERE id = ?4",
                params![format!("{}\u{1f}{}", front, back), front, modified, note_id],
            )
            .context("Failed to update note")?;
        Ok(())
    }

    /// Open repository for this test collection
    pub fn open_repository(&self) -> Result<AnkiRepository> {
        Ok(AnkiRepository::new(&self.collection_path)?)
    }

    fn empty() -> Result<Self> {
        let temp_dir = tempfile::tempdir().context("Failed to create temporary directory")?;
        let collection_path = temp_dir.path().join("collection.anki2");

        Ok(Self {
            _temp_dir: temp_dir,
            collection_path,
            next_note_id: 1695797540370,
        })
    }

    fn connect(&self) -> Result<Connection> {
        Connection::open(&self.collection_path).context("Failed to open test collection")
    }
}

/// The col, notes and cards tables shared by both schema generations
fn create_base_tables(connection: &Connection) -> Result<()> {
    connection
        .execute_batch(
            "CREATE TABLE col (
                id integer primary key,
                crt integer not null,
                mod integer not null,
                scm integer not null,
                ver integer not null,
                dty integer not null,
                usn integer not null,
                ls integer not null,
                conf text not null,
                models text not null,
                decks text not null,
                dconf text not null,
                tags text not null
            );
            CREATE TABLE notes (
                id integer primary key,
                guid text not null,
                mid integer not null,
                mod integer not null,
                usn integer not null,
                tags text not null,
                flds text not null,
                sfld integer not null,
                csum integer not null,
                flags integer not null,
                data text not null
            );
            CREATE TABLE cards (
                id integer primary key,
                nid integer not null,
                did integer not null,
                ord integer not null,
                mod integer not null,
                usn integer not null,
                type integer not null,
                queue integer not null,
                due integer not null,
                ivl integer not null,
                factor integer not null,
                reps integer not null,
                lapses integer not null,
                left integer not null,
                odue integer not null,
                odid integer not null,
                flags integer not null,
                data text not null
            );",
        )
        .context("Failed to create collection tables")?;

    Ok(())
}
