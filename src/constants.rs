// src/constants.rs
//
// Application-wide constants extracted from magic numbers throughout the codebase.
// Each constant is documented with its purpose and usage context.

/// Separator between note fields in the `notes.flds` column.
///
/// Anki stores all fields of a note in one TEXT column, joined by the
/// ASCII unit separator. Field 0 is the front, field 1 the back. Current
/// collections also use this byte to nest deck names in `decks.name`.
///
/// Used in: `infrastructure/anki.rs`, `tests/helpers/mod.rs`
pub const FIELD_SEPARATOR: char = '\u{1f}';

/// Separator between deck name levels as displayed by Anki.
///
/// Legacy (schema 11) collections store nested deck names with `::`
/// directly; decks read from current collections are normalized to this
/// form before matching, so `--deck` always takes the displayed name.
///
/// Used in: `infrastructure/anki.rs`
pub const DECK_NAME_SEPARATOR: &str = "::";

/// Extension of every exported file.
///
/// Part of the deterministic output path `<output_dir>/<note_id>.org`;
/// changing it would orphan all previously exported files, so it is fixed
/// here rather than configurable.
///
/// Used in: `infrastructure/org_file.rs`
pub const ORG_EXTENSION: &str = "org";

/// Name of the optional configuration file looked up in the output
/// directory.
///
/// The export destination carries its own settings (deck, profile,
/// collection path) so different target directories can export different
/// decks without extra flags.
///
/// Used in: `infrastructure/config.rs`
pub const CONFIG_FILE_NAME: &str = "ankiorg.toml";
