// src/application/deck_exporter.rs
use crate::domain::{CardRecord, DomainError};
use crate::infrastructure::org_file::{self, WriteOutcome};
use crate::ports::OrgPresenter;
use std::path::Path;
use tracing::{debug, error, info};

pub trait CardRepository {
    /// Fetch all cards of a deck and its subdecks, ordered by note id.
    ///
    /// `edited_within_days` restricts the result to notes modified within
    /// that many days; `None` returns the whole deck.
    fn deck_cards(
        &mut self,
        deck: &str,
        edited_within_days: Option<u32>,
    ) -> Result<Vec<CardRecord>, DomainError>;
}

/// Outcome counts of one export run
///
/// `failures` holds one message per file that could not be written;
/// `empty_title_notes` the ids of notes whose front field produced no title.
#[derive(Debug, Default)]
pub struct ExportSummary {
    pub created: usize,
    pub updated: usize,
    pub unchanged: usize,
    pub failures: Vec<String>,
    pub empty_title_notes: Vec<i64>,
}

impl ExportSummary {
    /// Number of files written or confirmed up to date
    pub fn exported(&self) -> usize {
        self.created + self.updated + self.unchanged
    }
}

/// Main use case: mirror a deck into a directory of read-only org files
pub struct DeckExporter<R: CardRepository> {
    repository: R,
    presenter: OrgPresenter,
}

impl<R: CardRepository> DeckExporter<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository,
            presenter: OrgPresenter::new(),
        }
    }

    /// Export every card of a deck as `<note id>.org` under `output_dir`.
    ///
    /// A store error aborts the run. A single file that cannot be written is
    /// recorded in the summary and the remaining cards are still exported.
    pub fn export_deck(
        &mut self,
        deck: &str,
        output_dir: &Path,
        edited_within_days: Option<u32>,
    ) -> Result<ExportSummary, DomainError> {
        let cards = self.repository.deck_cards(deck, edited_within_days)?;
        info!(deck, cards = cards.len(), "Exporting deck");

        org_file::ensure_output_dir(output_dir)?;

        let mut summary = ExportSummary::default();

        for card in &cards {
            if self.presenter.title(card).is_none() {
                summary.empty_title_notes.push(card.id);
            }

            let content = self.presenter.render(card);
            let path = org_file::export_path(output_dir, card.id);

            match org_file::write_read_only(&path, &content) {
                Ok(WriteOutcome::Created) => summary.created += 1,
                Ok(WriteOutcome::Updated) => summary.updated += 1,
                Ok(WriteOutcome::Unchanged) => summary.unchanged += 1,
                Err(e) => {
                    // Collect error and continue with the remaining cards
                    error!(note_id = card.id, "{}", e);
                    summary.failures.push(e.to_string());
                }
            }
        }

        debug!(?summary, "Export finished");
        Ok(summary)
    }
}
