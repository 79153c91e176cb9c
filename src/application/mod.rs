// src/application/mod.rs
pub mod deck_exporter;

pub use deck_exporter::{CardRepository, DeckExporter, ExportSummary};
