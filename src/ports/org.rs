// src/ports/org.rs
use crate::domain::CardRecord;
use crate::util::text::{extract_first_line, html_to_plain};
use chrono::{DateTime, Local};
use std::fmt::Write;
use tracing::instrument;

/// Renders a [`CardRecord`] as the text of one Org-mode file.
///
/// The output is a pure function of the record: identical records render
/// to identical bytes, which is what makes re-exports idempotent.
#[derive(Debug)]
pub struct OrgPresenter;

impl OrgPresenter {
    pub fn new() -> Self {
        Self
    }

    /// Title for the heading line: first line of the front field, or
    /// `None` when the front renders to nothing.
    pub fn title(&self, card: &CardRecord) -> Option<String> {
        let first = extract_first_line(&card.front);
        if first.is_empty() {
            None
        } else {
            Some(first)
        }
    }

    #[instrument(level = "trace", skip_all, fields(note_id = card.id))]
    pub fn render(&self, card: &CardRecord) -> String {
        let title = self
            .title(card)
            .unwrap_or_else(|| format!("Anki note {}", card.id));
        let front = html_to_plain(&card.front);
        let back = html_to_plain(&card.back);

        let mut out = String::new();
        writeln!(out, "#+date: [{}]", org_timestamp(card.modified)).unwrap();
        if !card.tags.is_empty() {
            let tags: Vec<String> = card.tags.iter().map(|t| org_tag(t)).collect();
            writeln!(out, "#+filetags: :{}:", tags.join(":")).unwrap();
        }
        writeln!(
            out,
            "#+comment: DO NOT EDIT - run ~ankiorg~ to re-export from Anki"
        )
        .unwrap();
        writeln!(out).unwrap();
        writeln!(out, "* {}", title).unwrap();
        writeln!(out, ":PROPERTIES:").unwrap();
        writeln!(out, ":ID: anki_note_{}", card.id).unwrap();
        writeln!(out, ":END:").unwrap();
        if !front.is_empty() {
            writeln!(out).unwrap();
            writeln!(out, "** Front").unwrap();
            writeln!(out).unwrap();
            writeln!(out, "{}", body_text(&front)).unwrap();
        }
        if !back.is_empty() {
            writeln!(out).unwrap();
            writeln!(out, "** Back").unwrap();
            writeln!(out).unwrap();
            writeln!(out, "{}", body_text(&back)).unwrap();
        }
        out
    }
}

impl Default for OrgPresenter {
    fn default() -> Self {
        Self::new()
    }
}

/// Org inactive timestamp, local time: `2024-01-15 Mon 10:30`
fn org_timestamp(epoch_secs: i64) -> String {
    let utc = DateTime::from_timestamp(epoch_secs, 0).unwrap_or_default();
    utc.with_timezone(&Local)
        .format("%Y-%m-%d %a %H:%M")
        .to_string()
}

/// Org tags allow only alphanumerics, `_`, `@`, `#` and `%`; anything else
/// (Anki's `::` tag hierarchy, dots, dashes) becomes `_`.
fn org_tag(tag: &str) -> String {
    tag.chars()
        .map(|c| {
            if c.is_alphanumeric() || matches!(c, '_' | '@' | '#' | '%') {
                c
            } else {
                '_'
            }
        })
        .collect()
}

/// A body line starting with `*` would become an outline heading and break
/// the file structure; indent such lines by one space.
fn body_text(text: &str) -> String {
    text.lines()
        .map(|line| {
            if line.starts_with('*') {
                format!(" {}", line)
            } else {
                line.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}
