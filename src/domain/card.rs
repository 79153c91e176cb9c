// src/domain/card.rs

/// One flashcard as read from the collection. Snapshot data: nothing in
/// this tool ever writes a record back.
#[derive(Debug, Clone)]
pub struct CardRecord {
    /// Anki note id (epoch milliseconds at creation, unique per collection)
    pub id: i64,
    pub front: String,
    pub back: String,
    pub tags: Vec<String>,
    /// Last modification time of the note, epoch seconds
    pub modified: i64,
}
