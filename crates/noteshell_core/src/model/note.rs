//! Note resources returned by the notes API.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Server-side note identifier.
pub type NoteId = i64;

/// One stored note version.
///
/// Updating a note creates a new record whose `previous_version_id` points at
/// the version it replaces.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Note {
    pub id: NoteId,
    pub text: String,
    #[serde(default)]
    pub previous_version_id: Option<NoteId>,
    /// Server-generated summary; absent when summarization was skipped.
    #[serde(default)]
    pub summary: Option<String>,
    /// Creation timestamp exactly as the server rendered it.
    pub created_at: String,
    pub user_id: i64,
}

/// Write payload for create and update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NoteDraft {
    pub text: String,
}

/// Aggregate statistics over the caller's notes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NoteAnalytics {
    pub total_word_count: i64,
    pub average_note_length: f64,
    /// `(word, occurrences)` pairs, most frequent first.
    #[serde(default)]
    pub most_common_words: Vec<(String, u64)>,
    #[serde(default)]
    pub top_3_longest_notes: Vec<Map<String, Value>>,
    #[serde(default)]
    pub top_3_shortest_notes: Vec<Map<String, Value>>,
}
