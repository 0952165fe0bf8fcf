use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Note - the single managed resource
///
/// `updated_at` stays null until the first partial update, then tracks the
/// time of every subsequent update. Timestamps serialize as RFC 3339.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Note {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Input for creating a note. The store assigns id and timestamps.
#[derive(Debug, Clone)]
pub struct NewNote {
    pub title: String,
    pub content: String,
}

/// Partial update - each field is independently present-or-absent.
/// An absent field leaves the stored value unchanged; an explicit empty
/// content is a valid overwrite, an explicit empty title is ignored.
#[derive(Debug, Clone, Default)]
pub struct NoteUpdate {
    pub title: Option<String>,
    pub content: Option<String>,
}
