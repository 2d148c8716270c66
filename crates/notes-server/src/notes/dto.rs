use super::*;
use chrono::DateTime;
use chrono::Utc;
use notes_core::Unique;
use serde::Deserialize;
use serde::Serialize;

#[derive(Deserialize)]
pub struct NoteDraft {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub is_favorite: bool,
    pub folder_id: Option<i64>,
}

/// Partial update. `folder_id: null` unfiles the note.
#[derive(Default, Deserialize)]
pub struct NotePatch {
    pub title: Option<String>,
    pub content: Option<String>,
    pub is_favorite: Option<bool>,
    #[serde(default, deserialize_with = "crate::nullable")]
    pub folder_id: Option<Option<i64>>,
}

#[derive(Debug, Serialize)]
pub struct NoteView {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub user_id: i64,
    pub is_favorite: bool,
    pub folder_id: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Note> for NoteView {
    fn from(note: &Note) -> Self {
        Self {
            id: note.id().inner(),
            title: note.title().to_string(),
            content: note.content().to_string(),
            user_id: note.owner().inner(),
            is_favorite: note.favorite(),
            folder_id: note.folder().map(|f| f.inner()),
            created_at: note.created(),
            updated_at: note.updated(),
        }
    }
}
