use super::*;
use chrono::DateTime;
use chrono::Utc;
use notes_core::Unique;
use serde::Deserialize;
use serde::Serialize;

#[derive(Deserialize)]
pub struct FolderDraft {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub is_favorite: bool,
    pub parent_folder_id: Option<i64>,
}

/// Partial update. `parent_folder_id: null` moves the folder to the top
/// level; omitting it leaves the parent alone.
#[derive(Default, Deserialize)]
pub struct FolderPatch {
    pub title: Option<String>,
    pub is_favorite: Option<bool>,
    #[serde(default, deserialize_with = "crate::nullable")]
    pub parent_folder_id: Option<Option<i64>>,
}

#[derive(Debug, Serialize)]
pub struct FolderView {
    pub id: i64,
    pub title: String,
    pub user_id: i64,
    pub is_favorite: bool,
    pub parent_folder_id: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Folder> for FolderView {
    fn from(folder: &Folder) -> Self {
        Self {
            id: folder.id().inner(),
            title: folder.title().to_string(),
            user_id: folder.owner().inner(),
            is_favorite: folder.favorite(),
            parent_folder_id: folder.parent().map(|p| p.inner()),
            created_at: folder.created(),
            updated_at: folder.updated(),
        }
    }
}
