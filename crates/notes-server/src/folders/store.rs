use super::*;
use crate::ApiError;
use notes_auth::Member;
use notes_core::ID;

#[async_trait::async_trait]
pub trait FolderStore: Send + Sync {
    async fn create(&self, folder: Folder) -> Result<Folder, ApiError>;
    async fn by_id(&self, id: ID<Folder>) -> Result<Option<Folder>, ApiError>;
    async fn by_owner(&self, owner: ID<Member>) -> Result<Vec<Folder>, ApiError>;
    /// Writes the folder back. A parent that is the folder itself or
    /// one of its descendants is refused with [`nested`], checked in the
    /// same critical section as the write.
    async fn update(&self, folder: Folder) -> Result<Folder, ApiError>;
    /// Removes the folder and every folder beneath it. Notes filed in
    /// any of them are kept and unfiled.
    async fn delete(&self, id: ID<Folder>) -> Result<(), ApiError>;
    /// Owner key for the ownership check, without loading the row.
    async fn owner(&self, id: ID<Folder>) -> Result<Option<ID<Member>>, ApiError>;
}

pub fn nested() -> ApiError {
    ApiError::BadRequest(String::from("a folder cannot be nested inside itself"))
}
