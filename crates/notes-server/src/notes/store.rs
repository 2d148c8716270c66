use super::*;
use crate::ApiError;
use notes_auth::Member;
use notes_core::ID;

#[async_trait::async_trait]
pub trait NoteStore: Send + Sync {
    async fn create(&self, note: Note) -> Result<Note, ApiError>;
    async fn by_id(&self, id: ID<Note>) -> Result<Option<Note>, ApiError>;
    async fn by_owner(&self, owner: ID<Member>) -> Result<Vec<Note>, ApiError>;
    async fn update(&self, note: Note) -> Result<Note, ApiError>;
    async fn delete(&self, id: ID<Note>) -> Result<(), ApiError>;
    /// Owner key for the ownership check, without loading the row.
    async fn owner(&self, id: ID<Note>) -> Result<Option<ID<Member>>, ApiError>;
}
