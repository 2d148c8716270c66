use super::*;
use crate::ApiError;
use chrono::DateTime;
use chrono::Utc;
use notes_auth::Member;
use notes_core::ID;
use notes_core::Unique;
use notes_pg::*;
use tokio_postgres::Client;
use tokio_postgres::Row;

const COLUMNS: &str = "id, title, content, user_id, is_favorite, folder_id, created_at, updated_at";

fn note(row: &Row) -> Note {
    Note::restore(
        ID::from(row.get::<_, i64>(0)),
        row.get::<_, String>(1),
        row.get::<_, String>(2),
        ID::from(row.get::<_, i64>(3)),
        row.get::<_, bool>(4),
        row.get::<_, Option<i64>>(5).map(ID::from),
        row.get::<_, DateTime<Utc>>(6),
        row.get::<_, DateTime<Utc>>(7),
    )
}

#[async_trait::async_trait]
impl NoteStore for Client {
    async fn create(&self, note: Note) -> Result<Note, ApiError> {
        self.query_one(
            const_format::concatcp!(
                "INSERT INTO ",
                NOTES,
                " (title, content, user_id, is_favorite, folder_id) VALUES ($1, $2, $3, $4, $5) RETURNING ",
                COLUMNS
            ),
            &[
                &note.title(),
                &note.content(),
                &note.owner().inner(),
                &note.favorite(),
                &note.folder().map(|f| f.inner()),
            ],
        )
        .await
        .map(|row| self::note(&row))
        .map_err(ApiError::from)
    }

    async fn by_id(&self, id: ID<Note>) -> Result<Option<Note>, ApiError> {
        Ok(self
            .query_opt(
                const_format::concatcp!("SELECT ", COLUMNS, " FROM ", NOTES, " WHERE id = $1"),
                &[&id.inner()],
            )
            .await?
            .map(|row| note(&row)))
    }

    async fn by_owner(&self, owner: ID<Member>) -> Result<Vec<Note>, ApiError> {
        Ok(self
            .query(
                const_format::concatcp!(
                    "SELECT ",
                    COLUMNS,
                    " FROM ",
                    NOTES,
                    " WHERE user_id = $1 ORDER BY updated_at DESC, id"
                ),
                &[&owner.inner()],
            )
            .await?
            .iter()
            .map(note)
            .collect())
    }

    async fn update(&self, note: Note) -> Result<Note, ApiError> {
        self.query_opt(
            const_format::concatcp!(
                "UPDATE ",
                NOTES,
                " SET title = $2, content = $3, is_favorite = $4, folder_id = $5, updated_at = NOW()
                  WHERE id = $1 RETURNING ",
                COLUMNS
            ),
            &[
                &note.id().inner(),
                &note.title(),
                &note.content(),
                &note.favorite(),
                &note.folder().map(|f| f.inner()),
            ],
        )
        .await?
        .map(|row| self::note(&row))
        .ok_or(ApiError::NotFound("note"))
    }

    async fn delete(&self, id: ID<Note>) -> Result<(), ApiError> {
        match self
            .execute(
                const_format::concatcp!("DELETE FROM ", NOTES, " WHERE id = $1"),
                &[&id.inner()],
            )
            .await?
        {
            0 => Err(ApiError::NotFound("note")),
            _ => Ok(()),
        }
    }

    async fn owner(&self, id: ID<Note>) -> Result<Option<ID<Member>>, ApiError> {
        Ok(self
            .query_opt(
                const_format::concatcp!("SELECT user_id FROM ", NOTES, " WHERE id = $1"),
                &[&id.inner()],
            )
            .await?
            .map(|row| ID::from(row.get::<_, i64>(0))))
    }
}
