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

const COLUMNS: &str = "id, title, user_id, is_favorite, parent_folder_id, created_at, updated_at";

fn folder(row: &Row) -> Folder {
    Folder::restore(
        ID::from(row.get::<_, i64>(0)),
        row.get::<_, String>(1),
        ID::from(row.get::<_, i64>(2)),
        row.get::<_, bool>(3),
        row.get::<_, Option<i64>>(4).map(ID::from),
        row.get::<_, DateTime<Utc>>(5),
        row.get::<_, DateTime<Utc>>(6),
    )
}

#[async_trait::async_trait]
impl FolderStore for Client {
    async fn create(&self, folder: Folder) -> Result<Folder, ApiError> {
        self.query_one(
            const_format::concatcp!(
                "INSERT INTO ",
                FOLDERS,
                " (title, user_id, is_favorite, parent_folder_id) VALUES ($1, $2, $3, $4) RETURNING ",
                COLUMNS
            ),
            &[
                &folder.title(),
                &folder.owner().inner(),
                &folder.favorite(),
                &folder.parent().map(|p| p.inner()),
            ],
        )
        .await
        .map(|row| self::folder(&row))
        .map_err(ApiError::from)
    }

    async fn by_id(&self, id: ID<Folder>) -> Result<Option<Folder>, ApiError> {
        Ok(self
            .query_opt(
                const_format::concatcp!("SELECT ", COLUMNS, " FROM ", FOLDERS, " WHERE id = $1"),
                &[&id.inner()],
            )
            .await?
            .map(|row| folder(&row)))
    }

    async fn by_owner(&self, owner: ID<Member>) -> Result<Vec<Folder>, ApiError> {
        Ok(self
            .query(
                const_format::concatcp!(
                    "SELECT ",
                    COLUMNS,
                    " FROM ",
                    FOLDERS,
                    " WHERE user_id = $1 ORDER BY id"
                ),
                &[&owner.inner()],
            )
            .await?
            .iter()
            .map(folder)
            .collect())
    }

    async fn update(&self, folder: Folder) -> Result<Folder, ApiError> {
        // UNION drops repeated ancestors, so the walk ends even on a
        // chain that already loops.
        let row = self
            .query_opt(
                const_format::concatcp!(
                    "WITH RECURSIVE ancestry (id) AS (
                        SELECT $4::BIGINT WHERE $4::BIGINT IS NOT NULL
                        UNION
                        SELECT f.parent_folder_id FROM ",
                    FOLDERS,
                    " f JOIN ancestry a ON f.id = a.id
                        WHERE f.parent_folder_id IS NOT NULL
                    )
                    UPDATE ",
                    FOLDERS,
                    " SET title = $2, is_favorite = $3, parent_folder_id = $4, updated_at = NOW()
                      WHERE id = $1 AND NOT EXISTS (SELECT 1 FROM ancestry WHERE ancestry.id = $1)
                      RETURNING ",
                    COLUMNS
                ),
                &[
                    &folder.id().inner(),
                    &folder.title(),
                    &folder.favorite(),
                    &folder.parent().map(|p| p.inner()),
                ],
            )
            .await?;
        match row {
            Some(row) => Ok(self::folder(&row)),
            None => match self.owner(folder.id()).await? {
                Some(_) => Err(nested()),
                None => Err(ApiError::NotFound("folder")),
            },
        }
    }

    async fn delete(&self, id: ID<Folder>) -> Result<(), ApiError> {
        match self
            .execute(
                const_format::concatcp!("DELETE FROM ", FOLDERS, " WHERE id = $1"),
                &[&id.inner()],
            )
            .await?
        {
            0 => Err(ApiError::NotFound("folder")),
            _ => Ok(()),
        }
    }

    async fn owner(&self, id: ID<Folder>) -> Result<Option<ID<Member>>, ApiError> {
        Ok(self
            .query_opt(
                const_format::concatcp!("SELECT user_id FROM ", FOLDERS, " WHERE id = $1"),
                &[&id.inner()],
            )
            .await?
            .map(|row| ID::from(row.get::<_, i64>(0))))
    }
}
