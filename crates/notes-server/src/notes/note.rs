use crate::Folder;
use chrono::DateTime;
use chrono::Utc;
use notes_auth::Member;
use notes_core::ID;
use notes_core::Unique;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Note {
    id: ID<Self>,
    title: String,
    content: String,
    owner: ID<Member>,
    favorite: bool,
    folder: Option<ID<Folder>>,
    created: DateTime<Utc>,
    updated: DateTime<Utc>,
}

impl Note {
    pub fn new(
        title: String,
        content: String,
        owner: ID<Member>,
        favorite: bool,
        folder: Option<ID<Folder>>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: ID::unassigned(),
            title,
            content,
            owner,
            favorite,
            folder,
            created: now,
            updated: now,
        }
    }
    #[allow(clippy::too_many_arguments)]
    pub fn restore(
        id: ID<Self>,
        title: String,
        content: String,
        owner: ID<Member>,
        favorite: bool,
        folder: Option<ID<Folder>>,
        created: DateTime<Utc>,
        updated: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            title,
            content,
            owner,
            favorite,
            folder,
            created,
            updated,
        }
    }
    pub fn title(&self) -> &str {
        &self.title
    }
    pub fn content(&self) -> &str {
        &self.content
    }
    pub fn owner(&self) -> ID<Member> {
        self.owner
    }
    pub fn favorite(&self) -> bool {
        self.favorite
    }
    pub fn folder(&self) -> Option<ID<Folder>> {
        self.folder
    }
    pub fn created(&self) -> DateTime<Utc> {
        self.created
    }
    pub fn updated(&self) -> DateTime<Utc> {
        self.updated
    }
    pub fn retitle(mut self, title: String) -> Self {
        self.title = title;
        self
    }
    pub fn rewrite(mut self, content: String) -> Self {
        self.content = content;
        self
    }
    pub fn favor(mut self, favorite: bool) -> Self {
        self.favorite = favorite;
        self
    }
    pub fn refile(mut self, folder: Option<ID<Folder>>) -> Self {
        self.folder = folder;
        self
    }
    pub(crate) fn assign(mut self, id: ID<Self>) -> Self {
        self.id = id;
        self
    }
    pub(crate) fn touch(mut self, at: DateTime<Utc>) -> Self {
        self.updated = at;
        self
    }
}

impl Unique for Note {
    fn id(&self) -> ID<Self> {
        self.id
    }
}

mod schema {
    use super::*;
    use notes_pg::*;

    impl Schema for Note {
        fn name() -> &'static str {
            NOTES
        }
        fn creates() -> &'static str {
            const_format::concatcp!(
                "CREATE TABLE IF NOT EXISTS ",
                NOTES,
                " (
                    id           BIGSERIAL PRIMARY KEY,
                    title        TEXT NOT NULL,
                    content      TEXT NOT NULL DEFAULT '',
                    user_id      BIGINT NOT NULL REFERENCES ",
                USERS,
                "(id) ON DELETE CASCADE,
                    is_favorite  BOOLEAN NOT NULL DEFAULT FALSE,
                    folder_id    BIGINT REFERENCES ",
                FOLDERS,
                "(id) ON DELETE SET NULL,
                    created_at   TIMESTAMPTZ NOT NULL DEFAULT NOW(),
                    updated_at   TIMESTAMPTZ NOT NULL DEFAULT NOW()
                );"
            )
        }
        fn indices() -> &'static str {
            const_format::concatcp!(
                "CREATE INDEX IF NOT EXISTS idx_notes_user ON ",
                NOTES,
                " (user_id);
                 CREATE INDEX IF NOT EXISTS idx_notes_folder ON ",
                NOTES,
                " (folder_id);"
            )
        }
    }
}
