use chrono::DateTime;
use chrono::Utc;
use notes_auth::Member;
use notes_core::ID;
use notes_core::Unique;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Folder {
    id: ID<Self>,
    title: String,
    owner: ID<Member>,
    favorite: bool,
    parent: Option<ID<Self>>,
    created: DateTime<Utc>,
    updated: DateTime<Utc>,
}

impl Folder {
    pub fn new(title: String, owner: ID<Member>, favorite: bool, parent: Option<ID<Self>>) -> Self {
        let now = Utc::now();
        Self {
            id: ID::unassigned(),
            title,
            owner,
            favorite,
            parent,
            created: now,
            updated: now,
        }
    }
    pub fn restore(
        id: ID<Self>,
        title: String,
        owner: ID<Member>,
        favorite: bool,
        parent: Option<ID<Self>>,
        created: DateTime<Utc>,
        updated: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            title,
            owner,
            favorite,
            parent,
            created,
            updated,
        }
    }
    pub fn title(&self) -> &str {
        &self.title
    }
    pub fn owner(&self) -> ID<Member> {
        self.owner
    }
    pub fn favorite(&self) -> bool {
        self.favorite
    }
    pub fn parent(&self) -> Option<ID<Self>> {
        self.parent
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
    pub fn favor(mut self, favorite: bool) -> Self {
        self.favorite = favorite;
        self
    }
    pub fn reparent(mut self, parent: Option<ID<Self>>) -> Self {
        self.parent = parent;
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

impl Unique for Folder {
    fn id(&self) -> ID<Self> {
        self.id
    }
}

mod schema {
    use super::*;
    use notes_pg::*;

    impl Schema for Folder {
        fn name() -> &'static str {
            FOLDERS
        }
        fn creates() -> &'static str {
            const_format::concatcp!(
                "CREATE TABLE IF NOT EXISTS ",
                FOLDERS,
                " (
                    id                BIGSERIAL PRIMARY KEY,
                    title             TEXT NOT NULL,
                    user_id           BIGINT NOT NULL REFERENCES ",
                USERS,
                "(id) ON DELETE CASCADE,
                    is_favorite       BOOLEAN NOT NULL DEFAULT FALSE,
                    parent_folder_id  BIGINT REFERENCES ",
                FOLDERS,
                "(id) ON DELETE CASCADE,
                    created_at        TIMESTAMPTZ NOT NULL DEFAULT NOW(),
                    updated_at        TIMESTAMPTZ NOT NULL DEFAULT NOW()
                );"
            )
        }
        fn indices() -> &'static str {
            const_format::concatcp!(
                "CREATE INDEX IF NOT EXISTS idx_folders_user ON ",
                FOLDERS,
                " (user_id);
                 CREATE INDEX IF NOT EXISTS idx_folders_parent ON ",
                FOLDERS,
                " (parent_folder_id);"
            )
        }
    }
}
