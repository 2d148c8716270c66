use chrono::DateTime;
use chrono::Utc;
use notes_core::ID;
use notes_core::Unique;

/// Authorization tier given to every newly registered account.
pub const DEFAULT_LEVEL: i32 = 1;

/// Free-form account details. None of it is security relevant.
/// Address fields are written without the `address_` prefix but
/// accepted under either spelling.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Profile {
    pub bio: String,
    pub first_name: String,
    pub last_name: String,
    pub pfp_url: String,
    #[serde(alias = "address_line_1")]
    pub address_line1: String,
    #[serde(alias = "address_line_2")]
    pub address_line2: String,
    #[serde(alias = "address_city")]
    pub city: String,
    #[serde(alias = "address_state")]
    pub state: String,
    #[serde(alias = "address_zip")]
    pub zip: String,
    #[serde(alias = "address_country")]
    pub country: String,
}

/// Registered account.
/// Note: the password hash is a storage-only field and never part of
/// this type; stores hand it out beside a `Member`, not inside one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Member {
    id: ID<Self>,
    username: String,
    email: String,
    level: i32,
    profile: Profile,
    created: DateTime<Utc>,
    updated: DateTime<Utc>,
}

impl Member {
    /// Fresh account awaiting a key from the store.
    pub fn new(username: String, email: String, profile: Profile) -> Self {
        let now = Utc::now();
        Self {
            id: ID::unassigned(),
            username,
            email,
            level: DEFAULT_LEVEL,
            profile,
            created: now,
            updated: now,
        }
    }
    /// Account as read back from storage.
    pub fn restore(
        id: ID<Self>,
        username: String,
        email: String,
        level: i32,
        profile: Profile,
        created: DateTime<Utc>,
        updated: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            username,
            email,
            level,
            profile,
            created,
            updated,
        }
    }
    /// Blank record backing the anonymous sentinel.
    pub(crate) fn blank() -> Self {
        Self {
            id: ID::unassigned(),
            username: String::new(),
            email: String::new(),
            level: 0,
            profile: Profile::default(),
            created: DateTime::<Utc>::default(),
            updated: DateTime::<Utc>::default(),
        }
    }
    pub fn username(&self) -> &str {
        &self.username
    }
    pub fn email(&self) -> &str {
        &self.email
    }
    pub fn level(&self) -> i32 {
        self.level
    }
    pub fn profile(&self) -> &Profile {
        &self.profile
    }
    pub fn created(&self) -> DateTime<Utc> {
        self.created
    }
    pub fn updated(&self) -> DateTime<Utc> {
        self.updated
    }
    pub(crate) fn assign(mut self, id: ID<Self>) -> Self {
        self.id = id;
        self
    }
    pub fn rename(mut self, username: String, email: String) -> Self {
        self.username = username;
        self.email = email;
        self
    }
    pub fn reprofile(mut self, profile: Profile) -> Self {
        self.profile = profile;
        self
    }
    pub(crate) fn touch(mut self, at: DateTime<Utc>) -> Self {
        self.updated = at;
        self
    }
}

impl Unique for Member {
    fn id(&self) -> ID<Self> {
        self.id
    }
}

#[cfg(feature = "database")]
mod schema {
    use super::*;
    use notes_pg::*;

    /// Schema implementation for Member (users table).
    /// Note: password_hash is a database-only field, not part of Member domain type.
    impl Schema for Member {
        fn name() -> &'static str {
            USERS
        }
        fn creates() -> &'static str {
            const_format::concatcp!(
                "CREATE TABLE IF NOT EXISTS ",
                USERS,
                " (
                    id               BIGSERIAL PRIMARY KEY,
                    username         VARCHAR(50) UNIQUE NOT NULL,
                    email            VARCHAR(100) UNIQUE NOT NULL,
                    password_hash    TEXT NOT NULL,
                    bio              TEXT NOT NULL DEFAULT '',
                    auth_level       INTEGER NOT NULL DEFAULT 1,
                    first_name       TEXT NOT NULL DEFAULT '',
                    last_name        TEXT NOT NULL DEFAULT '',
                    pfp_url          TEXT NOT NULL DEFAULT '',
                    address_line1    TEXT NOT NULL DEFAULT '',
                    address_line2    TEXT NOT NULL DEFAULT '',
                    address_city     TEXT NOT NULL DEFAULT '',
                    address_state    TEXT NOT NULL DEFAULT '',
                    address_zip_code TEXT NOT NULL DEFAULT '',
                    address_country  TEXT NOT NULL DEFAULT '',
                    created_at       TIMESTAMPTZ NOT NULL DEFAULT NOW(),
                    updated_at       TIMESTAMPTZ NOT NULL DEFAULT NOW()
                );"
            )
        }
        fn indices() -> &'static str {
            const_format::concatcp!(
                "CREATE INDEX IF NOT EXISTS idx_users_username ON ",
                USERS,
                " (username);
                 CREATE INDEX IF NOT EXISTS idx_users_email ON ",
                USERS,
                " (email);"
            )
        }
    }
}
