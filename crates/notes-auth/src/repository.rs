use super::*;
use chrono::DateTime;
use chrono::Utc;
use notes_core::ID;
use notes_core::Unique;
use notes_pg::*;
use tokio_postgres::Client;
use tokio_postgres::Row;
use tokio_postgres::error::SqlState;

const MEMBER_COLUMNS: &str = "id, username, email, auth_level, bio, first_name, last_name, pfp_url, address_line1, address_line2, address_city, address_state, address_zip_code, address_country, created_at, updated_at";

fn member_of(row: &Row) -> Member {
    Member::restore(
        ID::from(row.get::<_, i64>(0)),
        row.get::<_, String>(1),
        row.get::<_, String>(2),
        row.get::<_, i32>(3),
        Profile {
            bio: row.get(4),
            first_name: row.get(5),
            last_name: row.get(6),
            pfp_url: row.get(7),
            address_line1: row.get(8),
            address_line2: row.get(9),
            city: row.get(10),
            state: row.get(11),
            zip: row.get(12),
            country: row.get(13),
        },
        row.get::<_, DateTime<Utc>>(14),
        row.get::<_, DateTime<Utc>>(15),
    )
}

fn unique(e: PgErr, taken: AuthError) -> AuthError {
    match e.code() {
        Some(code) if *code == SqlState::UNIQUE_VIOLATION => taken,
        _ => AuthError::from(e),
    }
}

#[async_trait::async_trait]
impl UserStore for Client {
    async fn create(&self, member: Member, credential: &Credential) -> Result<Member, AuthError> {
        let p = member.profile();
        self.query_one(
            const_format::concatcp!(
                "INSERT INTO ",
                USERS,
                " (username, email, password_hash, auth_level, bio, first_name, last_name, pfp_url, address_line1, address_line2, address_city, address_state, address_zip_code, address_country, created_at, updated_at)
                 VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $15)
                 RETURNING ",
                MEMBER_COLUMNS
            ),
            &[
                &member.username(),
                &member.email(),
                &credential.as_str(),
                &member.level(),
                &p.bio,
                &p.first_name,
                &p.last_name,
                &p.pfp_url,
                &p.address_line1,
                &p.address_line2,
                &p.city,
                &p.state,
                &p.zip,
                &p.country,
                &member.created(),
            ],
        )
        .await
        .map(|row| member_of(&row))
        .map_err(|e| unique(e, AuthError::Taken))
    }

    async fn by_username(&self, username: &str) -> Result<Option<(Member, Credential)>, AuthError> {
        Ok(self
            .query_opt(
                const_format::concatcp!(
                    "SELECT ",
                    MEMBER_COLUMNS,
                    ", password_hash FROM ",
                    USERS,
                    " WHERE username = $1"
                ),
                &[&username],
            )
            .await?
            .map(|row| (member_of(&row), Credential::from(row.get::<_, String>(16)))))
    }

    async fn by_id(&self, id: ID<Member>) -> Result<Option<Member>, AuthError> {
        Ok(self
            .query_opt(
                const_format::concatcp!(
                    "SELECT ",
                    MEMBER_COLUMNS,
                    " FROM ",
                    USERS,
                    " WHERE id = $1"
                ),
                &[&id.inner()],
            )
            .await?
            .map(|row| member_of(&row)))
    }

    async fn update(&self, member: Member) -> Result<Member, AuthError> {
        let p = member.profile();
        self.query_opt(
            const_format::concatcp!(
                "UPDATE ",
                USERS,
                " SET username = $2, email = $3, bio = $4, first_name = $5, last_name = $6, pfp_url = $7,
                      address_line1 = $8, address_line2 = $9, address_city = $10, address_state = $11,
                      address_zip_code = $12, address_country = $13, updated_at = NOW()
                  WHERE id = $1
                  RETURNING ",
                MEMBER_COLUMNS
            ),
            &[
                &member.id().inner(),
                &member.username(),
                &member.email(),
                &p.bio,
                &p.first_name,
                &p.last_name,
                &p.pfp_url,
                &p.address_line1,
                &p.address_line2,
                &p.city,
                &p.state,
                &p.zip,
                &p.country,
            ],
        )
        .await
        .map_err(|e| unique(e, AuthError::Taken))?
        .map(|row| member_of(&row))
        .ok_or(AuthError::Missing)
    }

    async fn update_password(&self, id: ID<Member>, credential: &Credential) -> Result<(), AuthError> {
        match self
            .execute(
                const_format::concatcp!(
                    "UPDATE ",
                    USERS,
                    " SET password_hash = $2, updated_at = NOW() WHERE id = $1"
                ),
                &[&id.inner(), &credential.as_str()],
            )
            .await?
        {
            0 => Err(AuthError::Missing),
            _ => Ok(()),
        }
    }
}

#[async_trait::async_trait]
impl SessionStore for Client {
    async fn insert(&self, token: &Token) -> Result<(), AuthError> {
        self.execute(
            const_format::concatcp!(
                "DELETE FROM ",
                TOKENS,
                " WHERE user_id = $1 AND expiry <= NOW()"
            ),
            &[&token.owner().inner()],
        )
        .await?;
        self.execute(
            const_format::concatcp!(
                "INSERT INTO ",
                TOKENS,
                " (hash, user_id, expiry, scope) VALUES ($1, $2, $3, $4)"
            ),
            &[
                &token.hash(),
                &token.owner().inner(),
                &token.expiry(),
                &token.scope().as_str(),
            ],
        )
        .await
        .map(|_| ())
        .map_err(|e| unique(e, AuthError::Conflict))
    }

    async fn find_valid(
        &self,
        hash: &[u8],
        scope: Scope,
        now: DateTime<Utc>,
    ) -> Result<Option<Identity>, AuthError> {
        Ok(self
            .query_opt(
                const_format::concatcp!(
                    "SELECT u.id, u.username, u.email, u.auth_level, u.bio, u.first_name, u.last_name, u.pfp_url,
                            u.address_line1, u.address_line2, u.address_city, u.address_state,
                            u.address_zip_code, u.address_country, u.created_at, u.updated_at
                     FROM ",
                    USERS,
                    " u INNER JOIN ",
                    TOKENS,
                    " t ON t.user_id = u.id
                     WHERE t.hash = $1 AND t.scope = $2 AND t.expiry > $3"
                ),
                &[&hash, &scope.as_str(), &now],
            )
            .await?
            .map(|row| Identity::from(member_of(&row))))
    }

    async fn revoke(&self, hash: &[u8]) -> Result<(), AuthError> {
        self.execute(
            const_format::concatcp!("DELETE FROM ", TOKENS, " WHERE hash = $1"),
            &[&hash],
        )
        .await
        .map(|_| ())
        .map_err(AuthError::from)
    }

    async fn revoke_all(&self, owner: ID<Member>, scope: Scope) -> Result<(), AuthError> {
        self.execute(
            const_format::concatcp!(
                "DELETE FROM ",
                TOKENS,
                " WHERE user_id = $1 AND scope = $2"
            ),
            &[&owner.inner(), &scope.as_str()],
        )
        .await
        .map(|_| ())
        .map_err(AuthError::from)
    }
}
