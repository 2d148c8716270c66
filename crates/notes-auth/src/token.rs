use super::*;
use chrono::DateTime;
use chrono::Utc;
use notes_core::ID;
use notes_core::TOKEN_ENTROPY;

/// Purpose a token was issued for. A token only ever validates
/// against the scope it carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scope {
    Authentication,
    PasswordReset,
}

impl Scope {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Authentication => "authentication",
            Self::PasswordReset => "password_reset",
        }
    }
}

impl std::fmt::Display for Scope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for Scope {
    type Error = AuthError;
    fn try_from(s: &str) -> Result<Self, Self::Error> {
        match s {
            "authentication" => Ok(Self::Authentication),
            "password_reset" => Ok(Self::PasswordReset),
            _ => Err(AuthError::Storage(format!("unknown token scope {:?}", s))),
        }
    }
}

/// Opaque bearer token.
///
/// The plaintext exists only in the value returned by [`Token::issue`];
/// stores receive the token by reference and persist [`Token::hash`].
#[derive(Clone)]
pub struct Token {
    plaintext: String,
    hash: Vec<u8>,
    owner: ID<Member>,
    expiry: DateTime<Utc>,
    scope: Scope,
}

impl Token {
    pub fn issue(owner: ID<Member>, ttl: std::time::Duration, scope: Scope) -> Result<Self, AuthError> {
        Self::issue_at(owner, ttl, scope, Utc::now())
    }
    pub fn issue_at(
        owner: ID<Member>,
        ttl: std::time::Duration,
        scope: Scope,
        now: DateTime<Utc>,
    ) -> Result<Self, AuthError> {
        use rand::Rng;
        let ref mut bytes = [0u8; TOKEN_ENTROPY];
        rand::rng().fill(bytes);
        let plaintext = data_encoding::BASE32_NOPAD.encode(bytes);
        let expiry = chrono::Duration::from_std(ttl)
            .ok()
            .and_then(|ttl| now.checked_add_signed(ttl))
            .ok_or(AuthError::Lifetime)?;
        Ok(Self {
            hash: Self::hash_of(&plaintext),
            plaintext,
            owner,
            expiry,
            scope,
        })
    }
    /// Lookup key for a presented plaintext. Unsalted on purpose: the
    /// plaintext already carries 128 random bits and lookups must be exact.
    pub fn hash_of(plaintext: &str) -> Vec<u8> {
        use sha2::Digest;
        sha2::Sha256::digest(plaintext.as_bytes()).to_vec()
    }
    pub fn plaintext(&self) -> &str {
        &self.plaintext
    }
    pub fn hash(&self) -> &[u8] {
        &self.hash
    }
    pub fn owner(&self) -> ID<Member> {
        self.owner
    }
    pub fn expiry(&self) -> DateTime<Utc> {
        self.expiry
    }
    pub fn scope(&self) -> Scope {
        self.scope
    }
}

impl std::fmt::Debug for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Token")
            .field("owner", &self.owner)
            .field("expiry", &self.expiry)
            .field("scope", &self.scope)
            .finish_non_exhaustive()
    }
}

#[cfg(feature = "database")]
mod schema {
    use super::*;
    use notes_pg::*;

    impl Schema for Token {
        fn name() -> &'static str {
            TOKENS
        }
        fn creates() -> &'static str {
            const_format::concatcp!(
                "CREATE TABLE IF NOT EXISTS ",
                TOKENS,
                " (
                    hash        BYTEA PRIMARY KEY,
                    user_id     BIGINT NOT NULL REFERENCES ",
                USERS,
                "(id) ON DELETE CASCADE,
                    expiry      TIMESTAMPTZ NOT NULL,
                    scope       TEXT NOT NULL
                );"
            )
        }
        fn indices() -> &'static str {
            const_format::concatcp!(
                "CREATE INDEX IF NOT EXISTS idx_tokens_user_scope ON ",
                TOKENS,
                " (user_id, scope);
                 CREATE INDEX IF NOT EXISTS idx_tokens_expiry ON ",
                TOKENS,
                " (expiry);"
            )
        }
    }
}
