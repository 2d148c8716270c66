use super::*;
use chrono::DateTime;
use chrono::Utc;
use notes_core::ID;

/// Account persistence consumed by registration, login and profile routes.
#[async_trait::async_trait]
pub trait UserStore: Send + Sync {
    /// Persists a new account and returns it with its assigned key.
    /// [`AuthError::Taken`] if the username or email is in use.
    async fn create(&self, member: Member, credential: &Credential) -> Result<Member, AuthError>;
    async fn by_username(&self, username: &str) -> Result<Option<(Member, Credential)>, AuthError>;
    async fn by_id(&self, id: ID<Member>) -> Result<Option<Member>, AuthError>;
    /// Overwrites identity and profile fields. [`AuthError::Missing`] if absent.
    async fn update(&self, member: Member) -> Result<Member, AuthError>;
    /// Replaces the stored hash. Takes a [`Credential`] so that hashing
    /// stays in [`password::hash`].
    async fn update_password(&self, id: ID<Member>, credential: &Credential) -> Result<(), AuthError>;
}

/// Durable mapping of token hash to (owner, scope, expiry).
///
/// Only hashes cross this boundary. Lookups treat absent, expired and
/// wrong-scope rows identically.
#[async_trait::async_trait]
pub trait SessionStore: Send + Sync {
    /// [`AuthError::Conflict`] if the hash is already stored.
    async fn insert(&self, token: &Token) -> Result<(), AuthError>;
    /// Owner of a token with this hash and scope whose expiry is strictly
    /// after `now`.
    async fn find_valid(
        &self,
        hash: &[u8],
        scope: Scope,
        now: DateTime<Utc>,
    ) -> Result<Option<Identity>, AuthError>;
    /// Idempotent.
    async fn revoke(&self, hash: &[u8]) -> Result<(), AuthError>;
    async fn revoke_all(&self, owner: ID<Member>, scope: Scope) -> Result<(), AuthError>;
}
