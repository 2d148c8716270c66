use super::*;
use chrono::DateTime;
use chrono::Utc;
use notes_core::ID;
use notes_core::Unique;
use std::collections::BTreeMap;
use std::collections::HashMap;
use std::sync::atomic::AtomicI64;
use std::sync::atomic::Ordering;
use tokio::sync::RwLock;

/// Persisted shape of a token: everything but the plaintext.
#[derive(Debug, Clone)]
struct Session {
    owner: ID<Member>,
    expiry: DateTime<Utc>,
    scope: Scope,
}

impl Session {
    fn valid(&self, scope: Scope, now: DateTime<Utc>) -> bool {
        self.scope == scope && self.expiry > now
    }
}

/// In-memory user and session store.
///
/// Reference implementation of [`UserStore`] and [`SessionStore`], used
/// when no database is configured and throughout the tests. Expired
/// sessions are dropped lazily when a lookup runs into them.
#[derive(Debug, Default)]
pub struct Memory {
    users: RwLock<BTreeMap<ID<Member>, (Member, Credential)>>,
    sessions: RwLock<HashMap<Vec<u8>, Session>>,
    sequence: AtomicI64,
}

impl Memory {
    pub fn new() -> Self {
        Self::default()
    }
    /// Number of stored sessions, expired ones included.
    pub async fn sessions(&self) -> usize {
        self.sessions.read().await.len()
    }
    fn next(&self) -> ID<Member> {
        ID::from(self.sequence.fetch_add(1, Ordering::Relaxed) + 1)
    }
}

#[async_trait::async_trait]
impl UserStore for Memory {
    async fn create(&self, member: Member, credential: &Credential) -> Result<Member, AuthError> {
        let mut users = self.users.write().await;
        if users
            .values()
            .any(|(m, _)| m.username() == member.username() || m.email() == member.email())
        {
            return Err(AuthError::Taken);
        }
        let member = member.assign(self.next());
        users.insert(member.id(), (member.clone(), credential.clone()));
        Ok(member)
    }

    async fn by_username(&self, username: &str) -> Result<Option<(Member, Credential)>, AuthError> {
        Ok(self
            .users
            .read()
            .await
            .values()
            .find(|(m, _)| m.username() == username)
            .cloned())
    }

    async fn by_id(&self, id: ID<Member>) -> Result<Option<Member>, AuthError> {
        Ok(self.users.read().await.get(&id).map(|(m, _)| m.clone()))
    }

    async fn update(&self, member: Member) -> Result<Member, AuthError> {
        let mut users = self.users.write().await;
        if users.iter().any(|(id, (m, _))| {
            *id != member.id() && (m.username() == member.username() || m.email() == member.email())
        }) {
            return Err(AuthError::Taken);
        }
        let (stored, _) = users.get_mut(&member.id()).ok_or(AuthError::Missing)?;
        *stored = member.touch(Utc::now());
        Ok(stored.clone())
    }

    async fn update_password(&self, id: ID<Member>, credential: &Credential) -> Result<(), AuthError> {
        let mut users = self.users.write().await;
        let (member, stored) = users.get_mut(&id).ok_or(AuthError::Missing)?;
        *stored = credential.clone();
        *member = member.clone().touch(Utc::now());
        Ok(())
    }
}

#[async_trait::async_trait]
impl SessionStore for Memory {
    async fn insert(&self, token: &Token) -> Result<(), AuthError> {
        let mut sessions = self.sessions.write().await;
        if sessions.contains_key(token.hash()) {
            return Err(AuthError::Conflict);
        }
        sessions.insert(
            token.hash().to_vec(),
            Session {
                owner: token.owner(),
                expiry: token.expiry(),
                scope: token.scope(),
            },
        );
        Ok(())
    }

    async fn find_valid(
        &self,
        hash: &[u8],
        scope: Scope,
        now: DateTime<Utc>,
    ) -> Result<Option<Identity>, AuthError> {
        let session = self.sessions.read().await.get(hash).cloned();
        match session {
            None => Ok(None),
            Some(session) if session.expiry <= now => {
                let mut sessions = self.sessions.write().await;
                if sessions.get(hash).is_some_and(|s| s.expiry <= now) {
                    sessions.remove(hash);
                }
                Ok(None)
            }
            Some(session) if session.valid(scope, now) => Ok(self
                .users
                .read()
                .await
                .get(&session.owner)
                .map(|(m, _)| Identity::from(m.clone()))),
            Some(_) => Ok(None),
        }
    }

    async fn revoke(&self, hash: &[u8]) -> Result<(), AuthError> {
        self.sessions.write().await.remove(hash);
        Ok(())
    }

    async fn revoke_all(&self, owner: ID<Member>, scope: Scope) -> Result<(), AuthError> {
        self.sessions
            .write()
            .await
            .retain(|_, s| !(s.owner == owner && s.scope == scope));
        Ok(())
    }
}
