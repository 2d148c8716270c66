use super::*;
use chrono::DateTime;
use chrono::Utc;
use notes_core::ID;
use notes_core::Unique;
use std::sync::Arc;

/// Turns an `Authorization` header into an [`Identity`].
///
/// Holds the session store, the process-wide [`Lurker`] and the
/// lifetime of tokens minted at login. Shared with handlers through
/// `web::Data<Gate>`.
#[derive(Clone)]
pub struct Gate {
    sessions: Arc<dyn SessionStore>,
    lurker: Lurker,
    ttl: std::time::Duration,
}

impl Gate {
    pub fn new(sessions: Arc<dyn SessionStore>, lurker: Lurker, ttl: std::time::Duration) -> Self {
        Self {
            sessions,
            lurker,
            ttl,
        }
    }
    pub fn lurker(&self) -> &Lurker {
        &self.lurker
    }
    pub fn ttl(&self) -> std::time::Duration {
        self.ttl
    }

    /// Extracts the token from a header value.
    ///
    /// Absent or empty headers are anonymous (`Ok(None)`). Anything else
    /// must be exactly `Bearer <token>` with a single space.
    pub fn bearer(header: Option<&str>) -> Result<Option<&str>, AuthError> {
        match header {
            None | Some("") => Ok(None),
            Some(value) => match value.split(' ').collect::<Vec<_>>().as_slice() {
                ["Bearer", token] if !token.is_empty() => Ok(Some(*token)),
                _ => Err(AuthError::MalformedHeader),
            },
        }
    }

    pub async fn resolve(&self, header: Option<&str>) -> Result<Identity, AuthError> {
        self.resolve_at(header, Utc::now()).await
    }

    pub async fn resolve_at(
        &self,
        header: Option<&str>,
        now: DateTime<Utc>,
    ) -> Result<Identity, AuthError> {
        let Some(plaintext) = Self::bearer(header)? else {
            return Ok(self.lurker.identity());
        };
        let ref hash = Token::hash_of(plaintext);
        match self
            .sessions
            .find_valid(hash, Scope::Authentication, now)
            .await
        {
            Ok(Some(identity)) => Ok(identity),
            Ok(None) => Err(AuthError::InvalidToken),
            Err(e) => {
                log::error!("session lookup failed: {}", e);
                Err(e)
            }
        }
    }

    /// Mints and stores an authentication token for `owner`.
    pub async fn login(&self, owner: ID<Member>) -> Result<Token, AuthError> {
        let token = Token::issue(owner, self.ttl, Scope::Authentication)?;
        self.sessions.insert(&token).await?;
        log::debug!("issued session for member {}", owner);
        Ok(token)
    }

    /// Revokes the token presented in `header`, if there is one.
    pub async fn logout(&self, header: Option<&str>) -> Result<(), AuthError> {
        match Self::bearer(header)? {
            Some(plaintext) => self.sessions.revoke(&Token::hash_of(plaintext)).await,
            None => Ok(()),
        }
    }

    pub async fn logout_all(&self, identity: &Identity) -> Result<(), AuthError> {
        self.sessions
            .revoke_all(identity.id(), Scope::Authentication)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn gate() -> (Gate, Arc<Memory>) {
        let memory = Arc::new(Memory::new());
        let gate = Gate::new(memory.clone(), Lurker::sentinel(), notes_core::TOKEN_TTL);
        (gate, memory)
    }

    async fn alice(memory: &Memory) -> Member {
        let credential = Credential::from(String::from("$argon2id$placeholder"));
        let member = Member::new(
            String::from("alice"),
            String::from("alice@example.com"),
            Profile::default(),
        );
        memory.create(member, &credential).await.unwrap()
    }

    #[test]
    fn bearer_shapes() {
        assert_eq!(Gate::bearer(None).unwrap(), None);
        assert_eq!(Gate::bearer(Some("")).unwrap(), None);
        assert_eq!(Gate::bearer(Some("Bearer abc")).unwrap(), Some("abc"));
        for bad in [
            "Bearer",
            "Bearer ",
            "bearer abc",
            "Basic abc",
            "Bearer  abc",
            "Bearer abc def",
            "abc",
        ] {
            assert!(
                matches!(Gate::bearer(Some(bad)), Err(AuthError::MalformedHeader)),
                "{:?}",
                bad
            );
        }
    }

    #[tokio::test]
    async fn no_header_is_the_lurker() {
        let (gate, _) = gate();
        let identity = gate.resolve(None).await.unwrap();
        assert!(gate.lurker().is(&identity));
    }

    #[tokio::test]
    async fn login_then_resolve() {
        let (gate, memory) = gate();
        let alice = alice(&memory).await;
        let token = gate.login(alice.id()).await.unwrap();
        let header = format!("Bearer {}", token.plaintext());
        let identity = gate.resolve(Some(&header)).await.unwrap();
        assert_eq!(identity.id(), alice.id());
        assert!(!gate.lurker().is(&identity));
    }

    #[tokio::test]
    async fn unknown_and_expired_tokens_are_rejected() {
        let (gate, memory) = gate();
        let alice = alice(&memory).await;
        assert!(matches!(
            gate.resolve(Some("Bearer AAAAAAAAAAAAAAAAAAAAAAAAAA")).await,
            Err(AuthError::InvalidToken)
        ));
        let token = gate.login(alice.id()).await.unwrap();
        let header = format!("Bearer {}", token.plaintext());
        let later = token.expiry() + Duration::seconds(1);
        assert!(matches!(
            gate.resolve_at(Some(&header), later).await,
            Err(AuthError::InvalidToken)
        ));
    }

    #[tokio::test]
    async fn logout_revokes_only_the_presented_token() {
        let (gate, memory) = gate();
        let alice = alice(&memory).await;
        let first = format!("Bearer {}", gate.login(alice.id()).await.unwrap().plaintext());
        let second = format!("Bearer {}", gate.login(alice.id()).await.unwrap().plaintext());
        gate.logout(Some(&first)).await.unwrap();
        assert!(matches!(
            gate.resolve(Some(&first)).await,
            Err(AuthError::InvalidToken)
        ));
        assert!(gate.resolve(Some(&second)).await.is_ok());
        gate.logout(Some(&first)).await.unwrap();
    }

    #[tokio::test]
    async fn logout_all_ends_every_session() {
        let (gate, memory) = gate();
        let alice = alice(&memory).await;
        let first = format!("Bearer {}", gate.login(alice.id()).await.unwrap().plaintext());
        let second = format!("Bearer {}", gate.login(alice.id()).await.unwrap().plaintext());
        let identity = gate.resolve(Some(&first)).await.unwrap();
        gate.logout_all(&identity).await.unwrap();
        for header in [first, second] {
            assert!(gate.resolve(Some(&header)).await.is_err());
        }
        assert_eq!(memory.sessions().await, 0);
    }
}
