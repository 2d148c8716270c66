//! Argon2id password hashing and verification.
//!
//! [`hash`] is the only way a [`Credential`] is produced, for registration
//! and password changes alike, so the algorithm and work factor cannot
//! drift between call sites. Each hash embeds its salt and parameters in
//! PHC format; [`verify`] reads them back from the stored string.
use super::*;
use argon2::Algorithm;
use argon2::Argon2;
use argon2::Params;
use argon2::PasswordHash;
use argon2::PasswordHasher;
use argon2::PasswordVerifier;
use argon2::Version;
use argon2::password_hash::SaltString;
use notes_core::ARGON2_LANES;
use notes_core::ARGON2_MEMORY;
use notes_core::ARGON2_PASSES;
use notes_core::PASSWORD_MIN;
use notes_core::SALT_BYTES;
use std::sync::LazyLock;

/// Stored password hash (PHC string). Never serialized outward.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Rehydrates a credential read back from storage.
impl From<String> for Credential {
    fn from(phc: String) -> Self {
        Self(phc)
    }
}

impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Credential(..)")
    }
}

/// Well-formed hash nobody knows the password to. Verifying against it
/// costs exactly what verifying a real credential costs.
static DECOY: LazyLock<Credential> = LazyLock::new(|| {
    Credential(format!(
        "$argon2id$v=19$m={},t={},p={}$ZGVjb3lkZWNveWRlY295${}",
        ARGON2_MEMORY,
        ARGON2_PASSES,
        ARGON2_LANES,
        "A".repeat(43),
    ))
});

fn salt() -> Result<SaltString, AuthError> {
    use rand::Rng;
    let ref mut bytes = [0u8; SALT_BYTES];
    rand::rng().fill(bytes);
    SaltString::encode_b64(bytes).map_err(|e| AuthError::Hashing(e.to_string()))
}

fn argon2() -> Result<Argon2<'static>, AuthError> {
    Params::new(ARGON2_MEMORY, ARGON2_PASSES, ARGON2_LANES, None)
        .map(|params| Argon2::new(Algorithm::Argon2id, Version::V0x13, params))
        .map_err(|e| AuthError::Hashing(e.to_string()))
}

/// Minimum strength: length, plus at least one lowercase letter,
/// one uppercase letter and one digit.
pub fn strength(plaintext: &str) -> Result<(), AuthError> {
    if plaintext.is_empty() {
        return Err(AuthError::EmptyPassword);
    }
    if plaintext.chars().count() < PASSWORD_MIN {
        return Err(AuthError::WeakPassword(
            "password must be at least 8 characters long",
        ));
    }
    let lower = plaintext.chars().any(|c| c.is_lowercase());
    let upper = plaintext.chars().any(|c| c.is_uppercase());
    let digit = plaintext.chars().any(|c| c.is_ascii_digit());
    match lower && upper && digit {
        true => Ok(()),
        false => Err(AuthError::WeakPassword(
            "password must contain at least one uppercase letter, one lowercase letter, and one number",
        )),
    }
}

pub fn hash(plaintext: &str) -> Result<Credential, AuthError> {
    strength(plaintext)?;
    argon2()?
        .hash_password(plaintext.as_bytes(), &salt()?)
        .map(|h| Credential(h.to_string()))
        .map_err(|e| AuthError::Hashing(e.to_string()))
}

/// `Ok(false)` on an ordinary mismatch. `Err(CorruptHash)` only when there
/// is nothing valid to compare against, which callers report as invalid
/// credentials all the same.
pub fn verify(stored: Option<&Credential>, candidate: &str) -> Result<bool, AuthError> {
    let stored = stored.ok_or(AuthError::CorruptHash)?;
    let parsed = PasswordHash::new(stored.as_str()).map_err(|_| AuthError::CorruptHash)?;
    match Argon2::default().verify_password(candidate.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(_) => Err(AuthError::CorruptHash),
    }
}

/// Burns one verification for a username that does not exist.
pub fn decoy(candidate: &str) {
    let _ = verify(Some(&DECOY), candidate);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verifies_own_plaintext_only() {
        let credential = hash("Sup3rSecret").unwrap();
        assert!(verify(Some(&credential), "Sup3rSecret").unwrap());
        assert!(!verify(Some(&credential), "Sup3rSecreT").unwrap());
        assert!(!verify(Some(&credential), "").unwrap());
    }

    #[test]
    fn salts_every_hash() {
        let a = hash("Sup3rSecret").unwrap();
        let b = hash("Sup3rSecret").unwrap();
        assert_ne!(a, b);
        assert!(verify(Some(&b), "Sup3rSecret").unwrap());
    }

    #[test]
    fn embeds_algorithm_and_work_factor() {
        let credential = hash("Sup3rSecret").unwrap();
        assert!(credential.as_str().starts_with("$argon2id$v=19$"));
        assert!(credential.as_str().contains(&format!(
            "m={},t={},p={}",
            ARGON2_MEMORY, ARGON2_PASSES, ARGON2_LANES
        )));
        assert!(!credential.as_str().contains("Sup3rSecret"));
        assert_eq!(format!("{:?}", credential), "Credential(..)");
    }

    #[test]
    fn rejects_empty_and_weak() {
        assert!(matches!(hash(""), Err(AuthError::EmptyPassword)));
        assert!(matches!(hash("Sh0rt"), Err(AuthError::WeakPassword(_))));
        assert!(matches!(hash("alllowercase1"), Err(AuthError::WeakPassword(_))));
        assert!(matches!(hash("ALLUPPERCASE1"), Err(AuthError::WeakPassword(_))));
        assert!(matches!(hash("NoDigitsHere"), Err(AuthError::WeakPassword(_))));
    }

    #[test]
    fn missing_or_garbled_hash_is_an_error() {
        assert!(matches!(
            verify(None, "Sup3rSecret"),
            Err(AuthError::CorruptHash)
        ));
        let garbled = Credential::from(String::from("not a phc string"));
        assert!(matches!(
            verify(Some(&garbled), "Sup3rSecret"),
            Err(AuthError::CorruptHash)
        ));
    }

    #[test]
    fn decoy_is_well_formed() {
        assert!(PasswordHash::new(DECOY.as_str()).is_ok());
        assert!(!verify(Some(&DECOY), "Sup3rSecret").unwrap());
    }
}
