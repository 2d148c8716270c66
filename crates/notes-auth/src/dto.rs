use super::*;
use chrono::DateTime;
use chrono::Utc;
use notes_core::EMAIL_MAX;
use notes_core::USERNAME_MAX;
use notes_core::Unique;
use regex::Regex;
use serde::Deserialize;
use serde::Serialize;
use std::sync::LazyLock;

static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").expect("email pattern")
});

fn username(username: &str) -> Result<(), AuthError> {
    match username.chars().count() {
        0 => Err(AuthError::Invalid(String::from("username is required"))),
        n if n > USERNAME_MAX => Err(AuthError::Invalid(format!(
            "username must not exceed {} characters",
            USERNAME_MAX
        ))),
        _ => Ok(()),
    }
}

fn email(email: &str) -> Result<(), AuthError> {
    match email.chars().count() {
        0 => Err(AuthError::Invalid(String::from("email is required"))),
        n if n > EMAIL_MAX => Err(AuthError::Invalid(format!(
            "email must not exceed {} characters",
            EMAIL_MAX
        ))),
        _ if !EMAIL.is_match(email) => Err(AuthError::Invalid(String::from("invalid email format"))),
        _ => Ok(()),
    }
}

/// Registration payload. The authorization level is not accepted here;
/// every account starts at [`DEFAULT_LEVEL`].
#[derive(Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(flatten)]
    pub profile: Profile,
}

impl RegisterRequest {
    /// Field checks. Password strength is enforced by [`password::hash`].
    pub fn validate(&self) -> Result<(), AuthError> {
        username(&self.username)?;
        email(&self.email)?;
        match self.password.is_empty() {
            true => Err(AuthError::Invalid(String::from("password is required"))),
            false => Ok(()),
        }
    }
}

#[derive(Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub auth_token: String,
    pub expiry: DateTime<Utc>,
}

impl From<&Token> for TokenResponse {
    fn from(token: &Token) -> Self {
        Self {
            auth_token: token.plaintext().to_string(),
            expiry: token.expiry(),
        }
    }
}

/// Public view of a [`Member`].
#[derive(Debug, Serialize)]
pub struct UserInfo {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub auth_level: i32,
    #[serde(flatten)]
    pub profile: Profile,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Member> for UserInfo {
    fn from(member: &Member) -> Self {
        Self {
            id: member.id().inner(),
            username: member.username().to_string(),
            email: member.email().to_string(),
            auth_level: member.level(),
            profile: member.profile().clone(),
            created_at: member.created(),
            updated_at: member.updated(),
        }
    }
}

/// Partial update: absent fields keep their stored value.
#[derive(Debug, Default, Deserialize)]
pub struct ProfileUpdate {
    pub username: Option<String>,
    pub email: Option<String>,
    pub bio: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub pfp_url: Option<String>,
    #[serde(alias = "address_line_1")]
    pub address_line1: Option<String>,
    #[serde(alias = "address_line_2")]
    pub address_line2: Option<String>,
    #[serde(alias = "address_city")]
    pub city: Option<String>,
    #[serde(alias = "address_state")]
    pub state: Option<String>,
    #[serde(alias = "address_zip")]
    pub zip: Option<String>,
    #[serde(alias = "address_country")]
    pub country: Option<String>,
}

impl ProfileUpdate {
    pub fn apply(self, member: Member) -> Result<Member, AuthError> {
        if let Some(ref u) = self.username {
            username(u)?;
        }
        if let Some(ref e) = self.email {
            email(e)?;
        }
        let old = member.profile().clone();
        let profile = Profile {
            bio: self.bio.unwrap_or(old.bio),
            first_name: self.first_name.unwrap_or(old.first_name),
            last_name: self.last_name.unwrap_or(old.last_name),
            pfp_url: self.pfp_url.unwrap_or(old.pfp_url),
            address_line1: self.address_line1.unwrap_or(old.address_line1),
            address_line2: self.address_line2.unwrap_or(old.address_line2),
            city: self.city.unwrap_or(old.city),
            state: self.state.unwrap_or(old.state),
            zip: self.zip.unwrap_or(old.zip),
            country: self.country.unwrap_or(old.country),
        };
        let username = self.username.unwrap_or_else(|| member.username().to_string());
        let email = self.email.unwrap_or_else(|| member.email().to_string());
        Ok(member.rename(username, email).reprofile(profile))
    }
}

#[derive(Deserialize)]
pub struct PasswordUpdate {
    #[serde(default)]
    pub new_password: String,
}
