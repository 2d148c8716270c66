//! Authentication error taxonomy.

/// Coarse classification every [`AuthError`] collapses into at the edge.
///
/// Forbidden is deliberately absent: "authenticated but not the owner"
/// reports as [`Kind::Unauthorized`] like every other refusal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    BadRequest,
    Unauthorized,
    NotFound,
    Conflict,
    Internal,
}

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("invalid authorization header format")]
    MalformedHeader,
    #[error("invalid or expired token")]
    InvalidToken,
    #[error("you must be authenticated to access this resource")]
    Anonymous,
    #[error("invalid credentials")]
    InvalidCredentials,
    #[error("unauthorized")]
    Unauthorized,
    #[error("password must not be empty")]
    EmptyPassword,
    #[error("{0}")]
    WeakPassword(&'static str),
    #[error("{0}")]
    Invalid(String),
    #[error("username or email already exists")]
    Taken,
    #[error("user not found")]
    Missing,
    #[error("stored credential is missing or malformed")]
    CorruptHash,
    #[error("token hash already exists")]
    Conflict,
    #[error("token lifetime out of range")]
    Lifetime,
    #[error("password hashing failed: {0}")]
    Hashing(String),
    #[error("storage failure: {0}")]
    Storage(String),
    #[error("{0} not configured")]
    Unconfigured(&'static str),
}

impl AuthError {
    pub fn kind(&self) -> Kind {
        match self {
            Self::MalformedHeader
            | Self::InvalidToken
            | Self::Anonymous
            | Self::InvalidCredentials
            | Self::Unauthorized => Kind::Unauthorized,
            Self::EmptyPassword | Self::WeakPassword(_) | Self::Invalid(_) => Kind::BadRequest,
            Self::Taken => Kind::Conflict,
            Self::Missing => Kind::NotFound,
            Self::CorruptHash
            | Self::Conflict
            | Self::Lifetime
            | Self::Hashing(_)
            | Self::Storage(_)
            | Self::Unconfigured(_) => Kind::Internal,
        }
    }
    /// Message safe to hand to the client. Internal failures are
    /// reported generically; the detail goes to the server log only.
    pub fn public(&self) -> String {
        match self.kind() {
            Kind::Internal => String::from("internal server error"),
            _ => self.to_string(),
        }
    }
}

#[cfg(feature = "database")]
impl From<tokio_postgres::Error> for AuthError {
    fn from(e: tokio_postgres::Error) -> Self {
        Self::Storage(e.to_string())
    }
}

#[cfg(feature = "server")]
mod response {
    use super::*;
    use actix_web::HttpResponse;
    use actix_web::ResponseError;
    use actix_web::http::StatusCode;

    impl From<Kind> for StatusCode {
        fn from(kind: Kind) -> Self {
            match kind {
                Kind::BadRequest => StatusCode::BAD_REQUEST,
                Kind::Unauthorized => StatusCode::UNAUTHORIZED,
                Kind::NotFound => StatusCode::NOT_FOUND,
                Kind::Conflict => StatusCode::CONFLICT,
                Kind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
            }
        }
    }

    impl ResponseError for AuthError {
        fn status_code(&self) -> StatusCode {
            StatusCode::from(self.kind())
        }
        fn error_response(&self) -> HttpResponse {
            if self.kind() == Kind::Internal {
                log::error!("{}", self);
            }
            HttpResponse::build(self.status_code())
                .json(serde_json::json!({ "error": self.public() }))
        }
    }
}
