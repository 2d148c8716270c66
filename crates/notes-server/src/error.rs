use notes_auth::AuthError;
use notes_auth::Kind;

/// Failures surfaced by resource routes.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Auth(#[from] AuthError),
    #[error("{0} not found")]
    NotFound(&'static str),
    #[error("{0}")]
    BadRequest(String),
    #[error("storage failure: {0}")]
    Storage(String),
}

impl ApiError {
    pub fn kind(&self) -> Kind {
        match self {
            Self::Auth(e) => e.kind(),
            Self::NotFound(_) => Kind::NotFound,
            Self::BadRequest(_) => Kind::BadRequest,
            Self::Storage(_) => Kind::Internal,
        }
    }
    pub fn public(&self) -> String {
        match self {
            Self::Auth(e) => e.public(),
            _ if self.kind() == Kind::Internal => String::from("internal server error"),
            _ => self.to_string(),
        }
    }
}

impl From<tokio_postgres::Error> for ApiError {
    fn from(e: tokio_postgres::Error) -> Self {
        Self::Storage(e.to_string())
    }
}

impl actix_web::ResponseError for ApiError {
    fn status_code(&self) -> actix_web::http::StatusCode {
        actix_web::http::StatusCode::from(self.kind())
    }
    fn error_response(&self) -> actix_web::HttpResponse {
        if self.kind() == Kind::Internal {
            log::error!("{}", self);
        }
        actix_web::HttpResponse::build(self.status_code())
            .json(serde_json::json!({ "error": self.public() }))
    }
}
