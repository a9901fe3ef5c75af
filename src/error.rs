use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use thiserror::Error;

pub const LOGIN_RETRY_MESSAGE: &str = "Erro ao fazer login. Tente novamente.";
pub const RESTRICTED_ACCESS_MESSAGE: &str = "Acesso restrito a usuários autorizados.";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] mongodb::error::Error),
    #[error("store lock poisoned")]
    Poisoned,
    #[error("{0} already exists")]
    Duplicate(String),
}

/// Why a viewer could not reach a protected page.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum AuthError {
    #[error("authentication failed: {0}")]
    AuthenticationFailure(String),
    #[error("identity is neither in the company domain nor allow-listed")]
    AuthorizationDenied,
    #[error("allow-list lookup failed: {0}")]
    LookupFailure(String),
}

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("configuration error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("invalid configuration: {0}")]
    Invalid(String),
    #[error("unable to read key file {path}: {source}")]
    KeyFile {
        path: String,
        source: std::io::Error,
    },
    #[error("invalid key: {0}")]
    Key(#[from] jsonwebtoken::errors::Error),
    #[error(transparent)]
    Store(#[from] StoreError),
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Auth(#[from] AuthError),
    #[error("session token error: {0}")]
    Token(#[from] jsonwebtoken::errors::Error),
    #[error("{0}")]
    NotFound(&'static str),
    #[error("{0}")]
    BadRequest(&'static str),
    #[error("unauthorized")]
    Unauthorized,
}

impl AuthError {
    /// Message shown on the login page.
    pub fn user_message(&self) -> &'static str {
        match self {
            AuthError::AuthenticationFailure(_) => LOGIN_RETRY_MESSAGE,
            AuthError::AuthorizationDenied | AuthError::LookupFailure(_) => {
                RESTRICTED_ACCESS_MESSAGE
            }
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Store(StoreError::Duplicate(_)) => StatusCode::BAD_REQUEST,
            ApiError::Store(_) | ApiError::Token(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Auth(AuthError::AuthenticationFailure(_)) => StatusCode::UNAUTHORIZED,
            ApiError::Auth(_) => StatusCode::FORBIDDEN,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let body = match self {
            ApiError::Store(StoreError::Duplicate(_)) => "ALREADY_EXIST",
            ApiError::Store(_) => "STORE_UNAVAILABLE",
            ApiError::Token(_) => "TOKEN_GENERATION_FAILED",
            ApiError::Auth(error) => error.user_message(),
            ApiError::NotFound(code) | ApiError::BadRequest(code) => code,
            ApiError::Unauthorized => "UNAUTHORIZED",
        };
        if matches!(self, ApiError::Store(_) | ApiError::Token(_)) {
            tracing::error!(error = %self, "request failed");
        }
        HttpResponse::build(self.status_code()).body(body)
    }
}
