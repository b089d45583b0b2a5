use actix_web::http::StatusCode;
use actix_web::ResponseError;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Library-level errors raised by domain parsing and the stores
#[derive(Debug, Error)]
pub enum Error {
    #[error("{0}")]
    ParsingError(String),

    #[error(transparent)]
    DatabaseError(#[from] sqlx::Error),
}

pub type RestResult<T> = std::result::Result<T, RestError>;

// TODO: I18n for errors
#[derive(Debug, Error)]
pub enum RestError {
    #[error("Parse Error: {0}")]
    ParseError(String),

    #[error("Internal Server Error: {0}")]
    InternalError(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<Error> for RestError {
    fn from(e: Error) -> Self {
        match e {
            Error::ParsingError(msg) => Self::ParseError(msg),
            Error::DatabaseError(_) => Self::InternalError("Database error".into()),
        }
    }
}

impl From<sqlx::Error> for RestError {
    fn from(_e: sqlx::Error) -> Self {
        Self::InternalError("Database error".into())
    }
}

impl ResponseError for RestError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::ParseError(_) => StatusCode::BAD_REQUEST,
            Self::InternalError(_) | Self::Other(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}
