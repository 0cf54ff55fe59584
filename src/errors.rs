use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde::Serialize;
use thiserror::Error;

pub type AppResult<T> = Result<T, AppError>;

#[derive(Debug, Clone, Error)]
pub enum AppError {
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    AlreadyExists(String),

    #[error("{0}")]
    ValidationError(String),

    #[error("{0}")]
    Unauthorized(String),

    #[error("database error: {0}")]
    DatabaseError(String),

    #[error("internal error: {0}")]
    InternalError(String),
}

impl AppError {
    fn kind(&self) -> (&'static str, StatusCode) {
        match self {
            AppError::NotFound(_) => ("not_found", StatusCode::NOT_FOUND),
            AppError::AlreadyExists(_) => ("already_exists", StatusCode::CONFLICT),
            AppError::ValidationError(_) => ("validation_error", StatusCode::BAD_REQUEST),
            AppError::Unauthorized(_) => ("unauthorized", StatusCode::UNAUTHORIZED),
            AppError::DatabaseError(_) => ("internal_error", StatusCode::INTERNAL_SERVER_ERROR),
            AppError::InternalError(_) => ("internal_error", StatusCode::INTERNAL_SERVER_ERROR),
        }
    }
}

/// Wire shape of every error body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: u16,
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        self.kind().1
    }

    fn error_response(&self) -> HttpResponse {
        let (kind, status) = self.kind();

        // Store failures carry connection strings and query shapes; those stay
        // in the server log. The client only learns that something broke.
        let message = if status.is_server_error() {
            log::error!("{}: {}", kind, self);
            "Internal server error".to_string()
        } else {
            self.to_string()
        };

        HttpResponse::build(status).json(ErrorResponse {
            error: message,
            code: status.as_u16(),
        })
    }
}

impl From<mongodb::error::Error> for AppError {
    fn from(err: mongodb::error::Error) -> Self {
        AppError::DatabaseError(err.to_string())
    }
}

impl From<mongodb::bson::ser::Error> for AppError {
    fn from(err: mongodb::bson::ser::Error) -> Self {
        AppError::DatabaseError(format!("bson encoding: {}", err))
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::ValidationError(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_code_mapping() {
        let cases = [
            (AppError::NotFound("quiz".into()), StatusCode::NOT_FOUND),
            (AppError::AlreadyExists("email".into()), StatusCode::CONFLICT),
            (
                AppError::ValidationError("answers".into()),
                StatusCode::BAD_REQUEST,
            ),
            (
                AppError::Unauthorized("bad token".into()),
                StatusCode::UNAUTHORIZED,
            ),
            (
                AppError::DatabaseError("pool".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (
                AppError::InternalError("oops".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, expected) in cases {
            assert_eq!(err.status_code(), expected);
        }
    }

    #[test]
    fn test_not_found_message_passes_through() {
        let err = AppError::NotFound("Quiz with id 'q1' not found".into());
        assert_eq!(err.to_string(), "Quiz with id 'q1' not found");
    }
}
