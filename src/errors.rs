use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Already exists: {0}")]
    AlreadyExists(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Not authorized: {0}")]
    NotAuthorized(String),

    #[error("Invalid access code")]
    InvalidCode,

    #[error("Access code has expired")]
    CodeExpired,

    #[error("Access code usage limit reached")]
    UsageExceeded,

    #[error("Could not allocate a unique access code")]
    GenerationExhausted,

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Internal server error: {0}")]
    InternalError(String),
}

impl AppError {
    fn error_code(&self) -> &'static str {
        match self {
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::AlreadyExists(_) => "ALREADY_EXISTS",
            AppError::ValidationError(_) => "VALIDATION_ERROR",
            AppError::Unauthorized(_) => "UNAUTHORIZED",
            AppError::NotAuthorized(_) => "NOT_AUTHORIZED",
            AppError::InvalidCode => "INVALID_CODE",
            AppError::CodeExpired => "CODE_EXPIRED",
            AppError::UsageExceeded => "USAGE_EXCEEDED",
            AppError::GenerationExhausted => "GENERATION_EXHAUSTED",
            AppError::DatabaseError(_) => "DATABASE_ERROR",
            AppError::InternalError(_) => "INTERNAL_ERROR",
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: &'static str,
    pub status: u16,
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::AlreadyExists(_) => StatusCode::CONFLICT,
            AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::NotAuthorized(_) => StatusCode::FORBIDDEN,
            AppError::InvalidCode => StatusCode::NOT_FOUND,
            AppError::CodeExpired => StatusCode::GONE,
            AppError::UsageExceeded => StatusCode::TOO_MANY_REQUESTS,
            AppError::GenerationExhausted => StatusCode::SERVICE_UNAVAILABLE,
            AppError::DatabaseError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorResponse {
            error: self.to_string(),
            code: self.error_code(),
            status: self.status_code().as_u16(),
        })
    }
}

impl From<mongodb::error::Error> for AppError {
    fn from(err: mongodb::error::Error) -> Self {
        // E11000 surfaces uniqueness-index collisions; callers treat it as a retry trigger
        if let mongodb::error::ErrorKind::Write(mongodb::error::WriteFailure::WriteError(
            ref write_err,
        )) = *err.kind
        {
            if write_err.code == 11000 {
                return AppError::AlreadyExists("duplicate key".to_string());
            }
        }
        AppError::DatabaseError(err.to_string())
    }
}

impl From<mongodb::bson::ser::Error> for AppError {
    fn from(err: mongodb::bson::ser::Error) -> Self {
        AppError::InternalError(format!("BSON serialization error: {}", err))
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::ValidationError(err.to_string())
    }
}

pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_status_codes() {
        assert_eq!(
            AppError::NotFound("test".into()).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::NotAuthorized("test".into()).status_code(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(AppError::InvalidCode.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(AppError::CodeExpired.status_code(), StatusCode::GONE);
        assert_eq!(
            AppError::UsageExceeded.status_code(),
            StatusCode::TOO_MANY_REQUESTS
        );
        assert_eq!(
            AppError::GenerationExhausted.status_code(),
            StatusCode::SERVICE_UNAVAILABLE
        );
    }

    #[test]
    fn test_error_messages() {
        let err = AppError::NotFound("quiz".into());
        assert_eq!(err.to_string(), "Not found: quiz");

        let err = AppError::CodeExpired;
        assert_eq!(err.to_string(), "Access code has expired");
    }

    #[test]
    fn test_error_codes_are_stable() {
        assert_eq!(AppError::InvalidCode.error_code(), "INVALID_CODE");
        assert_eq!(AppError::UsageExceeded.error_code(), "USAGE_EXCEEDED");
        assert_eq!(
            AppError::GenerationExhausted.error_code(),
            "GENERATION_EXHAUSTED"
        );
    }
}
