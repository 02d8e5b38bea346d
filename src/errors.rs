use axum::http::StatusCode;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RegistryError {
    #[error("Task name is empty")]
    Empty,
    #[error("Task Exists")]
    Exists,
    #[error("Max Limit Reached")]
    LimitReached,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("Access Denied: Invalid Credentials")]
    AccessDenied,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LedgerError {
    #[error("Invalid day \"{0}\" (expected YYYY-MM-DD)")]
    InvalidDay(String),
}

#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub message: String,
}

impl AppError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::UNAUTHORIZED,
            message: message.into(),
        }
    }

    pub fn internal(err: impl std::error::Error) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: err.to_string(),
        }
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        Self::internal(err)
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        Self::internal(err)
    }
}

impl From<RegistryError> for AppError {
    fn from(err: RegistryError) -> Self {
        let status = match err {
            RegistryError::Empty => StatusCode::BAD_REQUEST,
            RegistryError::Exists => StatusCode::CONFLICT,
            RegistryError::LimitReached => StatusCode::UNPROCESSABLE_ENTITY,
        };
        Self {
            status,
            message: err.to_string(),
        }
    }
}

impl From<SessionError> for AppError {
    fn from(err: SessionError) -> Self {
        Self::unauthorized(err.to_string())
    }
}

impl From<LedgerError> for AppError {
    fn from(err: LedgerError) -> Self {
        Self::bad_request(err.to_string())
    }
}

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        (self.status, self.message).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_errors_map_to_notices_and_statuses() {
        let exists = AppError::from(RegistryError::Exists);
        assert_eq!(exists.status, StatusCode::CONFLICT);
        assert_eq!(exists.message, "Task Exists");

        let limit = AppError::from(RegistryError::LimitReached);
        assert_eq!(limit.status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(limit.message, "Max Limit Reached");
    }

    #[test]
    fn access_denied_is_unauthorized() {
        let err = AppError::from(SessionError::AccessDenied);
        assert_eq!(err.status, StatusCode::UNAUTHORIZED);
        assert_eq!(err.message, "Access Denied: Invalid Credentials");
    }
}
