//! JSON error responses.

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use tracing::error;

use crate::domain::DomainError;
use crate::error::Error;

/// An error rendered as `{"error": "..."}` with a matching status code.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    #[must_use]
    pub fn status(&self) -> StatusCode {
        self.status
    }
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        let status = match &err {
            Error::Domain(DomainError::TeamInUse { .. }) => StatusCode::CONFLICT,
            Error::Domain(_) => StatusCode::BAD_REQUEST,
            Error::NotFound { .. } => StatusCode::NOT_FOUND,
            _ => {
                error!(error = %err, "Request failed");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        Self::new(status, err.to_string())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::bad_request(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::bad_request(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "error": self.message }))).into_response()
    }
}

pub type ApiResult<T> = std::result::Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_follows_error_kind() {
        let in_use: ApiError = Error::from(DomainError::TeamInUse {
            team_id: "t1".into(),
            agents: 2,
        })
        .into();
        assert_eq!(in_use.status(), StatusCode::CONFLICT);

        let empty: ApiError = Error::from(DomainError::EmptyName { entity: "team" }).into();
        assert_eq!(empty.status(), StatusCode::BAD_REQUEST);

        let missing: ApiError = Error::not_found("agent", "a1").into();
        assert_eq!(missing.status(), StatusCode::NOT_FOUND);

        let db: ApiError = Error::Database("locked".into()).into();
        assert_eq!(db.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
