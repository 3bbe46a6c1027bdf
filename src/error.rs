//! Handler-level error type.
//!
//! Every variant renders as `{"error": "<message>"}` with the matching HTTP
//! status, the same body shape the console already expects from the backend.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};

use crate::{services::BackendError, session::SessionError};

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("authentication required")]
    Unauthorized,

    #[error("{0}")]
    Forbidden(String),

    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    NotFound(String),

    #[error(transparent)]
    Backend(#[from] BackendError),

    #[error("{0}")]
    Internal(String),
}

impl From<SessionError> for AppError {
    fn from(e: SessionError) -> Self {
        tracing::error!(error = %e, "Session store failure");
        AppError::Internal("could not create session".into())
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Backend(BackendError::Unauthorized) => StatusCode::UNAUTHORIZED,
            AppError::Backend(_) => StatusCode::BAD_GATEWAY,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(serde_json::json!({ "error": self.to_string() }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statuses() {
        assert_eq!(AppError::Unauthorized.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(AppError::Forbidden("no".into()).status_code(), StatusCode::FORBIDDEN);
        assert_eq!(
            AppError::Backend(BackendError::Unauthorized).status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AppError::Backend(BackendError::Status { code: 500, body: String::new() })
                .status_code(),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            AppError::Internal("boom".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[actix_web::test]
    async fn internal_renders_json_body() {
        let err = AppError::from(SessionError::ExpiryOverflow);
        let res = err.error_response();
        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = actix_web::body::to_bytes(res.into_body()).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["error"], "could not create session");
    }
}
