//! Client for the business REST backend's authentication endpoints.
//!
//! The console never decides who a user is; it asks the backend and caches
//! the answer in the session store.
//!
//! ```rust,no_run
//! # async fn demo() -> Result<(), decor_admin::services::BackendError> {
//! use decor_admin::services::BackendClient;
//!
//! let backend = BackendClient::new("http://localhost:5000/api".into());
//! let login = backend.login("admin@decor.test", "secret").await?;
//! let me = backend.current_user(&login.token).await?;
//! assert_eq!(me.email, login.user.email);
//! # Ok(())
//! # }
//! ```

use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};

use crate::models::User;

#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    /// The backend rejected the credentials or token.
    #[error("backend rejected the credentials")]
    Unauthorized,

    #[error("backend returned {code}: {body}")]
    Status { code: u16, body: String },

    #[error("backend request failed: {0}")]
    Request(String),

    #[error("failed to parse backend response: {0}")]
    Parse(String),
}

impl From<reqwest::Error> for BackendError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            BackendError::Parse(e.to_string())
        } else {
            BackendError::Request(e.to_string())
        }
    }
}

/// Successful login as returned by `POST /auth/login`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: User,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum MeResponse {
    Wrapped { user: User },
    Bare(User),
}

#[derive(Debug, Clone)]
pub struct BackendClient {
    http: Client,
    base_url: String,
}

impl BackendClient {
    pub fn new(base_url: String) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    #[tracing::instrument(skip(self, password))]
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginResponse, BackendError> {
        let res = self
            .http
            .post(format!("{}/auth/login", self.base_url))
            .json(&serde_json::json!({ "email": email, "password": password }))
            .send()
            .await?;

        let res = Self::check_status(res).await?;
        let login = res.json::<LoginResponse>().await?;
        tracing::debug!(user_id = %login.user.id, role = ?login.user.role, "Backend accepted login");
        Ok(login)
    }

    /// Re-reads the user behind a backend token.
    #[tracing::instrument(skip(self, token))]
    pub async fn current_user(&self, token: &str) -> Result<User, BackendError> {
        let res = self
            .http
            .get(format!("{}/auth/me", self.base_url))
            .bearer_auth(token)
            .send()
            .await?;

        let res = Self::check_status(res).await?;
        match res.json::<MeResponse>().await? {
            MeResponse::Wrapped { user } | MeResponse::Bare(user) => Ok(user),
        }
    }

    async fn check_status(res: reqwest::Response) -> Result<reqwest::Response, BackendError> {
        let status = res.status();
        if status.is_success() {
            return Ok(res);
        }
        if status == StatusCode::UNAUTHORIZED {
            tracing::warn!("Backend answered 401");
            return Err(BackendError::Unauthorized);
        }
        let body = res.text().await.unwrap_or_default();
        tracing::error!(status_code = status.as_u16(), body = %body, "Backend request failed");
        Err(BackendError::Status {
            code: status.as_u16(),
            body,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::access::Role;

    #[test]
    fn trims_trailing_slash() {
        let client = BackendClient::new("http://api.local/v1/".into());
        assert_eq!(client.base_url(), "http://api.local/v1");
    }

    #[test]
    fn me_response_accepts_both_shapes() {
        let wrapped: MeResponse = serde_json::from_str(
            r#"{"user":{"id":1,"email":"a@decor.test","name":"A","role":"Admin"}}"#,
        )
        .unwrap();
        let bare: MeResponse =
            serde_json::from_str(r#"{"id":"c-9","email":"b@decor.test","role":"customer"}"#)
                .unwrap();

        let MeResponse::Wrapped { user } = wrapped else {
            panic!("expected wrapped shape");
        };
        assert_eq!(user.role, Some(Role::Admin));

        let MeResponse::Bare(user) = bare else {
            panic!("expected bare shape");
        };
        assert_eq!(user.role, Some(Role::Customer));
        assert_eq!(user.name, "");
    }
}
