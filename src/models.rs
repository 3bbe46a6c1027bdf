//! Data models shared by the decision layer and the HTTP handlers.
//!
//! Also holds [`AppState`], the shared state handed to every handler.

use serde::{Deserialize, Serialize};
use std::{fmt, sync::Arc};

use crate::{
    access::Role, config::AppConfig, route_table::RouteTable, services::BackendClient,
    session::{SessionError, SessionStore},
};

/// Backend user identifier. The REST backend hands out numeric ids for
/// staff and string ids for some imported customer records.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum UserId {
    Number(i64),
    Text(String),
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UserId::Number(n) => write!(f, "{n}"),
            UserId::Text(s) => f.write_str(s),
        }
    }
}

/// An authenticated console user as returned by the backend.
///
/// `role` is optional only so that a malformed backend record can still be
/// represented; such a user is denied by every decision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub email: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub role: Option<Role>,
}

/// Shared application state for all handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub sessions: SessionStore,
    pub backend: BackendClient,
    pub routes: Arc<RouteTable>,
}

impl AppState {
    /// Builds state from an already loaded configuration, using the console's
    /// built-in route table.
    pub fn new(config: AppConfig) -> Result<Self, SessionError> {
        let sessions = SessionStore::new(config.session_ttl)?;
        let backend = BackendClient::new(config.backend_url.clone());
        Ok(Self {
            config: Arc::new(config),
            sessions,
            backend,
            routes: Arc::new(RouteTable::console()),
        })
    }

    /// Loads configuration from the environment (and `.env`) and builds state.
    pub fn from_env() -> anyhow::Result<Self> {
        let config = AppConfig::from_env()?;
        Ok(Self::new(config)?)
    }
}
