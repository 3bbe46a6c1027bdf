//! Access-check endpoints the browser console calls to hide or disable UI.
//!
//! None of these change state; they expose the decision layer for the
//! current session user.

use actix_web::{HttpResponse, web};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::{
    AppState,
    access::{Action, ModuleAccess, Role, allowed_actions, can_access_route, can_perform_action},
    auth_middleware::CurrentUser,
    models::{User, UserId},
};

#[derive(Debug, Deserialize)]
pub struct RouteQuery {
    pub path: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RouteDecision {
    pub path: String,
    pub allowed: bool,
}

/// The user being acted upon. Only the fields the rule chain reads are
/// required; anything else the browser sends along (email, name) is ignored.
#[derive(Debug, Deserialize)]
pub struct ActionTarget {
    pub id: UserId,
    #[serde(default)]
    pub role: Option<Role>,
}

impl From<ActionTarget> for User {
    fn from(target: ActionTarget) -> Self {
        User {
            id: target.id,
            email: String::new(),
            name: String::new(),
            role: target.role,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ActionRequest {
    /// Omitted for actions with no target record.
    pub target: Option<ActionTarget>,
    #[serde(default)]
    pub action: Action,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ActionDecision {
    pub action: Action,
    pub allowed: bool,
}

/// `GET /api/access/actions` → `["view", ...]` for the current user.
pub async fn get_allowed_actions(user: CurrentUser) -> HttpResponse {
    HttpResponse::Ok().json(allowed_actions(user.user()))
}

/// Decides one action against a target user.
///
/// `POST /api/access/action` with `{ "target": { "id": 2, "role": "General" }, "action": "edit" }`.
/// `action` defaults to `view`. Anonymous callers always get `allowed: false`.
#[tracing::instrument(skip(user, body), fields(action = %body.action))]
pub async fn check_action(user: CurrentUser, body: web::Json<ActionRequest>) -> HttpResponse {
    let body = body.into_inner();
    let action = body.action;
    let target = body.target.map(User::from);
    let allowed = can_perform_action(user.user(), target.as_ref(), action);
    tracing::debug!(allowed, "Action decision");
    HttpResponse::Ok().json(ActionDecision { action, allowed })
}

/// Decides navigation to a console page.
///
/// `GET /api/access/route?path=/orders/12`. Paths not in the route table are
/// reported as not allowed.
pub async fn check_route(
    state: web::Data<AppState>,
    user: CurrentUser,
    query: web::Query<RouteQuery>,
) -> HttpResponse {
    let route = state.routes.resolve(&query.path).map(|e| &e.descriptor);
    HttpResponse::Ok().json(RouteDecision {
        path: query.path.clone(),
        allowed: can_access_route(user.user(), route),
    })
}

/// `GET /api/access/modules` → `{ "requireOrdersAccess": true, ... }`.
pub async fn get_module_access(user: CurrentUser) -> HttpResponse {
    let map: BTreeMap<&'static str, bool> = ModuleAccess::ALL
        .into_iter()
        .map(|m| (m.name(), m.allows(user.user())))
        .collect();
    HttpResponse::Ok().json(map)
}
