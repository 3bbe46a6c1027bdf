//! Module data gate.
//!
//! List screens ask here before fetching a module's records from the
//! backend, the same check a data handler performs with
//! [`require_module`](super::guard::require_module).

use actix_web::{HttpResponse, web};

use crate::{
    access::ModuleAccess, auth_middleware::CurrentUser, error::AppError,
    handlers::guard::require_module,
};

/// `GET /api/modules/{predicate}`, e.g. `/api/modules/requireOrdersAccess`.
///
/// # Responses
/// - `200 OK`: `{"module": "requireOrdersAccess", "granted": true}`
/// - `401 Unauthorized`: no session
/// - `403 Forbidden`: role not allowed
/// - `404 Not Found`: no predicate by that name
pub async fn get_module_gate(
    user: CurrentUser,
    name: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let module = ModuleAccess::from_name(&name)
        .ok_or_else(|| AppError::NotFound(format!("unknown module `{name}`")))?;
    require_module(user.user(), module)?;
    Ok(HttpResponse::Ok().json(serde_json::json!({ "module": module, "granted": true })))
}
