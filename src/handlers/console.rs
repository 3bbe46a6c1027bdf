//! Console page endpoint behind the route guard.
//!
//! Rendering lives in the browser bundle; this handler only confirms that the
//! guarded page exists and describes it, so the client can mount the right
//! screen after the guard has let the request through.

use actix_web::{HttpRequest, HttpResponse, web};

use crate::{AppState, error::AppError};

/// `GET /console/{page:.*}` → `{"title": "Orders", "path": "/orders"}`.
pub async fn get_page(
    state: web::Data<AppState>,
    req: HttpRequest,
) -> Result<HttpResponse, AppError> {
    let page = req.match_info().query("page");
    let path = format!("/{page}");
    let entry = state
        .routes
        .resolve(&path)
        .ok_or_else(|| AppError::NotFound(format!("no console page at {path}")))?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "title": entry.title,
        "path": entry.descriptor.path,
    })))
}
