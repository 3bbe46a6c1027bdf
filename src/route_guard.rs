//! Route guard middleware for console pages.
//!
//! Wraps a scope (normally `/console`), resolves the requested page in the
//! [`RouteTable`](crate::route_table::RouteTable), resolves the session user,
//! and asks [`can_access_route`] whether navigation is allowed:
//!
//! - allowed → the inner service runs
//! - denied, anonymous → `401 {"error": "authentication required"}`
//! - denied, signed in → `403 {"error": "..."}`
//! - page not in the table → the inner service runs (and usually 404s)
//! - no `AppState` registered → `500 {"error": "server misconfigured"}`

use actix_web::{
    Error, ResponseError,
    body::EitherBody,
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    web,
};
use futures::future::{Ready, ok};
use std::{
    future::Future,
    pin::Pin,
    rc::Rc,
    task::{Context, Poll},
};
use uuid::Uuid;

use crate::{AppState, access::can_access_route, auth_middleware::resolve_user, error::AppError};

#[derive(Clone)]
pub struct RouteGuard {
    mount: Rc<str>,
}

impl RouteGuard {
    /// `mount` is the scope prefix stripped before looking the page up.
    pub fn new(mount: &str) -> Self {
        Self {
            mount: Rc::from(mount.trim_end_matches('/')),
        }
    }
}

impl Default for RouteGuard {
    fn default() -> Self {
        Self::new("/console")
    }
}

impl<S, B> Transform<S, ServiceRequest> for RouteGuard
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RouteGuardService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ok(RouteGuardService {
            service,
            mount: self.mount.clone(),
        })
    }
}

pub struct RouteGuardService<S> {
    service: S,
    mount: Rc<str>,
}

impl<S, B> Service<ServiceRequest> for RouteGuardService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>>>>;

    fn poll_ready(&self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(cx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let page_path = req
            .path()
            .strip_prefix(&*self.mount)
            .filter(|rest| !rest.is_empty())
            .unwrap_or("/")
            .to_string();

        let Some(state) = req.app_data::<web::Data<AppState>>().cloned() else {
            tracing::error!("AppState missing, route guard cannot decide");
            let res = AppError::Internal("server misconfigured".into()).error_response();
            return Box::pin(async move { Ok(req.into_response(res).map_into_right_body()) });
        };

        let Some(entry) = state.routes.resolve(&page_path) else {
            let fut = self.service.call(req);
            return Box::pin(async move { Ok(fut.await?.map_into_left_body()) });
        };

        let user = resolve_user(req.request());
        if can_access_route(user.as_ref(), Some(&entry.descriptor)) {
            let fut = self.service.call(req);
            return Box::pin(async move { Ok(fut.await?.map_into_left_body()) });
        }

        let request_id = Uuid::new_v4();
        let err = match &user {
            None => {
                tracing::warn!(
                    %request_id,
                    page = %entry.descriptor.path,
                    "Anonymous request to protected page"
                );
                AppError::Unauthorized
            }
            Some(user) => {
                tracing::warn!(
                    %request_id,
                    user_id = %user.id,
                    role = ?user.role,
                    page = %entry.descriptor.path,
                    "Access to page denied"
                );
                AppError::Forbidden(format!("access to {} denied", entry.title))
            }
        };

        let res = err.error_response();
        Box::pin(async move { Ok(req.into_response(res).map_into_right_body()) })
    }
}
