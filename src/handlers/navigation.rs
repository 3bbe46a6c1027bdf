//! Navigation menu filtered to the pages the current user may open.

use actix_web::{HttpResponse, web};
use serde::{Deserialize, Serialize};

use crate::{
    AppState, access::can_access_route, auth_middleware::CurrentUser, models::User,
    route_table::RouteTable,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuItem {
    pub title: String,
    pub path: String,
}

/// Menu entries visible to `user`, in table order. Public pages and pages
/// flagged out of the menu are never listed.
pub fn visible_menu(table: &RouteTable, user: Option<&User>) -> Vec<MenuItem> {
    table
        .entries()
        .iter()
        .filter(|e| e.in_menu && !e.descriptor.is_public)
        .filter(|e| can_access_route(user, Some(&e.descriptor)))
        .map(|e| MenuItem {
            title: e.title.clone(),
            path: e.descriptor.path.clone(),
        })
        .collect()
}

/// `GET /api/navigation` → `[{"title": "Orders", "path": "/orders"}, ...]`.
///
/// Anonymous callers get an empty list rather than 401 so the login page can
/// call it unconditionally.
pub async fn get_navigation(state: web::Data<AppState>, user: CurrentUser) -> HttpResponse {
    HttpResponse::Ok().json(visible_menu(&state.routes, user.user()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{access::Role, models::UserId};

    fn titles(role: Option<Role>) -> Vec<String> {
        let user = role.map(|role| User {
            id: UserId::Number(1),
            email: "m@decor.test".into(),
            name: "M".into(),
            role: Some(role),
        });
        visible_menu(&RouteTable::console(), user.as_ref())
            .into_iter()
            .map(|m| m.title)
            .collect()
    }

    #[test]
    fn anonymous_sees_nothing() {
        assert!(titles(None).is_empty());
        assert!(titles(Some(Role::Customer)).is_empty());
    }

    #[test]
    fn sales_menu() {
        assert_eq!(
            titles(Some(Role::Sales)),
            vec![
                "Dashboard",
                "Enquiries",
                "Orders",
                "Video calls",
                "Customers",
                "Contacts",
                "Pricing rules",
            ]
        );
    }

    #[test]
    fn support_menu() {
        assert_eq!(
            titles(Some(Role::Support)),
            vec![
                "Dashboard",
                "Contacts",
                "Products",
                "Categories",
                "Business types",
                "Sliders",
                "SEO",
                "Catalog file",
            ]
        );
    }

    #[test]
    fn admins_see_every_menu_page() {
        let all = titles(Some(Role::Admin));
        assert_eq!(all, titles(Some(Role::SuperAdmin)));
        assert_eq!(all.len(), 14);
        assert!(all.iter().any(|t| t == "Staff management"));
    }
}
