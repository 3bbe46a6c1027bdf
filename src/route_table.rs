//! The console's page table: every navigable page with its access rule and
//! menu title.

use serde::{Deserialize, Serialize};

use crate::access::{ModuleAccess, RequiredRole, Role, RouteDescriptor};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteEntry {
    pub title: String,
    #[serde(flatten)]
    pub descriptor: RouteDescriptor,
    /// Whether the page appears in the navigation menu.
    #[serde(default = "default_true")]
    pub in_menu: bool,
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteTable {
    entries: Vec<RouteEntry>,
}

impl RouteTable {
    pub fn new(entries: Vec<RouteEntry>) -> Self {
        Self { entries }
    }

    /// Parses a JSON array of entries. A `requiredRole` or `requiredAccess`
    /// name that is not recognized fails here rather than at decision time.
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        let entries: Vec<RouteEntry> = serde_json::from_str(raw)?;
        Ok(Self::new(entries))
    }

    /// The built-in admin console pages.
    pub fn console() -> Self {
        use ModuleAccess as M;

        let page = |title: &str, descriptor: RouteDescriptor| RouteEntry {
            title: title.to_string(),
            descriptor,
            in_menu: true,
        };
        let hidden = |title: &str, descriptor: RouteDescriptor| RouteEntry {
            title: title.to_string(),
            descriptor,
            in_menu: false,
        };

        Self::new(vec![
            hidden("Login", RouteDescriptor::public("/login")),
            hidden("Forgot password", RouteDescriptor::public("/forgot-password")),
            page("Dashboard", RouteDescriptor::with_access("/dashboard", M::Dashboard)),
            page("Enquiries", RouteDescriptor::with_access("/enquiries", M::Enquiries)),
            page("Orders", RouteDescriptor::with_access("/orders", M::Orders)),
            page("Video calls", RouteDescriptor::with_access("/video-calls", M::Sales)),
            page("Customers", RouteDescriptor::with_access("/customers", M::Customers)),
            page("Contacts", RouteDescriptor::with_access("/contacts", M::Contacts)),
            page("Products", RouteDescriptor::with_access("/products", M::Products)),
            page("Categories", RouteDescriptor::with_access("/categories", M::Categories)),
            page(
                "Business types",
                RouteDescriptor::with_access("/business-types", M::BusinessTypes),
            ),
            page("Sliders", RouteDescriptor::with_access("/sliders", M::Sliders)),
            page("SEO", RouteDescriptor::with_access("/seo", M::Seo)),
            page(
                "Pricing rules",
                RouteDescriptor::with_roles(
                    "/pricing",
                    RequiredRole::Many(vec![Role::Admin, Role::Sales]),
                ),
            ),
            page("Catalog file", RouteDescriptor::with_access("/catalog", M::Products)),
            page(
                "Staff management",
                RouteDescriptor::with_access("/staff", M::StaffManagement),
            ),
            hidden("Profile", RouteDescriptor::authenticated("/profile")),
        ])
    }

    pub fn entries(&self) -> &[RouteEntry] {
        &self.entries
    }

    /// Finds the entry for a request path.
    ///
    /// An entry matches when its path equals the request path or is a whole
    /// segment prefix of it (`/orders` matches `/orders/42`, not
    /// `/orders-archive`). The longest match wins.
    pub fn resolve(&self, path: &str) -> Option<&RouteEntry> {
        let path = normalize(path);
        self.entries
            .iter()
            .filter(|entry| {
                let prefix = normalize(&entry.descriptor.path);
                prefix == "/"
                    || path == prefix
                    || path
                        .strip_prefix(prefix)
                        .is_some_and(|rest| rest.starts_with('/'))
            })
            .max_by_key(|entry| normalize(&entry.descriptor.path).len())
    }
}

fn normalize(path: &str) -> &str {
    match path.trim_end_matches('/') {
        "" => "/",
        trimmed => trimmed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_exact_and_nested_paths() {
        let table = RouteTable::console();
        assert_eq!(table.resolve("/orders").unwrap().title, "Orders");
        assert_eq!(table.resolve("/orders/42/").unwrap().title, "Orders");
        assert!(table.resolve("/orders-archive").is_none());
        assert!(table.resolve("/nowhere").is_none());
    }

    #[test]
    fn longest_prefix_wins() {
        let table = RouteTable::new(vec![
            RouteEntry {
                title: "Products".into(),
                descriptor: RouteDescriptor::with_access("/products", ModuleAccess::Products),
                in_menu: true,
            },
            RouteEntry {
                title: "Product SEO".into(),
                descriptor: RouteDescriptor::with_access("/products/seo", ModuleAccess::Seo),
                in_menu: false,
            },
        ]);
        assert_eq!(table.resolve("/products/seo/7").unwrap().title, "Product SEO");
        assert_eq!(table.resolve("/products/7").unwrap().title, "Products");
    }

    #[test]
    fn console_paths_are_unique() {
        let table = RouteTable::console();
        let mut paths: Vec<_> = table.entries().iter().map(|e| &e.descriptor.path).collect();
        let total = paths.len();
        paths.sort();
        paths.dedup();
        assert_eq!(paths.len(), total);
    }

    #[test]
    fn loads_from_json() {
        let table = RouteTable::from_json(
            r#"[
                {"title":"Login","path":"/login","isPublic":true,"inMenu":false},
                {"title":"Orders","path":"/orders","requiredAccess":"requireOrdersAccess"}
            ]"#,
        )
        .unwrap();
        let orders = table.resolve("/orders/1").unwrap();
        assert!(orders.in_menu);
        assert_eq!(orders.descriptor.required_access, Some(ModuleAccess::Orders));

        assert!(
            RouteTable::from_json(r#"[{"title":"X","path":"/x","requiredAccess":"requireMagic"}]"#)
                .is_err()
        );
    }

    #[test]
    fn unknown_required_role_fails_to_load() {
        let err = RouteTable::from_json(
            r#"[{"title":"Reports","path":"/reports","requiredRole":"Manager"}]"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("Manager"), "{err}");

        let table = RouteTable::from_json(
            r#"[{"title":"Reports","path":"/reports","requiredRole":["Admin","Sales"]}]"#,
        )
        .unwrap();
        let reports = table.resolve("/reports").unwrap();
        assert_eq!(
            reports.descriptor.required_role.as_ref().map(RequiredRole::as_slice),
            Some(&[Role::Admin, Role::Sales][..])
        );
    }
}
