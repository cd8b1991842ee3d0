/// Routing rules applied to an incoming request path before any store query.
#[derive(Debug, Clone)]
pub struct RouteRules {
    /// Paths starting with this prefix belong to the admin component.
    pub admin_prefix: String,
    /// Slug used when the path is empty (local/demo access only).
    pub demo_slug: String,
}

impl Default for RouteRules {
    fn default() -> Self {
        Self {
            admin_prefix: "/admin".to_string(),
            demo_slug: "demo".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// Owned by the admin component; the page pipeline never runs.
    Admin,
    /// A public tenant page identified by a non-empty slug.
    Page(String),
}

/// Resolves a request path into a route. Never fails.
pub fn resolve_route(path: &str, rules: &RouteRules) -> Route {
    if path.starts_with(&rules.admin_prefix) {
        return Route::Admin;
    }
    Route::Page(resolve_slug(path, &rules.demo_slug))
}

/// Strips the leading separator; an empty remainder maps to `fallback`.
pub fn resolve_slug(path: &str, fallback: &str) -> String {
    let slug = path.strip_prefix('/').unwrap_or(path);
    if slug.is_empty() {
        fallback.to_string()
    } else {
        slug.to_string()
    }
}
