//! Route surface - path parsing and the login guard
//!
//! Navigation itself belongs to the surrounding shell; this module only
//! fixes the contract: which paths exist and which of them require a
//! session.

use crate::domain::entities::Session;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Login,
    Products,
    ProductDetail(u64),
    ProductCreate,
    ProductEdit(u64),
    Users,
    NotFound,
}

/// Result of guarding a navigation against the current session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteOutcome {
    Allow(Route),
    RedirectToLogin,
}

impl Route {
    pub fn parse(path: &str) -> Route {
        let segments: Vec<&str> = path.trim_matches('/').split('/').collect();
        match segments.as_slice() {
            [""] | ["login"] => Route::Login,
            ["products"] => Route::Products,
            ["products", "create"] => Route::ProductCreate,
            ["products", "edit", id] => match id.parse() {
                Ok(id) => Route::ProductEdit(id),
                Err(_) => Route::NotFound,
            },
            ["products", id] => match id.parse() {
                Ok(id) => Route::ProductDetail(id),
                Err(_) => Route::NotFound,
            },
            ["users"] => Route::Users,
            _ => Route::NotFound,
        }
    }

    pub fn requires_auth(&self) -> bool {
        !matches!(self, Route::Login | Route::NotFound)
    }
}

/// Every route but the login page redirects unauthenticated visitors
pub fn guard(route: Route, session: Option<&Session>) -> RouteOutcome {
    if route.requires_auth() && session.is_none() {
        RouteOutcome::RedirectToLogin
    } else {
        RouteOutcome::Allow(route)
    }
}
