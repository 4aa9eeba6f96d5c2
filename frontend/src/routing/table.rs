//! The application's route table.
//!
//! Entries are tried in order and the first match wins, so the table must
//! list more specific patterns before catch-alls.

use super::matcher::{PathMatch, PathPattern};

/// Every destination the frontend knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Admin,
    Login,
    SignUp,
    Logout,
    Protected,
    Home,
}

impl Route {
    /// Whether rendering this route requires an authenticated session.
    pub fn is_guarded(self) -> bool {
        matches!(self, Route::Protected)
    }

    /// Canonical path used when linking to the route.
    pub fn path(self) -> &'static str {
        match self {
            Route::Admin => "/admin",
            Route::Login => "/login",
            Route::SignUp => "/signup",
            Route::Logout => "/logout",
            Route::Protected => "/protected",
            Route::Home => "/",
        }
    }
}

/// A resolved location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteMatch {
    pub route: Route,
    pub matched: String,
    pub rest: String,
}

#[derive(Debug, Clone)]
struct RouteEntry {
    pattern: PathPattern,
    route: Route,
}

#[derive(Debug, Clone)]
pub struct RouteTable {
    entries: Vec<RouteEntry>,
}

impl Default for RouteTable {
    fn default() -> Self {
        Self::new()
            .with(PathPattern::prefix("/admin"), Route::Admin)
            .with(PathPattern::exact("/login"), Route::Login)
            .with(PathPattern::exact("/signup"), Route::SignUp)
            .with(PathPattern::exact("/logout"), Route::Logout)
            .with(PathPattern::prefix("/protected"), Route::Protected)
            .with(PathPattern::exact("/"), Route::Home)
    }
}

impl RouteTable {
    /// An empty table; nothing resolves.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Append an entry. Later entries lose to earlier ones.
    pub fn with(mut self, pattern: PathPattern, route: Route) -> Self {
        self.entries.push(RouteEntry { pattern, route });
        self
    }

    /// Resolve a location to the first matching route.
    pub fn resolve(&self, location: &str) -> Option<RouteMatch> {
        self.entries.iter().find_map(|entry| {
            entry
                .pattern
                .match_path(location)
                .map(|PathMatch { matched, rest }| RouteMatch {
                    route: entry.route,
                    matched,
                    rest,
                })
        })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
