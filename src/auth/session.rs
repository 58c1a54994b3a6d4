//! Route gating for the web client.
//!
//! The client asks where a visitor on a given route belongs. Any failure to
//! establish identity counts as "signed out"; there is no retry.

use axum::http::HeaderMap;
use serde::Serialize;

use crate::auth::middleware::{authenticate, AuthUser};
use crate::config::Config;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Landing,
    Login,
    Dashboard,
    Financial,
}

impl Route {
    pub const LANDING: &'static str = "/";
    pub const LOGIN: &'static str = "/login";
    pub const DASHBOARD: &'static str = "/dashboard";
    pub const FINANCIAL: &'static str = "/dashboard/financial";

    /// Unknown paths are treated as the landing dispatcher.
    pub fn parse(path: &str) -> Self {
        match path.trim_end_matches('/') {
            "/login" => Route::Login,
            "/dashboard" => Route::Dashboard,
            "/dashboard/financial" => Route::Financial,
            _ => Route::Landing,
        }
    }

    pub fn path(self) -> &'static str {
        match self {
            Route::Landing => Self::LANDING,
            Route::Login => Self::LOGIN,
            Route::Dashboard => Self::DASHBOARD,
            Route::Financial => Self::FINANCIAL,
        }
    }

    fn requires_identity(self) -> bool {
        matches!(self, Route::Dashboard | Route::Financial)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "decision", content = "to", rename_all = "snake_case")]
pub enum RouteDecision {
    Stay,
    Redirect(&'static str),
}

pub fn guard_route(route: Route, signed_in: bool) -> RouteDecision {
    match (signed_in, route) {
        (false, Route::Landing | Route::Login) => RouteDecision::Stay,
        (false, _) => RouteDecision::Redirect(Route::LOGIN),
        (true, r) if r.requires_identity() => RouteDecision::Stay,
        (true, _) => RouteDecision::Redirect(Route::DASHBOARD),
    }
}

pub fn resolve_identity(headers: &HeaderMap, config: &Config) -> Option<AuthUser> {
    match authenticate(headers, config) {
        Ok(user) => Some(user),
        Err(e) => {
            tracing::debug!(error = %e, "No session identity");
            None
        }
    }
}
