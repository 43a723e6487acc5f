//! The single authorization policy for admin pages and admin APIs.

use actix_web::http::Method;

use super::session::Claims;

/// Where a rejected page navigation is sent.
pub const LOGIN_PAGE: &str = "/admin/login";

/// Accepted as admin regardless of the role claim.
// Carried over from the previous deployment's guard. It bypasses the role
// check for the seeded account only.
pub const FALLBACK_ADMIN_EMAIL: &str = crate::seed::ADMIN_EMAIL;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Public,
    /// An admin page; rejected navigations redirect to [`LOGIN_PAGE`].
    AdminPage,
    /// An admin API call; rejected calls get a 401.
    AdminApi,
}

/// Decide what a request to `path` with `method` requires.
pub fn classify(method: &Method, path: &str) -> Access {
    let path = match path.trim_end_matches('/') {
        "" => "/",
        trimmed => trimmed,
    };

    if *method == Method::OPTIONS {
        return Access::Public;
    }

    if under(path, "/admin") {
        return if path == LOGIN_PAGE {
            Access::Public
        } else {
            Access::AdminPage
        };
    }

    if under(path, "/api/admin") || under(path, "/api/uploads") {
        return Access::AdminApi;
    }

    if under(path, "/api/inquiries") {
        // The contact form is the only public inquiry operation.
        return if path == "/api/inquiries" && *method == Method::POST {
            Access::Public
        } else {
            Access::AdminApi
        };
    }

    if under(path, "/api/projects") || under(path, "/api/packages") {
        return if *method == Method::GET || *method == Method::HEAD {
            Access::Public
        } else {
            Access::AdminApi
        };
    }

    Access::Public
}

/// Whether the session may use admin routes.
pub fn is_admin(claims: &Claims) -> bool {
    claims.role == "ADMIN" || claims.email == FALLBACK_ADMIN_EMAIL
}

fn under(path: &str, prefix: &str) -> bool {
    path == prefix
        || path
            .strip_prefix(prefix)
            .is_some_and(|rest| rest.starts_with('/'))
}
