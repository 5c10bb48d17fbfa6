//! Declarative route guard.
//!
//! Every API route and UI page is assigned an [`Access`] level. API routes
//! are checked by the [`enforce()`] middleware before their handler runs,
//! while UI pages are resolved by [`resolve()`] for the browser shell.
//! Anything absent from the policy is denied.

use std::fmt;

use axum::{
    extract::{MatchedPath, Request},
    middleware::Next,
    response::Response,
};
use serde::{Serialize, Serializer};
use service::domain::user::Role;

use crate::{define_error, Context, Error, Session};

/// Level of access required by a route or a page.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Access {
    /// Anyone may access.
    Public,

    /// Any signed-in user may access.
    Authenticated,

    /// Only signed-in users of the [`Role`] may access.
    Role(Role),
}

impl Access {
    /// Indicates whether the provided [`Session`] (if any) satisfies this
    /// [`Access`].
    #[must_use]
    pub fn allows(self, session: Option<&Session>) -> bool {
        match self {
            Self::Public => true,
            Self::Authenticated => session.is_some(),
            Self::Role(role) => session.is_some_and(|s| s.user.role == role),
        }
    }
}

impl fmt::Display for Access {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Public => write!(f, "public"),
            Self::Authenticated => write!(f, "authenticated"),
            Self::Role(role) => write!(f, "{role}"),
        }
    }
}

impl Serialize for Access {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        s.collect_str(self)
    }
}

/// API route [`Access`] policy: method, route pattern and [`Access`].
const API: &[(&str, &str, Access)] = &[
    ("GET", "/api/hotels", Access::Public),
    ("POST", "/api/hotels", Access::Role(Role::Admin)),
    ("GET", "/api/hotels/:id", Access::Public),
    ("PATCH", "/api/hotels/:id", Access::Role(Role::Admin)),
    ("DELETE", "/api/hotels/:id", Access::Role(Role::Admin)),
    ("GET", "/api/hotels/:id/rooms", Access::Public),
    ("PATCH", "/api/hotels/:id/rooms/:room_id", Access::Role(Role::Admin)),
    ("GET", "/api/rooms/disabled", Access::Public),
    ("GET", "/api/reservations", Access::Public),
    ("POST", "/api/reservations", Access::Public),
    ("GET", "/api/reservations/:id", Access::Public),
    ("DELETE", "/api/reservations/:id", Access::Public),
    ("POST", "/api/session", Access::Public),
    ("GET", "/api/session", Access::Authenticated),
    ("GET", "/api/routes", Access::Public),
    ("GET", "/api/routes/resolve", Access::Public),
];

/// UI page of the browser shell.
#[derive(Clone, Copy, Debug, Serialize)]
pub struct Page {
    /// Path of this [`Page`].
    pub path: &'static str,

    /// Human-readable title of this [`Page`].
    pub title: &'static str,

    /// [`Access`] required by this [`Page`].
    pub access: Access,
}

/// UI pages known to the guard.
pub const PAGES: &[Page] = &[
    Page {
        path: "/",
        title: "Home",
        access: Access::Public,
    },
    Page {
        path: "/hotels",
        title: "Hotels",
        access: Access::Public,
    },
    Page {
        path: "/reservations",
        title: "Reservations",
        access: Access::Public,
    },
    Page {
        path: "/login",
        title: "Sign in",
        access: Access::Public,
    },
    Page {
        path: "/admin",
        title: "Administration",
        access: Access::Role(Role::Admin),
    },
    Page {
        path: "/admin/hotels",
        title: "Manage hotels",
        access: Access::Role(Role::Admin),
    },
];

/// Page to sign in at.
pub const LOGIN_PAGE: &str = "/login";

/// Returns the [`Access`] required by the API route matching the `method`
/// and the `route` pattern, if the policy lists it.
#[must_use]
pub fn api_access(method: &http::Method, route: &str) -> Option<Access> {
    API.iter()
        .find(|(m, r, _)| *m == method.as_str() && *r == route)
        .map(|(_, _, access)| *access)
}

/// Returns the page a user of the [`Role`] lands on after signing in.
#[must_use]
pub fn landing(role: Role) -> &'static str {
    match role {
        Role::Admin => "/admin",
        Role::Client => "/hotels",
    }
}

/// Outcome of resolving a UI page.
#[derive(Clone, Copy, Debug, Serialize)]
pub struct Resolution {
    /// Resolved [`Page`] path.
    pub path: &'static str,

    /// [`Access`] required by the [`Page`].
    pub access: Access,

    /// Page to go to instead, if the [`Page`] should not be shown.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redirect: Option<&'static str>,
}

/// Resolves the UI page at the `path` for the provided [`Session`] (if any).
///
/// Pages the caller may not see redirect to the sign-in page, and the
/// sign-in page itself redirects signed-in users to their landing page.
///
/// # Errors
///
/// If no page exists at the `path`.
pub fn resolve(
    path: &str,
    session: Option<&Session>,
) -> Result<Resolution, Error> {
    let trimmed = match path.trim_end_matches('/') {
        "" => "/",
        p => p,
    };
    let page = PAGES
        .iter()
        .find(|p| p.path == trimmed)
        .ok_or(RouteError::PageNotFound)?;

    let redirect = if !page.access.allows(session) {
        Some(LOGIN_PAGE)
    } else if page.path == LOGIN_PAGE {
        session.map(|s| landing(s.user.role))
    } else {
        None
    };

    Ok(Resolution {
        path: page.path,
        access: page.access,
        redirect,
    })
}

/// Lists the UI pages visible to the provided [`Session`] (if any).
pub fn visible(
    session: Option<&Session>,
) -> impl Iterator<Item = &'static Page> + '_ {
    PAGES.iter().filter(move |p| p.access.allows(session))
}

/// Middleware enforcing the API route policy.
///
/// The resolved [`Session`] is passed to the handler in the request
/// extensions.
///
/// # Errors
///
/// If the route is absent from the policy, or the caller lacks the required
/// [`Access`].
pub async fn enforce(
    ctx: Context,
    mut req: Request,
    next: Next,
) -> Result<Response, Error> {
    let access = req
        .extensions()
        .get::<MatchedPath>()
        .and_then(|r| api_access(req.method(), r.as_str()))
        .ok_or(RouteError::NotAllowed)?;

    let session = match access {
        Access::Public => None,
        Access::Authenticated => Some(ctx.current_session().await?),
        Access::Role(role) => Some(ctx.require_role(role).await?),
    };
    if let Some(session) = session {
        _ = req.extensions_mut().insert(session);
    }

    Ok(next.run(req).await)
}

define_error! {
    enum RouteError {
        #[code = "ROUTE_NOT_ALLOWED"]
        #[status = FORBIDDEN]
        #[message = "Route is not allowed"]
        NotAllowed,

        #[code = "PAGE_NOT_FOUND"]
        #[status = NOT_FOUND]
        #[message = "Page not found"]
        PageNotFound,
    }
}

#[cfg(test)]
mod spec {
    use service::domain::user::Role;

    use super::{api_access, resolve, visible, Access, API, PAGES};

    #[test]
    fn hotel_mutations_require_admin() {
        for (method, route) in [
            (http::Method::POST, "/api/hotels"),
            (http::Method::PATCH, "/api/hotels/:id"),
            (http::Method::DELETE, "/api/hotels/:id"),
            (http::Method::PATCH, "/api/hotels/:id/rooms/:room_id"),
        ] {
            assert_eq!(
                api_access(&method, route),
                Some(Access::Role(Role::Admin)),
                "{method} {route}",
            );
        }
        assert_eq!(
            api_access(&http::Method::GET, "/api/hotels"),
            Some(Access::Public),
        );
    }

    #[test]
    fn unlisted_routes_are_denied() {
        assert_eq!(api_access(&http::Method::PUT, "/api/hotels/:id"), None);
        assert_eq!(api_access(&http::Method::GET, "/api/users"), None);
        assert!(API.iter().all(|(_, r, _)| r.starts_with("/api/")));
    }

    #[test]
    fn anonymous_sees_public_pages_only() {
        let pages = visible(None).map(|p| p.path).collect::<Vec<_>>();
        assert_eq!(pages, ["/", "/hotels", "/reservations", "/login"]);
        assert_eq!(PAGES.len(), 6);
    }

    #[test]
    fn admin_pages_redirect_anonymous_to_login() {
        let resolution = resolve("/admin/hotels/", None).unwrap();
        assert_eq!(resolution.path, "/admin/hotels");
        assert_eq!(resolution.redirect, Some("/login"));

        let resolution = resolve("/hotels", None).unwrap();
        assert_eq!(resolution.redirect, None);
        assert_eq!(resolution.access.to_string(), "public");

        let err = resolve("/nowhere", None).unwrap_err();
        assert_eq!(err.status_code, http::StatusCode::NOT_FOUND);
    }
}
