//! Route table, login-redirect URLs, and the navigation guard.
//!
//! SYSTEM CONTEXT
//! ==============
//! `guard` decides whether a transition may proceed, `policy` holds the
//! prefix rules it evaluates, and the helpers here build and read the
//! `redirect` query parameter shared by the guard, the HTTP interceptor and
//! the login page.

pub mod guard;
pub mod policy;


/// A page route known to the application shell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AppRoute {
    pub path: &'static str,
    pub title: &'static str,
}

pub const HOME: AppRoute = AppRoute { path: "/", title: "Home" };
pub const USER_LOGIN: AppRoute = AppRoute { path: "/user/login", title: "User Login" };
pub const USER_REGISTER: AppRoute = AppRoute { path: "/user/register", title: "User Registration" };
pub const ADMIN_USER_MANAGE: AppRoute = AppRoute { path: "/admin/userManage", title: "User Management" };
pub const ADMIN_PICTURE_MANAGE: AppRoute = AppRoute { path: "/admin/pictureManage", title: "Picture Management" };
pub const ADD_PICTURE: AppRoute = AppRoute { path: "/add_picture", title: "Add Picture" };

pub const APP_ROUTES: &[AppRoute] =
    &[HOME, USER_LOGIN, USER_REGISTER, ADMIN_USER_MANAGE, ADMIN_PICTURE_MANAGE, ADD_PICTURE];

/// Title for the route matching `path` exactly, ignoring any query string.
#[must_use]
pub fn route_title(path: &str) -> Option<&'static str> {
    let path = path.split(['?', '#']).next().unwrap_or(path);
    APP_ROUTES.iter().find(|r| r.path == path).map(|r| r.title)
}

/// Build `<login_path>?redirect=<target>` with each path segment of
/// `target` percent-encoded and the `/` separators kept readable.
#[must_use]
pub fn login_redirect_href(login_path: &str, target: &str) -> String {
    let encoded: Vec<String> = target
        .split('/')
        .map(|segment| urlencoding::encode(segment).into_owned())
        .collect();
    format!("{login_path}?redirect={}", encoded.join("/"))
}

/// A path browsers resolve against the current origin. Backslashes count as
/// `/` and tab/CR/LF are stripped during URL parsing, so either could turn a
/// single leading `/` into a protocol-relative `//host`.
fn is_local_path(path: &str) -> bool {
    path.starts_with('/')
        && !path.starts_with("//")
        && !path.chars().any(|c| c == '\\' || c.is_control())
}

/// Resolve where to send the user after a successful login.
///
/// Reads the `redirect` parameter from a query string (with or without the
/// leading `?`). Absolute URLs on `origin` are reduced to their path; any
/// other absolute or protocol-relative target falls back to `/`.
#[must_use]
pub fn redirect_target(search: &str, origin: &str) -> String {
    let raw = search
        .trim_start_matches('?')
        .split('&')
        .find_map(|pair| pair.strip_prefix("redirect="));
    let Some(raw) = raw else {
        return HOME.path.to_owned();
    };
    let Ok(decoded) = urlencoding::decode(raw.trim()) else {
        return HOME.path.to_owned();
    };
    let decoded = decoded.trim();

    let origin = origin.trim_end_matches('/');
    let local = decoded
        .strip_prefix(origin)
        .filter(|_| !origin.is_empty())
        .unwrap_or(decoded);

    if is_local_path(local) {
        local.to_owned()
    } else {
        HOME.path.to_owned()
    }
}
