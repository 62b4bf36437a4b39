// Admin authentication: bcrypt password check, Postgres-backed sessions, and
// the cookie guard on /api/admin routes.

pub mod handlers;
pub mod middleware;
pub mod password;
pub mod store;

/// Name of the session cookie set on login.
pub const SESSION_COOKIE: &str = "folio_session";

/// One week, matching the cookie Max-Age.
pub const SESSION_TTL_SECS: i64 = 7 * 24 * 60 * 60;
