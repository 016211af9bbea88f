pub mod handlers;
pub mod password;
pub mod session;
pub mod users;

/// Name of the session cookie.
pub const SESSION_COOKIE: &str = "palaver_session";
