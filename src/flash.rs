//! One-shot flash messages carried in a short-lived cookie.
//!
//! A handler that redirects after a failed form submission sets the cookie;
//! the next page render reads the message and clears it. The message is
//! hex-encoded so arbitrary text stays a valid cookie value.

use std::convert::Infallible;

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::http::{header, HeaderName};
use axum::response::{AppendHeaders, IntoResponse, Redirect, Response};

pub const FLASH_COOKIE: &str = "palaver_flash";

/// Extractor for the pending flash message, if any.
pub struct Flash(pub Option<String>);

impl Flash {
    /// Split into the message and the header set that clears the cookie.
    pub fn into_parts(self) -> (Option<String>, AppendHeaders<Vec<(HeaderName, String)>>) {
        let headers = if self.0.is_some() {
            vec![(header::SET_COOKIE, clear_cookie())]
        } else {
            vec![]
        };
        (self.0, AppendHeaders(headers))
    }
}

impl<S> FromRequestParts<S> for Flash
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let message = get_cookie_value(parts, FLASH_COOKIE)
            .and_then(|v| hex::decode(v).ok())
            .and_then(|bytes| String::from_utf8(bytes).ok());
        Ok(Flash(message))
    }
}

/// Redirect and set a flash message for the target page to display.
pub fn redirect_with(to: &str, message: &str) -> Response {
    (
        AppendHeaders([(header::SET_COOKIE, set_cookie(message))]),
        Redirect::to(to),
    )
        .into_response()
}

pub fn set_cookie(message: &str) -> String {
    format!(
        "{}={}; HttpOnly; SameSite=Strict; Path=/; Max-Age=60",
        FLASH_COOKIE,
        hex::encode(message)
    )
}

pub fn clear_cookie() -> String {
    format!(
        "{}=; HttpOnly; SameSite=Strict; Path=/; Max-Age=0",
        FLASH_COOKIE
    )
}

fn get_cookie_value<'a>(parts: &'a Parts, name: &str) -> Option<&'a str> {
    parts
        .headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|s| s.split(';'))
        .map(|s| s.trim())
        .find_map(|cookie| {
            let mut split = cookie.splitn(2, '=');
            let key = split.next()?.trim();
            let val = split.next()?.trim();
            if key == name {
                Some(val)
            } else {
                None
            }
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{HeaderValue, Request, StatusCode};

    fn parts_with_cookie(cookie: &str) -> Parts {
        let mut request = Request::new(());
        request
            .headers_mut()
            .insert(header::COOKIE, HeaderValue::from_str(cookie).unwrap());
        request.into_parts().0
    }

    #[test]
    fn set_cookie_round_trips_through_extractor() {
        let cookie = set_cookie("Incorrect password");
        let pair = cookie.split(';').next().unwrap();
        let parts = parts_with_cookie(pair);
        let message = get_cookie_value(&parts, FLASH_COOKIE)
            .and_then(|v| hex::decode(v).ok())
            .and_then(|b| String::from_utf8(b).ok());
        assert_eq!(message.as_deref(), Some("Incorrect password"));
    }

    #[test]
    fn missing_cookie_yields_no_message() {
        let parts = parts_with_cookie("other=value");
        assert!(get_cookie_value(&parts, FLASH_COOKIE).is_none());
    }

    #[test]
    fn clear_cookie_expires_immediately() {
        assert!(clear_cookie().contains("Max-Age=0"));
    }

    #[test]
    fn redirect_with_sets_cookie_and_location() {
        let response = redirect_with("/login", "There is no such user");
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers().get(header::LOCATION).unwrap(), "/login");
        let cookie = response.headers().get(header::SET_COOKIE).unwrap();
        assert!(cookie.to_str().unwrap().starts_with(FLASH_COOKIE));
    }
}
