use askama::Template;
use axum::extract::{Form, State};
use axum::http::{header, HeaderMap};
use axum::response::{AppendHeaders, IntoResponse, Redirect, Response};

use crate::auth::{password, session, users, SESSION_COOKIE};
use crate::error::AppResult;
use crate::extractors::MaybeUser;
use crate::flash::{self, Flash};
use crate::forms::{LoginForm, RegisterForm};
use crate::routes::home::Html;
use crate::state::AppState;

// -- Templates --

#[derive(Template)]
#[template(path = "pages/login.html")]
pub struct LoginTemplate {
    pub logged_in: bool,
    pub flash: Option<String>,
}

#[derive(Template)]
#[template(path = "pages/register.html")]
pub struct RegisterTemplate {
    pub logged_in: bool,
    pub flash: Option<String>,
}

// -- Cookie helpers --

fn session_cookie(token: &str, max_age_hours: u64) -> String {
    let max_age_secs = max_age_hours * 3600;
    format!(
        "{}={}; HttpOnly; SameSite=Strict; Path=/; Max-Age={}",
        SESSION_COOKIE, token, max_age_secs
    )
}

fn clear_session_cookie() -> String {
    format!(
        "{}=; HttpOnly; SameSite=Strict; Path=/; Max-Age=0",
        SESSION_COOKIE
    )
}

fn get_cookie_value<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
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

// -- Login --

/// GET /login — render the login form; authenticated users go to /profile
pub async fn login_page(user: MaybeUser, flash: Flash) -> Response {
    if user.0.is_some() {
        return Redirect::to("/profile").into_response();
    }
    let (message, clear) = flash.into_parts();
    // Authenticated visitors were redirected above
    (
        clear,
        Html(LoginTemplate {
            logged_in: false,
            flash: message,
        }),
    )
        .into_response()
}

/// POST /login — verify credentials and establish a session
pub async fn login_submit(
    State(state): State<AppState>,
    user: MaybeUser,
    Form(form): Form<LoginForm>,
) -> AppResult<Response> {
    if user.0.is_some() {
        return Ok(Redirect::to("/profile").into_response());
    }

    let (username, password_input) = match form.validate() {
        Ok(fields) => fields,
        Err(msg) => return Ok(flash::redirect_with("/login", msg)),
    };

    let Some(existing) = users::find_by_username(&state.db, &username)? else {
        return Ok(flash::redirect_with("/login", "There is no such user"));
    };

    if !password::verify_password(&password_input, &existing.password_hash) {
        return Ok(flash::redirect_with("/login", "Incorrect password"));
    }

    let session =
        session::create_session(&state.db, &existing.id, state.config.auth.session_hours)?;
    Ok((
        AppendHeaders([(
            header::SET_COOKIE,
            session_cookie(&session.token, state.config.auth.session_hours),
        )]),
        Redirect::to("/profile"),
    )
        .into_response())
}

// -- Registration --

/// GET /register — render the registration form
pub async fn register_page(user: MaybeUser, flash: Flash) -> Response {
    if user.0.is_some() {
        return Redirect::to("/profile").into_response();
    }
    let (message, clear) = flash.into_parts();
    (
        clear,
        Html(RegisterTemplate {
            logged_in: false,
            flash: message,
        }),
    )
        .into_response()
}

/// POST /register — create the account and log it straight in
pub async fn register_submit(
    State(state): State<AppState>,
    user: MaybeUser,
    Form(form): Form<RegisterForm>,
) -> AppResult<Response> {
    if user.0.is_some() {
        return Ok(Redirect::to("/profile").into_response());
    }

    let (username, password_input) = match form.validate() {
        Ok(fields) => fields,
        Err(msg) => return Ok(flash::redirect_with("/register", msg)),
    };

    if users::find_by_username(&state.db, &username)?.is_some() {
        return Ok(flash::redirect_with(
            "/register",
            "Such username already exists",
        ));
    }

    let hash = password::hash_password(&password_input)?;
    let new_user = match users::create_user(&state.db, &username, &hash) {
        Ok(user) => user,
        // Races with a concurrent registration land on the unique index
        Err(e) if users::is_duplicate_username(&e) => {
            return Ok(flash::redirect_with(
                "/register",
                "Such username already exists",
            ));
        }
        Err(e) => return Err(e),
    };

    let session =
        session::create_session(&state.db, &new_user.id, state.config.auth.session_hours)?;
    Ok((
        AppendHeaders([(
            header::SET_COOKIE,
            session_cookie(&session.token, state.config.auth.session_hours),
        )]),
        Redirect::to("/profile"),
    )
        .into_response())
}

// -- Logout --

/// POST /logout — drop the session row and clear the cookie
pub async fn logout(State(state): State<AppState>, headers: HeaderMap) -> AppResult<Response> {
    if let Some(token) = get_cookie_value(&headers, SESSION_COOKIE) {
        session::delete_session(&state.db, token)?;
    }

    Ok((
        AppendHeaders([(header::SET_COOKIE, clear_session_cookie())]),
        Redirect::to("/login"),
    )
        .into_response())
}
