use askama::Template;
use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};

use crate::error::{AppResult, NotFoundTemplate};
use crate::extractors::MaybeUser;
use crate::state::AppState;

#[derive(Template)]
#[template(path = "pages/home.html")]
pub struct HomeTemplate {
    pub username: Option<String>,
    pub logged_in: bool,
    pub post_count: i64,
}

/// Wrapper to render askama templates as axum responses
pub struct Html<T: Template>(pub T);

impl<T: Template> IntoResponse for Html<T> {
    fn into_response(self) -> Response {
        match self.0.render() {
            Ok(body) => (
                StatusCode::OK,
                [(header::CONTENT_TYPE, "text/html; charset=utf-8")],
                body,
            )
                .into_response(),
            Err(e) => {
                tracing::error!("Template render error: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Template error").into_response()
            }
        }
    }
}

pub async fn index(State(state): State<AppState>, user: MaybeUser) -> AppResult<Response> {
    let conn = state.db.get()?;
    let post_count: i64 = conn.query_row("SELECT COUNT(*) FROM posts", [], |row| row.get(0))?;

    let username = user.0.map(|u| u.username);
    Ok(Html(HomeTemplate {
        logged_in: username.is_some(),
        username,
        post_count,
    })
    .into_response())
}

/// Fallback for unknown paths. Renders the 404 page.
pub async fn not_found(user: MaybeUser) -> Response {
    (
        StatusCode::NOT_FOUND,
        Html(NotFoundTemplate {
            logged_in: user.0.is_some(),
        }),
    )
        .into_response()
}
