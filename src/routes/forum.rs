use askama::Template;
use axum::extract::{Form, Path, Query, State};
use axum::response::{IntoResponse, Redirect, Response};
use axum::routing::{get, post};
use axum::Router;

use crate::db::models::Post;
use crate::error::{AppError, AppResult};
use crate::extractors::MaybeUser;
use crate::flash::{self, Flash};
use crate::forms::{CommentForm, SearchQuery};
use crate::forum::comments::{self, CommentView};
use crate::forum::posts;
use crate::routes::home::Html;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/forum", get(listing))
        .route("/forum/{id}", get(topic))
        .route("/forum/{id}/comments", post(add_comment))
}

#[derive(Template)]
#[template(path = "pages/forum.html")]
struct ForumTemplate {
    posts: Vec<Post>,
    query: String,
    logged_in: bool,
    flash: Option<String>,
}

#[derive(Template)]
#[template(path = "pages/topic.html")]
struct TopicTemplate {
    post: Post,
    comments: Vec<CommentView>,
    is_owner: bool,
    logged_in: bool,
    flash: Option<String>,
}

/// GET /forum — all posts newest-first, optionally filtered by title search
async fn listing(
    State(state): State<AppState>,
    Query(search): Query<SearchQuery>,
    user: MaybeUser,
    flash: Flash,
) -> AppResult<Response> {
    let listed = posts::list_posts(&state.db, search.term())?;
    let (message, clear) = flash.into_parts();

    Ok((
        clear,
        Html(ForumTemplate {
            posts: listed,
            query: search.term().unwrap_or_default().to_string(),
            logged_in: user.0.is_some(),
            flash: message,
        }),
    )
        .into_response())
}

/// GET /forum/{id} — topic page with the post and its comments
async fn topic(
    State(state): State<AppState>,
    Path(id): Path<String>,
    user: MaybeUser,
    flash: Flash,
) -> AppResult<Response> {
    let post = posts::get_post(&state.db, &id)?.ok_or(AppError::NotFound)?;
    let comment_list = comments::list_for_post(&state.db, &id)?;
    let (message, clear) = flash.into_parts();

    let is_owner = user
        .0
        .as_ref()
        .map(|u| u.id == post.user_id)
        .unwrap_or(false);

    Ok((
        clear,
        Html(TopicTemplate {
            post,
            comments: comment_list,
            is_owner,
            logged_in: user.0.is_some(),
            flash: message,
        }),
    )
        .into_response())
}

/// POST /forum/{id}/comments — add a comment; anonymous submitters are sent
/// to the registration page
async fn add_comment(
    State(state): State<AppState>,
    Path(id): Path<String>,
    user: MaybeUser,
    Form(form): Form<CommentForm>,
) -> AppResult<Response> {
    let Some(user) = user.0 else {
        return Ok(Redirect::to("/register").into_response());
    };

    if posts::get_post(&state.db, &id)?.is_none() {
        return Err(AppError::NotFound);
    }

    let topic_url = format!("/forum/{}", id);
    let body = match form.validate() {
        Ok(body) => body,
        Err(msg) => return Ok(flash::redirect_with(&topic_url, msg)),
    };

    comments::create_comment(&state.db, &id, &user.id, &body)?;
    Ok(Redirect::to(&topic_url).into_response())
}
