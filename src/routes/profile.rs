use askama::Template;
use axum::extract::{Form, Path, State};
use axum::response::{IntoResponse, Redirect, Response};
use axum::routing::{get, post};
use axum::Router;

use crate::auth::users;
use crate::db::models::Post;
use crate::error::AppResult;
use crate::extractors::CurrentUser;
use crate::flash::{self, Flash};
use crate::forms::PostForm;
use crate::forum::posts;
use crate::routes::home::Html;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/profile", get(profile))
        .route("/posts", post(create_post))
        .route("/posts/{id}/edit", get(edit_page).post(edit_submit))
        .route("/posts/{id}/delete", post(delete_post))
}

#[derive(Template)]
#[template(path = "pages/profile.html")]
struct ProfileTemplate {
    username: String,
    joined: String,
    posts: Vec<Post>,
    logged_in: bool,
    flash: Option<String>,
}

#[derive(Template)]
#[template(path = "pages/edit_post.html")]
struct EditPostTemplate {
    post: Post,
    logged_in: bool,
    flash: Option<String>,
}

/// GET /profile — the current user's posts plus the new-post form
async fn profile(
    State(state): State<AppState>,
    user: CurrentUser,
    flash: Flash,
) -> AppResult<Response> {
    let joined = users::find_by_id(&state.db, &user.id)?
        .map(|account| account.joined_on())
        .unwrap_or_default();
    let own_posts = posts::list_by_user(&state.db, &user.id)?;
    let (message, clear) = flash.into_parts();

    Ok((
        clear,
        Html(ProfileTemplate {
            username: user.username,
            joined,
            posts: own_posts,
            logged_in: true,
            flash: message,
        }),
    )
        .into_response())
}

/// POST /posts — create a post owned by the current user
async fn create_post(
    State(state): State<AppState>,
    user: CurrentUser,
    Form(form): Form<PostForm>,
) -> AppResult<Response> {
    let (title, text) = match form.validate() {
        Ok(fields) => fields,
        Err(msg) => return Ok(flash::redirect_with("/profile", msg)),
    };

    let post = posts::create_post(&state.db, &user.id, &user.username, &title, &text)?;
    Ok(Redirect::to(&format!("/forum/{}", post.id)).into_response())
}

/// GET /posts/{id}/edit — edit form prefilled with the stored post.
/// Non-owners are bounced to the forum listing without an error.
async fn edit_page(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<String>,
    flash: Flash,
) -> AppResult<Response> {
    let post = match posts::get_post(&state.db, &id)? {
        Some(post) if post.user_id == user.id => post,
        _ => return Ok(Redirect::to("/forum").into_response()),
    };

    let (message, clear) = flash.into_parts();
    Ok((
        clear,
        Html(EditPostTemplate {
            post,
            logged_in: true,
            flash: message,
        }),
    )
        .into_response())
}

/// POST /posts/{id}/edit — apply the edit; the owner check is part of the
/// update itself, so a non-owner submission silently changes nothing
async fn edit_submit(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<String>,
    Form(form): Form<PostForm>,
) -> AppResult<Response> {
    let (title, text) = match form.validate() {
        Ok(fields) => fields,
        Err(msg) => return Ok(flash::redirect_with(&format!("/posts/{}/edit", id), msg)),
    };

    if posts::update_post(&state.db, &id, &user.id, &title, &text)? {
        Ok(Redirect::to(&format!("/forum/{}", id)).into_response())
    } else {
        Ok(Redirect::to("/forum").into_response())
    }
}

/// POST /posts/{id}/delete — same silent owner gate as edit
async fn delete_post(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Response> {
    posts::delete_post(&state.db, &id, &user.id)?;
    Ok(Redirect::to("/forum").into_response())
}
