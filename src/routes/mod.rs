pub mod assets;
pub mod auth;
pub mod forum;
pub mod home;
pub mod profile;

use axum::routing::get;
use axum::Router;

use crate::state::AppState;

/// The full route table. Layers and state are attached by the caller.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(home::index))
        .route("/assets/{*path}", get(assets::serve))
        .merge(auth::router())
        .merge(forum::router())
        .merge(profile::router())
        .fallback(home::not_found)
}
