//! v1 API endpoints

pub mod users;

use axum::{
    routing::{get, post, put},
    Router,
};

use super::state::AppState;

/// Create v1 API router
pub fn create_v1_router() -> Router<AppState> {
    Router::new()
        .route("/users", get(users::list_users).post(users::create_user))
        .route(
            "/users/{id}",
            get(users::get_user).delete(users::delete_user),
        )
        .route(
            "/users/{id}/display-name",
            put(users::change_display_name),
        )
        .route("/users/{id}/dust", post(users::add_dust))
        .route("/users/{id}/dust/subtract", post(users::subtract_dust))
        .route("/users/{id}/activate", post(users::activate_user))
        .route("/users/{id}/deactivate", post(users::deactivate_user))
}
