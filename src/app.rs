//! Application assembly: shared state and router construction.

use crate::{
    auth::{api as auth_api, auth_middleware, JwtHandler, UserStore},
    middleware::request_logging,
    notes::{api as notes_api, NoteStore},
};
use axum::{
    middleware,
    routing::{delete, get, post, put},
    Json, Router,
};
use serde::Serialize;
use std::sync::Arc;
use tower_http::cors::CorsLayer;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub user_store: Arc<UserStore>,
    pub note_store: Arc<NoteStore>,
    pub jwt_handler: Arc<JwtHandler>,
}

/// Build the full API router.
///
/// Public routes (welcome, health, account creation, login) are merged
/// with the protected surface, which sits behind the auth gate.
pub fn build_router(state: AppState) -> Router {
    let public_routes = Router::new()
        .route("/", get(welcome))
        .route("/health", get(health_check))
        .route("/create-account", post(auth_api::create_account))
        .route("/login", post(auth_api::login))
        .with_state(state.clone());

    let protected_routes = Router::new()
        .route("/get-user", get(auth_api::get_current_user))
        .nest(
            "/notes",
            Router::new()
                .route("/add-note", post(notes_api::add_note))
                .route("/edit-note/:note_id", put(notes_api::edit_note))
                .route("/get-all-notes", get(notes_api::get_all_notes))
                .route("/delete-note/:note_id", delete(notes_api::delete_note))
                .route("/update-note-pin/:note_id", put(notes_api::update_note_pin))
                .route("/search-notes", get(notes_api::search_notes)),
        )
        .route_layer(middleware::from_fn_with_state(
            state.jwt_handler.clone(),
            auth_middleware,
        ))
        .with_state(state);

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(middleware::from_fn(request_logging))
        .layer(CorsLayer::permissive())
}

async fn welcome() -> Json<WelcomeResponse> {
    Json(WelcomeResponse {
        message: "Welcome to Notes App".to_string(),
    })
}

async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

#[derive(Serialize)]
struct WelcomeResponse {
    message: String,
}

#[derive(Serialize)]
struct HealthResponse {
    status: String,
    version: String,
}
