//! Noteboard - personal notes REST backend
//! Account registration, login, and JWT-gated CRUD plus search over
//! user-owned notes.

use anyhow::{Context, Result};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use noteboard_backend::{
    app::{build_router, AppState},
    auth::{JwtHandler, UserStore},
    models::Config,
    notes::NoteStore,
};

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let config = Config::from_env()?;

    let user_store = Arc::new(UserStore::new(&config.database_path)?);
    let note_store = Arc::new(NoteStore::new(&config.database_path)?);
    let jwt_handler = Arc::new(JwtHandler::new(
        config.access_token_secret.clone(),
        config.access_token_ttl_minutes,
    ));

    let app = build_router(AppState {
        user_store,
        note_store,
        jwt_handler,
    });

    let addr = format!("0.0.0.0:{}", config.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("🎯 Notes API listening on {}", addr);

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "noteboard_backend=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
