pub mod error;
pub mod guard;
pub mod handlers;

use std::sync::Arc;

use axum::middleware;
use axum::routing::{get, post};
use eyre::{Context, Result};
use tower_http::cors::CorsLayer;

use crate::config::ServerConfig;
use crate::storage::ArcStorage;
use crate::tutor::TutorService;

#[derive(Clone)]
pub struct AppState {
    pub tutor: Arc<TutorService>,
    pub storage: ArcStorage,
    pub auth_token: Option<String>,
}

pub fn router(state: AppState) -> axum::Router {
    let protected = axum::Router::new()
        .route("/subjects/", get(handlers::list_subjects))
        .route(
            "/conversations/",
            get(handlers::list_conversations).post(handlers::create_conversation),
        )
        .route(
            "/conversations/:id/",
            get(handlers::get_conversation).delete(handlers::delete_conversation),
        )
        .route("/conversations/:id/chat/", post(handlers::chat))
        .route("/socratic-response/", post(handlers::socratic_response))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            guard::require_token,
        ));

    axum::Router::new()
        .route("/health", get(handlers::health))
        .merge(protected)
        .layer(CorsLayer::permissive())
        .with_state(state)
}

pub async fn serve(config: &ServerConfig, state: AppState) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(&config.listen)
        .await
        .wrap_err(format!("binding to {}", config.listen))?;
    log::info!("Listening on {}", config.listen);
    axum::serve(listener, router(state))
        .await
        .wrap_err("serving HTTP")
}
