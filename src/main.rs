mod config;
mod dto;
mod handlers;
mod models;
mod repository;
mod service;

use axum::{
    Router,
    routing::{delete, get, post, put},
};

use std::sync::Arc;

use config::ServerConfig;
use handlers::{auth, rest};
use repository::{NoteStore, Repository};
use service::NoteService;

use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[tokio::main]
async fn main() {
    // Log setup
    tracing_subscriber::fmt::init();

    let config = ServerConfig::from_env().unwrap_or_else(|e| {
        tracing::error!("Invalid configuration: {e}");
        panic!("invalid configuration: {e}");
    });

    // Repository creation and migration
    let mut repo = Repository::new(config.database_dsn.clone())
        .await
        .unwrap_or_else(|e| {
            tracing::error!("Failed to establish database connection: {e}");
            panic!("failed to establish database connection: {e}");
        });

    repo.migrate().await.unwrap_or_else(|e| {
        tracing::error!("Failed to migrate database: {e}");
        panic!("failed to migrate database: {e}");
    });

    // Service creation
    let store: Arc<dyn NoteStore> = Arc::new(repo);
    let service = Arc::new(NoteService::new(store));

    let router = app(service)
        .layer(cors_layer(&config.cors_allowed_origins))
        .layer(TraceLayer::new_for_http());

    let listener = tokio::net::TcpListener::bind(config.socket_addr())
        .await
        .unwrap_or_else(|e| {
            tracing::error!("Failed to bind {}: {e}", config.socket_addr());
            panic!("failed to bind {}: {e}", config.socket_addr());
        });

    tracing::info!("REST server starting, listening on {}", config.socket_addr());

    if let Err(e) = axum::serve(listener, router).await {
        tracing::error!("HTTP server error: {e}");
        panic!("failed to run HTTP server: {e}");
    }
}

fn app(service: Arc<NoteService>) -> Router {
    Router::new()
        .route("/notes", post(rest::create_note))
        .route("/notes", get(rest::get_all_notes))
        .route("/notes/search", get(rest::search_notes))
        .route("/notes/title", get(rest::get_notes_by_title))
        .route("/notes/{id}", put(rest::update_note))
        .route("/notes/{id}", delete(rest::delete_note))
        .route("/notes/{id}", get(rest::get_one_note))
        .route("/auth/user-info", get(auth::user_info))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-doc/openapi.json", rest::ApiDoc::openapi()))
        .with_state(service)
}

/// Any origin is allowed unless a comma-separated whitelist is configured.
fn cors_layer(allowed_origins: &str) -> CorsLayer {
    if allowed_origins == "*" {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        let origins: Vec<axum::http::HeaderValue> = allowed_origins
            .split(',')
            .map(|origin| {
                origin
                    .trim()
                    .parse()
                    .expect("CORS_ALLOWED_ORIGINS entries must be valid origins")
            })
            .collect();

        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(Any)
            .allow_headers(Any)
    }
}

#[cfg(test)]
mod tests {
    use super::cors_layer;

    #[test]
    fn cors_layer_accepts_a_whitelist() {
        // Builds without panicking on well-formed origins.
        let _ = cors_layer("https://notes.example.org, http://localhost:4200");
        let _ = cors_layer("*");
    }
}
