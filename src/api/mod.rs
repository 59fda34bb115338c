mod error;
mod handlers;

pub use error::ApiError;
pub use handlers::INDEX_PATH;

use axum::{
    http::{HeaderValue, Method},
    routing::{delete, get, post},
    Router,
};
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};

use crate::config::ServerConfig;
use crate::store::RosterStore;

pub fn create_router(store: RosterStore, config: &ServerConfig) -> Router {
    Router::new()
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health))
        // Activities
        .route("/activities", get(handlers::list_activities))
        .route("/activities/{name}/signup", post(handlers::signup))
        .route("/activities/{name}/unregister", delete(handlers::unregister))
        .method_not_allowed_fallback(handlers::method_not_allowed)
        // Front-end
        .nest_service("/static", ServeDir::new(&config.static_dir))
        .fallback(handlers::not_found)
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(config.cors_origins.as_deref()))
        .with_state(store)
}

fn cors_layer(origins: Option<&[String]>) -> CorsLayer {
    let Some(origins) = origins else {
        return CorsLayer::permissive();
    };

    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin {:?}", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::DELETE])
        .allow_headers(Any)
}
