//! Shared state and HTTP API router for the Gazette server.
//!
//! [`build_router`] assembles the whole dispatch surface: public post and
//! comment routes, search, newsletter signup, and the admin moderation
//! routes behind the authentication gate. CORS and request tracing are
//! applied uniformly as router layers, and both unknown paths and known
//! paths hit with the wrong method answer with the route catalogue.

mod error;
mod routes;

pub use error::{ApiError, ROUTES};

use axum::http::{header, Method};
use axum::routing::{get, patch, post};
use axum::{middleware, Router};
use gazette_moderation::{AdminCredentials, Classifier};
use gazette_store::BlogStore;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Shared application state available to middleware and handlers.
#[derive(Clone)]
pub struct AppState {
    pub store: BlogStore,
    pub classifier: Arc<Classifier>,
    pub credentials: Arc<AdminCredentials>,
}

impl AppState {
    pub fn new(store: BlogStore, credentials: AdminCredentials) -> Self {
        Self {
            store,
            classifier: Arc::new(Classifier::new()),
            credentials: Arc::new(credentials),
        }
    }
}

/// Build the HTTP API router with the given state.
pub fn build_router(state: AppState) -> Router {
    let admin = Router::new()
        .route("/comments", get(routes::moderation_queue))
        .route(
            "/comments/{id}",
            patch(routes::update_comment_status).delete(routes::delete_comment),
        )
        .route("/stats", get(routes::comment_stats))
        .method_not_allowed_fallback(routes::unknown_route)
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            routes::require_admin,
        ));

    Router::new()
        .route("/api/posts", get(routes::list_posts))
        .route(
            "/api/posts/{id}/comments",
            get(routes::list_comments).post(routes::create_comment),
        )
        .route("/api/search", get(routes::search_posts))
        .route("/api/newsletter", post(routes::subscribe))
        .nest("/api/admin", admin)
        .fallback(routes::unknown_route)
        .method_not_allowed_fallback(routes::unknown_route)
        .layer(cors_layer())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// One CORS policy for every response: any origin, the API's method set,
/// and the two headers callers send. Preflight requests are answered by
/// the layer itself.
fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
}
